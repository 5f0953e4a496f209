//! Configuration for landingctl.
//!
//! Read once at startup from the process environment. A `.env` file in the
//! working directory is loaded first (see `main`); real environment variables
//! win. Every variable has a default so a fresh checkout works without setup.

use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// Default bucket for the `auth` target.
pub const DEFAULT_AUTH_BUCKET: &str = "auth-landing-prod";
/// Default bucket for the `connect` target.
pub const DEFAULT_CONNECT_BUCKET: &str = "connect-landing-prod";
/// Default region passed to the AWS CLI.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Default profile passed to the AWS CLI.
pub const DEFAULT_PROFILE: &str = "default";
/// Default path to the landing page asset.
pub const DEFAULT_ASSET: &str = "site/index.html";
/// Default preview server bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default preview server bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// landingctl configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Bucket and distribution for the `auth` target (AUTH_BUCKET, AUTH_DISTRIBUTION_ID).
    pub auth: TargetConfig,
    /// Bucket and distribution for the `connect` target (CONNECT_BUCKET, CONNECT_DISTRIBUTION_ID).
    pub connect: TargetConfig,
    /// Region passed to the AWS CLI (AWS_REGION).
    pub region: String,
    /// Profile passed to the AWS CLI (AWS_PROFILE).
    pub profile: String,
    /// Path to the landing page HTML asset (LANDING_ASSET).
    pub asset: PathBuf,
    /// Preview server bind address (LANDING_HOST, LANDING_PORT).
    pub preview: PreviewConfig,
}

/// Per-target deployment destination.
#[derive(Debug, Clone, Serialize)]
pub struct TargetConfig {
    /// S3 bucket the asset is uploaded to.
    pub bucket: String,
    /// CloudFront distribution to invalidate, if one is configured.
    pub distribution: Option<String>,
}

/// Preview server bind address.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Result<Self> {
        let port = match var("LANDING_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("LANDING_PORT must be a port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            auth: TargetConfig {
                bucket: var("AUTH_BUCKET").unwrap_or_else(|| DEFAULT_AUTH_BUCKET.to_string()),
                distribution: var("AUTH_DISTRIBUTION_ID"),
            },
            connect: TargetConfig {
                bucket: var("CONNECT_BUCKET").unwrap_or_else(|| DEFAULT_CONNECT_BUCKET.to_string()),
                distribution: var("CONNECT_DISTRIBUTION_ID"),
            },
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            profile: var("AWS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            asset: var("LANDING_ASSET")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET)),
            preview: PreviewConfig {
                host: var("LANDING_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
        })
    }

    /// Print configuration for `show config`.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  AUTH_BUCKET: {}", self.auth.bucket);
        println!(
            "  AUTH_DISTRIBUTION_ID: {}",
            describe_distribution(&self.auth.distribution)
        );
        println!("  CONNECT_BUCKET: {}", self.connect.bucket);
        println!(
            "  CONNECT_DISTRIBUTION_ID: {}",
            describe_distribution(&self.connect.distribution)
        );
        println!("  AWS_REGION: {}", self.region);
        println!("  AWS_PROFILE: {}", self.profile);
        println!("  LANDING_ASSET: {}", self.asset.display());
        if self.asset.exists() {
            println!("  Landing asset: FOUND");
        } else {
            println!("  Landing asset: NOT FOUND (deploy and serve will fail)");
        }
        println!(
            "  Preview server: http://{}:{}",
            self.preview.host, self.preview.port
        );
    }
}

fn describe_distribution(distribution: &Option<String>) -> &str {
    distribution
        .as_deref()
        .unwrap_or("(unset - invalidation skipped)")
}

/// Read an environment variable, treating empty values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
