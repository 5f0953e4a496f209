//! AWS CLI invocations: identity check, S3 upload, CloudFront invalidation.
//!
//! The AWS CLI owns credential resolution; landingctl only passes the
//! configured profile and region through and parses the JSON it prints.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::config::Config;
use crate::process::Cmd;

/// Content type the asset is uploaded with.
pub const CONTENT_TYPE: &str = "text/html";

/// Cache-control the asset is uploaded with. Deploys invalidate `/*`, so the
/// edge TTL only has to cover the window between invalidations.
pub const CACHE_CONTROL: &str = "public, max-age=300";

/// Identity reported by `aws sts get-caller-identity`.
#[derive(Debug, Deserialize)]
pub struct CallerIdentity {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
struct InvalidationResponse {
    #[serde(rename = "Invalidation")]
    invalidation: Invalidation,
}

#[derive(Debug, Deserialize)]
struct Invalidation {
    #[serde(rename = "Id")]
    id: String,
}

/// Resolve the identity the configured profile authenticates as.
pub fn caller_identity(config: &Config) -> Result<CallerIdentity> {
    let result = Cmd::new("aws")
        .args(["sts", "get-caller-identity", "--output", "json"])
        .args(["--profile", &config.profile])
        .error_msg("aws credentials check failed")
        .run()?;

    serde_json::from_str(result.stdout_trimmed())
        .context("could not parse `aws sts get-caller-identity` output")
}

/// Upload the asset to a bucket with the fixed content-type and cache-control.
pub fn upload(config: &Config, bucket: &str) -> Result<()> {
    let key = object_key(&config.asset)?;
    Cmd::new("aws")
        .args(["s3", "cp"])
        .arg(config.asset.to_string_lossy())
        .arg(format!("s3://{bucket}/{key}"))
        .args(["--content-type", CONTENT_TYPE])
        .args(["--cache-control", CACHE_CONTROL])
        .args(["--region", &config.region])
        .args(["--profile", &config.profile])
        .error_msg(format!("upload to s3://{bucket} failed"))
        .run_streaming()?;
    Ok(())
}

/// Invalidate every path under a distribution. Returns the invalidation id.
pub fn invalidate(config: &Config, distribution: &str) -> Result<String> {
    let result = Cmd::new("aws")
        .args(["cloudfront", "create-invalidation"])
        .args(["--distribution-id", distribution])
        .args(["--paths", "/*"])
        .args(["--output", "json"])
        .args(["--profile", &config.profile])
        .error_msg(format!("invalidation of distribution {distribution} failed"))
        .run()?;

    let parsed: InvalidationResponse = serde_json::from_str(result.stdout_trimmed())
        .context("could not parse `aws cloudfront create-invalidation` output")?;
    Ok(parsed.invalidation.id)
}

/// Object key the asset lands under: its file name.
pub fn object_key(asset: &Path) -> Result<&str> {
    match asset.file_name().and_then(|name| name.to_str()) {
        Some(name) => Ok(name),
        None => bail!("asset path '{}' has no file name", asset.display()),
    }
}
