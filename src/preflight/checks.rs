//! The concrete preflight checks.
//!
//! Checks verify outcomes, not proxies: the asset check reads the file and
//! looks for an HTML document rather than trusting `exists()`, and the
//! credentials check asks STS who we actually are.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::aws;
use crate::config::Config;

use super::types::CheckResult;

/// The `aws` binary must be reachable on PATH.
pub fn check_aws_cli() -> CheckResult {
    match which::which("aws") {
        Ok(path) => CheckResult::pass_with("aws CLI", &path.display().to_string()),
        Err(_) => CheckResult::fail(
            "aws CLI",
            "not found on PATH - install the AWS CLI (https://aws.amazon.com/cli/)",
        ),
    }
}

/// Credentials must resolve to a valid identity.
pub fn check_credentials(config: &Config) -> CheckResult {
    match aws::caller_identity(config) {
        Ok(identity) => CheckResult::pass_with(
            "aws credentials",
            &format!("account {} ({})", identity.account, identity.arn),
        ),
        Err(err) => CheckResult::fail("aws credentials", &format!("{err:#}")),
    }
}

/// The landing asset must exist and look like an HTML document.
pub fn check_asset(config: &Config) -> CheckResult {
    match validate_asset(&config.asset) {
        Ok(size) => CheckResult::pass_with("landing asset", &format!("{size} bytes, looks like HTML")),
        Err(err) => CheckResult::fail("landing asset", &format!("{err:#}")),
    }
}

/// Advisory: a `~/.aws` directory usually means a configured CLI.
pub fn check_aws_config_dir() -> CheckResult {
    let aws_dir = dirs::home_dir().map(|home| home.join(".aws"));
    match aws_dir {
        Some(dir) if dir.is_dir() => CheckResult::pass("aws config dir"),
        _ => CheckResult::warn(
            "aws config dir",
            "~/.aws not found - relying on environment credentials",
        ),
    }
}

/// Advisory: targets without a distribution id skip invalidation.
pub fn check_distributions(config: &Config) -> Vec<CheckResult> {
    let targets = [
        ("auth distribution", &config.auth.distribution),
        ("connect distribution", &config.connect.distribution),
    ];
    targets
        .iter()
        .map(|(name, distribution)| match distribution {
            Some(id) => CheckResult::pass_with(name, id),
            None => CheckResult::warn(name, "no distribution id configured - invalidation will be skipped"),
        })
        .collect()
}

/// Validate the asset is a real HTML document. Returns its size in bytes.
pub fn validate_asset(asset: &Path) -> Result<u64> {
    let content = fs::read_to_string(asset)
        .with_context(|| format!("could not read '{}'", asset.display()))?;
    if content.trim().is_empty() {
        bail!("'{}' is empty", asset.display());
    }
    if !content.to_ascii_lowercase().contains("<html") {
        bail!("'{}' does not contain an <html> tag", asset.display());
    }
    Ok(content.len() as u64)
}
