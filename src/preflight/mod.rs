//! Preflight checks for landingctl.
//!
//! Validates the AWS CLI, credentials, and the landing asset before a deploy.
//! Run standalone with `landingctl preflight`.

pub mod checks;
pub mod types;

use anyhow::{bail, Result};

pub use types::{CheckResult, CheckStatus, PreflightReport};

use crate::config::Config;

/// Run every check and collect a report.
pub fn run_preflight(config: &Config) -> PreflightReport {
    let mut results = vec![
        checks::check_aws_cli(),
        checks::check_credentials(config),
        checks::check_asset(config),
        checks::check_aws_config_dir(),
    ];
    results.extend(checks::check_distributions(config));
    PreflightReport { checks: results }
}

/// Fail-fast gate run before a deploy: aws CLI, credentials, asset.
///
/// Stops at the first failure so the operator sees one actionable message
/// (no point asking STS for an identity when the CLI is missing).
pub fn ensure_ready(config: &Config) -> Result<()> {
    let cli = checks::check_aws_cli();
    if cli.status == CheckStatus::Fail {
        bail!("{}", cli.describe());
    }
    let credentials = checks::check_credentials(config);
    if credentials.status == CheckStatus::Fail {
        bail!("{}", credentials.describe());
    }
    let asset = checks::check_asset(config);
    if asset.status == CheckStatus::Fail {
        bail!("{}", asset.describe());
    }
    Ok(())
}
