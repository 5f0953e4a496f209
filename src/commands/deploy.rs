//! Deploy command - upload the page and invalidate the CDN cache.

use anyhow::Result;

use crate::config::Config;
use crate::{deploy, preflight, target};

/// Execute the deploy command.
pub fn cmd_deploy(config: &Config, target_token: Option<&str>, dry_run: bool) -> Result<()> {
    let target = target::parse_or_usage(target_token)?;
    let specs = target.resolve(config);
    let steps = deploy::plan(&specs);

    if dry_run {
        deploy::print_plan(config, &steps);
        return Ok(());
    }

    preflight::ensure_ready(config)?;
    deploy::execute(config, &steps)?;
    println!("deploy complete");
    Ok(())
}
