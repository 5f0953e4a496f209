//! Deployment planning and execution.
//!
//! The upload/invalidate sequence is computed as an explicit step plan before
//! anything runs, so `--dry-run` and the ordering tests can observe it
//! without touching the AWS CLI.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::aws;
use crate::config::Config;
use crate::target::TargetSpec;

/// One step of a deployment. Steps run strictly in order; the first failure
/// aborts the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Upload {
        target: &'static str,
        bucket: String,
    },
    Invalidate {
        target: &'static str,
        distribution: String,
    },
    /// No distribution configured for the target: warn, don't fail.
    SkipInvalidation {
        target: &'static str,
    },
}

/// Build the step plan for the resolved targets.
pub fn plan(specs: &[TargetSpec]) -> Vec<Step> {
    let mut steps = Vec::new();
    for spec in specs {
        steps.push(Step::Upload {
            target: spec.name,
            bucket: spec.bucket.clone(),
        });
        match &spec.distribution {
            Some(distribution) => steps.push(Step::Invalidate {
                target: spec.name,
                distribution: distribution.clone(),
            }),
            None => steps.push(Step::SkipInvalidation { target: spec.name }),
        }
    }
    steps
}

/// Print the plan without executing it.
pub fn print_plan(config: &Config, steps: &[Step]) {
    println!("Deployment plan for {}:", config.asset.display());
    for (index, step) in steps.iter().enumerate() {
        let line = match step {
            Step::Upload { target, bucket } => {
                format!("[{target}] upload to s3://{bucket}/")
            }
            Step::Invalidate {
                target,
                distribution,
            } => format!("[{target}] invalidate distribution {distribution} (/*)"),
            Step::SkipInvalidation { target } => {
                format!("[{target}] no distribution id configured - invalidation skipped")
            }
        };
        println!("  {}. {line}", index + 1);
    }
}

/// Execute the plan, sequentially and without retries.
pub fn execute(config: &Config, steps: &[Step]) -> Result<()> {
    let digest = asset_sha256(&config.asset)?;
    println!("asset {} sha256 {digest}", config.asset.display());

    for step in steps {
        match step {
            Step::Upload { target, bucket } => {
                let key = aws::object_key(&config.asset)?;
                println!(
                    "[{target}] uploading {} to s3://{bucket}/{key}",
                    config.asset.display()
                );
                aws::upload(config, bucket)?;
            }
            Step::Invalidate {
                target,
                distribution,
            } => {
                println!("[{target}] invalidating distribution {distribution} (/*)");
                let id = aws::invalidate(config, distribution)?;
                println!("[{target}] invalidation {id} submitted");
            }
            Step::SkipInvalidation { target } => {
                println!(
                    "warning: no distribution id configured for '{target}' - skipping cache invalidation"
                );
            }
        }
    }
    Ok(())
}

/// SHA-256 of the asset, printed before upload so the operator can
/// cross-check what shipped.
pub fn asset_sha256(asset: &Path) -> Result<String> {
    let bytes = fs::read(asset)
        .with_context(|| format!("could not read asset '{}'", asset.display()))?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
