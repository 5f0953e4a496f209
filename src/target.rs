//! Deployment target resolution.
//!
//! A target token names one or both of the deployment destinations. `all`
//! expands to `auth` then `connect`, in that order.

use anyhow::{bail, Result};

use crate::config::Config;

/// Usage line shown whenever the target token is missing or unknown.
pub const USAGE: &str = "usage: landingctl deploy <auth|connect|all>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Auth,
    Connect,
    All,
}

impl Target {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "auth" => Some(Self::Auth),
            "connect" => Some(Self::Connect),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Expand to the concrete destinations, in deployment order.
    pub fn resolve(self, config: &Config) -> Vec<TargetSpec> {
        match self {
            Self::Auth => vec![TargetSpec::auth(config)],
            Self::Connect => vec![TargetSpec::connect(config)],
            Self::All => vec![TargetSpec::auth(config), TargetSpec::connect(config)],
        }
    }
}

/// Parse the CLI's positional target, failing with usage text so the process
/// exits 1 rather than clap's 2 for a bad invocation.
pub fn parse_or_usage(token: Option<&str>) -> Result<Target> {
    match token {
        None => bail!("missing deployment target\n{USAGE}"),
        Some(token) => match Target::parse(token) {
            Some(target) => Ok(target),
            None => bail!("unknown deployment target '{token}'\n{USAGE}"),
        },
    }
}

/// A resolved deployment destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub name: &'static str,
    pub bucket: String,
    pub distribution: Option<String>,
}

impl TargetSpec {
    fn auth(config: &Config) -> Self {
        Self {
            name: "auth",
            bucket: config.auth.bucket.clone(),
            distribution: config.auth.distribution.clone(),
        }
    }

    fn connect(config: &Config) -> Self {
        Self {
            name: "connect",
            bucket: config.connect.bucket.clone(),
            distribution: config.connect.distribution.clone(),
        }
    }
}
