//! landingctl - deploy and preview tooling for the hosted sign-in landing page.
//!
//! Two independent components share the same HTML asset:
//! - `deploy` uploads the page to S3 and invalidates CloudFront
//! - `serve` previews the page locally for magic-link and OAuth URL testing

use anyhow::Result;
use clap::{Parser, Subcommand};

use landingctl::commands;
use landingctl::config::Config;

#[derive(Parser)]
#[command(name = "landingctl")]
#[command(about = "Deploy and preview the hosted sign-in landing page")]
#[command(
    after_help = "QUICK START:\n  landingctl preflight      Check the aws CLI, credentials, and the asset\n  landingctl deploy all     Upload the page and invalidate caches\n  landingctl serve          Preview the page locally"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the landing page and invalidate the CDN cache
    Deploy {
        /// Deployment target: auth, connect, or all
        target: Option<String>,

        /// Print the step plan without invoking the AWS CLI
        #[arg(long)]
        dry_run: bool,
    },

    /// Serve the landing page locally for browser testing
    Serve {
        /// Bind host (overrides LANDING_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides LANDING_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run preflight checks (aws CLI, credentials, asset)
    Preflight {
        /// Exit non-zero if any check fails
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show the resolved configuration
    Config {
        /// Emit JSON instead of the human-readable listing
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Deploy { target, dry_run } => {
            commands::cmd_deploy(&config, target.as_deref(), dry_run)?;
        }

        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.preview.host = host;
            }
            if let Some(port) = port {
                config.preview.port = port;
            }
            commands::cmd_serve(&config)?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(&config, strict)?;
        }

        Commands::Show { what } => match what {
            ShowTarget::Config { json } => {
                commands::cmd_show_config(&config, json)?;
            }
        },
    }

    Ok(())
}
