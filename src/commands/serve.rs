//! Serve command - run the local preview server.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::serve;

/// Execute the serve command. Builds the runtime here so the rest of the CLI
/// stays synchronous.
pub fn cmd_serve(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("could not start the async runtime")?;
    runtime.block_on(serve::run(config))
}
