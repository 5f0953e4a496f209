//! Show command - displays information.

use anyhow::{Context, Result};

use crate::config::Config;

/// Show the resolved configuration.
pub fn cmd_show_config(config: &Config, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(config).context("could not serialize configuration")?;
        println!("{rendered}");
    } else {
        config.print();
    }
    Ok(())
}
