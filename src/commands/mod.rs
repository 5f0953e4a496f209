//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `deploy` - upload the page and invalidate the CDN cache
//! - `serve` - preview the page locally
//! - `preflight` - run preflight checks
//! - `show` - display information

pub mod deploy;
pub mod preflight;
pub mod serve;
pub mod show;

pub use deploy::cmd_deploy;
pub use preflight::cmd_preflight;
pub use serve::cmd_serve;
pub use show::cmd_show_config;
