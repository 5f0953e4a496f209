//! Shutdown signal handling for the preview server.
//!
//! SIGTERM and SIGINT both trigger the same graceful shutdown: stop
//! accepting, let in-flight responses finish, exit 0.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown trigger shared between the signal task and the accept loop.
#[derive(Clone, Default)]
pub struct Shutdown {
    notify: Arc<Notify>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. A permit is stored if the accept loop is mid-accept,
    /// so the trigger is never lost.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}

/// Register signal handlers and spawn the task that waits on them.
#[cfg(unix)]
pub fn install(shutdown: Shutdown) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).context("could not register SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("could not register SIGINT handler")?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => println!("received SIGTERM, finishing in-flight requests"),
            _ = sigint.recv() => println!("received SIGINT, finishing in-flight requests"),
        }
        shutdown.trigger();
    });

    Ok(())
}

/// Non-Unix fallback: only Ctrl+C.
#[cfg(not(unix))]
pub fn install(shutdown: Shutdown) -> Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("received Ctrl+C, finishing in-flight requests");
            shutdown.trigger();
        }
    });
    Ok(())
}
