//! Local preview server for the landing page.
//!
//! A single-process HTTP listener that answers every request with the same
//! static HTML file, for manual browser testing of magic-link and OAuth
//! callback URLs without deploying.

pub mod access;
pub mod handler;
pub mod listener;
pub mod signal;

use anyhow::{Context, Result};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

use crate::config::Config;
use signal::Shutdown;

/// How long shutdown waits for in-flight responses before giving up.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind, install signal handlers, and serve until shutdown.
pub async fn run(config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.preview.host, config.preview.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.preview.host, config.preview.port
            )
        })?;

    let listener = listener::bind(addr)?;
    let shutdown = Shutdown::new();
    signal::install(shutdown.clone())?;

    println!("preview server listening on http://{addr}");
    println!(
        "serving {} for every path ({} excluded)",
        config.asset.display(),
        handler::FAVICON_PATH
    );

    run_until_shutdown(listener, config.asset.clone(), shutdown).await
}

/// Accept loop. Separated from `run` so tests can drive it with an ephemeral
/// listener and an explicit shutdown trigger.
pub async fn run_until_shutdown(
    listener: TcpListener,
    asset: PathBuf,
    shutdown: Shutdown,
) -> Result<()> {
    let asset = Arc::new(asset);
    let active = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _peer)) => {
                        serve_connection(stream, Arc::clone(&asset), Arc::clone(&active));
                    }
                    Err(err) => eprintln!("error: failed to accept connection: {err}"),
                }
            }
            _ = shutdown.notified() => break,
        }
    }

    // Stop accepting, then let in-flight responses finish.
    drop(listener);
    drain(&active).await;
    println!("preview server stopped");
    Ok(())
}

fn serve_connection(stream: TcpStream, asset: Arc<PathBuf>, active: Arc<AtomicUsize>) {
    active.fetch_add(1, Ordering::SeqCst);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let service = service_fn(move |req| {
            let asset = Arc::clone(&asset);
            async move { Ok::<_, Infallible>(handler::handle(req, &asset).await) }
        });

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            // Browsers abandon keep-alive sockets; not worth more than a line.
            eprintln!("connection error: {err}");
        }
        active.fetch_sub(1, Ordering::SeqCst);
    });
}

async fn drain(active: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;
    while active.load(Ordering::SeqCst) > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}
