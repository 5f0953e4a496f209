//! Listener setup for the preview server.

use anyhow::{anyhow, Context, Result};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::ErrorKind;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create a `TcpListener` with `SO_REUSEADDR` so quick restarts don't trip
/// over sockets in TIME_WAIT. A port that is genuinely taken gets a targeted
/// diagnostic instead of a raw OS error.
pub fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket =
        Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).context("could not create socket")?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;

    if let Err(err) = socket.bind(&addr.into()) {
        if err.kind() == ErrorKind::AddrInUse {
            return Err(anyhow!(
                "port {} is already in use - is another preview server running? \
                 Set LANDING_PORT (or --port) to pick a different port",
                addr.port()
            ));
        }
        return Err(err).with_context(|| format!("could not bind {addr}"));
    }

    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener).context("could not register listener with the runtime")
}
