use std::{
    future::Future,
    io,
    net::{SocketAddr, ToSocketAddrs},
    time::Duration,
};

use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpStream;
use tracing::Instrument as _;

use crate::{error::StartupError, handler};

const BACKLOG: i32 = 1024;
/// Pause after a failed accept, so errors like EMFILE do not busy-loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// The bound listening socket, handed to tokio.
#[derive(Debug)]
pub struct Listener {
    inner: tokio::net::TcpListener,
}

impl Listener {
    /// Binds to the first address `host` resolves to.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(host: &str, port: u16) -> Result<Listener, StartupError> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|source| StartupError::Resolve {
                host: host.to_owned(),
                source,
            })?
            .next()
            .ok_or_else(|| StartupError::NoAddress {
                host: host.to_owned(),
            })?;

        let inner = listen(addr).map_err(|source| StartupError::Bind { addr, source })?;
        tracing::debug!(message = "Bound listener", %host, %addr);
        Ok(Listener { inner })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Accepts connections until the process is killed. Each connection gets
    /// its own task and nothing is shared between them.
    pub async fn serve(self) {
        let listener = &self.inner;
        accept_loop(move || listener.accept()).await
    }
}

async fn accept_loop<F, Fut>(mut accept: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<(TcpStream, SocketAddr)>>,
{
    loop {
        let (stream, peer) = match accept().await {
            Ok(accepted) => accepted,
            Err(error) => {
                tracing::warn!(message = "Accept failed", %error, backoff = ?ACCEPT_ERROR_BACKOFF);
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };

        let span = tracing::debug_span!("connection", %peer);
        tokio::spawn(
            async move {
                tracing::debug!("Accepted connection");
                if let Err(error) = stream.set_nodelay(true) {
                    tracing::debug!(message = "Failed to set TCP_NODELAY", %error);
                }
                let io = TokioIo::new(stream);
                if let Err(error) = http1::Builder::new()
                    .serve_connection(io, service_fn(handler::handle))
                    .await
                {
                    tracing::debug!(message = "Connection error", %error);
                }
            }
            .instrument(span),
        );
    }
}

fn listen(addr: SocketAddr) -> io::Result<tokio::net::TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    // SO_REUSEADDR only skips TIME_WAIT; a live listener on the port still fails the bind.
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    socket.set_nonblocking(true)?;
    tokio::net::TcpListener::from_std(socket.into())
}
