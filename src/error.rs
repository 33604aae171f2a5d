use std::{ffi::OsString, io, net::SocketAddr};

/// Failures that abort startup. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to read the machine hostname")]
    Hostname(#[source] nix::Error),
    #[error("hostname {0:?} is not valid UTF-8")]
    HostnameEncoding(OsString),
    #[error("failed to resolve {host} to a bind address")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("{host} did not resolve to any address")]
    NoAddress { host: String },
    #[error("failed to listen on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to write the startup banner")]
    Banner(#[source] io::Error),
    #[error("failed to start the async runtime")]
    Runtime(#[source] io::Error),
}
