use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StubError {
    #[error("failed to bind stub listener on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read PEM material from {path:?}")]
    Pem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to generate self-signed certificate")]
    Certificate(#[from] rcgen::RcgenError),
    #[error("failed to build TLS configuration")]
    Tls(#[source] std::io::Error),
    #[error("stub server exited with error")]
    Serve(#[source] std::io::Error),
    #[error("stub server task failed")]
    Task(#[from] tokio::task::JoinError),
}
