use std::future::Future;
use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::StubError;
use crate::payload::service_root;
use crate::tls::TlsMaterial;

pub const DEFAULT_BIND: &str = "0.0.0.0:443";
pub const DEFAULT_HOSTNAME: &str = "localhost";

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// How the listener is secured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Generate a fresh self-signed certificate at startup.
    SelfSigned { hostnames: Vec<String> },
    /// Serve a certificate/key pair read from disk.
    PemFiles { cert: PathBuf, key: PathBuf },
    /// Plain HTTP.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    pub bind: SocketAddr,
    pub tls: TlsMode,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 443)),
            tls: TlsMode::SelfSigned {
                hostnames: vec![DEFAULT_HOSTNAME.to_string()],
            },
        }
    }
}

/// Router answering every path and method with the ServiceRoot document.
pub fn router() -> Router {
    Router::new()
        .fallback(service_root)
        .layer(TraceLayer::new_for_http())
}

enum Shutdown {
    Plain(oneshot::Sender<()>),
    Tls(Handle),
}

/// Handle to a running stub listener.
pub struct StubServer {
    addr: SocketAddr,
    tls: bool,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), StubError>>,
}

impl StubServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL clients should use, e.g. `https://127.0.0.1:8443`.
    pub fn base_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}", self.addr)
    }

    pub async fn shutdown(self) -> Result<(), StubError> {
        match self.shutdown {
            Shutdown::Plain(tx) => {
                let _ = tx.send(());
            }
            Shutdown::Tls(handle) => handle.graceful_shutdown(Some(SHUTDOWN_GRACE)),
        }
        self.task.await?
    }

    /// Serve until `signal` resolves or the listener fails.
    pub async fn run_until<F>(mut self, signal: F) -> Result<(), StubError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = &mut self.task => return result?,
            _ = signal => {}
        }
        self.shutdown().await
    }
}

/// Bind the listener and start serving in a background task.
///
/// Binding happens before this returns so a busy port is reported to the
/// caller instead of surfacing later from the task.
pub async fn spawn_stub_server(config: StubConfig) -> Result<StubServer, StubError> {
    let material = match &config.tls {
        TlsMode::SelfSigned { hostnames } => Some(TlsMaterial::self_signed(hostnames)?),
        TlsMode::PemFiles { cert, key } => Some(TlsMaterial::from_pem_files(cert, key)?),
        TlsMode::Disabled => None,
    };
    let rustls = match material {
        Some(material) => Some(material.rustls_config().await?),
        None => None,
    };

    let bind_err = |source| StubError::Bind {
        addr: config.bind,
        source,
    };
    let listener = StdTcpListener::bind(config.bind).map_err(bind_err)?;
    listener.set_nonblocking(true).map_err(bind_err)?;
    let addr = listener.local_addr().map_err(bind_err)?;

    let app = router();
    let tls = rustls.is_some();

    let (shutdown, task) = match rustls {
        Some(rustls) => {
            let handle = Handle::new();
            let server = axum_server::from_tcp_rustls(listener, rustls).handle(handle.clone());
            let task = tokio::spawn(async move {
                info!(address = %addr, "redfish stub listening (https)");
                server
                    .serve(app.into_make_service())
                    .await
                    .map_err(|err| {
                        error!(address = %addr, error = %err, "redfish stub exited with error");
                        StubError::Serve(err)
                    })
            });
            (Shutdown::Tls(handle), task)
        }
        None => {
            let listener = TcpListener::from_std(listener).map_err(bind_err)?;
            let (tx, rx) = oneshot::channel();
            let task = tokio::spawn(async move {
                info!(address = %addr, "redfish stub listening (http)");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = rx.await;
                    })
                    .await
                    .map_err(|err| {
                        error!(address = %addr, error = %err, "redfish stub exited with error");
                        StubError::Serve(err)
                    })
            });
            (Shutdown::Plain(tx), task)
        }
    };

    Ok(StubServer {
        addr,
        tls,
        shutdown,
        task,
    })
}
