use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use meds_logging::{log_lifecycle_event, LifecycleOutcome, LogContext};
use redfish_stub::{spawn_stub_server, StubConfig, TlsMode, DEFAULT_BIND, DEFAULT_HOSTNAME};
use tokio::signal;
use tracing::warn;

const COMPONENT: &str = "redfish-stub";

#[derive(Parser, Debug)]
#[command(
    name = "redfish-stub",
    about = "Stub Redfish endpoint that answers every request with a fixed ServiceRoot"
)]
struct Cli {
    /// Address to bind the listener to.
    #[arg(long, env = "MEDS_STUB_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// PEM certificate to serve instead of a generated one.
    #[arg(long, env = "MEDS_STUB_CERT", requires = "key", conflicts_with = "plain_http")]
    cert: Option<PathBuf>,

    /// PEM private key matching --cert.
    #[arg(long, env = "MEDS_STUB_KEY", requires = "cert")]
    key: Option<PathBuf>,

    /// Subject alternative names for the generated certificate.
    #[arg(long = "hostname", default_value = DEFAULT_HOSTNAME)]
    hostnames: Vec<String>,

    /// Serve plain HTTP instead of TLS.
    #[arg(long, env = "MEDS_STUB_PLAIN_HTTP")]
    plain_http: bool,

    /// Directory for a rolling log file in addition to stderr.
    #[arg(long, env = "MEDS_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn stub_config(&self) -> StubConfig {
        let tls = if self.plain_http {
            TlsMode::Disabled
        } else if let (Some(cert), Some(key)) = (&self.cert, &self.key) {
            TlsMode::PemFiles {
                cert: cert.clone(),
                key: key.clone(),
            }
        } else {
            TlsMode::SelfSigned {
                hostnames: self.hostnames.clone(),
            }
        };
        StubConfig {
            bind: self.bind,
            tls,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = match &cli.log_dir {
        Some(dir) => Some(
            meds_logging::init_with_log_dir(dir, "redfish-stub.log")
                .with_context(|| format!("failed to initialise logging in {}", dir.display()))?,
        ),
        None => {
            meds_logging::init();
            None
        }
    };

    let ctx = LogContext::new().with_component(COMPONENT);
    let config = cli.stub_config();

    let server = match spawn_stub_server(config).await {
        Ok(server) => server,
        Err(err) => {
            log_lifecycle_event(
                Some(&ctx),
                "stub.bind",
                &format!("{err:#}"),
                LifecycleOutcome::Fault,
            );
            return Err(err).with_context(|| format!("redfish stub failed to start on {}", cli.bind));
        }
    };

    log_lifecycle_event(
        Some(&ctx),
        "stub.start",
        &format!("serving ServiceRoot at {}", server.base_url()),
        LifecycleOutcome::Success,
    );

    server.run_until(shutdown_signal()).await?;

    log_lifecycle_event(Some(&ctx), "stub.stop", "shutdown complete", LifecycleOutcome::Success);
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        tokio::select! {
            _ = ctrl_c() => {},
            _ = terminate() => {},
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(?err, "failed to install Ctrl+C handler");
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(err) => warn!(?err, "failed to install SIGTERM handler"),
    }
}
