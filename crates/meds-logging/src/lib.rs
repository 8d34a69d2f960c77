//! ---
//! meds_section: "03-logging"
//! meds_subsection: "module"
//! meds_type: "source"
//! meds_scope: "code"
//! meds_description: "Structured logging bootstrap shared by the test bed binaries."
//! meds_version: "v0.1.0"
//! meds_owner: "tbd"
//! ---
#![warn(missing_docs)]

use std::io;
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

/// Default filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize a stderr tracing subscriber.
///
/// Standard output is left untouched so that binaries which emit documents on
/// stdout stay pipeable. Calling this more than once is harmless.
pub fn init() {
    let _ = Registry::default()
        .with(env_filter())
        .with(subscriber_fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

/// Initialize a stderr subscriber plus a daily rolling file sink in `log_dir`.
///
/// The returned guard flushes the non-blocking file writer when dropped and
/// must be held for the lifetime of the process.
pub fn init_with_log_dir(log_dir: &Path, file_name: &str) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = subscriber_fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    let file_layer = subscriber_fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false);

    let _ = Registry::default()
        .with(env_filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}

/// Structured context attached to lifecycle events.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Component emitting the event (`redfish-stub`, `meds-compose-gen`, ...).
    pub component: Option<&'a str>,
    /// Hardware location identifier the event concerns.
    pub xname: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a component name.
    pub fn with_component(mut self, component: &'a str) -> Self {
        self.component = Some(component);
        self
    }

    /// Attach a hardware location identifier.
    pub fn with_xname(mut self, xname: &'a str) -> Self {
        self.xname = Some(xname);
        self
    }
}

/// Outcome recorded on lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// The step completed.
    Success,
    /// The step failed; the process is about to exit.
    Fault,
}

impl LifecycleOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            LifecycleOutcome::Success => "success",
            LifecycleOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event (startup, bind, shutdown, emit).
pub fn log_lifecycle_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: LifecycleOutcome,
) {
    let ctx = context.cloned().unwrap_or_default();
    let component = ctx.component.unwrap_or("");
    let xname = ctx.xname.unwrap_or("");
    match outcome {
        LifecycleOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            component,
            xname,
            message = %message
        ),
        LifecycleOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            component,
            xname,
            message = %message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }

    #[test]
    fn file_sink_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let guard = init_with_log_dir(&log_dir, "test.log").unwrap();
        assert!(log_dir.is_dir());
        drop(guard);
    }

    #[test]
    fn lifecycle_events_emit_without_panic() {
        init();
        let ctx = LogContext::new()
            .with_component("redfish-stub")
            .with_xname("x1000c0b0");
        log_lifecycle_event(Some(&ctx), "test.event", "started", LifecycleOutcome::Success);
        log_lifecycle_event(None, "test.event", "failed", LifecycleOutcome::Fault);
    }
}
