//! Stub Redfish endpoint.
//!
//! Every request, whatever its path or method, is answered with the same
//! ServiceRoot document. The listener is meant as a fixed target for client
//! integration tests and never inspects its input.

mod error;
mod payload;
mod server;
mod tls;

pub use error::StubError;
pub use payload::SERVICE_ROOT;
pub use server::{
    router, spawn_stub_server, StubConfig, StubServer, TlsMode, DEFAULT_BIND, DEFAULT_HOSTNAME,
};
pub use tls::TlsMaterial;
