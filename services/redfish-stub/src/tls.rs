use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::error::StubError;

/// PEM encoded certificate and private key presented by the stub.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub cert_pem: String,
    pub key_pem: String,
}

impl TlsMaterial {
    /// Generate a throwaway self-signed certificate for `hostnames`.
    ///
    /// Clients talking to the stub are expected to skip certificate
    /// validation; nothing is persisted.
    pub fn self_signed(hostnames: &[String]) -> Result<Self, StubError> {
        let cert = rcgen::generate_simple_self_signed(hostnames.to_vec())?;
        Ok(Self {
            cert_pem: cert.serialize_pem()?,
            key_pem: cert.serialize_private_key_pem(),
        })
    }

    pub fn from_pem_files(cert: &Path, key: &Path) -> Result<Self, StubError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| StubError::Pem {
                path: path.to_path_buf(),
                source,
            })
        };
        Ok(Self {
            cert_pem: read(cert)?,
            key_pem: read(key)?,
        })
    }

    pub async fn rustls_config(&self) -> Result<RustlsConfig, StubError> {
        RustlsConfig::from_pem(
            self.cert_pem.clone().into_bytes(),
            self.key_pem.clone().into_bytes(),
        )
        .await
        .map_err(StubError::Tls)
    }
}
