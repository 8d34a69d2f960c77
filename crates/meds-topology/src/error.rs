use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while synthesizing or serializing a topology document.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("invalid xname '{0}'")]
    InvalidXname(String),
    #[error("invalid cabinet '{0}': expected a number or an x-prefixed number")]
    InvalidCabinet(String),
    #[error("invalid MAC prefix '{0}': expected three colon-separated hex octets")]
    InvalidMacPrefix(String),
    #[error("duplicate service '{0}' in topology document")]
    DuplicateService(String),
    #[error("failed to serialize topology document")]
    Serialize(#[from] serde_yaml::Error),
    #[error("failed to write topology document")]
    Write(#[from] std::io::Error),
}

/// Errors raised while loading an emulator profile override.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read emulator profile from {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse emulator profile at {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
