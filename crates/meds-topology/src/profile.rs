use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

pub const DEFAULT_IMAGE: &str = "artifactory.algol60.net/csm-docker/stable/csm-rie:1.1.0";
pub const DEFAULT_AUTH_CONFIG: &str = "root:root_password:Administrator";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_NETWORK: &str = "meds";

/// Settings shared by every emulator service in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmulatorProfile {
    pub image: String,
    /// `user:password:role` credential triple handed to the emulator.
    pub auth_config: String,
    pub port: u16,
    pub network: String,
}

impl Default for EmulatorProfile {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            auth_config: DEFAULT_AUTH_CONFIG.to_string(),
            port: DEFAULT_PORT,
            network: DEFAULT_NETWORK.to_string(),
        }
    }
}

/// Load a YAML profile override. Missing fields keep their defaults.
pub fn load_profile(path: impl AsRef<Path>) -> Result<EmulatorProfile, ProfileError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
