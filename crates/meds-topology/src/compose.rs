//! docker-compose document describing one Redfish emulator per BMC.
use std::io::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TopologyError;
use crate::layout::{generate_endpoints, Endpoint, MacPrefix};
use crate::profile::EmulatorProfile;

/// Compose file format version emitted at the top of the document.
pub const COMPOSE_VERSION: &str = "3.7";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyMap {}

/// One emulator service entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub hostname: String,
    pub image: String,
    pub environment: Vec<String>,
    pub networks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

impl ServiceRecord {
    /// Build the emulator service for a BMC endpoint.
    pub fn emulator(endpoint: &Endpoint, profile: &EmulatorProfile) -> Self {
        let xname = endpoint.xname.to_string();
        Self {
            environment: vec![
                format!("MOCKUPFOLDER={}", endpoint.kind.mockup()),
                format!("XNAME={xname}"),
                format!("AUTH_CONFIG={}", profile.auth_config),
                format!("PORT={}", profile.port),
            ],
            hostname: xname,
            image: profile.image.clone(),
            networks: vec![profile.network.clone()],
            mac_address: endpoint.mac.clone(),
        }
    }

    /// Value of a `KEY=VALUE` environment entry.
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.iter().find_map(|entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }
}

/// Full compose document: version, networks and services in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyDocument {
    version: String,
    networks: IndexMap<String, EmptyMap>,
    services: IndexMap<String, ServiceRecord>,
}

impl TopologyDocument {
    pub fn new(profile: &EmulatorProfile) -> Self {
        let mut networks = IndexMap::new();
        networks.insert(profile.network.clone(), EmptyMap::default());
        Self {
            version: COMPOSE_VERSION.to_string(),
            networks,
            services: IndexMap::new(),
        }
    }

    /// Build a document from endpoints, keeping their order.
    pub fn from_endpoints<'a>(
        endpoints: impl IntoIterator<Item = &'a Endpoint>,
        profile: &EmulatorProfile,
    ) -> Result<Self, TopologyError> {
        let mut document = Self::new(profile);
        for endpoint in endpoints {
            document.insert(ServiceRecord::emulator(endpoint, profile))?;
        }
        Ok(document)
    }

    /// Append a service. Hostnames must be unique within the document.
    pub fn insert(&mut self, record: ServiceRecord) -> Result<(), TopologyError> {
        if self.services.contains_key(&record.hostname) {
            return Err(TopologyError::DuplicateService(record.hostname));
        }
        self.services.insert(record.hostname.clone(), record);
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn services(&self) -> &IndexMap<String, ServiceRecord> {
        &self.services
    }

    pub fn service(&self, xname: &str) -> Option<&ServiceRecord> {
        self.services.get(xname)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn to_yaml(&self) -> Result<String, TopologyError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn write_yaml<W: Write>(&self, mut writer: W) -> Result<(), TopologyError> {
        writer.write_all(self.to_yaml()?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Inputs for [`mountain_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyOptions {
    pub cabinets: Vec<u32>,
    pub mac_prefix: Option<MacPrefix>,
    pub profile: EmulatorProfile,
}

impl Default for TopologyOptions {
    fn default() -> Self {
        Self {
            cabinets: vec![1000],
            mac_prefix: None,
            profile: EmulatorProfile::default(),
        }
    }
}

/// Generate the emulator document for a set of Mountain cabinets.
pub fn mountain_document(options: &TopologyOptions) -> Result<TopologyDocument, TopologyError> {
    let endpoints = generate_endpoints(&options.cabinets, options.mac_prefix.as_ref());
    debug!(
        cabinets = ?options.cabinets,
        endpoints = endpoints.len(),
        "generated cabinet endpoints"
    );
    TopologyDocument::from_endpoints(&endpoints, &options.profile)
}
