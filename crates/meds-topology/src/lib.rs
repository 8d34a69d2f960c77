//! ---
//! meds_section: "02-topology"
//! meds_subsection: "module"
//! meds_type: "source"
//! meds_scope: "code"
//! meds_description: "Mountain cabinet xnames and docker-compose emulator documents."
//! meds_version: "v0.1.0"
//! meds_owner: "tbd"
//! ---
//! Generates the docker-compose document that stands up one Redfish
//! interface emulator per BMC of a Mountain cabinet. Output is a pure function
//! of [`TopologyOptions`]; with the defaults it describes cabinet `x1000`.

pub mod compose;
pub mod error;
pub mod layout;
pub mod profile;
pub mod xname;

pub use compose::{
    mountain_document, EmptyMap, ServiceRecord, TopologyDocument, TopologyOptions,
    COMPOSE_VERSION,
};
pub use error::{ProfileError, TopologyError};
pub use layout::{generate_endpoints, CabinetLayout, Endpoint, MacPrefix};
pub use profile::{load_profile, EmulatorProfile};
pub use xname::{parse_cabinet, BmcKind, Slot, Xname};
