//! ---
//! meds_section: "02-topology"
//! meds_subsection: "01-compose"
//! meds_type: "source"
//! meds_scope: "code"
//! meds_description: "docker-compose generator for Redfish emulator fleets."
//! meds_version: "v0.1.0"
//! meds_owner: "tbd"
//! ---
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use meds_logging::{log_lifecycle_event, LifecycleOutcome, LogContext};
use meds_topology::{
    load_profile, mountain_document, parse_cabinet, CabinetLayout, EmulatorProfile, MacPrefix,
    TopologyOptions,
};
use tracing::debug;

const COMPONENT: &str = "meds-compose-gen";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Emit a docker-compose file running one Redfish emulator per Mountain cabinet BMC",
    long_about = None
)]
struct Cli {
    /// Cabinet to populate, as `1000` or `x1000`. Repeat for several cabinets.
    #[arg(long = "cabinet", value_parser = parse_cabinet, default_value = "x1000")]
    cabinets: Vec<u32>,

    /// Assign each emulator a MAC address whose first octet is this prefix.
    /// Given without a value, the prefix is 02.
    #[arg(long, num_args = 0..=1, default_missing_value = "02", value_name = "OCTET")]
    mac_prefix: Option<MacPrefix>,

    /// YAML file overriding image, auth_config, port or network.
    #[arg(long, env = "MEDS_EMULATOR_PROFILE", value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Output file path. Use '-' for stdout.
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

impl Cli {
    fn topology_options(&self) -> Result<TopologyOptions> {
        let profile = match &self.profile {
            Some(path) => load_profile(path)?,
            None => EmulatorProfile::default(),
        };
        Ok(TopologyOptions {
            cabinets: self.cabinets.clone(),
            mac_prefix: self.mac_prefix,
            profile,
        })
    }
}

fn main() -> Result<()> {
    meds_logging::init();
    let cli = Cli::parse();

    let options = cli.topology_options()?;
    debug!(?options, "resolved topology options");
    let document = mountain_document(&options)?;

    if cli.output.as_os_str() == "-" {
        document
            .write_yaml(io::stdout().lock())
            .context("failed to write compose document to stdout")?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("failed to create output file {}", cli.output.display()))?;
        document
            .write_yaml(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    }

    for cabinet in &options.cabinets {
        let xname = format!("x{cabinet}");
        let ctx = LogContext::new()
            .with_component(COMPONENT)
            .with_xname(&xname);
        log_lifecycle_event(
            Some(&ctx),
            "compose.cabinet",
            &format!(
                "populated {} BMC emulators",
                CabinetLayout::MOUNTAIN.endpoints_per_cabinet()
            ),
            LifecycleOutcome::Success,
        );
    }

    let ctx = LogContext::new().with_component(COMPONENT);
    log_lifecycle_event(
        Some(&ctx),
        "compose.emit",
        &format!(
            "emitted {} emulator services for {} cabinet(s)",
            document.len(),
            options.cabinets.len()
        ),
        LifecycleOutcome::Success,
    );
    Ok(())
}
