//! Mountain cabinet layout and BMC endpoint enumeration.
use std::fmt;
use std::str::FromStr;

use crate::error::TopologyError;
use crate::xname::{BmcKind, Slot, Xname};

/// Node slot codes are offset by this value when synthesizing MAC addresses.
const NODE_SLOT_MAC_OFFSET: u32 = 48;
/// Router slot codes are offset by this value when synthesizing MAC addresses.
const ROUTER_SLOT_MAC_OFFSET: u32 = 96;

/// Fixed component counts of a cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabinetLayout {
    pub chassis: u8,
    pub node_slots: u8,
    pub node_bmcs_per_slot: u8,
    pub router_slots: u8,
    pub router_bmcs_per_slot: u8,
}

impl CabinetLayout {
    /// EX3000/EX4000 liquid-cooled cabinet.
    pub const MOUNTAIN: CabinetLayout = CabinetLayout {
        chassis: 8,
        node_slots: 8,
        node_bmcs_per_slot: 2,
        router_slots: 8,
        router_bmcs_per_slot: 1,
    };

    /// Number of BMC endpoints in one cabinet.
    pub fn endpoints_per_cabinet(&self) -> usize {
        let per_chassis = 1
            + usize::from(self.node_slots) * usize::from(self.node_bmcs_per_slot)
            + usize::from(self.router_slots) * usize::from(self.router_bmcs_per_slot);
        usize::from(self.chassis) * per_chassis
    }

    /// Enumerate every BMC of `cabinet` in the canonical order: per chassis the
    /// chassis BMC, then node slots by BMC, then router slots by BMC.
    pub fn xnames(&self, cabinet: u32) -> Vec<Xname> {
        let mut xnames = Vec::with_capacity(self.endpoints_per_cabinet());
        for chassis in 0..self.chassis {
            xnames.push(Xname::chassis_bmc(cabinet, chassis));

            for slot in 0..self.node_slots {
                for bmc in 0..self.node_bmcs_per_slot {
                    xnames.push(Xname::node_bmc(cabinet, chassis, slot, bmc));
                }
            }
            for slot in 0..self.router_slots {
                for bmc in 0..self.router_bmcs_per_slot {
                    xnames.push(Xname::router_bmc(cabinet, chassis, slot, bmc));
                }
            }
        }
        xnames
    }

    /// Enumerate endpoints of `cabinet`, optionally assigning MAC addresses.
    pub fn endpoints(&self, cabinet: u32, mac_prefix: Option<&MacPrefix>) -> Vec<Endpoint> {
        self.xnames(cabinet)
            .into_iter()
            .map(|xname| Endpoint::new(xname, mac_prefix))
            .collect()
    }
}

/// One BMC that gets an emulator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub xname: Xname,
    pub kind: BmcKind,
    pub mac: Option<String>,
}

impl Endpoint {
    pub fn new(xname: Xname, mac_prefix: Option<&MacPrefix>) -> Self {
        Self {
            kind: xname.kind(),
            mac: mac_prefix.map(|prefix| prefix.address_for(&xname)),
            xname,
        }
    }
}

/// Leading octet of synthesized MAC addresses. The remaining five octets are
/// derived from the xname, so every address is six octets long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacPrefix(u8);

impl MacPrefix {
    /// Locally administered unicast prefix used by the MEDS test bed.
    pub const DEFAULT: MacPrefix = MacPrefix(0x02);

    pub fn new(octet: u8) -> Self {
        Self(octet)
    }

    /// Derive the MAC of a BMC: `PP:RR:rr:CC:SS:II`.
    pub fn address_for(&self, xname: &Xname) -> String {
        let (slot, index) = match xname.slot() {
            None => (0, 0),
            Some(Slot::Node(slot)) => (u32::from(slot) + NODE_SLOT_MAC_OFFSET, xname.bmc()),
            Some(Slot::Router(slot)) => (u32::from(slot) + ROUTER_SLOT_MAC_OFFSET, 0),
        };
        let cabinet = xname.cabinet();
        format!(
            "{}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self,
            (cabinet >> 8) & 0xFF,
            cabinet & 0xFF,
            xname.chassis(),
            slot & 0xFF,
            (u32::from(index) << 4) & 0xFF
        )
    }
}

impl Default for MacPrefix {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MacPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl FromStr for MacPrefix {
    type Err = TopologyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TopologyError::InvalidMacPrefix(value.to_string());
        if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u8::from_str_radix(value, 16).map(Self).map_err(|_| invalid())
    }
}

/// Enumerate endpoints for several cabinets, in cabinet order.
pub fn generate_endpoints(cabinets: &[u32], mac_prefix: Option<&MacPrefix>) -> Vec<Endpoint> {
    cabinets
        .iter()
        .flat_map(|cabinet| CabinetLayout::MOUNTAIN.endpoints(*cabinet, mac_prefix))
        .collect()
}
