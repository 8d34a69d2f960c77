//! Hardware location identifiers (xnames) for Mountain cabinet BMCs.
//!
//! Only the three BMC shapes produced by the cabinet layout are accepted:
//! `xXcCbB` (chassis BMC), `xXcCsSbB` (node BMC) and `xXcCrRbB` (router BMC).
use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter};

use crate::error::TopologyError;

/// Slot position inside a chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Compute blade slot (`sN`).
    Node(u8),
    /// Switch blade slot (`rN`).
    Router(u8),
}

/// BMC classes present in a Mountain cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum BmcKind {
    #[strum(serialize = "ChassisBMC")]
    ChassisBmc,
    #[strum(serialize = "NodeBMC")]
    NodeBmc,
    #[strum(serialize = "RouterBMC")]
    RouterBmc,
}

impl BmcKind {
    /// Mockup profile the emulator should present for this BMC class.
    pub fn mockup(&self) -> &'static str {
        match self {
            BmcKind::ChassisBmc => "CMM",
            BmcKind::NodeBmc => "EX425",
            BmcKind::RouterBmc => "Slingshot_Switch_Blade",
        }
    }
}

/// Parsed BMC location identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Xname {
    cabinet: u32,
    chassis: u8,
    slot: Option<Slot>,
    bmc: u8,
}

impl Xname {
    pub fn chassis_bmc(cabinet: u32, chassis: u8) -> Self {
        Self {
            cabinet,
            chassis,
            slot: None,
            bmc: 0,
        }
    }

    pub fn node_bmc(cabinet: u32, chassis: u8, slot: u8, bmc: u8) -> Self {
        Self {
            cabinet,
            chassis,
            slot: Some(Slot::Node(slot)),
            bmc,
        }
    }

    pub fn router_bmc(cabinet: u32, chassis: u8, slot: u8, bmc: u8) -> Self {
        Self {
            cabinet,
            chassis,
            slot: Some(Slot::Router(slot)),
            bmc,
        }
    }

    pub fn cabinet(&self) -> u32 {
        self.cabinet
    }

    pub fn chassis(&self) -> u8 {
        self.chassis
    }

    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    pub fn bmc(&self) -> u8 {
        self.bmc
    }

    pub fn kind(&self) -> BmcKind {
        match self.slot {
            None => BmcKind::ChassisBmc,
            Some(Slot::Node(_)) => BmcKind::NodeBmc,
            Some(Slot::Router(_)) => BmcKind::RouterBmc,
        }
    }
}

impl fmt::Display for Xname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}c{}", self.cabinet, self.chassis)?;
        match self.slot {
            Some(Slot::Node(slot)) => write!(f, "s{slot}")?,
            Some(Slot::Router(slot)) => write!(f, "r{slot}")?,
            None => {}
        }
        write!(f, "b{}", self.bmc)
    }
}

impl FromStr for Xname {
    type Err = TopologyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TopologyError::InvalidXname(value.to_string());
        let mut rest = value;

        let cabinet = take_component(&mut rest, 'x').ok_or_else(invalid)?;
        let chassis = take_component(&mut rest, 'c')
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(invalid)?;

        let slot = match rest.chars().next() {
            Some('s') => Some(Slot::Node(take_u8(&mut rest, 's').ok_or_else(invalid)?)),
            Some('r') => Some(Slot::Router(take_u8(&mut rest, 'r').ok_or_else(invalid)?)),
            _ => None,
        };

        let bmc = take_u8(&mut rest, 'b').ok_or_else(invalid)?;
        if !rest.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            cabinet,
            chassis,
            slot,
            bmc,
        })
    }
}

/// Parse a cabinet given either as `1000` or `x1000`.
pub fn parse_cabinet(value: &str) -> Result<u32, TopologyError> {
    let digits = value.trim().strip_prefix('x').unwrap_or(value.trim());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TopologyError::InvalidCabinet(value.to_string()));
    }
    digits
        .parse()
        .map_err(|_| TopologyError::InvalidCabinet(value.to_string()))
}

fn take_component(rest: &mut &str, prefix: char) -> Option<u32> {
    let tail = rest.strip_prefix(prefix)?;
    let end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    // Canonical form only: no leading zeros.
    if end == 0 || (end > 1 && tail.starts_with('0')) {
        return None;
    }
    let number = tail[..end].parse().ok()?;
    *rest = &tail[end..];
    Some(number)
}

fn take_u8(rest: &mut &str, prefix: char) -> Option<u8> {
    take_component(rest, prefix).and_then(|n| u8::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_bmc_shape() {
        assert_eq!(Xname::chassis_bmc(1000, 3).to_string(), "x1000c3b0");
        assert_eq!(Xname::node_bmc(1000, 0, 2, 1).to_string(), "x1000c0s2b1");
        assert_eq!(Xname::router_bmc(1000, 7, 5, 0).to_string(), "x1000c7r5b0");
    }

    #[test]
    fn parses_and_classifies() {
        let node: Xname = "x1000c0s2b1".parse().unwrap();
        assert_eq!(node, Xname::node_bmc(1000, 0, 2, 1));
        assert_eq!(node.kind(), BmcKind::NodeBmc);

        let router: Xname = "x9000c1r7b0".parse().unwrap();
        assert_eq!(router.kind(), BmcKind::RouterBmc);
        assert_eq!(router.slot(), Some(Slot::Router(7)));

        let chassis: Xname = "x1000c3b0".parse().unwrap();
        assert_eq!(chassis.kind(), BmcKind::ChassisBmc);
        assert_eq!(chassis.kind().mockup(), "CMM");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in [
            "",
            "x1000",
            "x1000c0",
            "x1000c0s2",
            "x1000c0s2b1n0",
            "1000c0b0",
            "xc0b0",
            "x1000c0sb0",
            "x1000c300b0",
            "x1000c0e0b0",
            "x01000c00b0",
            "x1000c0s02b1",
            "x1000c0r7b00",
        ] {
            assert!(
                matches!(bad.parse::<Xname>(), Err(TopologyError::InvalidXname(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn zero_components_still_parse() {
        let xname: Xname = "x0c0s0b0".parse().unwrap();
        assert_eq!(xname, Xname::node_bmc(0, 0, 0, 0));
        assert_eq!(xname.to_string(), "x0c0s0b0");
    }

    #[test]
    fn cabinet_accepts_bare_and_prefixed_numbers() {
        assert_eq!(parse_cabinet("1000").unwrap(), 1000);
        assert_eq!(parse_cabinet("x3000").unwrap(), 3000);
        assert!(parse_cabinet("x").is_err());
        assert!(parse_cabinet("c1000").is_err());
        assert!(parse_cabinet("-1").is_err());
    }

    #[test]
    fn every_bmc_kind_has_a_distinct_mockup() {
        use std::collections::HashSet;
        use strum::IntoEnumIterator;

        let mockups: HashSet<&str> = BmcKind::iter().map(|kind| kind.mockup()).collect();
        assert_eq!(mockups.len(), 3);
    }

    #[test]
    fn bmc_kind_names_follow_hardware_types() {
        assert_eq!(BmcKind::ChassisBmc.to_string(), "ChassisBMC");
        assert_eq!(BmcKind::RouterBmc.as_ref(), "RouterBMC");
        assert_eq!(BmcKind::RouterBmc.mockup(), "Slingshot_Switch_Blade");
    }
}
