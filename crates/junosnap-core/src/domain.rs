// ── Data domains and request groups ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One category of device data with its own extractor and canonical record.
///
/// Every failure is tagged with the domain that produced it, so a broken
/// reply for one domain never hides the others.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Domain {
    Facts,
    Licensing,
    Radius,
    Syslog,
    Ntp,
    Dns,
    Snmp,
    Cpu,
    Memory,
    Disk,
    Temperature,
    Fans,
    Interfaces,
    Lldp,
    MacTable,
    RoutingTable,
    OspfOverview,
    OspfAreas,
    OspfNeighbors,
    OspfInterfaces,
    Vlans,
}

impl Domain {
    /// The request group this domain is polled with.
    pub fn group(self) -> Group {
        match self {
            Self::Facts
            | Self::Licensing
            | Self::Radius
            | Self::Syslog
            | Self::Ntp
            | Self::Dns
            | Self::Snmp => Group::DeviceInfo,
            Self::Cpu | Self::Memory | Self::Disk | Self::Temperature | Self::Fans => {
                Group::Hardware
            }
            Self::Interfaces => Group::Interfaces,
            Self::Lldp => Group::Lldp,
            Self::MacTable => Group::Mac,
            Self::RoutingTable => Group::Routing,
            Self::OspfOverview | Self::OspfAreas | Self::OspfNeighbors | Self::OspfInterfaces => {
                Group::Ospf
            }
            Self::Vlans => Group::Vlans,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A logical request that polls several domains together, sharing payloads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Group {
    DeviceInfo,
    Hardware,
    Interfaces,
    Lldp,
    Vlans,
    Mac,
    Routing,
    Ospf,
}

impl Group {
    /// Domains in the order they appear in a group report.
    pub fn domains(self) -> &'static [Domain] {
        match self {
            Self::DeviceInfo => &[
                Domain::Facts,
                Domain::Licensing,
                Domain::Radius,
                Domain::Syslog,
                Domain::Ntp,
                Domain::Dns,
                Domain::Snmp,
            ],
            Self::Hardware => &[
                Domain::Cpu,
                Domain::Memory,
                Domain::Disk,
                Domain::Temperature,
                Domain::Fans,
            ],
            Self::Interfaces => &[Domain::Interfaces],
            Self::Lldp => &[Domain::Lldp],
            Self::Vlans => &[Domain::Vlans],
            Self::Mac => &[Domain::MacTable],
            Self::Routing => &[Domain::RoutingTable],
            Self::Ospf => &[
                Domain::OspfOverview,
                Domain::OspfAreas,
                Domain::OspfNeighbors,
                Domain::OspfInterfaces,
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn domain_names_are_kebab_case() {
        assert_eq!(Domain::MacTable.to_string(), "mac-table");
        assert_eq!(Domain::OspfOverview.as_str(), "ospf-overview");
        assert_eq!("routing-table".parse::<Domain>().unwrap(), Domain::RoutingTable);
        assert_eq!(
            serde_json::to_value(Domain::OspfAreas).unwrap(),
            serde_json::json!("ospf-areas")
        );
    }

    #[test]
    fn every_domain_belongs_to_exactly_its_group() {
        for domain in Domain::iter() {
            let members = domain.group().domains();
            assert!(members.contains(&domain), "{domain} missing from its group");
        }
        let total: usize = Group::iter().map(|g| g.domains().len()).sum();
        assert_eq!(total, Domain::iter().count());
    }
}
