// ── OSPF ──
//
// OSPF is gated on the overview reply. A device without OSPF answers the
// overview RPC with a "not running" message; from then on every OSPF
// extractor returns the empty shape without looking at its payload. Before
// the overview has been seen, calling a detail extractor is a caller bug.

use std::collections::HashSet;

use serde_json::Value;

use super::first_section;
use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::{OspfArea, OspfInterface, OspfNeighbor, OspfOverview};
use crate::raw::Node;

/// Configuration path holding OSPF settings.
pub const CONFIG_PATH: &str = "protocols/ospf";

/// What the overview reply said about OSPF on this device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OspfCapability {
    #[default]
    Unknown,
    Unsupported,
    Supported,
}

impl OspfCapability {
    /// Classify an overview reply. Any text containing a "not running"
    /// marker means OSPF is not configured.
    pub fn detect(overview: &Value) -> Self {
        if mentions_not_running(overview) {
            Self::Unsupported
        } else {
            Self::Supported
        }
    }

    /// `Ok(true)` when payloads should be parsed, `Ok(false)` for the empty
    /// shape.
    fn gate(self, domain: Domain) -> Result<bool, CoreError> {
        match self {
            Self::Unknown => Err(CoreError::CapabilityUnknown { domain }),
            Self::Unsupported => Ok(false),
            Self::Supported => Ok(true),
        }
    }
}

fn mentions_not_running(value: &Value) -> bool {
    match value {
        Value::String(text) => {
            let text = text.to_ascii_lowercase();
            defaults::ospf::NOT_RUNNING_MARKERS
                .iter()
                .any(|marker| text.contains(marker))
        }
        Value::Array(items) => items.iter().any(mentions_not_running),
        Value::Object(map) => map.values().any(mentions_not_running),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

fn required<'a>(
    domain: Domain,
    payload: Option<&'a Value>,
    name: &'static str,
) -> Result<&'a Value, CoreError> {
    payload.ok_or(CoreError::MissingPayload { domain, payload: name })
}

fn ospf_config<'a>(domain: Domain, config: &'a Value) -> Option<Node<'a>> {
    Node::root(domain, config)
        .get("configuration")?
        .get("protocols")?
        .get("ospf")
}

fn overview_section<'a>(domain: Domain, overview: &'a Value) -> Result<Node<'a>, CoreError> {
    first_section(&Node::root(domain, overview), "ospf-overview-information")?.child("ospf-overview")
}

/// Router ID and reference bandwidth. Without a configuration payload the
/// Junos default reference bandwidth is reported.
pub fn ospf_overview(
    capability: OspfCapability,
    overview: Option<&Value>,
    config: Option<&Value>,
) -> Result<OspfOverview, CoreError> {
    let domain = Domain::OspfOverview;
    if !capability.gate(domain)? {
        return Ok(OspfOverview::default());
    }
    let section = overview_section(domain, required(domain, overview, "ospf-overview")?)?;

    let reference = config
        .and_then(|config| ospf_config(domain, config))
        .and_then(|ospf| ospf.text_of("reference-bandwidth"))
        .unwrap_or_else(|| defaults::ospf::REFERENCE_BANDWIDTH.to_owned());

    Ok(OspfOverview {
        id: section.required_text("ospf-router-id")?,
        reference,
    })
}

fn area_type(stub_type: &str) -> String {
    match stub_type.to_ascii_lowercase().as_str() {
        "" | "not stub" => "normal".to_owned(),
        "stub" => "stub".to_owned(),
        "nssa" | "not so stubby" => "nssa".to_owned(),
        other => other.to_owned(),
    }
}

pub fn ospf_areas(
    capability: OspfCapability,
    overview: Option<&Value>,
) -> Result<Vec<OspfArea>, CoreError> {
    let domain = Domain::OspfAreas;
    if !capability.gate(domain)? {
        return Ok(Vec::new());
    }
    let section = overview_section(domain, required(domain, overview, "ospf-overview")?)?;

    section
        .items_of("ospf-area-overview")?
        .iter()
        .map(|area| {
            let neighbors = match area.get("ospf-nbr-overview") {
                Some(nbr) => nbr.parse_or("ospf-nbr-up-count", "integer", 0)?,
                None => area.parse_or("ospf-nbr-up-count", "integer", 0)?,
            };
            Ok(OspfArea {
                id: area.required_text("ospf-area")?,
                area_type: area_type(&area.string_or("ospf-stub-type", "")),
                authentication: area
                    .string_or("authentication-type", defaults::ospf::AUTHENTICATION)
                    .to_ascii_lowercase(),
                neighbors,
            })
        })
        .collect()
}

pub fn ospf_neighbors(
    capability: OspfCapability,
    raw: Option<&Value>,
) -> Result<Vec<OspfNeighbor>, CoreError> {
    let domain = Domain::OspfNeighbors;
    if !capability.gate(domain)? {
        return Ok(Vec::new());
    }
    let root = Node::root(domain, required(domain, raw, "ospf-neighbor")?);

    first_section(&root, "ospf-neighbor-information")?
        .items_of("ospf-neighbor")?
        .iter()
        .map(|nbr| {
            Ok(OspfNeighbor {
                address: nbr.required_text("neighbor-address")?,
                interface: nbr.required_text("interface-name")?,
                state: nbr.required_text("ospf-neighbor-state")?,
                id: nbr.required_text("neighbor-id")?,
                area: nbr.string_or("ospf-area", defaults::ospf::AREA),
            })
        })
        .collect()
}

/// Interface names configured `passive` in any area.
fn passive_interfaces(domain: Domain, config: Option<&Value>) -> Result<HashSet<String>, CoreError> {
    let Some(ospf) = config.and_then(|config| ospf_config(domain, config)) else {
        return Ok(HashSet::new());
    };
    let mut passive = HashSet::new();
    for area in ospf.items_of("area")? {
        for interface in area.items_of("interface")? {
            if interface.has("passive") {
                passive.insert(interface.required_text("name")?);
            }
        }
    }
    Ok(passive)
}

pub fn ospf_interfaces(
    capability: OspfCapability,
    raw: Option<&Value>,
    config: Option<&Value>,
) -> Result<Vec<OspfInterface>, CoreError> {
    let domain = Domain::OspfInterfaces;
    if !capability.gate(domain)? {
        return Ok(Vec::new());
    }
    let root = Node::root(domain, required(domain, raw, "ospf-interface")?);
    let passive = passive_interfaces(domain, config)?;

    first_section(&root, "ospf-interface-information")?
        .items_of("ospf-interface")?
        .iter()
        .map(|iface| {
            let name = iface.required_text("interface-name")?;
            let cost = match iface.parse("interface-cost", "integer")? {
                Some(cost) => cost,
                None => match iface.get("ospf-interface-topology") {
                    Some(topology) => topology.parse_or("ospf-topology-metric", "integer", 0)?,
                    None => 0,
                },
            };
            Ok(OspfInterface {
                state: iface.required_text("ospf-interface-state")?,
                area: iface.string_or("ospf-area", defaults::ospf::AREA),
                neighbors: iface.parse_or("neighbor-count", "integer", 0)?,
                mtu: iface.parse_or("mtu", "integer", 0)?,
                cost,
                if_type: iface.string_or("interface-type", "").to_ascii_lowercase(),
                mask: iface.string_or("address-mask", ""),
                authentication: iface
                    .string_or("authentication-type", defaults::ospf::AUTHENTICATION)
                    .to_ascii_lowercase(),
                passive: iface.has("passive") || passive.contains(&name),
                name,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn not_running() -> Value {
        json!({"rpc-error": {"error-message": "OSPF instance is not running"}})
    }

    fn overview() -> Value {
        json!({
            "ospf-overview-information": {
                "ospf-overview": {
                    "instance-name": "master",
                    "ospf-router-id": "10.250.1.1",
                    "ospf-area-overview": [
                        {
                            "ospf-area": "0.0.0.10",
                            "ospf-stub-type": "Stub",
                            "authentication-type": "None",
                            "ospf-nbr-overview": {"ospf-nbr-up-count": "2"}
                        },
                        {
                            "ospf-area": "0.0.0.0",
                            "ospf-stub-type": "Not Stub",
                            "authentication-type": "MD5",
                            "ospf-nbr-overview": {"ospf-nbr-up-count": "4"}
                        }
                    ]
                }
            }
        })
    }

    fn config() -> Value {
        json!({
            "configuration": {
                "protocols": {
                    "ospf": {
                        "reference-bandwidth": "100g",
                        "area": {
                            "name": "0.0.0.10",
                            "interface": [
                                {"name": "ge-0/0/0.0"},
                                {"name": "irb.10", "passive": null}
                            ]
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn not_running_marker_gates_everything() {
        let capability = OspfCapability::detect(&not_running());
        assert_eq!(capability, OspfCapability::Unsupported);

        assert_eq!(ospf_overview(capability, None, None).unwrap(), OspfOverview::default());
        assert!(ospf_areas(capability, None).unwrap().is_empty());
        assert!(ospf_neighbors(capability, None).unwrap().is_empty());
        assert!(ospf_interfaces(capability, None, None).unwrap().is_empty());
    }

    #[test]
    fn marker_in_warning_text_is_case_insensitive() {
        let raw = json!({"ospf-overview-information": {"message": ["OSPF instance is NOT RUNNING"]}});
        assert_eq!(OspfCapability::detect(&raw), OspfCapability::Unsupported);
        assert_eq!(OspfCapability::detect(&overview()), OspfCapability::Supported);
    }

    #[test]
    fn unknown_capability_is_an_error() {
        let err = ospf_neighbors(OspfCapability::Unknown, None).unwrap_err();
        assert_eq!(err, CoreError::CapabilityUnknown { domain: Domain::OspfNeighbors });
    }

    #[test]
    fn supported_without_payload_is_an_error() {
        let err = ospf_interfaces(OspfCapability::Supported, None, None).unwrap_err();
        assert!(matches!(err, CoreError::MissingPayload { domain: Domain::OspfInterfaces, .. }));
    }

    #[test]
    fn overview_reads_reference_from_config() {
        let raw = overview();
        let cfg = config();
        let supported = OspfCapability::Supported;
        assert_eq!(
            ospf_overview(supported, Some(&raw), Some(&cfg)).unwrap(),
            OspfOverview { id: "10.250.1.1".into(), reference: "100g".into() }
        );
        assert_eq!(
            ospf_overview(supported, Some(&raw), None).unwrap().reference,
            "100m"
        );
    }

    #[test]
    fn areas_map_stub_types() {
        let raw = overview();
        let areas = ospf_areas(OspfCapability::Supported, Some(&raw)).unwrap();
        assert_eq!(
            areas,
            vec![
                OspfArea {
                    id: "0.0.0.10".into(),
                    area_type: "stub".into(),
                    authentication: "none".into(),
                    neighbors: 2,
                },
                OspfArea {
                    id: "0.0.0.0".into(),
                    area_type: "normal".into(),
                    authentication: "md5".into(),
                    neighbors: 4,
                },
            ]
        );
    }

    #[test]
    fn neighbor_fields() {
        let raw = json!({
            "ospf-neighbor-information": {
                "ospf-neighbor": {
                    "neighbor-address": "172.16.1.1",
                    "interface-name": "ge-0/0/0.0",
                    "ospf-neighbor-state": "Full",
                    "neighbor-id": "10.250.1.2",
                    "neighbor-priority": "128",
                    "activity-timer": "35"
                }
            }
        });
        let nbrs = ospf_neighbors(OspfCapability::Supported, Some(&raw)).unwrap();
        assert_eq!(
            nbrs,
            vec![OspfNeighbor {
                address: "172.16.1.1".into(),
                interface: "ge-0/0/0.0".into(),
                state: "Full".into(),
                id: "10.250.1.2".into(),
                area: String::new(),
            }]
        );
    }

    #[test]
    fn interfaces_merge_passive_from_config() {
        let raw = json!({
            "ospf-interface-information": {
                "ospf-interface": [
                    {
                        "interface-name": "ge-0/0/0.0",
                        "ospf-interface-state": "DR",
                        "ospf-area": "0.0.0.10",
                        "neighbor-count": "1",
                        "interface-type": "LAN",
                        "address-mask": "255.255.255.0",
                        "mtu": "1500",
                        "interface-cost": "10",
                        "authentication-type": "None"
                    },
                    {
                        "interface-name": "irb.10",
                        "ospf-interface-state": "DRother",
                        "ospf-area": "0.0.0.10",
                        "neighbor-count": "0",
                        "interface-type": "LAN",
                        "address-mask": "255.255.255.0",
                        "mtu": "1500",
                        "ospf-interface-topology": {"ospf-topology-name": "default", "ospf-topology-metric": "1"}
                    }
                ]
            }
        });
        let cfg = config();
        let ifaces = ospf_interfaces(OspfCapability::Supported, Some(&raw), Some(&cfg)).unwrap();
        assert_eq!(
            ifaces[0],
            OspfInterface {
                name: "ge-0/0/0.0".into(),
                state: "DR".into(),
                area: "0.0.0.10".into(),
                neighbors: 1,
                mtu: 1500,
                cost: 10,
                if_type: "lan".into(),
                mask: "255.255.255.0".into(),
                authentication: "none".into(),
                passive: false,
            }
        );
        assert_eq!(ifaces[1].cost, 1);
        assert!(ifaces[1].passive);
        assert_eq!(ifaces[1].authentication, "");
    }
}
