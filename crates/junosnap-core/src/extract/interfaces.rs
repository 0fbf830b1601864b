// ── Interfaces ──
//
// Physical interfaces from `get-interface-information extensive`, with
// their logical units and, on PoE-capable models, an overlay from
// `get-poe-interface-information`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::trace;

use super::first_section;
use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::{Counters, FamilyAddress, InterfaceRecord, MacAddress, PoeStatus, SubInterface};
use crate::raw::{Node, leading_token};

const INET: &str = "inet";

/// Whether the model name carries one of the PoE capability markers
/// (`EX2300-24P`, `EX4300-48MP`, ...).
pub fn supports_poe(model: &str) -> bool {
    let model = model.to_ascii_uppercase();
    defaults::interfaces::POE_MODEL_MARKERS
        .iter()
        .any(|marker| model.contains(marker))
}

/// Internal and virtual interfaces that are never reported.
pub fn is_excluded(name: &str) -> bool {
    defaults::interfaces::EXCLUDED_NAMES.contains(&name)
        || defaults::interfaces::EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// Interface records for a device of the given model.
///
/// `poe` is the PoE reply if one was fetched; it is ignored unless the model
/// is PoE-capable. When it is used, every record carries a PoE sub-record,
/// all-false for ports the reply does not mention.
pub fn interfaces(
    raw: &Value,
    model: &str,
    poe: Option<&Value>,
) -> Result<Vec<InterfaceRecord>, CoreError> {
    let info = first_section(&Node::root(Domain::Interfaces, raw), "interface-information")?;

    let poe_table = match poe {
        Some(poe) if supports_poe(model) => Some(poe_ports(poe)?),
        Some(_) => {
            trace!(model, "ignoring PoE reply for non-PoE model");
            None
        }
        None => None,
    };

    let mut records = Vec::new();
    for physical in info.items_of("physical-interface")? {
        let name = physical.required_text("name")?;
        if is_excluded(&name) {
            continue;
        }

        let subinterfaces = physical
            .items_of("logical-interface")?
            .iter()
            .map(subinterface)
            .collect::<Result<Vec<_>, _>>()?;
        let (family, address) = subinterfaces
            .first()
            .and_then(|unit| unit.families.first())
            .map_or_else(
                || {
                    (
                        defaults::interfaces::FAMILY.to_owned(),
                        defaults::interfaces::ADDRESS.to_owned(),
                    )
                },
                |first| (first.family.clone(), first.address.clone()),
            );

        let poe = poe_table
            .as_ref()
            .map(|table| table.get(&name).copied().unwrap_or_default());

        records.push(InterfaceRecord {
            mac: MacAddress::new(
                physical.string_or("current-physical-address", defaults::interfaces::MAC),
            ),
            speed: speed(&physical)?,
            description: physical.string_or("description", defaults::interfaces::DESCRIPTION),
            family,
            address,
            counters: counters(&physical)?,
            subinterfaces,
            poe,
            name,
        });
    }
    Ok(records)
}

fn subinterface(unit: &Node<'_>) -> Result<SubInterface, CoreError> {
    let families = unit
        .items_of("address-family")?
        .iter()
        .map(|af| {
            let family = af.required_text("address-family-name")?;
            let address = if family == INET {
                af.items_of("interface-address")?
                    .first()
                    .map(inet_address)
                    .unwrap_or_default()
            } else {
                defaults::interfaces::ADDRESS.to_owned()
            };
            Ok(FamilyAddress { family, address })
        })
        .collect::<Result<_, CoreError>>()?;

    Ok(SubInterface {
        name: unit.required_text("name")?,
        description: unit.string_or("description", defaults::interfaces::DESCRIPTION),
        families,
    })
}

/// `10.0.0.1/24` from the local address and the mask length of the
/// destination network; a host prefix when there is no destination network.
fn inet_address(ifa: &Node<'_>) -> String {
    let Some(local) = ifa.text_of("ifa-local") else {
        return defaults::interfaces::ADDRESS.to_owned();
    };
    match ifa
        .text_of("ifa-destination")
        .and_then(|dest| dest.split_once('/').map(|(_, len)| len.to_owned()))
    {
        Some(len) => format!("{local}/{len}"),
        None => format!("{local}/{}", defaults::interfaces::HOST_PREFIX_LEN),
    }
}

/// Link speed in Mbps. `Auto`, `Unspecified` and `Unlimited` count as 0.
fn speed(physical: &Node<'_>) -> Result<u64, CoreError> {
    let Some(text) = physical.text_of("speed") else {
        return Ok(defaults::interfaces::SPEED_MBPS);
    };
    let lower = text.to_ascii_lowercase();
    if matches!(lower.as_str(), "" | "auto" | "unspecified" | "unlimited") {
        return Ok(defaults::interfaces::SPEED_MBPS);
    }
    parse_speed(&lower).ok_or_else(|| physical.coercion_error("speed", &text, "link speed"))
}

fn parse_speed(lower: &str) -> Option<u64> {
    let (number, scale) = if let Some(n) = lower.strip_suffix("gbps") {
        (n, 1000)
    } else if let Some(n) = lower.strip_suffix("mbps") {
        (n, 1)
    } else {
        return None;
    };
    let (whole, fraction) = number.trim().split_once('.').unwrap_or((number.trim(), ""));
    let whole: u64 = whole.parse().ok()?;
    let mut mbps = whole.checked_mul(scale)?;
    if !fraction.is_empty() {
        let digits = u32::try_from(fraction.len()).ok()?;
        let fraction: u64 = fraction.parse().ok()?;
        mbps = mbps.checked_add(fraction.checked_mul(scale)? / 10u64.checked_pow(digits)?)?;
    }
    Some(mbps)
}

fn counters(physical: &Node<'_>) -> Result<Counters, CoreError> {
    let Some(stats) = physical.get("traffic-statistics") else {
        return Ok(Counters::default());
    };
    let count = |key: &str| stats.parse_or(key, "counter", defaults::interfaces::COUNTER);
    Ok(Counters {
        bps_in: count("input-bps")?,
        bps_out: count("output-bps")?,
        pps_in: count("input-pps")?,
        pps_out: count("output-pps")?,
        bytes_in: count("input-bytes")?,
        bytes_out: count("output-bytes")?,
        packets_in: count("input-packets")?,
        packets_out: count("output-packets")?,
    })
}

/// PoE state per port from `get-poe-interface-information`.
fn poe_ports(raw: &Value) -> Result<HashMap<String, PoeStatus>, CoreError> {
    let root = Node::root(Domain::Interfaces, raw);
    let info = first_section(&root, "poe-interface-information")?;

    let mut ports = HashMap::new();
    for port in info.items_of("interface-information")? {
        let watts = |key: &str| -> Result<f64, CoreError> {
            let Some(text) = port.text_of(key) else {
                return Ok(0.0);
            };
            let number = leading_token(&text).trim_end_matches(['W', 'w']);
            if number.is_empty() {
                return Ok(0.0);
            }
            number
                .parse()
                .map_err(|_| port.coercion_error(key, &text, "watts"))
        };
        let status = PoeStatus {
            admin: port
                .text_of("interface-enabled")
                .is_some_and(|s| s.eq_ignore_ascii_case("enabled")),
            operational: port
                .text_of("interface-status")
                .is_some_and(|s| s.eq_ignore_ascii_case("on")),
            max_power: watts("interface-power-limit")?,
            power_used: watts("interface-power")?,
        };
        ports.insert(port.required_text("interface-name")?, status);
    }
    Ok(ports)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn reply() -> Value {
        json!({
            "interface-information": {
                "physical-interface": [
                    {
                        "name": "ge-0/0/0",
                        "description": "Workstations",
                        "speed": "1000mbps",
                        "current-physical-address": "4C:6D:58:39:69:A3",
                        "traffic-statistics": {
                            "input-bytes": "4755699005",
                            "output-bytes": "629507153",
                            "input-bps": "550800",
                            "output-bps": "682184",
                            "input-pps": "51088",
                            "output-pps": "74936",
                            "input-packets": "3979923",
                            "output-packets": "2173825"
                        },
                        "logical-interface": {
                            "name": "ge-0/0/0.0",
                            "description": "Workstation",
                            "address-family": {"address-family-name": "eth-switch"}
                        }
                    },
                    {
                        "name": "ge-0/0/1",
                        "speed": "Auto",
                        "current-physical-address": "4c:6d:58:39:69:a4"
                    },
                    {"name": "bme0", "speed": "Unspecified"},
                    {"name": "pfe-0/0/0", "speed": "800mbps"},
                    {
                        "name": "irb",
                        "speed": "Unspecified",
                        "logical-interface": [
                            {
                                "name": "irb.10",
                                "address-family": [
                                    {
                                        "address-family-name": "inet",
                                        "interface-address": {
                                            "ifa-local": "10.10.0.1",
                                            "ifa-destination": "10.10.0/24",
                                            "ifa-broadcast": "10.10.0.255"
                                        }
                                    },
                                    {"address-family-name": "inet6", "interface-address": [{"ifa-local": "fe80::1"}]}
                                ]
                            },
                            {"name": "irb.20", "address-family": {"address-family-name": "inet"}}
                        ]
                    },
                    {"name": "xe-0/2/0", "speed": "10Gbps"}
                ]
            }
        })
    }

    fn poe_reply() -> Value {
        json!({
            "poe-interface-information": {
                "interface-information": {
                    "interface-name": "ge-0/0/0",
                    "interface-enabled": "Enabled",
                    "interface-status": "ON",
                    "interface-power-limit": "30.0W",
                    "interface-power": "4.4W",
                    "interface-class": "4"
                }
            }
        })
    }

    #[test]
    fn excluded_interfaces_are_dropped() {
        let names: Vec<_> = interfaces(&reply(), "ex3400-48t", None)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["ge-0/0/0", "ge-0/0/1", "irb", "xe-0/2/0"]);
    }

    #[test]
    fn physical_fields_and_counters() {
        let records = interfaces(&reply(), "ex3400-48t", None).unwrap();
        let ge0 = &records[0];
        assert_eq!(ge0.mac.as_str(), "4c:6d:58:39:69:a3");
        assert_eq!(ge0.speed, 1000);
        assert_eq!(ge0.description, "Workstations");
        assert_eq!(ge0.family, "eth-switch");
        assert_eq!(ge0.address, "");
        assert_eq!(ge0.counters.bytes_in, 4_755_699_005);
        assert_eq!(ge0.counters.pps_out, 74_936);
        assert_eq!(ge0.poe, None);

        assert_eq!(records[1].speed, 0);
        assert_eq!(records[1].counters, Counters::default());
        assert!(records[1].subinterfaces.is_empty());
        assert_eq!(records[3].speed, 10_000);
    }

    #[test]
    fn inet_address_composes_mask() {
        let records = interfaces(&reply(), "ex3400-48t", None).unwrap();
        let irb = &records[2];
        assert_eq!(irb.family, "inet");
        assert_eq!(irb.address, "10.10.0.1/24");
        assert_eq!(
            irb.subinterfaces[0].families,
            vec![
                FamilyAddress { family: "inet".into(), address: "10.10.0.1/24".into() },
                FamilyAddress { family: "inet6".into(), address: String::new() },
            ]
        );
        assert_eq!(irb.subinterfaces[1].families[0].address, "");
    }

    #[test]
    fn inet_address_without_destination_is_host_prefix() {
        let raw = json!({"interface-information": {"physical-interface": {
            "name": "lo0",
            "logical-interface": {
                "name": "lo0.0",
                "address-family": {
                    "address-family-name": "inet",
                    "interface-address": {"ifa-local": "10.255.0.1"}
                }
            }
        }}});
        let records = interfaces(&raw, "ex3400-48t", None).unwrap();
        assert_eq!(records[0].address, "10.255.0.1/32");
        assert_eq!(records[0].subinterfaces[0].families[0].address, "10.255.0.1/32");
    }

    #[test]
    fn poe_overlay_on_capable_model() {
        let records = interfaces(&reply(), "ex2300-24p", Some(&poe_reply())).unwrap();
        assert_eq!(
            records[0].poe,
            Some(PoeStatus {
                admin: true,
                operational: true,
                max_power: 30.0,
                power_used: 4.4,
            })
        );
        assert_eq!(records[1].poe, Some(PoeStatus::default()));
        assert!(records.iter().all(|r| r.poe.is_some()));
    }

    #[test]
    fn poe_reply_ignored_for_non_poe_model() {
        let records = interfaces(&reply(), "ex2300-24t", Some(&poe_reply())).unwrap();
        assert!(records.iter().all(|r| r.poe.is_none()));
    }

    #[test]
    fn model_markers() {
        assert!(supports_poe("ex2300-24p"));
        assert!(supports_poe("EX4300-48MP"));
        assert!(supports_poe("ex2300-c-12p"));
        assert!(!supports_poe("ex4300-48t"));
        assert!(!supports_poe("qfx5120-48y"));
    }

    #[test]
    fn speed_forms() {
        assert_eq!(parse_speed("1000mbps"), Some(1000));
        assert_eq!(parse_speed("2.5gbps"), Some(2500));
        assert_eq!(parse_speed("100gbps"), Some(100_000));
        assert_eq!(parse_speed("fast"), None);
    }

    #[test]
    fn unknown_speed_is_coercion_error() {
        let raw = json!({"interface-information": {"physical-interface": {"name": "ge-0/0/9", "speed": "fast"}}});
        let err = interfaces(&raw, "ex3400-48t", None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NumericCoercion { domain: Domain::Interfaces, ref value, .. } if value == "fast"
        ));
    }
}
