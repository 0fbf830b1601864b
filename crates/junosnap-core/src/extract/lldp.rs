// ── LLDP neighbors ──
//
// The summary reply lists every neighbor; management address, system
// description and inventory only appear in the per-interface detail reply.
// Both are sparse across firmware versions, so every field falls back to "".

use std::collections::HashMap;

use serde_json::Value;

use super::first_section;
use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::LldpNeighbor;
use crate::raw::Node;

const SECTION: &str = "lldp-neighbors-information";
const NEIGHBOR: &str = "lldp-neighbor-information";

fn neighbors<'a>(raw: &'a Value) -> Result<Vec<Node<'a>>, CoreError> {
    first_section(&Node::root(Domain::Lldp, raw), SECTION)?.items_of(NEIGHBOR)
}

/// The local port of a neighbor entry; the element name changed between
/// releases.
fn local_port(neighbor: &Node<'_>) -> Option<String> {
    neighbor
        .text_of("lldp-local-port-id")
        .or_else(|| neighbor.text_of("lldp-local-interface"))
}

fn first_text(node: &Node<'_>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| node.text_of(key))
        .unwrap_or_else(|| defaults::lldp::FIELD.to_owned())
}

/// Local ports with a neighbor, in reply order. These are the interfaces to
/// query for detail.
pub fn local_ports(summary: &Value) -> Result<Vec<String>, CoreError> {
    Ok(neighbors(summary)?
        .iter()
        .filter_map(local_port)
        .collect())
}

/// Neighbors from the summary reply, enriched with whatever detail replies
/// were fetched.
pub fn lldp_neighbors(summary: &Value, details: &[Value]) -> Result<Vec<LldpNeighbor>, CoreError> {
    let mut detail_by_port: HashMap<String, Node<'_>> = HashMap::new();
    for detail in details {
        for neighbor in neighbors(detail)? {
            if let Some(port) = local_port(&neighbor) {
                detail_by_port.entry(port).or_insert(neighbor);
            }
        }
    }

    neighbors(summary)?
        .iter()
        .map(|neighbor| {
            let name = local_port(neighbor)
                .ok_or_else(|| neighbor.malformed_at("lldp-local-port-id", "required text missing"))?;
            let mut record = LldpNeighbor {
                mac: first_text(neighbor, &["lldp-remote-chassis-id"]),
                system: first_text(neighbor, &["lldp-remote-system-name"]),
                port_name: first_text(
                    neighbor,
                    &["lldp-remote-port-description", "lldp-remote-port-id"],
                ),
                ..LldpNeighbor::default()
            };
            if let Some(detail) = detail_by_port.get(&name) {
                apply_detail(&mut record, detail);
            }
            record.name = name;
            Ok(record)
        })
        .collect()
}

fn apply_detail(record: &mut LldpNeighbor, detail: &Node<'_>) {
    record.ip = detail
        .leaves_of("lldp-remote-management-address")
        .first()
        .and_then(Node::text)
        .unwrap_or_default();
    record.description = detail
        .get("lldp-system-description")
        .map_or_else(
            || first_text(detail, &["lldp-remote-system-description"]),
            |nested| first_text(&nested, &["lldp-remote-system-description"]),
        );
    record.vendor = first_text(detail, &["lldp-remote-inventory-manufacturer-name"]);
    record.model = first_text(detail, &["lldp-remote-inventory-model-name"]);
    record.serial = first_text(detail, &["lldp-remote-inventory-serial-number"]);
    if record.system.is_empty() {
        record.system = first_text(detail, &["lldp-remote-system-name"]);
    }
}
