// ── MAC table ──
//
// Two reply schemas exist. Pre-ELS firmware answers with
// `ethernet-switching-table-information/ethernet-switching-table`, current
// firmware with `l2ng-l2ald-rtb-macdb`. A reply carries exactly one of them.

use serde_json::Value;

use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::{MacAddress, MacTableEntry};
use crate::raw::Node;

const LEGACY: &str = "ethernet-switching-table-information";
const CURRENT: &str = "l2ng-l2ald-rtb-macdb";

/// Which switching-table schema a reply uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacSchema {
    Legacy,
    Current,
}

impl MacSchema {
    pub fn detect(raw: &Value) -> Result<Self, CoreError> {
        let root = Node::root(Domain::MacTable, raw);
        match (root.has(LEGACY), root.has(CURRENT)) {
            (true, false) => Ok(Self::Legacy),
            (false, true) => Ok(Self::Current),
            (true, true) => Err(root.malformed(format!("both {LEGACY} and {CURRENT} present"))),
            (false, false) => Err(root.malformed(format!("neither {LEGACY} nor {CURRENT} present"))),
        }
    }
}

pub fn mac_table(raw: &Value) -> Result<Vec<MacTableEntry>, CoreError> {
    let root = Node::root(Domain::MacTable, raw);
    match MacSchema::detect(raw)? {
        MacSchema::Legacy => legacy(&root.child(LEGACY)?),
        MacSchema::Current => current(&root.child(CURRENT)?),
    }
}

fn legacy(info: &Node<'_>) -> Result<Vec<MacTableEntry>, CoreError> {
    let mut entries = Vec::new();
    for table in info.items_of("ethernet-switching-table")? {
        for entry in table.items_of("mac-table-entry")? {
            let mac = entry.required_text("mac-address")?;
            if mac == defaults::mac_table::FLOOD_ENTRY {
                continue;
            }
            let interface = entry
                .text_of("mac-interfaces")
                .or_else(|| {
                    entry
                        .get("mac-interfaces-list")
                        .and_then(|list| list.text_of("mac-interfaces"))
                })
                .ok_or_else(|| entry.malformed_at("mac-interfaces", "required text missing"))?;
            entries.push(MacTableEntry {
                mac: MacAddress::new(mac),
                vlan: entry.required_text("mac-vlan")?,
                interface,
            });
        }
    }
    Ok(entries)
}

fn current(macdb: &Node<'_>) -> Result<Vec<MacTableEntry>, CoreError> {
    let mut entries = Vec::new();
    for vlan in macdb.items_of("l2ng-l2ald-mac-entry-vlan")? {
        for entry in vlan.items_of("l2ng-mac-entry")? {
            entries.push(MacTableEntry {
                mac: MacAddress::new(entry.required_text("l2ng-l2-mac-address")?),
                vlan: entry.required_text("l2ng-l2-mac-vlan-name")?,
                interface: entry.required_text("l2ng-l2-mac-logical-interface")?,
            });
        }
    }
    Ok(entries)
}
