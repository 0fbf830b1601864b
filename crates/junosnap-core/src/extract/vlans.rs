// ── VLANs ──

use serde_json::Value;

use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::VlanRecord;
use crate::raw::Node;

/// Configuration path holding VLAN definitions.
pub const CONFIG_PATH: &str = "vlans";

/// Configured VLANs. Range definitions (`vlan-id-list`) have no single ID
/// and are skipped.
pub fn vlans(config: &Value) -> Result<Vec<VlanRecord>, CoreError> {
    let Some(vlans) = Node::root(Domain::Vlans, config)
        .child("configuration")?
        .get("vlans")
    else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for vlan in vlans.items_of("vlan")? {
        if vlan.has("vlan-id-list") {
            continue;
        }
        records.push(VlanRecord {
            id: vlan.require("vlan-id", "vlan id")?,
            name: vlan.required_text("name")?,
            description: vlan.string_or("description", defaults::vlans::DESCRIPTION),
            irb: vlan.text_of("l3-interface"),
        });
    }
    Ok(records)
}
