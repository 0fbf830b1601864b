//! Ethernet switching table.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::MacTableEntry;

use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct MacRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Interface")]
    interface: String,
}

pub fn section(value: &Value) -> Result<String, CliError> {
    let rows: Vec<MacRow> = util::typed::<Vec<MacTableEntry>>(value)?
        .into_iter()
        .map(|e| MacRow {
            mac: e.mac.to_string(),
            vlan: e.vlan,
            interface: e.interface,
        })
        .collect();
    Ok(output::render_table("MAC Table", &rows))
}
