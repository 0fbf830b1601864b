//! LLDP neighbor table.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::LldpNeighbor;

use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct NeighborRow {
    #[tabled(rename = "Local Port")]
    name: String,
    #[tabled(rename = "System")]
    system: String,
    #[tabled(rename = "Remote Port")]
    port_name: String,
    #[tabled(rename = "Chassis MAC")]
    mac: String,
    #[tabled(rename = "Mgmt IP")]
    ip: String,
    #[tabled(rename = "Model")]
    model: String,
}

impl From<LldpNeighbor> for NeighborRow {
    fn from(n: LldpNeighbor) -> Self {
        Self {
            name: n.name,
            system: n.system,
            port_name: n.port_name,
            mac: n.mac,
            ip: n.ip,
            model: n.model,
        }
    }
}

pub fn section(value: &Value) -> Result<String, CliError> {
    let rows: Vec<NeighborRow> = util::typed::<Vec<LldpNeighbor>>(value)?
        .into_iter()
        .map(NeighborRow::from)
        .collect();
    Ok(output::render_table("LLDP Neighbors", &rows))
}
