//! VLAN table.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::VlanRecord;

use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "ID")]
    id: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IRB")]
    irb: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub fn section(value: &Value) -> Result<String, CliError> {
    let rows: Vec<VlanRow> = util::typed::<Vec<VlanRecord>>(value)?
        .into_iter()
        .map(|v| VlanRow {
            id: v.id,
            name: v.name,
            irb: v.irb.unwrap_or_default(),
            description: v.description,
        })
        .collect();
    Ok(output::render_table("VLANs", &rows))
}
