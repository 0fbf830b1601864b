//! Physical interface table.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::InterfaceRecord;

use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "In bps")]
    bps_in: u64,
    #[tabled(rename = "Out bps")]
    bps_out: u64,
    #[tabled(rename = "PoE")]
    poe: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&InterfaceRecord> for InterfaceRow {
    fn from(i: &InterfaceRecord) -> Self {
        let address = if i.address.is_empty() {
            String::new()
        } else {
            format!("{} {}", i.family, i.address)
        };
        let poe = i.poe.as_ref().map_or_else(String::new, |p| {
            if p.operational {
                format!("{:.1}/{:.1} W", p.power_used, p.max_power)
            } else if p.admin {
                "enabled".into()
            } else {
                "disabled".into()
            }
        });
        Self {
            name: i.name.clone(),
            mac: i.mac.to_string(),
            speed: speed(i.speed),
            address,
            bps_in: i.counters.bps_in,
            bps_out: i.counters.bps_out,
            poe,
            description: i.description.clone(),
        }
    }
}

/// Link speed from Mbps, as `1G` / `100M`.
fn speed(mbps: u64) -> String {
    match mbps {
        0 => String::new(),
        m if m % 1000 == 0 => format!("{}G", m / 1000),
        m => format!("{m}M"),
    }
}

pub fn section(value: &Value) -> Result<String, CliError> {
    let rows: Vec<InterfaceRow> = util::typed::<Vec<InterfaceRecord>>(value)?
        .iter()
        .map(InterfaceRow::from)
        .collect();
    Ok(output::render_table("Interfaces", &rows))
}

#[cfg(test)]
mod tests {
    use super::speed;

    #[test]
    fn speeds_use_largest_unit() {
        assert_eq!(speed(10_000), "10G");
        assert_eq!(speed(100), "100M");
        assert_eq!(speed(2500), "2500M");
        assert_eq!(speed(0), "");
    }
}
