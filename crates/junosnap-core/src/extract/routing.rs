// ── Routing table ──

use serde_json::Value;

use super::first_section;
use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::{NextHop, Route};
use crate::raw::Node;

const ACTIVE_TAG: &str = "*";
const STATIC: &str = "Static";

/// Active routes of every table in a `get-route-information` reply.
/// Routes learned by internal protocols are dropped.
pub fn routes(raw: &Value) -> Result<Vec<Route>, CoreError> {
    let info = first_section(&Node::root(Domain::RoutingTable, raw), "route-information")?;

    let mut routes = Vec::new();
    for table in info.items_of("route-table")? {
        let table_name = table.string_or("table-name", "");
        for rt in table.items_of("rt")? {
            let entries = rt.items_of("rt-entry")?;
            let Some(entry) = entries
                .iter()
                .find(|e| e.text_of("active-tag").as_deref() == Some(ACTIVE_TAG))
                .or_else(|| entries.first())
            else {
                continue;
            };

            let protocol = entry.required_text("protocol-name")?;
            if defaults::routing::EXCLUDED_PROTOCOLS.contains(&protocol.as_str()) {
                continue;
            }

            routes.push(Route {
                table: table_name.clone(),
                route: rt.required_text("rt-destination")?,
                metric: metric(entry, &protocol)?,
                preference: entry.parse_or("preference", "integer", defaults::routing::PREFERENCE)?,
                next_hop: next_hops(entry)?,
                protocol,
            });
        }
    }
    Ok(routes)
}

/// Direct and Local routes are always 0; Static routes default to 1.
fn metric(entry: &Node<'_>, protocol: &str) -> Result<u32, CoreError> {
    if defaults::routing::ZERO_METRIC_PROTOCOLS.contains(&protocol) {
        return Ok(0);
    }
    let default = if protocol == STATIC {
        defaults::routing::STATIC_METRIC
    } else {
        defaults::routing::METRIC
    };
    entry.parse_or("metric", "integer", default)
}

fn next_hops(entry: &Node<'_>) -> Result<Vec<NextHop>, CoreError> {
    Ok(entry
        .items_of("nh")?
        .iter()
        .map(|nh| NextHop {
            hop: nh.text_of("to"),
            interface: nh.text_of("via").or_else(|| nh.text_of("nh-local-interface")),
        })
        .collect())
}
