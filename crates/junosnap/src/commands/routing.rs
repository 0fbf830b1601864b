//! Active route table.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::{NextHop, Route};

use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Destination")]
    route: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Pref")]
    preference: u32,
    #[tabled(rename = "Metric")]
    metric: u32,
    #[tabled(rename = "Next Hop")]
    next_hop: String,
}

fn hop(nh: &NextHop) -> String {
    match (&nh.hop, &nh.interface) {
        (Some(hop), Some(iface)) => format!("{hop} via {iface}"),
        (Some(hop), None) => hop.clone(),
        (None, Some(iface)) => iface.clone(),
        (None, None) => String::new(),
    }
}

impl From<&Route> for RouteRow {
    fn from(r: &Route) -> Self {
        Self {
            table: r.table.clone(),
            route: r.route.clone(),
            protocol: r.protocol.clone(),
            preference: r.preference,
            metric: r.metric,
            next_hop: r.next_hop.iter().map(hop).collect::<Vec<_>>().join("\n"),
        }
    }
}

pub fn section(value: &Value) -> Result<String, CliError> {
    let rows: Vec<RouteRow> = util::typed::<Vec<Route>>(value)?
        .iter()
        .map(RouteRow::from)
        .collect();
    Ok(output::render_table("Routes", &rows))
}
