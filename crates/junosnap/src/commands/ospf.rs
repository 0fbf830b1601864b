//! OSPF overview, areas, neighbors and interfaces.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::{Domain, OspfArea, OspfInterface, OspfNeighbor, OspfOverview};

use crate::commands::util;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AreaRow {
    #[tabled(rename = "Area")]
    id: String,
    #[tabled(rename = "Type")]
    area_type: String,
    #[tabled(rename = "Auth")]
    authentication: String,
    #[tabled(rename = "Neighbors")]
    neighbors: u32,
}

#[derive(Tabled)]
struct NeighborRow {
    #[tabled(rename = "Neighbor ID")]
    id: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Area")]
    area: String,
}

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Interface")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Type")]
    if_type: String,
    #[tabled(rename = "Cost")]
    cost: u32,
    #[tabled(rename = "MTU")]
    mtu: u32,
    #[tabled(rename = "Nbrs")]
    neighbors: u32,
    #[tabled(rename = "Passive")]
    passive: String,
}

impl From<OspfInterface> for InterfaceRow {
    fn from(i: OspfInterface) -> Self {
        Self {
            name: i.name,
            state: output::status(&i.state),
            area: i.area,
            if_type: i.if_type,
            cost: i.cost,
            mtu: i.mtu,
            neighbors: i.neighbors,
            passive: if i.passive { "yes".into() } else { String::new() },
        }
    }
}

// ── Sections ────────────────────────────────────────────────────────

pub fn section(domain: Domain, value: &Value) -> Result<String, CliError> {
    Ok(match domain {
        Domain::OspfOverview => {
            let o: OspfOverview = util::typed(value)?;
            output::render_detail(
                "OSPF",
                &[("Router ID", o.id), ("Reference BW", o.reference)],
            )
        }
        Domain::OspfAreas => {
            let rows: Vec<AreaRow> = util::typed::<Vec<OspfArea>>(value)?
                .into_iter()
                .map(|a| AreaRow {
                    id: a.id,
                    area_type: a.area_type,
                    authentication: a.authentication,
                    neighbors: a.neighbors,
                })
                .collect();
            output::render_table("OSPF Areas", &rows)
        }
        Domain::OspfNeighbors => {
            let rows: Vec<NeighborRow> = util::typed::<Vec<OspfNeighbor>>(value)?
                .into_iter()
                .map(|n| NeighborRow {
                    id: n.id,
                    address: n.address,
                    interface: n.interface,
                    state: output::status(&n.state),
                    area: n.area,
                })
                .collect();
            output::render_table("OSPF Neighbors", &rows)
        }
        Domain::OspfInterfaces => {
            let rows: Vec<InterfaceRow> = util::typed::<Vec<OspfInterface>>(value)?
                .into_iter()
                .map(InterfaceRow::from)
                .collect();
            output::render_table("OSPF Interfaces", &rows)
        }
        other => unreachable!("{other} is not an OSPF domain"),
    })
}
