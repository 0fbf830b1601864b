// ── OSPF records ──
//
// When OSPF is not running every record here is present but empty.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfOverview {
    /// Router ID.
    pub id: String,
    /// Reference bandwidth used for cost calculation.
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfArea {
    pub id: String,
    /// `normal`, `stub` or `nssa`.
    #[serde(rename = "type")]
    pub area_type: String,
    pub authentication: String,
    /// Neighbors in the Full state.
    pub neighbors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfNeighbor {
    pub address: String,
    pub interface: String,
    pub state: String,
    pub id: String,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfInterface {
    pub name: String,
    pub state: String,
    pub area: String,
    pub neighbors: u32,
    pub mtu: u32,
    pub cost: u32,
    #[serde(rename = "type")]
    pub if_type: String,
    pub mask: String,
    pub authentication: String,
    pub passive: bool,
}

/// All four OSPF domains from one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfReport {
    pub overview: OspfOverview,
    pub areas: Vec<OspfArea>,
    pub neighbors: Vec<OspfNeighbor>,
    pub interfaces: Vec<OspfInterface>,
}
