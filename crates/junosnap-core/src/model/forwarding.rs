// ── Forwarding-table records ──

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// A learned MAC address. Identical for both switching-table schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacTableEntry {
    pub mac: MacAddress,
    pub vlan: String,
    pub interface: String,
}

/// The active route to one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub table: String,
    pub route: String,
    pub protocol: String,
    pub preference: u32,
    pub metric: u32,
    pub next_hop: Vec<NextHop>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextHop {
    pub hop: Option<String>,
    pub interface: Option<String>,
}
