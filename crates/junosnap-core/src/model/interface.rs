// ── Interface and neighbor records ──

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    pub mac: MacAddress,
    /// Link speed in Mbps; 0 for auto-negotiating or unspecified links.
    pub speed: u64,
    pub description: String,
    pub family: String,
    /// `address/mask` of the first unit when its family is `inet`.
    pub address: String,
    pub counters: Counters,
    pub subinterfaces: Vec<SubInterface>,
    /// Present only on PoE-capable models that returned PoE data.
    pub poe: Option<PoeStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub bps_in: u64,
    pub bps_out: u64,
    pub pps_in: u64,
    pub pps_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub packets_in: u64,
    pub packets_out: u64,
}

/// A logical unit (`ge-0/0/0.0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubInterface {
    pub name: String,
    pub description: String,
    pub families: Vec<FamilyAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyAddress {
    pub family: String,
    pub address: String,
}

/// Power-over-Ethernet state of a port. Power values are watts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoeStatus {
    pub admin: bool,
    pub operational: bool,
    pub max_power: f64,
    pub power_used: f64,
}

/// A device seen over LLDP. Every field is empty when not advertised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    /// Local interface the neighbor was seen on.
    pub name: String,
    pub mac: String,
    pub system: String,
    pub port_name: String,
    pub ip: String,
    pub vendor: String,
    pub description: String,
    pub model: String,
    pub serial: String,
}
