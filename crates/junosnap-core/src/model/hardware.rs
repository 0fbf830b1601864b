// ── Hardware health records ──

use serde::{Deserialize, Serialize};

/// CPU usage of one routing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    /// Routing-engine slot, empty on single-engine devices.
    pub slot: String,
    /// Mastership state (`master`, `backup`), empty when not reported.
    pub state: String,
    pub used: u8,
    pub idle: u8,
    #[serde(rename = "1_min")]
    pub load_1min: f64,
    #[serde(rename = "5_min")]
    pub load_5min: f64,
    #[serde(rename = "15_min")]
    pub load_15min: f64,
}

/// Memory of one routing engine, in megabytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub slot: String,
    pub total: u64,
    pub used: u64,
    pub utilization: u8,
}

/// One mounted filesystem. Sizes are bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskEntry {
    /// Routing engine name on multi-engine replies, otherwise empty.
    pub engine: String,
    pub disk: String,
    pub mount: String,
    pub size: u64,
    pub used: u64,
    pub available: u64,
    pub used_percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureStats {
    /// Hottest CPU sensor, in Celsius.
    pub cpu: Option<i32>,
    /// Hottest non-CPU sensor, in Celsius.
    pub chassis: Option<i32>,
    pub sensors: Vec<TemperatureReading>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub sensor: String,
    pub status: String,
    pub celsius: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanStatus {
    pub fan: String,
    pub status: String,
    pub rpm: u32,
    pub detail: String,
}
