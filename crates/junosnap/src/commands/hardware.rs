//! Routing-engine and chassis health.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::{CpuStats, DiskEntry, Domain, FanStatus, MemoryStats, TemperatureStats};

use crate::commands::util;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CpuRow {
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Used %")]
    used: u8,
    #[tabled(rename = "Load 1/5/15")]
    load: String,
}

impl From<&CpuStats> for CpuRow {
    fn from(c: &CpuStats) -> Self {
        Self {
            slot: c.slot.clone(),
            state: output::status(&c.state),
            used: c.used,
            load: format!("{:.2} / {:.2} / {:.2}", c.load_1min, c.load_5min, c.load_15min),
        }
    }
}

#[derive(Tabled)]
struct MemoryRow {
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Used %")]
    utilization: u8,
}

// Memory figures are reported in MB.
const MB: u64 = 1024 * 1024;

impl From<&MemoryStats> for MemoryRow {
    fn from(m: &MemoryStats) -> Self {
        Self {
            slot: m.slot.clone(),
            total: util::format_bytes(m.total.saturating_mul(MB)),
            used: util::format_bytes(m.used.saturating_mul(MB)),
            utilization: m.utilization,
        }
    }
}

#[derive(Tabled)]
struct DiskRow {
    #[tabled(rename = "Engine")]
    engine: String,
    #[tabled(rename = "Filesystem")]
    disk: String,
    #[tabled(rename = "Mount")]
    mount: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Avail")]
    available: String,
    #[tabled(rename = "Used %")]
    used_percent: u8,
}

impl From<&DiskEntry> for DiskRow {
    fn from(d: &DiskEntry) -> Self {
        Self {
            engine: d.engine.clone(),
            disk: d.disk.clone(),
            mount: d.mount.clone(),
            size: util::format_bytes(d.size),
            used: util::format_bytes(d.used),
            available: util::format_bytes(d.available),
            used_percent: d.used_percent,
        }
    }
}

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "Sensor")]
    sensor: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "°C")]
    celsius: String,
}

#[derive(Tabled)]
struct FanRow {
    #[tabled(rename = "Fan")]
    fan: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "RPM")]
    rpm: u32,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&FanStatus> for FanRow {
    fn from(f: &FanStatus) -> Self {
        Self {
            fan: f.fan.clone(),
            status: output::status(&f.status),
            rpm: f.rpm,
            detail: f.detail.clone(),
        }
    }
}

// ── Sections ────────────────────────────────────────────────────────

pub fn section(domain: Domain, value: &Value) -> Result<String, CliError> {
    Ok(match domain {
        Domain::Cpu => {
            let rows: Vec<CpuRow> = util::typed::<Vec<CpuStats>>(value)?
                .iter()
                .map(CpuRow::from)
                .collect();
            output::render_table("CPU", &rows)
        }
        Domain::Memory => {
            let rows: Vec<MemoryRow> = util::typed::<Vec<MemoryStats>>(value)?
                .iter()
                .map(MemoryRow::from)
                .collect();
            output::render_table("Memory", &rows)
        }
        Domain::Disk => {
            let rows: Vec<DiskRow> = util::typed::<Vec<DiskEntry>>(value)?
                .iter()
                .map(DiskRow::from)
                .collect();
            output::render_table("Storage", &rows)
        }
        Domain::Temperature => temperature(&util::typed(value)?),
        Domain::Fans => {
            let rows: Vec<FanRow> = util::typed::<Vec<FanStatus>>(value)?
                .iter()
                .map(FanRow::from)
                .collect();
            output::render_table("Fans", &rows)
        }
        other => unreachable!("{other} is not a hardware domain"),
    })
}

fn temperature(t: &TemperatureStats) -> String {
    let summary = output::render_detail(
        "Temperature",
        &[
            ("CPU", util::opt(t.cpu.map(|c| format!("{c} °C")))),
            ("Chassis", util::opt(t.chassis.map(|c| format!("{c} °C")))),
        ],
    );
    let rows: Vec<SensorRow> = t
        .sensors
        .iter()
        .map(|s| SensorRow {
            sensor: s.sensor.clone(),
            status: output::status(&s.status),
            celsius: util::opt(s.celsius),
        })
        .collect();
    format!("{summary}\n{}", output::render_table("Sensors", &rows))
}
