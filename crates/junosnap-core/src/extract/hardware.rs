// ── Hardware health ──
//
// CPU and memory come from the routing-engine reply, one record per engine.
// Disk, temperature and fans each have their own RPC. Fans have two reply
// variants: `fan-information` on platforms with speed sensors, and the fan
// rows of `environment-information` on the rest.

use serde_json::Value;

use super::facts::route_engines;
use super::{engine_sections, first_engine, first_section};
use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::{CpuStats, DiskEntry, FanStatus, MemoryStats, TemperatureReading, TemperatureStats};
use crate::raw::{Node, leading_token};

const TEMPERATURE_CLASS: &str = "Temp";
const FAN_CLASS: &str = "Fans";
const CPU_MARKER: &str = "CPU";

pub fn cpu(engines: &Value) -> Result<Vec<CpuStats>, CoreError> {
    route_engines(&Node::root(Domain::Cpu, engines))?
        .into_iter()
        .map(|(slot, engine)| {
            let idle: u8 = engine.require("cpu-idle", "percentage")?;
            if idle > 100 {
                return Err(engine.coercion_error("cpu-idle", &idle.to_string(), "percentage"));
            }
            let load = |key: &str| engine.parse_or(key, "decimal", defaults::hardware::LOAD_AVERAGE);
            Ok(CpuStats {
                slot,
                state: engine.string_or("mastership-state", ""),
                used: 100 - idle,
                idle,
                load_1min: load("load-average-one")?,
                load_5min: load("load-average-five")?,
                load_15min: load("load-average-fifteen")?,
            })
        })
        .collect()
}

pub fn memory(engines: &Value) -> Result<Vec<MemoryStats>, CoreError> {
    route_engines(&Node::root(Domain::Memory, engines))?
        .into_iter()
        .map(|(slot, engine)| {
            let (key, size) = ["memory-dram-size", "memory-installed-size"]
                .into_iter()
                .find_map(|key| engine.text_of(key).map(|text| (key, text)))
                .ok_or_else(|| engine.malformed_at("memory-dram-size", "required text missing"))?;
            let total: u64 = leading_token(&size)
                .parse()
                .map_err(|_| engine.coercion_error(key, &size, "megabytes"))?;
            let utilization: u8 = engine.require("memory-buffer-utilization", "percentage")?;
            if utilization > 100 {
                return Err(engine.coercion_error(
                    "memory-buffer-utilization",
                    &utilization.to_string(),
                    "percentage",
                ));
            }
            let used = total
                .checked_mul(u64::from(utilization))
                .ok_or_else(|| engine.coercion_error(key, &size, "megabytes"))?
                / 100;
            Ok(MemoryStats {
                slot,
                total,
                used,
                utilization,
            })
        })
        .collect()
}

pub fn disks(storage: &Value) -> Result<Vec<DiskEntry>, CoreError> {
    let root = Node::root(Domain::Disk, storage);
    let mut entries = Vec::new();
    for (engine, section) in engine_sections(&root, "system-storage-information")? {
        for fs in section.items_of("filesystem")? {
            let blocks = |key: &str| -> Result<u64, CoreError> {
                let count: u64 = fs.require(key, "block count")?;
                Ok(count.saturating_mul(defaults::hardware::BLOCK_SIZE))
            };
            entries.push(DiskEntry {
                engine: engine.clone(),
                disk: fs.required_text("filesystem-name")?,
                mount: fs.string_or("mounted-on", ""),
                size: blocks("total-blocks")?,
                used: blocks("used-blocks")?,
                available: blocks("available-blocks")?,
                used_percent: fs.require("used-percent", "percentage")?,
            });
        }
    }
    Ok(entries)
}

/// Environment rows with their class filled in. Junos only tags the first
/// row of each class, so the class carries forward.
fn classified_items<'a>(environment: &Node<'a>) -> Result<Vec<(String, Node<'a>)>, CoreError> {
    let mut class = String::new();
    let mut rows = Vec::new();
    for item in environment.items_of("environment-item")? {
        if let Some(tagged) = item.text_of("class") {
            class = tagged;
        }
        rows.push((class.clone(), item));
    }
    Ok(rows)
}

pub fn temperature(environment: &Value) -> Result<TemperatureStats, CoreError> {
    let root = Node::root(Domain::Temperature, environment);
    let section = first_section(&root, "environment-information")?;

    let mut stats = TemperatureStats::default();
    for (class, item) in classified_items(&section)? {
        if class != TEMPERATURE_CLASS {
            continue;
        }
        let sensor = item.required_text("name")?;
        let celsius = match item.get("temperature") {
            Some(reading) => read_celsius(&reading)?,
            None => None,
        };
        if let Some(value) = celsius {
            let slot = if sensor.to_ascii_uppercase().contains(CPU_MARKER) {
                &mut stats.cpu
            } else {
                &mut stats.chassis
            };
            *slot = Some(slot.map_or(value, |hottest| hottest.max(value)));
        }
        stats.sensors.push(TemperatureReading {
            sensor,
            status: item.string_or("status", ""),
            celsius,
        });
    }
    Ok(stats)
}

/// Celsius from the `junos:celsius` attribute, else from `45 degrees C / ...`.
fn read_celsius(reading: &Node<'_>) -> Result<Option<i32>, CoreError> {
    let Some(text) = reading.attr("junos:celsius").or_else(|| reading.text()) else {
        return Ok(None);
    };
    let token = leading_token(&text);
    if token.is_empty() {
        return Ok(None);
    }
    token.parse().map(Some).map_err(|_| CoreError::NumericCoercion {
        domain: reading.domain(),
        field: reading.path().to_owned(),
        value: text.clone(),
        expected: "degrees celsius",
    })
}

/// Fan status from either reply variant, detected by its top-level element.
pub fn fans(raw: &Value) -> Result<Vec<FanStatus>, CoreError> {
    let reply = first_engine(&Node::root(Domain::Fans, raw))?;

    match (reply.get("fan-information"), reply.get("environment-information")) {
        (Some(fan_info), None) => fan_info
            .items_of("fan-information-rpm-item")?
            .iter()
            .map(|item| {
                Ok(FanStatus {
                    fan: item.required_text("name")?,
                    status: item.string_or("status", ""),
                    rpm: item.parse_or("rpm", "rpm", defaults::hardware::FAN_RPM)?,
                    detail: item.string_or("comment", defaults::hardware::FAN_DETAIL),
                })
            })
            .collect(),
        (None, Some(environment)) => classified_items(&environment)?
            .into_iter()
            .filter(|(class, _)| class == FAN_CLASS)
            .map(|(_, item)| {
                Ok(FanStatus {
                    fan: item.required_text("name")?,
                    status: item.string_or("status", ""),
                    rpm: defaults::hardware::FAN_RPM,
                    detail: item.string_or("comment", defaults::hardware::FAN_DETAIL),
                })
            })
            .collect(),
        (Some(_), Some(_)) => Err(reply.malformed(
            "both fan-information and environment-information present",
        )),
        (None, None) => Err(reply.malformed(
            "neither fan-information nor environment-information present",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn dual_engines() -> Value {
        json!({
            "route-engine-information": {
                "route-engine": [
                    {
                        "slot": "0",
                        "mastership-state": "master",
                        "memory-dram-size": "2048 MB",
                        "memory-buffer-utilization": "25",
                        "cpu-idle": "93",
                        "load-average-one": "0.21",
                        "load-average-five": "0.30",
                        "load-average-fifteen": "0.28",
                        "up-time": "3 days"
                    },
                    {
                        "slot": "1",
                        "mastership-state": "backup",
                        "memory-dram-size": "2048 MB",
                        "memory-buffer-utilization": "12",
                        "cpu-idle": 99,
                        "up-time": "3 days"
                    }
                ]
            }
        })
    }

    fn environment() -> Value {
        json!({
            "environment-information": {
                "environment-item": [
                    {"name": "Power Supply 0", "class": "Power", "status": "OK"},
                    {"name": "FPC 0 Power Supply 0 Temp", "class": "Temp", "status": "OK",
                     "temperature": {"#text": "38 degrees C / 100 degrees F", "@junos:celsius": "38"}},
                    {"name": "FPC 0 CPU Temp", "status": "OK",
                     "temperature": {"#text": "54 degrees C / 129 degrees F", "@junos:celsius": "54"}},
                    {"name": "FPC 0 Exhaust Temp", "status": "OK", "temperature": "41 degrees C / 105 degrees F"},
                    {"name": "FPC 0 Intake Temp", "status": "Absent"},
                    {"name": "Fan Tray 0 Fan 0", "class": "Fans", "status": "OK", "comment": "Spinning at normal speed"},
                    {"name": "Fan Tray 0 Fan 1", "status": "Failed"}
                ]
            }
        })
    }

    #[test]
    fn cpu_per_engine() {
        let stats = cpu(&dual_engines()).unwrap();
        assert_eq!(
            stats,
            vec![
                CpuStats {
                    slot: "0".into(),
                    state: "master".into(),
                    used: 7,
                    idle: 93,
                    load_1min: 0.21,
                    load_5min: 0.30,
                    load_15min: 0.28,
                },
                CpuStats {
                    slot: "1".into(),
                    state: "backup".into(),
                    used: 1,
                    idle: 99,
                    load_1min: 0.0,
                    load_5min: 0.0,
                    load_15min: 0.0,
                },
            ]
        );
    }

    #[test]
    fn cpu_bad_load_average_fails_whole_record() {
        let raw = json!({"route-engine-information": {"route-engine": {"cpu-idle": "90", "load-average-one": "high"}}});
        let err = cpu(&raw).unwrap_err();
        assert!(matches!(err, CoreError::NumericCoercion { domain: Domain::Cpu, .. }));
    }

    #[test]
    fn cpu_serializes_with_minute_keys() {
        let stats = cpu(&dual_engines()).unwrap();
        let value = serde_json::to_value(&stats[0]).unwrap();
        assert_eq!(value["1_min"], json!(0.21));
        assert_eq!(value["15_min"], json!(0.28));
    }

    #[test]
    fn memory_derives_used_megabytes() {
        let stats = memory(&dual_engines()).unwrap();
        assert_eq!(
            stats[0],
            MemoryStats {
                slot: "0".into(),
                total: 2048,
                used: 512,
                utilization: 25,
            }
        );
    }

    #[test]
    fn memory_utilization_over_100_is_rejected() {
        let raw = json!({"route-engine-information": {"route-engine": {
            "memory-dram-size": "1000 MB",
            "memory-buffer-utilization": "250"
        }}});
        let err = memory(&raw).unwrap_err();
        assert!(matches!(err, CoreError::NumericCoercion { domain: Domain::Memory, .. }));
    }

    #[test]
    fn memory_size_overflow_is_coercion_error() {
        let raw = json!({"route-engine-information": {"route-engine": {
            "memory-dram-size": "18446744073709551615 MB",
            "memory-buffer-utilization": "25"
        }}});
        let err = memory(&raw).unwrap_err();
        assert!(matches!(err, CoreError::NumericCoercion { domain: Domain::Memory, .. }));
    }

    #[test]
    fn disks_on_single_engine() {
        let raw = json!({
            "system-storage-information": {
                "filesystem": {
                    "filesystem-name": "/dev/gpt/junos",
                    "total-blocks": {"#text": "2.0G", "@junos:format": "2.0G"},
                    "used-blocks": "100",
                    "available-blocks": "300",
                    "used-percent": " 25",
                    "mounted-on": "/.mount"
                }
            }
        });
        let err = disks(&raw).unwrap_err();
        assert!(matches!(err, CoreError::NumericCoercion { domain: Domain::Disk, .. }));

        let raw = json!({
            "system-storage-information": {
                "filesystem": {
                    "filesystem-name": "/dev/gpt/junos",
                    "total-blocks": {"#text": "400", "@junos:format": "200K"},
                    "used-blocks": "100",
                    "available-blocks": "300",
                    "used-percent": " 25",
                    "mounted-on": "/.mount"
                }
            }
        });
        assert_eq!(
            disks(&raw).unwrap(),
            vec![DiskEntry {
                engine: String::new(),
                disk: "/dev/gpt/junos".into(),
                mount: "/.mount".into(),
                size: 400 * 512,
                used: 100 * 512,
                available: 300 * 512,
                used_percent: 25,
            }]
        );
    }

    #[test]
    fn disks_on_multi_engine_are_tagged() {
        let fs = json!({
            "filesystem-name": "/dev/da0s1a",
            "total-blocks": "1000",
            "used-blocks": "500",
            "available-blocks": "500",
            "used-percent": "50",
            "mounted-on": "/"
        });
        let raw = json!({
            "multi-routing-engine-results": {
                "multi-routing-engine-item": [
                    {"re-name": "fpc0", "system-storage-information": {"filesystem": [fs.clone(), fs.clone()]}},
                    {"re-name": "fpc1", "system-storage-information": {"filesystem": fs}}
                ]
            }
        });
        let entries = disks(&raw).unwrap();
        let engines: Vec<_> = entries.iter().map(|e| e.engine.as_str()).collect();
        assert_eq!(engines, ["fpc0", "fpc0", "fpc1"]);
    }

    #[test]
    fn temperature_splits_cpu_and_chassis() {
        let stats = temperature(&environment()).unwrap();
        assert_eq!(stats.cpu, Some(54));
        assert_eq!(stats.chassis, Some(41));
        assert_eq!(stats.sensors.len(), 4);
        assert_eq!(
            stats.sensors[3],
            TemperatureReading {
                sensor: "FPC 0 Intake Temp".into(),
                status: "Absent".into(),
                celsius: None,
            }
        );
    }

    #[test]
    fn fans_from_environment_have_no_rpm() {
        let fans = fans(&environment()).unwrap();
        assert_eq!(
            fans,
            vec![
                FanStatus {
                    fan: "Fan Tray 0 Fan 0".into(),
                    status: "OK".into(),
                    rpm: 0,
                    detail: "Spinning at normal speed".into(),
                },
                FanStatus {
                    fan: "Fan Tray 0 Fan 1".into(),
                    status: "Failed".into(),
                    rpm: 0,
                    detail: String::new(),
                },
            ]
        );
    }

    #[test]
    fn fans_from_fan_information() {
        let raw = json!({
            "fan-information": {
                "fan-information-rpm-item": [
                    {"name": "Fan Tray 0 Fan 0", "status": "OK", "rpm": "5760", "comment": "Spinning at normal speed"},
                    {"name": "Fan Tray 0 Fan 1", "status": "OK", "rpm": "5640"}
                ]
            }
        });
        let fans = fans(&raw).unwrap();
        assert_eq!(fans[0].rpm, 5760);
        assert_eq!(fans[1].detail, "");
    }

    #[test]
    fn fans_with_both_variants_is_malformed() {
        let raw = json!({"fan-information": {}, "environment-information": {}});
        assert!(matches!(fans(&raw).unwrap_err(), CoreError::MalformedPayload { .. }));
        assert!(matches!(fans(&json!({})).unwrap_err(), CoreError::MalformedPayload { .. }));
    }
}
