// ── Device facts ──
//
// Hostname, model and version come from `get-software-information`, the
// serial from `get-chassis-inventory`, and uptime from the master routing
// engine in `get-route-engine-information`.

use serde_json::Value;

use super::{engine_sections, first_section};
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::DeviceFacts;
use crate::raw::Node;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

pub fn device_facts(
    software: &Value,
    inventory: &Value,
    engines: &Value,
) -> Result<DeviceFacts, CoreError> {
    let software_root = Node::root(Domain::Facts, software);
    let info = first_section(&software_root, "software-information")?;

    let chassis = first_section(&Node::root(Domain::Facts, inventory), "chassis-inventory")?
        .child("chassis")?;

    let engine_root = Node::root(Domain::Facts, engines);
    let engines = route_engines(&engine_root)?;
    let master = master_engine(&engines)
        .ok_or_else(|| engine_root.malformed("no route-engine entries"))?;
    let up_time = master.required_text("up-time")?;

    Ok(DeviceFacts {
        hostname: info.required_text("host-name")?,
        serial: chassis.required_text("serial-number")?,
        model: info.required_text("product-model")?,
        version: version(&info)?,
        uptime: uptime_seconds(&up_time)?,
    })
}

/// Product model from a software-information reply.
pub fn model(software: &Value) -> Result<String, CoreError> {
    first_section(&Node::root(Domain::Facts, software), "software-information")?
        .required_text("product-model")
}

/// Junos version, from `junos-version` or, on older releases, the bracketed
/// release in the first package comment (`JUNOS Base OS boot [12.3R12.4]`).
fn version(info: &Node<'_>) -> Result<String, CoreError> {
    if let Some(version) = info.text_of("junos-version") {
        return Ok(version);
    }
    info.items_of("package-information")?
        .iter()
        .filter_map(|pkg| pkg.text_of("comment"))
        .find_map(|comment| {
            let (_, rest) = comment.split_once('[')?;
            let (release, _) = rest.split_once(']')?;
            Some(release.to_owned())
        })
        .ok_or_else(|| info.malformed_at("junos-version", "no version in reply"))
}

/// Convert an uptime string such as `12 days, 3 hours, 4 minutes, 5 seconds`
/// to seconds. Any component may be missing; missing ones count as zero.
pub fn uptime_seconds(text: &str) -> Result<u64, CoreError> {
    let mut total: u64 = 0;
    for part in text.split(',') {
        let mut words = part.split_whitespace();
        let (Some(count), Some(unit)) = (words.next(), words.next()) else {
            continue;
        };
        let weight = match unit.trim_end_matches('s') {
            "day" => SECS_PER_DAY,
            "hour" => SECS_PER_HOUR,
            "minute" => SECS_PER_MINUTE,
            "second" => 1,
            _ => continue,
        };
        let count: u64 = count.parse().map_err(|_| CoreError::NumericCoercion {
            domain: Domain::Facts,
            field: "up-time".into(),
            value: part.trim().to_owned(),
            expected: "integer",
        })?;
        total = total.saturating_add(count.saturating_mul(weight));
    }
    Ok(total)
}

/// Every routing engine in a route-engine reply, labelled by slot (or by
/// engine name on Virtual Chassis members that report no slot).
pub(crate) fn route_engines<'a>(root: &Node<'a>) -> Result<Vec<(String, Node<'a>)>, CoreError> {
    let mut engines = Vec::new();
    for (engine_name, section) in engine_sections(root, "route-engine-information")? {
        for engine in section.items_of("route-engine")? {
            let label = engine
                .text_of("slot")
                .unwrap_or_else(|| engine_name.clone());
            engines.push((label, engine));
        }
    }
    Ok(engines)
}

/// The engine reporting `master` mastership, else the first one.
pub(crate) fn master_engine<'a, 'b>(engines: &'b [(String, Node<'a>)]) -> Option<&'b Node<'a>> {
    engines
        .iter()
        .find(|(_, engine)| {
            engine
                .text_of("mastership-state")
                .is_some_and(|state| state.eq_ignore_ascii_case("master"))
        })
        .or_else(|| engines.first())
        .map(|(_, engine)| engine)
}
