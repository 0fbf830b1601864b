// ── Domain extractors ──
//
// Pure functions from raw payloads to canonical records. None of them do
// I/O; the poller fetches payloads and hands them in. Schema variants are
// told apart by the shape of the payload itself, never by a model lookup,
// except PoE where only the model name can say whether to expect data.

pub mod facts;
pub mod hardware;
pub mod interfaces;
pub mod license;
pub mod lldp;
pub mod mac_table;
pub mod ospf;
pub mod routing;
pub mod system;
pub mod vlans;

use crate::error::CoreError;
use crate::raw::Node;

const MULTI_ENGINE: &str = "multi-routing-engine-results";
const MULTI_ENGINE_ITEM: &str = "multi-routing-engine-item";

/// Locate `section` in a reply that may come from one or several routing
/// engines (dual-RE chassis and Virtual Chassis wrap each engine's reply).
///
/// Returns `(engine name, section)` pairs; the name is empty for a
/// single-engine reply.
pub(crate) fn engine_sections<'a>(
    root: &Node<'a>,
    section: &str,
) -> Result<Vec<(String, Node<'a>)>, CoreError> {
    match (root.get(section), root.get(MULTI_ENGINE)) {
        (Some(node), None) => Ok(vec![(String::new(), node)]),
        (None, Some(multi)) => multi
            .items_of(MULTI_ENGINE_ITEM)?
            .into_iter()
            .map(|item| Ok((item.string_or("re-name", ""), item.child(section)?)))
            .collect(),
        (Some(_), Some(_)) => Err(root.malformed(format!(
            "both {section} and {MULTI_ENGINE} present"
        ))),
        (None, None) => Err(root.malformed_at(section, "required element missing")),
    }
}

/// The first engine's copy of a section.
pub(crate) fn first_section<'a>(root: &Node<'a>, section: &str) -> Result<Node<'a>, CoreError> {
    engine_sections(root, section)?
        .into_iter()
        .next()
        .map(|(_, node)| node)
        .ok_or_else(|| root.malformed_at(MULTI_ENGINE, "no routing-engine items"))
}

/// The reply of the first engine, for RPCs whose top-level element tells the
/// schema variant apart. Single-engine replies are returned as-is.
pub(crate) fn first_engine<'a>(root: &Node<'a>) -> Result<Node<'a>, CoreError> {
    match root.get(MULTI_ENGINE) {
        Some(multi) => multi
            .items_of(MULTI_ENGINE_ITEM)?
            .into_iter()
            .next()
            .ok_or_else(|| multi.malformed_at(MULTI_ENGINE_ITEM, "no routing-engine items")),
        None => Ok(root.clone()),
    }
}
