use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRecord {
    pub id: u16,
    pub name: String,
    pub description: String,
    /// Bound layer-3 interface; `null` rather than `""` when unbound.
    pub irb: Option<String>,
}
