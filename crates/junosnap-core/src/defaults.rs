// ── Per-domain defaults ──
//
// Values applied when an optional field is absent from a reply. Extractors
// reference these tables rather than restating literals.

/// Junos RADIUS client defaults.
pub mod radius {
    pub const PORT: u16 = 1812;
    pub const ACCOUNTING_PORT: u16 = 1813;
    pub const TIMEOUT_SECS: u32 = 5;
    pub const RETRIES: u32 = 3;
    pub const SOURCE: &str = "";
}

pub mod syslog {
    pub const LEVEL: &str = "";
    pub const SOURCE: &str = "";
    pub const PREFIX: &str = "";

    /// Severity keywords that may appear beside a facility name.
    pub const LEVELS: &[&str] = &[
        "any",
        "emergency",
        "alert",
        "critical",
        "error",
        "warning",
        "notice",
        "info",
        "none",
    ];
}

pub mod dns {
    pub const DOMAIN: &str = "";
}

pub mod snmp {
    pub const NAME: &str = "";
    pub const CONTACT: &str = "";
    pub const DESCRIPTION: &str = "";
    pub const ACCESS: &str = "";
}

pub mod hardware {
    /// Storage replies count in 512-byte blocks.
    pub const BLOCK_SIZE: u64 = 512;
    pub const LOAD_AVERAGE: f64 = 0.0;
    pub const FAN_RPM: u32 = 0;
    pub const FAN_DETAIL: &str = "";
}

pub mod interfaces {
    pub const MAC: &str = "";
    pub const DESCRIPTION: &str = "";
    pub const FAMILY: &str = "";
    pub const ADDRESS: &str = "";
    /// Prefix length of a local address with no destination network
    /// (loopback, unnumbered point-to-point).
    pub const HOST_PREFIX_LEN: u8 = 32;
    pub const SPEED_MBPS: u64 = 0;
    pub const COUNTER: u64 = 0;

    /// Internal or virtual interfaces that are never reported.
    pub const EXCLUDED_NAMES: &[&str] = &[
        "bme0", "cbp0", "dsc", "em0", "em1", "esi", "gre", "ipip", "jsrv", "lsi", "mtun", "pimd",
        "pime", "pip0", "pp0", "rbeb", "tap", "vtep",
    ];
    pub const EXCLUDED_PREFIXES: &[&str] = &["lc-", "pfe-", "pfh-"];

    /// Model-name markers of PoE-capable switches.
    pub const POE_MODEL_MARKERS: &[&str] = &["-8P", "-12P", "-24P", "-48P", "-12MP", "-24MP", "-48MP"];
}

pub mod lldp {
    pub const FIELD: &str = "";
}

pub mod routing {
    /// Protocols that only describe internal forwarding state.
    pub const EXCLUDED_PROTOCOLS: &[&str] = &["Access-internal", "Kernel", "MultiRecv"];
    /// Protocols that always report metric 0.
    pub const ZERO_METRIC_PROTOCOLS: &[&str] = &["Direct", "Local"];
    pub const STATIC_METRIC: u32 = 1;
    pub const METRIC: u32 = 0;
    pub const PREFERENCE: u32 = 0;
}

pub mod mac_table {
    /// Legacy flood entries carry this in place of an address.
    pub const FLOOD_ENTRY: &str = "*";
}

pub mod ospf {
    pub const REFERENCE_BANDWIDTH: &str = "100m";
    pub const AUTHENTICATION: &str = "";
    pub const AREA: &str = "";

    /// Fragments of the message Junos returns when OSPF is not configured.
    pub const NOT_RUNNING_MARKERS: &[&str] = &["not running"];
}

pub mod vlans {
    pub const DESCRIPTION: &str = "";
}
