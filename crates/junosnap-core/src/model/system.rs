// ── Device and system-service records ──

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity and uptime of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFacts {
    pub hostname: String,
    pub serial: String,
    pub model: String,
    pub version: String,
    /// Seconds since the master routing engine booted.
    pub uptime: u64,
}

/// One installed license.
///
/// `lic_id: None` is the single entry reported when no licenses are installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseEntry {
    pub lic_id: Option<String>,
    pub name: Vec<String>,
    pub expiry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusServer {
    pub server: String,
    pub port: u16,
    pub acc_port: u16,
    pub timeout: u32,
    pub retry: u32,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogServer {
    pub server: String,
    pub facilities: Vec<String>,
    pub level: String,
    pub source: String,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtpServer {
    pub server: String,
    pub prefer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfig {
    pub domain: String,
    pub servers: Vec<DnsServer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsServer {
    pub server: String,
    pub source: DnsSource,
}

/// Source address of a name server.
///
/// Serialized as the address, or as `false` when none is configured. Other
/// domains use `""` for the same situation; consumers rely on both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DnsSource {
    #[default]
    Unset,
    Address(String),
}

impl DnsSource {
    pub fn as_address(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Address(addr) => Some(addr),
        }
    }
}

impl Serialize for DnsSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_bool(false),
            Self::Address(addr) => serializer.serialize_str(addr),
        }
    }
}

impl<'de> Deserialize<'de> for DnsSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Flag(bool),
            Address(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Flag(_) => Self::Unset,
            Wire::Address(addr) => Self::Address(addr),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpConfig {
    pub name: String,
    pub contact: String,
    pub description: String,
    pub communities: Vec<SnmpCommunity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpCommunity {
    pub community: String,
    pub access: String,
    pub clients: Vec<String>,
}
