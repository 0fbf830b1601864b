// junosnap-core: Normalization layer between junosnap-api and consumers (CLI).

pub mod config;
pub mod defaults;
pub mod domain;
pub mod error;
pub mod extract;
pub mod filter;
pub mod model;
pub mod poller;
pub mod raw;
pub mod shape;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DeviceConfig, TlsVerification};
pub use domain::{Domain, Group};
pub use error::{CoreError, TransportKind};
pub use extract::ospf::OspfCapability;
pub use filter::{ConfigFilter, build_filter};
pub use poller::{DomainOutcome, PollReport, Poller};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Device info
    DeviceFacts, DnsConfig, LicenseEntry, NtpServer, RadiusServer, SnmpConfig, SyslogServer,
    // Hardware
    CpuStats, DiskEntry, FanStatus, MemoryStats, TemperatureReading, TemperatureStats,
    // Interfaces & neighbors
    InterfaceRecord, LldpNeighbor, MacAddress,
    // Forwarding
    MacTableEntry, NextHop, Route, VlanRecord,
    // OSPF
    OspfArea, OspfInterface, OspfNeighbor, OspfOverview, OspfReport,
};
