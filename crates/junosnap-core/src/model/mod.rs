// ── Canonical records ──
//
// Every type here is a plain value produced fresh by one poll. Field names
// serialize to the keys downstream consumers already read.

pub mod forwarding;
pub mod hardware;
pub mod interface;
pub mod mac;
pub mod ospf;
pub mod system;
pub mod vlan;

pub use forwarding::{MacTableEntry, NextHop, Route};
pub use hardware::{CpuStats, DiskEntry, FanStatus, MemoryStats, TemperatureReading, TemperatureStats};
pub use interface::{
    Counters, FamilyAddress, InterfaceRecord, LldpNeighbor, PoeStatus, SubInterface,
};
pub use mac::MacAddress;
pub use ospf::{OspfArea, OspfInterface, OspfNeighbor, OspfOverview, OspfReport};
pub use system::{
    DeviceFacts, DnsConfig, DnsServer, DnsSource, LicenseEntry, NtpServer, RadiusServer,
    SnmpCommunity, SnmpConfig, SyslogServer,
};
pub use vlan::VlanRecord;
