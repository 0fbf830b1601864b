// ── Poller ──
//
// Orchestration over one device session. Each domain has a typed async
// method that fetches its payloads and runs its extractor; group polls share
// payloads between domains (one configuration fetch for all system services,
// one routing-engine reply for CPU and memory) and collect every outcome
// into a `PollReport`. A failure in one domain never stops its siblings.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use serde_json::{Value, json};
use tracing::{debug, warn};

use junosnap_api::{Rpc, Transport};

use crate::domain::{Domain, Group};
use crate::error::{CoreError, TransportKind};
use crate::extract::ospf::OspfCapability;
use crate::extract::{
    facts, hardware, interfaces, license, lldp, mac_table, ospf, routing, system, vlans,
};
use crate::filter::ConfigFilter;
use crate::model::{
    CpuStats, DeviceFacts, DiskEntry, DnsConfig, FanStatus, InterfaceRecord, LicenseEntry,
    LldpNeighbor, MacTableEntry, MemoryStats, NtpServer, OspfReport, RadiusServer, Route,
    SnmpConfig, SyslogServer, TemperatureStats, VlanRecord,
};

// ── RPC names ────────────────────────────────────────────────────────

const SOFTWARE: &str = "get-software-information";
const INVENTORY: &str = "get-chassis-inventory";
const ROUTE_ENGINE: &str = "get-route-engine-information";
const LICENSE: &str = "get-license-information";
const STORAGE: &str = "get-system-storage";
const ENVIRONMENT: &str = "get-environment-information";
const FAN: &str = "get-fan-information";
const INTERFACES: &str = "get-interface-information";
const POE: &str = "get-poe-interface-information";
const LLDP_SUMMARY: &str = "get-lldp-neighbors-information";
const LLDP_DETAIL: &str = "get-lldp-interface-neighbors";
const MAC_TABLE: &str = "get-ethernet-switching-table-information";
const ROUTES: &str = "get-route-information";
const OSPF_OVERVIEW: &str = "get-ospf-overview-information";
const OSPF_NEIGHBORS: &str = "get-ospf-neighbor-information";
const OSPF_INTERFACES: &str = "get-ospf-interface-information";

// ── PollReport ───────────────────────────────────────────────────────

/// Result of one domain within a report.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainOutcome {
    Record(Value),
    Failed(CoreError),
}

impl DomainOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Record(_) => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// Records serialize as themselves, failures as
/// `{"status": "error", "domain": .., "kind": .., "error": ..}`.
impl Serialize for DomainOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Record(value) => value.serialize(serializer),
            Self::Failed(err) => {
                let mut envelope = serializer.serialize_struct("ErrorEnvelope", 4)?;
                envelope.serialize_field("status", "error")?;
                envelope.serialize_field("domain", &err.domain())?;
                envelope.serialize_field("kind", err.kind())?;
                envelope.serialize_field("error", &err.to_string())?;
                envelope.end()
            }
        }
    }
}

/// Every domain polled by one request, in request order.
#[derive(Debug, Clone, Serialize)]
pub struct PollReport {
    pub host: String,
    pub polled_at: DateTime<Utc>,
    pub results: IndexMap<Domain, DomainOutcome>,
}

impl PollReport {
    fn new(host: &str) -> Self {
        Self {
            host: host.to_owned(),
            polled_at: Utc::now(),
            results: IndexMap::new(),
        }
    }

    fn push<R: Serialize>(&mut self, domain: Domain, result: Result<R, CoreError>) {
        let outcome = match result.and_then(|record| {
            serde_json::to_value(record).map_err(|e| CoreError::Serialization {
                domain,
                message: e.to_string(),
            })
        }) {
            Ok(value) => DomainOutcome::Record(value),
            Err(err) => {
                warn!(host = %self.host, domain = %domain, error = %err, "domain poll failed");
                DomainOutcome::Failed(err)
            }
        };
        self.results.insert(domain, outcome);
    }

    pub fn get(&self, domain: Domain) -> Option<&DomainOutcome> {
        self.results.get(&domain)
    }

    pub fn is_ok(&self) -> bool {
        self.results.values().all(DomainOutcome::is_ok)
    }

    pub fn errors(&self) -> impl Iterator<Item = &CoreError> {
        self.results.values().filter_map(DomainOutcome::error)
    }
}

/// A shared fetch, reported against each domain that needed it.
fn shared<'a>(payload: &'a Result<Value, CoreError>, domain: Domain) -> Result<&'a Value, CoreError> {
    payload.as_ref().map_err(|err| err.for_domain(domain))
}

// ── Poller ───────────────────────────────────────────────────────────

/// Polls one device through a [`Transport`].
pub struct Poller<T> {
    transport: T,
}

impl<T: Transport> Poller<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Fetch primitives ─────────────────────────────────────────────

    async fn rpc(&self, domain: Domain, rpc: Rpc) -> Result<Value, CoreError> {
        debug!(host = self.host(), %domain, %rpc, "executing rpc");
        self.transport
            .execute_rpc(&rpc)
            .await
            .map_err(|e| CoreError::transport(domain, &e))
    }

    async fn config(&self, domain: Domain, paths: &[&str]) -> Result<Value, CoreError> {
        let filter = ConfigFilter::new(paths.iter().copied())?;
        debug!(host = self.host(), %domain, %filter, "fetching configuration");
        self.transport
            .fetch_config(&filter.to_xml())
            .await
            .map_err(|e| CoreError::transport(domain, &e))
    }

    /// Fetch configuration for an arbitrary filter and return the raw payload.
    pub async fn raw_config<S: AsRef<str>>(&self, paths: &[S]) -> Result<Value, CoreError> {
        let filter = ConfigFilter::new(paths)?;
        self.transport
            .fetch_config(&filter.to_xml())
            .await
            .map_err(|e| CoreError::config_fetch(&e))
    }

    // ── Device info ──────────────────────────────────────────────────

    pub async fn facts(&self) -> Result<DeviceFacts, CoreError> {
        let domain = Domain::Facts;
        let software = self.rpc(domain, Rpc::new(SOFTWARE)).await?;
        let inventory = self.rpc(domain, Rpc::new(INVENTORY)).await?;
        let engines = self.rpc(domain, Rpc::new(ROUTE_ENGINE)).await?;
        facts::device_facts(&software, &inventory, &engines)
    }

    pub async fn licenses(&self) -> Result<Vec<LicenseEntry>, CoreError> {
        license::licenses(&self.rpc(Domain::Licensing, Rpc::new(LICENSE)).await?)
    }

    async fn system_config(&self, domain: Domain) -> Result<Value, CoreError> {
        self.config(domain, system::CONFIG_PATHS).await
    }

    pub async fn radius(&self) -> Result<Vec<RadiusServer>, CoreError> {
        system::radius_servers(&self.system_config(Domain::Radius).await?)
    }

    pub async fn syslog(&self) -> Result<Vec<SyslogServer>, CoreError> {
        system::syslog_servers(&self.system_config(Domain::Syslog).await?)
    }

    pub async fn ntp(&self) -> Result<Vec<NtpServer>, CoreError> {
        system::ntp_servers(&self.system_config(Domain::Ntp).await?)
    }

    pub async fn dns(&self) -> Result<DnsConfig, CoreError> {
        system::dns(&self.system_config(Domain::Dns).await?)
    }

    pub async fn snmp(&self) -> Result<SnmpConfig, CoreError> {
        system::snmp(&self.system_config(Domain::Snmp).await?)
    }

    // ── Hardware ─────────────────────────────────────────────────────

    pub async fn cpu(&self) -> Result<Vec<CpuStats>, CoreError> {
        hardware::cpu(&self.rpc(Domain::Cpu, Rpc::new(ROUTE_ENGINE)).await?)
    }

    pub async fn memory(&self) -> Result<Vec<MemoryStats>, CoreError> {
        hardware::memory(&self.rpc(Domain::Memory, Rpc::new(ROUTE_ENGINE)).await?)
    }

    pub async fn disks(&self) -> Result<Vec<DiskEntry>, CoreError> {
        hardware::disks(&self.rpc(Domain::Disk, Rpc::new(STORAGE)).await?)
    }

    pub async fn temperature(&self) -> Result<TemperatureStats, CoreError> {
        hardware::temperature(&self.rpc(Domain::Temperature, Rpc::new(ENVIRONMENT)).await?)
    }

    pub async fn fans(&self) -> Result<Vec<FanStatus>, CoreError> {
        self.fans_with(None).await
    }

    /// Fans from `get-fan-information`, or from the environment reply on
    /// platforms that reject that RPC. A pre-fetched environment reply is
    /// reused.
    async fn fans_with(
        &self,
        environment: Option<&Result<Value, CoreError>>,
    ) -> Result<Vec<FanStatus>, CoreError> {
        let domain = Domain::Fans;
        match self.rpc(domain, Rpc::new(FAN)).await {
            Ok(reply) => hardware::fans(&reply),
            Err(err) if err.transport_kind() == Some(TransportKind::Rejected) => {
                debug!(host = self.host(), "fan rpc rejected, using environment reply");
                match environment {
                    Some(env) => hardware::fans(shared(env, domain)?),
                    None => hardware::fans(&self.rpc(domain, Rpc::new(ENVIRONMENT)).await?),
                }
            }
            Err(err) => Err(err),
        }
    }

    // ── Interfaces & neighbors ───────────────────────────────────────

    pub async fn interfaces(&self) -> Result<Vec<InterfaceRecord>, CoreError> {
        let domain = Domain::Interfaces;
        let raw = self
            .rpc(domain, Rpc::new(INTERFACES).flag("extensive"))
            .await?;
        let software = self.rpc(domain, Rpc::new(SOFTWARE)).await?;
        let model = facts::model(&software).map_err(|e| e.for_domain(domain))?;

        let poe = if interfaces::supports_poe(&model) {
            match self.rpc(domain, Rpc::new(POE)).await {
                Ok(poe) => Some(poe),
                Err(err) => {
                    warn!(host = self.host(), %model, error = %err, "PoE status unavailable");
                    None
                }
            }
        } else {
            None
        };
        interfaces::interfaces(&raw, &model, poe.as_ref())
    }

    pub async fn lldp(&self) -> Result<Vec<LldpNeighbor>, CoreError> {
        let domain = Domain::Lldp;
        let summary = self.rpc(domain, Rpc::new(LLDP_SUMMARY)).await?;
        let mut details = Vec::new();
        for port in lldp::local_ports(&summary)? {
            let rpc = Rpc::new(LLDP_DETAIL).arg("interface-device", &port);
            match self.rpc(domain, rpc).await {
                Ok(detail) => details.push(detail),
                // Neighbors can age out between the summary and the detail.
                Err(err) => warn!(host = self.host(), %port, error = %err, "LLDP detail unavailable"),
            }
        }
        lldp::lldp_neighbors(&summary, &details)
    }

    // ── Forwarding ───────────────────────────────────────────────────

    pub async fn mac_table(&self) -> Result<Vec<MacTableEntry>, CoreError> {
        mac_table::mac_table(&self.rpc(Domain::MacTable, Rpc::new(MAC_TABLE)).await?)
    }

    pub async fn routes(&self) -> Result<Vec<Route>, CoreError> {
        routing::routes(&self.rpc(Domain::RoutingTable, Rpc::new(ROUTES)).await?)
    }

    pub async fn vlans(&self) -> Result<Vec<VlanRecord>, CoreError> {
        vlans::vlans(&self.config(Domain::Vlans, &[vlans::CONFIG_PATH]).await?)
    }

    // ── OSPF ─────────────────────────────────────────────────────────

    /// Overview reply and the capability it implies. A rejection that says
    /// OSPF is not running is itself the answer, not a failure.
    async fn ospf_overview_reply(&self) -> Result<(OspfCapability, Value), CoreError> {
        let rpc = Rpc::new(OSPF_OVERVIEW);
        debug!(host = self.host(), %rpc, "executing rpc");
        let reply = match self.transport.execute_rpc(&rpc).await {
            Ok(reply) => reply,
            Err(err) => match err.rpc_message() {
                Some(message) if ospf_not_running(message) => {
                    json!({"rpc-error": {"error-message": message}})
                }
                _ => return Err(CoreError::transport(Domain::OspfOverview, &err)),
            },
        };
        Ok((OspfCapability::detect(&reply), reply))
    }

    async fn ospf_outcomes(&self) -> OspfOutcomes {
        let (capability, overview) = match self.ospf_overview_reply().await {
            Ok(reply) => reply,
            Err(err) => {
                return OspfOutcomes {
                    overview: Err(err.clone()),
                    areas: Err(err.for_domain(Domain::OspfAreas)),
                    neighbors: Err(err.for_domain(Domain::OspfNeighbors)),
                    interfaces: Err(err.for_domain(Domain::OspfInterfaces)),
                };
            }
        };
        debug!(host = self.host(), ?capability, "ospf capability");

        if capability == OspfCapability::Unsupported {
            return OspfOutcomes {
                overview: ospf::ospf_overview(capability, None, None),
                areas: ospf::ospf_areas(capability, None),
                neighbors: ospf::ospf_neighbors(capability, None),
                interfaces: ospf::ospf_interfaces(capability, None, None),
            };
        }

        let config = match self.config(Domain::OspfOverview, &[ospf::CONFIG_PATH]).await {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(host = self.host(), error = %err, "OSPF configuration unavailable, using defaults");
                None
            }
        };
        let neighbors = self
            .rpc(Domain::OspfNeighbors, Rpc::new(OSPF_NEIGHBORS))
            .await;
        let interfaces = self
            .rpc(Domain::OspfInterfaces, Rpc::new(OSPF_INTERFACES).flag("detail"))
            .await;

        OspfOutcomes {
            overview: ospf::ospf_overview(capability, Some(&overview), config.as_ref()),
            areas: ospf::ospf_areas(capability, Some(&overview)),
            neighbors: neighbors.and_then(|raw| ospf::ospf_neighbors(capability, Some(&raw))),
            interfaces: interfaces
                .and_then(|raw| ospf::ospf_interfaces(capability, Some(&raw), config.as_ref())),
        }
    }

    /// All four OSPF domains, failing on the first domain error.
    pub async fn ospf(&self) -> Result<OspfReport, CoreError> {
        let outcomes = self.ospf_outcomes().await;
        Ok(OspfReport {
            overview: outcomes.overview?,
            areas: outcomes.areas?,
            neighbors: outcomes.neighbors?,
            interfaces: outcomes.interfaces?,
        })
    }

    // ── Group polls ──────────────────────────────────────────────────

    /// Poll every domain of a request group.
    pub async fn poll_group(&self, group: Group) -> PollReport {
        let mut report = PollReport::new(self.host());
        debug!(host = self.host(), %group, "polling group");
        match group {
            Group::DeviceInfo => self.poll_device_info(&mut report).await,
            Group::Hardware => self.poll_hardware(&mut report).await,
            Group::Interfaces => report.push(Domain::Interfaces, self.interfaces().await),
            Group::Lldp => report.push(Domain::Lldp, self.lldp().await),
            Group::Vlans => report.push(Domain::Vlans, self.vlans().await),
            Group::Mac => report.push(Domain::MacTable, self.mac_table().await),
            Group::Routing => report.push(Domain::RoutingTable, self.routes().await),
            Group::Ospf => {
                let outcomes = self.ospf_outcomes().await;
                report.push(Domain::OspfOverview, outcomes.overview);
                report.push(Domain::OspfAreas, outcomes.areas);
                report.push(Domain::OspfNeighbors, outcomes.neighbors);
                report.push(Domain::OspfInterfaces, outcomes.interfaces);
            }
        }
        report
    }

    /// Poll a single domain.
    pub async fn poll_domain(&self, domain: Domain) -> PollReport {
        let mut report = PollReport::new(self.host());
        match domain {
            Domain::Facts => report.push(domain, self.facts().await),
            Domain::Licensing => report.push(domain, self.licenses().await),
            Domain::Radius => report.push(domain, self.radius().await),
            Domain::Syslog => report.push(domain, self.syslog().await),
            Domain::Ntp => report.push(domain, self.ntp().await),
            Domain::Dns => report.push(domain, self.dns().await),
            Domain::Snmp => report.push(domain, self.snmp().await),
            Domain::Cpu => report.push(domain, self.cpu().await),
            Domain::Memory => report.push(domain, self.memory().await),
            Domain::Disk => report.push(domain, self.disks().await),
            Domain::Temperature => report.push(domain, self.temperature().await),
            Domain::Fans => report.push(domain, self.fans().await),
            Domain::Interfaces => report.push(domain, self.interfaces().await),
            Domain::Lldp => report.push(domain, self.lldp().await),
            Domain::MacTable => report.push(domain, self.mac_table().await),
            Domain::RoutingTable => report.push(domain, self.routes().await),
            Domain::Vlans => report.push(domain, self.vlans().await),
            Domain::OspfOverview => report.push(domain, self.ospf_outcomes().await.overview),
            Domain::OspfAreas => report.push(domain, self.ospf_outcomes().await.areas),
            Domain::OspfNeighbors => report.push(domain, self.ospf_outcomes().await.neighbors),
            Domain::OspfInterfaces => report.push(domain, self.ospf_outcomes().await.interfaces),
        }
        report
    }

    async fn poll_device_info(&self, report: &mut PollReport) {
        report.push(Domain::Facts, self.facts().await);
        report.push(Domain::Licensing, self.licenses().await);

        let config = self.system_config(Domain::Radius).await;
        report.push(
            Domain::Radius,
            shared(&config, Domain::Radius).and_then(system::radius_servers),
        );
        report.push(
            Domain::Syslog,
            shared(&config, Domain::Syslog).and_then(system::syslog_servers),
        );
        report.push(Domain::Ntp, shared(&config, Domain::Ntp).and_then(system::ntp_servers));
        report.push(Domain::Dns, shared(&config, Domain::Dns).and_then(system::dns));
        report.push(Domain::Snmp, shared(&config, Domain::Snmp).and_then(system::snmp));
    }

    async fn poll_hardware(&self, report: &mut PollReport) {
        let engines = self.rpc(Domain::Cpu, Rpc::new(ROUTE_ENGINE)).await;
        report.push(Domain::Cpu, shared(&engines, Domain::Cpu).and_then(hardware::cpu));
        report.push(
            Domain::Memory,
            shared(&engines, Domain::Memory).and_then(hardware::memory),
        );
        report.push(Domain::Disk, self.disks().await);

        let environment = self.rpc(Domain::Temperature, Rpc::new(ENVIRONMENT)).await;
        report.push(
            Domain::Temperature,
            shared(&environment, Domain::Temperature).and_then(hardware::temperature),
        );
        report.push(Domain::Fans, self.fans_with(Some(&environment)).await);
    }
}

fn ospf_not_running(message: &str) -> bool {
    OspfCapability::detect(&Value::from(message)) == OspfCapability::Unsupported
}

struct OspfOutcomes {
    overview: Result<crate::model::OspfOverview, CoreError>,
    areas: Result<Vec<crate::model::OspfArea>, CoreError>,
    neighbors: Result<Vec<crate::model::OspfNeighbor>, CoreError>,
    interfaces: Result<Vec<crate::model::OspfInterface>, CoreError>,
}
