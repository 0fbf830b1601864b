#![allow(clippy::unwrap_used)]
// Poller tests: group polls over replayed captures and a scripted transport.

use std::collections::HashMap;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use junosnap_api::{Error, ReplayTransport, Rpc, Transport};
use junosnap_core::{CoreError, Domain, DomainOutcome, Group, Poller, TransportKind};

fn capture(dir: &Path, name: &str, body: &Value) {
    std::fs::write(dir.join(format!("{name}.json")), body.to_string()).unwrap();
}

fn record(outcome: Option<&DomainOutcome>) -> &Value {
    match outcome {
        Some(DomainOutcome::Record(value)) => value,
        other => panic!("expected a record, got {other:?}"),
    }
}

/// Answers from a fixed table; RPCs mapped to `Err` are rejected by the
/// "device" with that message.
struct Scripted {
    replies: HashMap<&'static str, Result<Value, &'static str>>,
    config: Option<Value>,
}

impl Scripted {
    fn new() -> Self {
        Self { replies: HashMap::new(), config: None }
    }

    fn reply(mut self, rpc: &'static str, body: Value) -> Self {
        self.replies.insert(rpc, Ok(body));
        self
    }

    fn reject(mut self, rpc: &'static str, message: &'static str) -> Self {
        self.replies.insert(rpc, Err(message));
        self
    }

    fn config(mut self, body: Value) -> Self {
        self.config = Some(body);
        self
    }
}

impl Transport for Scripted {
    fn host(&self) -> &str {
        "scripted"
    }

    async fn execute_rpc(&self, rpc: &Rpc) -> Result<Value, Error> {
        match self.replies.get(rpc.name()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(Error::Rpc {
                rpc: rpc.name().to_owned(),
                message: (*message).to_owned(),
            }),
            None => Err(Error::Timeout { timeout_secs: 30 }),
        }
    }

    async fn fetch_config(&self, _filter: &str) -> Result<Value, Error> {
        self.config
            .clone()
            .ok_or(Error::Timeout { timeout_secs: 30 })
    }
}

#[tokio::test]
async fn test_device_info_isolates_failed_domains() {
    let dir = tempfile::tempdir().unwrap();
    capture(
        dir.path(),
        "configuration",
        &json!({"configuration": {"system": {"radius-server": {"name": "10.1.1.1", "port": 1812}}}}),
    );

    let poller = Poller::new(ReplayTransport::new(dir.path()).with_host("sw-lab-1"));
    let report = poller.poll_group(Group::DeviceInfo).await;

    assert_eq!(report.host, "sw-lab-1");
    let domains: Vec<_> = report.results.keys().copied().collect();
    assert_eq!(domains, Group::DeviceInfo.domains());

    assert_eq!(
        record(report.get(Domain::Radius)),
        &json!([{"server": "10.1.1.1", "port": 1812, "acc_port": 1813, "timeout": 5, "retry": 3, "source": ""}])
    );
    assert_eq!(record(report.get(Domain::Ntp)), &json!([]));

    let facts = serde_json::to_value(report.get(Domain::Facts).unwrap()).unwrap();
    assert_eq!(facts["status"], "error");
    assert_eq!(facts["domain"], "facts");
    assert_eq!(facts["kind"], "transport-unavailable");
    assert_eq!(report.errors().count(), 2);
}

#[tokio::test]
async fn test_shared_config_failure_is_reported_per_domain() {
    let poller = Poller::new(Scripted::new());
    let report = poller.poll_group(Group::DeviceInfo).await;

    for domain in [Domain::Radius, Domain::Syslog, Domain::Ntp, Domain::Dns, Domain::Snmp] {
        let err = report.get(domain).unwrap().error().unwrap();
        assert_eq!(err.domain(), Some(domain));
        assert_eq!(err.transport_kind(), Some(TransportKind::Timeout));
    }
}

#[tokio::test]
async fn test_ospf_not_running_yields_empty_shapes() {
    let transport = Scripted::new().reject(
        "get-ospf-overview-information",
        "OSPF instance is not running",
    );
    let report = Poller::new(transport).poll_group(Group::Ospf).await;

    assert!(report.is_ok());
    assert_eq!(
        record(report.get(Domain::OspfOverview)),
        &json!({"id": "", "reference": ""})
    );
    assert_eq!(record(report.get(Domain::OspfAreas)), &json!([]));
    assert_eq!(record(report.get(Domain::OspfNeighbors)), &json!([]));
    assert_eq!(record(report.get(Domain::OspfInterfaces)), &json!([]));
}

#[tokio::test]
async fn test_ospf_overview_failure_reaches_every_domain() {
    let transport = Scripted::new().reject("get-ospf-overview-information", "permission denied");
    let report = Poller::new(transport).poll_group(Group::Ospf).await;

    assert_eq!(report.errors().count(), 4);
    let err = report.get(Domain::OspfInterfaces).unwrap().error().unwrap();
    assert_eq!(err.transport_kind(), Some(TransportKind::Rejected));
}

#[tokio::test]
async fn test_ospf_supported_uses_config() {
    let transport = Scripted::new()
        .reply(
            "get-ospf-overview-information",
            json!({"ospf-overview-information": {"ospf-overview": {
                "ospf-router-id": "10.250.1.1",
                "ospf-area-overview": {"ospf-area": "0.0.0.0", "authentication-type": "None"}
            }}}),
        )
        .reply(
            "get-ospf-neighbor-information",
            json!({"ospf-neighbor-information": null}),
        )
        .reply(
            "get-ospf-interface-information",
            json!({"ospf-interface-information": {"ospf-interface": {
                "interface-name": "irb.10",
                "ospf-interface-state": "DR",
                "ospf-area": "0.0.0.0",
                "interface-cost": "10"
            }}}),
        )
        .config(json!({"configuration": {"protocols": {"ospf": {
            "reference-bandwidth": "10g",
            "area": {"name": "0.0.0.0", "interface": {"name": "irb.10", "passive": null}}
        }}}}));

    let ospf = Poller::new(transport).ospf().await.unwrap();

    assert_eq!(ospf.overview.id, "10.250.1.1");
    assert_eq!(ospf.overview.reference, "10g");
    assert_eq!(ospf.areas[0].area_type, "normal");
    assert!(ospf.neighbors.is_empty());
    assert!(ospf.interfaces[0].passive);
    assert_eq!(ospf.interfaces[0].cost, 10);
}

#[tokio::test]
async fn test_fans_fall_back_to_environment() {
    let transport = Scripted::new()
        .reject("get-fan-information", "syntax error")
        .reply(
            "get-environment-information",
            json!({"environment-information": {"environment-item": [
                {"name": "Fan Tray 0 Fan 0", "class": "Fans", "status": "OK", "comment": "Spinning at normal speed"},
                {"name": "FPC 0 CPU Temp", "class": "Temp", "status": "OK",
                 "temperature": {"#text": "54 degrees C / 129 degrees F", "@junos:celsius": "54"}}
            ]}}),
        );

    let fans = Poller::new(transport).fans().await.unwrap();
    assert_eq!(fans.len(), 1);
    assert_eq!(fans[0].fan, "Fan Tray 0 Fan 0");
    assert_eq!(fans[0].rpm, 0);
}

#[tokio::test]
async fn test_hardware_group_shares_route_engine_reply() {
    let transport = Scripted::new().reply(
        "get-route-engine-information",
        json!({"route-engine-information": {"route-engine": {
            "slot": "0",
            "cpu-idle": "93",
            "memory-dram-size": "2048 MB",
            "memory-buffer-utilization": "25"
        }}}),
    );
    let report = Poller::new(transport).poll_group(Group::Hardware).await;

    assert_eq!(record(report.get(Domain::Cpu))[0]["used"], 7);
    assert_eq!(record(report.get(Domain::Memory))[0]["total"], 2048);
    assert_eq!(record(report.get(Domain::Memory))[0]["used"], 512);

    let disk = report.get(Domain::Disk).unwrap().error().unwrap();
    assert!(matches!(disk, CoreError::TransportUnavailable { domain: Domain::Disk, .. }));
    assert!(report.get(Domain::Fans).unwrap().error().is_some());
}

#[tokio::test]
async fn test_poe_failure_degrades_to_no_poe() {
    let transport = Scripted::new()
        .reply(
            "get-interface-information",
            json!({"interface-information": {"physical-interface": {
                "name": "ge-0/0/1",
                "admin-status": "up",
                "oper-status": "up",
                "speed": "1000mbps"
            }}}),
        )
        .reply(
            "get-software-information",
            json!({"software-information": {"host-name": "sw1", "product-model": "ex2300-c-12p"}}),
        )
        .reject("get-poe-interface-information", "poe not supported");

    let interfaces = Poller::new(transport).interfaces().await.unwrap();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].poe, None);
}

#[tokio::test]
async fn test_lldp_detail_failure_keeps_summary_neighbors() {
    let transport = Scripted::new()
        .reply(
            "get-lldp-neighbors-information",
            json!({"lldp-neighbors-information": {"lldp-neighbor-information": [
                {
                    "lldp-local-port-id": "ge-0/0/1",
                    "lldp-remote-chassis-id": "00:11:22:33:44:55",
                    "lldp-remote-system-name": "ap-1",
                    "lldp-remote-port-id": "eth0"
                },
                {
                    "lldp-local-port-id": "ge-0/0/2",
                    "lldp-remote-chassis-id": "00:11:22:33:44:66",
                    "lldp-remote-system-name": "ap-2",
                    "lldp-remote-port-id": "eth0"
                }
            ]}}),
        )
        .reject("get-lldp-interface-neighbors", "neighbor aged out");

    let neighbors = Poller::new(transport).lldp().await.unwrap();
    assert_eq!(neighbors.len(), 2);
    assert_eq!(neighbors[0].name, "ge-0/0/1");
    assert_eq!(neighbors[1].system, "ap-2");
    assert_eq!(neighbors[1].ip, "");
    assert_eq!(neighbors[1].serial, "");
}
