// ── System services ──
//
// RADIUS, syslog, NTP, DNS and SNMP all come from one filtered configuration
// fetch. A subtree that is not configured yields an empty result, not an
// error: an unconfigured service is a normal device state.

use serde_json::Value;

use crate::defaults;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::model::{
    DnsConfig, DnsServer, DnsSource, NtpServer, RadiusServer, SnmpCommunity, SnmpConfig,
    SyslogServer,
};
use crate::raw::Node;

/// Configuration paths requested for the device-info group.
pub const CONFIG_PATHS: &[&str] = &[
    "system/radius-server",
    "system/syslog/host",
    "system/ntp",
    "system/name-server",
    "system/domain-name",
    "snmp",
];

fn configuration<'a>(domain: Domain, raw: &'a Value) -> Result<Node<'a>, CoreError> {
    Node::root(domain, raw).child("configuration")
}

fn system<'a>(domain: Domain, raw: &'a Value) -> Result<Option<Node<'a>>, CoreError> {
    Ok(configuration(domain, raw)?.get("system"))
}

pub fn radius_servers(config: &Value) -> Result<Vec<RadiusServer>, CoreError> {
    let Some(system) = system(Domain::Radius, config)? else {
        return Ok(Vec::new());
    };

    system
        .items_of("radius-server")?
        .iter()
        .map(|server| {
            Ok(RadiusServer {
                server: server.required_text("name")?,
                port: server.parse_or("port", "port number", defaults::radius::PORT)?,
                acc_port: server.parse_or(
                    "accounting-port",
                    "port number",
                    defaults::radius::ACCOUNTING_PORT,
                )?,
                timeout: server.parse_or("timeout", "integer", defaults::radius::TIMEOUT_SECS)?,
                retry: server.parse_or("retry", "integer", defaults::radius::RETRIES)?,
                source: server.string_or("source-address", defaults::radius::SOURCE),
            })
        })
        .collect()
}

pub fn syslog_servers(config: &Value) -> Result<Vec<SyslogServer>, CoreError> {
    let Some(syslog) = system(Domain::Syslog, config)?.and_then(|s| s.get("syslog")) else {
        return Ok(Vec::new());
    };

    syslog
        .items_of("host")?
        .iter()
        .map(|host| {
            let contents = host.items_of("contents")?;
            let facilities = contents
                .iter()
                .map(|c| c.required_text("name"))
                .collect::<Result<Vec<_>, _>>()?;
            let level = contents
                .first()
                .and_then(|c| c.value().as_object())
                .and_then(|keys| {
                    keys.keys()
                        .find(|key| defaults::syslog::LEVELS.contains(&key.as_str()))
                })
                .map_or_else(|| defaults::syslog::LEVEL.to_owned(), Clone::clone);

            Ok(SyslogServer {
                server: host.required_text("name")?,
                facilities,
                level,
                source: host.string_or("source-address", defaults::syslog::SOURCE),
                prefix: host.string_or("log-prefix", defaults::syslog::PREFIX),
            })
        })
        .collect()
}

/// NTP servers. Servers reached through a routing instance are skipped.
pub fn ntp_servers(config: &Value) -> Result<Vec<NtpServer>, CoreError> {
    let Some(ntp) = system(Domain::Ntp, config)?.and_then(|s| s.get("ntp")) else {
        return Ok(Vec::new());
    };

    let mut servers = Vec::new();
    for server in ntp.items_of("server")? {
        if server.has("routing-instance") {
            continue;
        }
        servers.push(NtpServer {
            server: server.required_text("name")?,
            prefer: server.has("prefer"),
        });
    }
    Ok(servers)
}

pub fn dns(config: &Value) -> Result<DnsConfig, CoreError> {
    let Some(system) = system(Domain::Dns, config)? else {
        return Ok(DnsConfig::default());
    };

    let servers = system
        .items_of("name-server")?
        .iter()
        .map(|server| {
            Ok(DnsServer {
                server: server.required_text("name")?,
                source: server
                    .text_of("source-address")
                    .map_or(DnsSource::Unset, DnsSource::Address),
            })
        })
        .collect::<Result<_, CoreError>>()?;

    Ok(DnsConfig {
        domain: system.string_or("domain-name", defaults::dns::DOMAIN),
        servers,
    })
}

pub fn snmp(config: &Value) -> Result<SnmpConfig, CoreError> {
    let Some(snmp) = configuration(Domain::Snmp, config)?.get("snmp") else {
        return Ok(SnmpConfig::default());
    };

    let communities = snmp
        .items_of("community")?
        .iter()
        .map(|community| {
            let clients = community
                .items_of("clients")?
                .iter()
                .map(|client| client.required_text("name"))
                .collect::<Result<_, _>>()?;
            Ok(SnmpCommunity {
                community: community.required_text("name")?,
                access: community.string_or("authorization", defaults::snmp::ACCESS),
                clients,
            })
        })
        .collect::<Result<_, CoreError>>()?;

    Ok(SnmpConfig {
        name: snmp.string_or("name", defaults::snmp::NAME),
        contact: snmp.string_or("contact", defaults::snmp::CONTACT),
        description: snmp.string_or("description", defaults::snmp::DESCRIPTION),
        communities,
    })
}
