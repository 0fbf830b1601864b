//! Device facts, licenses and system services.

use serde_json::Value;
use tabled::Tabled;

use junosnap_core::{
    DeviceFacts, DnsConfig, Domain, LicenseEntry, NtpServer, RadiusServer, SnmpConfig,
    SyslogServer,
};

use crate::commands::util;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LicenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Features")]
    features: String,
    #[tabled(rename = "Expires")]
    expiry: String,
}

impl From<&LicenseEntry> for LicenseRow {
    fn from(l: &LicenseEntry) -> Self {
        Self {
            id: util::opt(l.lic_id.as_deref()),
            features: l.name.join(", "),
            expiry: l.expiry.clone().unwrap_or_else(|| "permanent".into()),
        }
    }
}

#[derive(Tabled)]
struct RadiusRow {
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Auth Port")]
    port: u16,
    #[tabled(rename = "Acct Port")]
    acc_port: u16,
    #[tabled(rename = "Timeout")]
    timeout: u32,
    #[tabled(rename = "Retry")]
    retry: u32,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&RadiusServer> for RadiusRow {
    fn from(r: &RadiusServer) -> Self {
        Self {
            server: r.server.clone(),
            port: r.port,
            acc_port: r.acc_port,
            timeout: r.timeout,
            retry: r.retry,
            source: r.source.clone(),
        }
    }
}

#[derive(Tabled)]
struct SyslogRow {
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Facilities")]
    facilities: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Prefix")]
    prefix: String,
}

impl From<&SyslogServer> for SyslogRow {
    fn from(s: &SyslogServer) -> Self {
        Self {
            server: s.server.clone(),
            facilities: s.facilities.join(", "),
            level: s.level.clone(),
            source: s.source.clone(),
            prefix: s.prefix.clone(),
        }
    }
}

#[derive(Tabled)]
struct NtpRow {
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Prefer")]
    prefer: String,
}

#[derive(Tabled)]
struct DnsRow {
    #[tabled(rename = "Name Server")]
    server: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Tabled)]
struct CommunityRow {
    #[tabled(rename = "Community")]
    community: String,
    #[tabled(rename = "Access")]
    access: String,
    #[tabled(rename = "Clients")]
    clients: String,
}

// ── Sections ────────────────────────────────────────────────────────

pub fn section(domain: Domain, value: &Value) -> Result<String, CliError> {
    Ok(match domain {
        Domain::Facts => facts(&util::typed(value)?),
        Domain::Licensing => {
            let rows: Vec<LicenseRow> = util::typed::<Vec<LicenseEntry>>(value)?
                .iter()
                .map(LicenseRow::from)
                .collect();
            output::render_table("Licenses", &rows)
        }
        Domain::Radius => {
            let rows: Vec<RadiusRow> = util::typed::<Vec<RadiusServer>>(value)?
                .iter()
                .map(RadiusRow::from)
                .collect();
            output::render_table("RADIUS", &rows)
        }
        Domain::Syslog => {
            let rows: Vec<SyslogRow> = util::typed::<Vec<SyslogServer>>(value)?
                .iter()
                .map(SyslogRow::from)
                .collect();
            output::render_table("Syslog", &rows)
        }
        Domain::Ntp => {
            let rows: Vec<NtpRow> = util::typed::<Vec<NtpServer>>(value)?
                .into_iter()
                .map(|n| NtpRow {
                    server: n.server,
                    prefer: if n.prefer { "yes".into() } else { String::new() },
                })
                .collect();
            output::render_table("NTP", &rows)
        }
        Domain::Dns => dns(&util::typed(value)?),
        Domain::Snmp => snmp(&util::typed(value)?),
        other => unreachable!("{other} is not a device-info domain"),
    })
}

fn facts(f: &DeviceFacts) -> String {
    output::render_detail(
        "Facts",
        &[
            ("Hostname", f.hostname.clone()),
            ("Model", f.model.clone()),
            ("Serial", f.serial.clone()),
            ("Version", f.version.clone()),
            ("Uptime", util::format_uptime(f.uptime)),
        ],
    )
}

fn dns(d: &DnsConfig) -> String {
    let rows: Vec<DnsRow> = d
        .servers
        .iter()
        .map(|s| DnsRow {
            server: s.server.clone(),
            source: util::opt(s.source.as_address()),
        })
        .collect();
    let title = if d.domain.is_empty() {
        "DNS".to_owned()
    } else {
        format!("DNS ({})", d.domain)
    };
    output::render_table(&title, &rows)
}

fn snmp(s: &SnmpConfig) -> String {
    let detail = output::render_detail(
        "SNMP",
        &[
            ("Name", s.name.clone()),
            ("Contact", s.contact.clone()),
            ("Description", s.description.clone()),
        ],
    );
    let rows: Vec<CommunityRow> = s
        .communities
        .iter()
        .map(|c| CommunityRow {
            community: c.community.clone(),
            access: c.access.clone(),
            clients: c.clients.join(", "),
        })
        .collect();
    format!("{detail}\n{}", output::render_table("Communities", &rows))
}
