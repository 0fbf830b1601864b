//! Command dispatch: bridges CLI args -> poller requests -> output formatting.

pub mod config_cmd;
pub mod filter;
pub mod hardware;
pub mod info;
pub mod interfaces;
pub mod lldp;
pub mod mac;
pub mod ospf;
pub mod routing;
pub mod util;
pub mod vlans;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use junosnap_api::AnyTransport;
use junosnap_core::{CoreError, Domain, DomainOutcome, Group, PollReport, Poller};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// What a command asks every poller for.
#[derive(Debug, Clone, Copy)]
enum Request {
    Group(Group),
    Domain(Domain),
}

impl Request {
    async fn run(self, poller: &Poller<AnyTransport>) -> PollReport {
        match self {
            Self::Group(group) => poller.poll_group(group).await,
            Self::Domain(domain) => poller.poll_domain(domain).await,
        }
    }
}

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    pollers: &[Poller<AnyTransport>],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let request = match cmd {
        Command::Info => Request::Group(Group::DeviceInfo),
        Command::Hardware => Request::Group(Group::Hardware),
        Command::Interfaces => Request::Group(Group::Interfaces),
        Command::Lldp => Request::Group(Group::Lldp),
        Command::Vlans => Request::Group(Group::Vlans),
        Command::Mac => Request::Group(Group::Mac),
        Command::Routing => Request::Group(Group::Routing),
        Command::Ospf => Request::Group(Group::Ospf),
        Command::Get { domain } => Request::Domain(util::parse_domain(&domain)?),
        Command::Filter(args) => return filter::fetch(&args, pollers, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    };

    match global.watch {
        Some(secs) => watch(request, pollers, global, secs).await,
        None => {
            let reports = poll(request, pollers, global).await;
            render(&reports, global, false)?;
            outcome(&reports)
        }
    }
}

/// Poll every device concurrently.
async fn poll(
    request: Request,
    pollers: &[Poller<AnyTransport>],
    global: &GlobalOpts,
) -> Vec<PollReport> {
    let spinner = util::spinner(global, &format!("Polling {} device(s)", pollers.len()));
    let reports = futures::future::join_all(pollers.iter().map(|p| request.run(p))).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    debug!(?request, devices = reports.len(), "poll complete");
    reports
}

/// Re-poll on a fixed interval until Ctrl-C. Failed polls are reported and
/// the loop carries on.
async fn watch(
    request: Request,
    pollers: &[Poller<AnyTransport>],
    global: &GlobalOpts,
    secs: u64,
) -> Result<(), CliError> {
    if secs == 0 {
        return Err(CliError::Validation {
            field: "watch".into(),
            reason: "interval must be at least 1 second".into(),
        });
    }

    let period = Duration::from_secs(secs);
    info!(interval = %humantime::format_duration(period), "watching");
    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reports = poll(request, pollers, global).await;
                render(&reports, global, true)?;
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted, stopping watch");
                return Ok(());
            }
        }
    }
}

/// Print reports in the requested format. Failures go to stderr in table
/// and plain mode; structured output carries them as error envelopes.
fn render(reports: &[PollReport], global: &GlobalOpts, watching: bool) -> Result<(), CliError> {
    match global.output {
        OutputFormat::Table => render_tables(reports, global, watching),
        OutputFormat::Plain => {
            for report in reports {
                for (domain, result) in &report.results {
                    match result {
                        DomainOutcome::Record(value) => output::print_output(
                            &output::render_plain(value, plain_key(*domain)),
                            global.quiet,
                        ),
                        DomainOutcome::Failed(err) => report_failure(report, *domain, err),
                    }
                }
            }
            Ok(())
        }
        format => {
            let out = match reports {
                [single] => output::render_structured(format, single)?,
                many => output::render_structured(format, many)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn render_tables(
    reports: &[PollReport],
    global: &GlobalOpts,
    watching: bool,
) -> Result<(), CliError> {
    let with_header = watching || reports.len() > 1;
    for report in reports {
        let mut blocks = Vec::new();
        if with_header {
            blocks.push(output::heading(&format!(
                "━━ {} ({}) ━━",
                report.host,
                report.polled_at.format("%Y-%m-%d %H:%M:%S UTC")
            )));
        }
        for (domain, result) in &report.results {
            match result {
                DomainOutcome::Record(value) => blocks.push(section(*domain, value)?),
                DomainOutcome::Failed(err) => report_failure(report, *domain, err),
            }
        }
        output::print_output(&blocks.join("\n\n"), global.quiet);
    }
    Ok(())
}

fn report_failure(report: &PollReport, domain: Domain, err: &CoreError) {
    let label = format!("{} {domain}", report.host);
    eprintln!("{}", output::failure(&label, &err.to_string()));
}

/// Table rendering of one domain record.
fn section(domain: Domain, value: &Value) -> Result<String, CliError> {
    match domain.group() {
        Group::DeviceInfo => info::section(domain, value),
        Group::Hardware => hardware::section(domain, value),
        Group::Interfaces => interfaces::section(value),
        Group::Lldp => lldp::section(value),
        Group::Vlans => vlans::section(value),
        Group::Mac => mac::section(value),
        Group::Routing => routing::section(value),
        Group::Ospf => ospf::section(domain, value),
    }
}

/// Identifying field of a list record, for plain output.
fn plain_key(domain: Domain) -> &'static str {
    match domain {
        Domain::Licensing => "lic_id",
        Domain::Cpu | Domain::Memory => "slot",
        Domain::Disk => "mount",
        Domain::Fans => "fan",
        Domain::MacTable => "mac",
        Domain::RoutingTable => "route",
        Domain::OspfAreas | Domain::OspfNeighbors | Domain::Vlans => "id",
        Domain::Radius | Domain::Syslog | Domain::Ntp => "server",
        _ => "name",
    }
}

/// Exit status for a finished poll: every domain failed -> the first
/// error, some failed -> partial failure.
fn outcome(reports: &[PollReport]) -> Result<(), CliError> {
    let total: usize = reports.iter().map(|r| r.results.len()).sum();
    let mut errors = reports.iter().flat_map(PollReport::errors);
    let Some(first) = errors.next() else {
        return Ok(());
    };
    let failed = 1 + errors.count();
    if failed == total {
        Err(first.clone().into())
    } else {
        Err(CliError::PartialFailure { failed, total })
    }
}
