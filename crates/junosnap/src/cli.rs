//! Clap derive structures for the `junosnap` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! workspace crates so the build script can render man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// junosnap -- normalized state snapshots from Junos devices
#[derive(Debug, Parser)]
#[command(
    name = "junosnap",
    version,
    about = "Poll Junos devices and print normalized state",
    long_about = "Polls Junos switches and routers over the REST API and turns their\n\
        replies into one canonical record per data domain: facts, services,\n\
        hardware health, interfaces, neighbors, forwarding tables and OSPF.\n\n\
        Captured replies can be replayed offline with --replay.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "JUNOSNAP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device host, repeatable (overrides the profile host)
    #[arg(
        long = "host",
        short = 'H',
        env = "JUNOSNAP_HOST",
        value_delimiter = ',',
        global = true
    )]
    pub hosts: Vec<String>,

    /// Username (overrides the profile)
    #[arg(long, short = 'u', env = "JUNOSNAP_USERNAME", global = true)]
    pub user: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JUNOSNAP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "JUNOSNAP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides the profile)
    #[arg(long, env = "JUNOSNAP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Serve replies from a capture directory instead of a device
    #[arg(long, value_name = "DIR", global = true)]
    pub replay: Option<PathBuf>,

    /// Repeat the poll every N seconds until interrupted
    #[arg(long, value_name = "SECS", global = true)]
    pub watch: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty tables (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Facts, licenses and system services (RADIUS, syslog, NTP, DNS, SNMP)
    #[command(alias = "facts")]
    Info,

    /// CPU, memory, disk, temperature and fans
    #[command(alias = "hw")]
    Hardware,

    /// Physical interfaces with counters and PoE
    #[command(alias = "if")]
    Interfaces,

    /// LLDP neighbors
    Lldp,

    /// Configured VLANs
    Vlans,

    /// Ethernet switching (MAC) table
    Mac,

    /// Active routes
    #[command(alias = "routes")]
    Routing,

    /// OSPF overview, areas, neighbors and interfaces
    Ospf,

    /// Poll a single data domain
    Get {
        /// Domain name (e.g. `ntp`, `mac-table`, `ospf-areas`)
        domain: String,
    },

    /// Build a configuration filter from slash-separated paths
    Filter(FilterArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FILTER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Configuration paths, e.g. `system/ntp` `vlans`
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    /// Fetch the filtered configuration instead of printing the filter
    #[arg(long)]
    pub fetch: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: host, port, scheme, username, password_env, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// List configured profiles
    #[command(alias = "ls")]
    List,

    /// Remove a profile and its stored password
    #[command(alias = "rm")]
    Remove {
        /// Profile name to remove
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
