//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use junosnap_config::ConfigError;
use junosnap_core::{CoreError, TransportKind};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PAYLOAD: i32 = 5;
    pub const PARTIAL: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach device: {reason}")]
    #[diagnostic(
        code(junosnap::connection_failed),
        help(
            "Check that the REST service is enabled on the device:\n\
             set system services rest https port 3443\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out: {reason}")]
    #[diagnostic(
        code(junosnap::timeout),
        help("Increase timeout with --timeout or check device responsiveness.")
    )]
    Timeout { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {reason}")]
    #[diagnostic(
        code(junosnap::auth_failed),
        help(
            "Verify the username and password for this device.\n\
             Run: junosnap config set-password"
        )
    )]
    AuthFailed { reason: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(junosnap::no_credentials),
        help(
            "Configure credentials with: junosnap config init\n\
             Or set JUNOSNAP_USERNAME and JUNOSNAP_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Device replies ───────────────────────────────────────────────
    #[error("Device rejected the request: {reason}")]
    #[diagnostic(code(junosnap::rpc_rejected))]
    Rejected { reason: String },

    #[error("No captured reply: {reason}")]
    #[diagnostic(
        code(junosnap::missing_capture),
        help("Replay directories hold one <rpc-name>.json per RPC plus configuration.json.")
    )]
    MissingCapture { reason: String },

    #[error("Unexpected reply from device: {reason}")]
    #[diagnostic(
        code(junosnap::payload),
        help("Re-run with -vv to log the RPCs involved.")
    )]
    Payload { reason: String },

    #[error("{failed} of {total} domains failed")]
    #[diagnostic(
        code(junosnap::partial_failure),
        help("Failed domains are listed above; the rest were reported normally.")
    )]
    PartialFailure { failed: usize, total: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(junosnap::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(junosnap::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: junosnap config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(junosnap::no_config),
        help(
            "Create a profile with: junosnap config init\n\
             Or pass --host. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(junosnap::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(junosnap::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(junosnap::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::MissingCapture { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Payload { .. } | Self::Rejected { .. } => exit_code::PAYLOAD,
            Self::PartialFailure { .. } => exit_code::PARTIAL,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let reason = err.to_string();
        match err {
            CoreError::TransportUnavailable { kind, .. } | CoreError::ConfigFetch { kind, .. } => {
                match kind {
                    TransportKind::Authentication => Self::AuthFailed { reason },
                    TransportKind::Unreachable => Self::ConnectionFailed { reason },
                    TransportKind::Timeout => Self::Timeout { reason },
                    TransportKind::Rejected => Self::Rejected { reason },
                    TransportKind::MissingCapture => Self::MissingCapture { reason },
                    TransportKind::Undecodable => Self::Payload { reason },
                }
            }

            CoreError::MalformedPayload { .. }
            | CoreError::NumericCoercion { .. }
            | CoreError::CapabilityUnknown { .. }
            | CoreError::MissingPayload { .. }
            | CoreError::Serialization { .. } => Self::Payload { reason },

            CoreError::InvalidFilter { specifier, reason } => Self::Validation {
                field: format!("filter path {specifier:?}"),
                reason,
            },

            CoreError::Config { message } => Self::ConnectionFailed { reason: message },
        }
    }
}

#[cfg(test)]
mod tests {
    use junosnap_core::Domain;

    use super::*;

    #[test]
    fn transport_kinds_map_to_exit_codes() {
        let err = |kind| CoreError::TransportUnavailable {
            domain: Domain::Facts,
            kind,
            reason: "boom".into(),
        };
        assert_eq!(CliError::from(err(TransportKind::Authentication)).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(err(TransportKind::Unreachable)).exit_code(), exit_code::CONNECTION);
        assert_eq!(CliError::from(err(TransportKind::Timeout)).exit_code(), exit_code::TIMEOUT);
        assert_eq!(CliError::from(err(TransportKind::MissingCapture)).exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn bad_filter_is_usage_error() {
        let err = CliError::from(CoreError::InvalidFilter {
            specifier: "system//ntp".into(),
            reason: "empty segment".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
