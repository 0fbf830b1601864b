// ── Core error types ──
//
// Every extractor and poll failure is tagged with the domain it belongs to.
// Transport errors arrive as `junosnap_api::Error` and are flattened into a
// cloneable `TransportUnavailable` so one failed shared fetch can be reported
// against each domain that needed it.

use thiserror::Error;

use crate::domain::Domain;

/// Broad class of a transport failure, kept for exit codes and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TransportKind {
    Authentication,
    Unreachable,
    Timeout,
    Rejected,
    Undecodable,
    MissingCapture,
}

impl From<&junosnap_api::Error> for TransportKind {
    fn from(err: &junosnap_api::Error) -> Self {
        use junosnap_api::Error as ApiError;
        match err {
            ApiError::Authentication { .. } => Self::Authentication,
            ApiError::Timeout { .. } => Self::Timeout,
            ApiError::Transport(e) if e.is_timeout() => Self::Timeout,
            ApiError::Transport(_) | ApiError::InvalidUrl(_) | ApiError::Tls(_) => {
                Self::Unreachable
            }
            ApiError::Rpc { .. } => Self::Rejected,
            ApiError::Deserialization { .. } => Self::Undecodable,
            ApiError::MissingCapture { .. } => Self::MissingCapture,
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Transport ────────────────────────────────────────────────────
    #[error("{domain}: transport unavailable ({kind}): {reason}")]
    TransportUnavailable {
        domain: Domain,
        kind: TransportKind,
        reason: String,
    },

    #[error("configuration fetch failed ({kind}): {reason}")]
    ConfigFetch { kind: TransportKind, reason: String },

    // ── Payload ──────────────────────────────────────────────────────
    #[error("{domain}: malformed payload at {path}: {reason}")]
    MalformedPayload {
        domain: Domain,
        path: String,
        reason: String,
    },

    #[error("{domain}: cannot parse {field} value {value:?} as {expected}")]
    NumericCoercion {
        domain: Domain,
        field: String,
        value: String,
        expected: &'static str,
    },

    // ── Call errors ──────────────────────────────────────────────────
    #[error("{domain}: extractor called before OSPF capability was determined")]
    CapabilityUnknown { domain: Domain },

    #[error("{domain}: required payload '{payload}' was not supplied")]
    MissingPayload {
        domain: Domain,
        payload: &'static str,
    },

    // ── Filter ───────────────────────────────────────────────────────
    #[error("invalid filter specifier {specifier:?}: {reason}")]
    InvalidFilter { specifier: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Serialization ────────────────────────────────────────────────
    #[error("{domain}: failed to serialize record: {message}")]
    Serialization { domain: Domain, message: String },
}

impl CoreError {
    /// Wrap a transport error for the domain that was being fetched.
    pub fn transport(domain: Domain, err: &junosnap_api::Error) -> Self {
        Self::TransportUnavailable {
            domain,
            kind: TransportKind::from(err),
            reason: err.to_string(),
        }
    }

    /// Wrap a transport error from a configuration fetch that no domain
    /// asked for.
    pub fn config_fetch(err: &junosnap_api::Error) -> Self {
        Self::ConfigFetch {
            kind: TransportKind::from(err),
            reason: err.to_string(),
        }
    }

    /// The domain this failure belongs to, if any.
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Self::TransportUnavailable { domain, .. }
            | Self::MalformedPayload { domain, .. }
            | Self::NumericCoercion { domain, .. }
            | Self::CapabilityUnknown { domain }
            | Self::MissingPayload { domain, .. }
            | Self::Serialization { domain, .. } => Some(*domain),
            Self::ConfigFetch { .. } | Self::InvalidFilter { .. } | Self::Config { .. } => None,
        }
    }

    /// Re-tag a failure for another domain that depended on the same fetch.
    pub fn for_domain(&self, domain: Domain) -> Self {
        let mut err = self.clone();
        match &mut err {
            Self::TransportUnavailable { domain: d, .. }
            | Self::MalformedPayload { domain: d, .. }
            | Self::NumericCoercion { domain: d, .. }
            | Self::CapabilityUnknown { domain: d }
            | Self::MissingPayload { domain: d, .. }
            | Self::Serialization { domain: d, .. } => *d = domain,
            Self::ConfigFetch { .. } | Self::InvalidFilter { .. } | Self::Config { .. } => {}
        }
        err
    }

    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransportUnavailable { .. } | Self::ConfigFetch { .. } => "transport-unavailable",
            Self::MalformedPayload { .. } => "malformed-payload",
            Self::NumericCoercion { .. } => "numeric-coercion",
            Self::CapabilityUnknown { .. } | Self::MissingPayload { .. } => "invalid-call",
            Self::InvalidFilter { .. } => "invalid-filter",
            Self::Config { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }

    /// Transport failure class, when this is a transport failure.
    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            Self::TransportUnavailable { kind, .. } | Self::ConfigFetch { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retagging_keeps_the_cause() {
        let err = CoreError::TransportUnavailable {
            domain: Domain::Radius,
            kind: TransportKind::Timeout,
            reason: "Request timed out after 30s".into(),
        };
        let snmp = err.for_domain(Domain::Snmp);
        assert_eq!(snmp.domain(), Some(Domain::Snmp));
        assert_eq!(snmp.transport_kind(), Some(TransportKind::Timeout));
        assert_eq!(snmp.kind(), "transport-unavailable");
    }

    #[test]
    fn api_errors_map_to_kinds() {
        let rejected = junosnap_api::Error::Rpc {
            rpc: "get-fan-information".into(),
            message: "syntax error".into(),
        };
        let err = CoreError::transport(Domain::Fans, &rejected);
        assert_eq!(err.transport_kind(), Some(TransportKind::Rejected));
        assert!(err.to_string().starts_with("fans: transport unavailable (rejected)"));
    }

    #[test]
    fn config_fetch_keeps_the_kind() {
        let err = CoreError::config_fetch(&junosnap_api::Error::Timeout { timeout_secs: 30 });
        assert_eq!(err.transport_kind(), Some(TransportKind::Timeout));
        assert_eq!(err.kind(), "transport-unavailable");
        assert_eq!(err.domain(), None);
    }
}
