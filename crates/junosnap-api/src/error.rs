use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `junosnap-api` crate.
///
/// Covers every way a fetch can fail before a payload reaches the
/// normalizers: authentication, HTTP transport, the device rejecting an
/// RPC, undecodable replies, and missing replay captures. `junosnap-core`
/// tags these with the data domain that was being polled.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Device rejected the supplied credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── RPC ─────────────────────────────────────────────────────────
    /// The device answered, but refused or failed the RPC.
    #[error("RPC {rpc} failed: {message}")]
    Rpc { rpc: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Reply body was not the JSON we asked for, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Replay ──────────────────────────────────────────────────────
    /// A captured reply could not be read from disk.
    #[error("No captured reply for {rpc} at {}", path.display())]
    MissingCapture {
        rpc: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The device-side message for a rejected RPC, if that is what happened.
    pub fn rpc_message(&self) -> Option<&str> {
        match self {
            Self::Rpc { message, .. } => Some(message),
            _ => None,
        }
    }
}
