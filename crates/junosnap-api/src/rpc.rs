// ── RPC requests and the transport seam ──
//
// `Transport` is the only thing the normalization core knows about a device:
// run an operational RPC, or fetch a filtered slice of configuration. Both
// return the decoded raw payload; shape cleanup happens downstream.

use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::error::Error;
use crate::replay::ReplayTransport;
use crate::rest::RestClient;

/// One operational RPC: the Junos RPC tag plus its parameters.
///
/// Parameters without a value are flags (`<extensive/>`), the rest carry
/// text (`<interface-device>ge-0/0/1</interface-device>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rpc {
    name: String,
    params: Vec<(String, Option<String>)>,
}

impl Rpc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Add a flag parameter.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.params.push((name.into(), None));
        self
    }

    /// Add a valued parameter.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), Some(value.into())));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, Option<String>)] {
        &self.params
    }
}

impl fmt::Display for Rpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (name, value) in &self.params {
            match value {
                Some(v) => write!(f, " {name}={v}")?,
                None => write!(f, " {name}")?,
            }
        }
        Ok(())
    }
}

/// A session with one device.
///
/// Implementations own their connection lifecycle; callers only ever see
/// payloads or errors.
pub trait Transport: Send + Sync {
    /// Host label used in logs and reports.
    fn host(&self) -> &str;

    /// Execute an operational RPC and return its decoded reply.
    fn execute_rpc(&self, rpc: &Rpc) -> impl Future<Output = Result<Value, Error>> + Send;

    /// Fetch configuration limited by a selective filter expression.
    fn fetch_config(&self, filter: &str) -> impl Future<Output = Result<Value, Error>> + Send;
}

/// Runtime choice between a live device and a replay directory.
pub enum AnyTransport {
    Rest(RestClient),
    Replay(ReplayTransport),
}

impl Transport for AnyTransport {
    fn host(&self) -> &str {
        match self {
            Self::Rest(client) => client.host(),
            Self::Replay(replay) => replay.host(),
        }
    }

    async fn execute_rpc(&self, rpc: &Rpc) -> Result<Value, Error> {
        match self {
            Self::Rest(client) => client.execute_rpc(rpc).await,
            Self::Replay(replay) => replay.execute_rpc(rpc).await,
        }
    }

    async fn fetch_config(&self, filter: &str) -> Result<Value, Error> {
        match self {
            Self::Rest(client) => client.fetch_config(filter).await,
            Self::Replay(replay) => replay.fetch_config(filter).await,
        }
    }
}
