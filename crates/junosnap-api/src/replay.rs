// Replay transport: serve captured replies from a directory.
//
// Layout is one file per RPC (`get-route-engine-information.json`) plus
// `configuration.json` for the configuration slice. Files hold payloads in
// the decoded form the REST client produces, so a capture can be replayed
// offline or used as a test fixture without a device.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::rpc::{Rpc, Transport};

/// File name holding the configuration slice.
pub const CONFIG_FILE: &str = "configuration.json";

pub struct ReplayTransport {
    dir: PathBuf,
    host: String,
}

impl ReplayTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let host = dir
            .file_name()
            .map_or_else(|| "replay".to_owned(), |n| n.to_string_lossy().into_owned());
        Self { dir, host }
    }

    /// Override the host label reported for this capture.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the capture file for an RPC name.
    pub fn capture_path(&self, rpc: &str) -> PathBuf {
        self.dir.join(format!("{rpc}.json"))
    }

    async fn load(&self, rpc: &str, path: PathBuf) -> Result<Value, Error> {
        debug!(rpc, path = %path.display(), "replaying capture");
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| Error::MissingCapture {
                rpc: rpc.to_owned(),
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{}: {e}", path.display()),
            body,
        })
    }
}

impl Transport for ReplayTransport {
    fn host(&self) -> &str {
        &self.host
    }

    async fn execute_rpc(&self, rpc: &Rpc) -> Result<Value, Error> {
        self.load(rpc.name(), self.capture_path(rpc.name())).await
    }

    async fn fetch_config(&self, filter: &str) -> Result<Value, Error> {
        debug!(filter, "filter ignored for replayed configuration");
        self.load("get-configuration", self.dir.join(CONFIG_FILE))
            .await
    }
}
