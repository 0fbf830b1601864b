// Junos REST API HTTP client
//
// Wraps `reqwest::Client` with RPC URL construction, basic auth, and reply
// decoding. Operational RPCs go to `GET /rpc/{name}` with parameters in the
// query string; configuration goes to `POST /rpc` as a `get-configuration`
// document carrying the selective filter.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::rest::decode::{decode_config, decode_operational};
use crate::rpc::{Rpc, Transport};
use crate::transport::TransportConfig;

/// Default HTTPS port of the Junos REST service.
pub const DEFAULT_PORT: u16 = 3443;

/// How much of an unexpected body to carry into error messages.
const PREVIEW_LEN: usize = 200;

/// HTTP client for one device's REST API.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    host: String,
    username: String,
    password: SecretString,
    timeout_secs: u64,
}

impl RestClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the REST service root, e.g. `https://10.0.0.1:3443`.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::with_client(http, base_url, username, password);
        client.timeout_secs = transport.timeout_secs();
        Ok(client)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        let host = base_url.host_str().unwrap_or_default().to_owned();
        Self {
            http,
            base_url,
            host,
            username,
            password,
            timeout_secs: 30,
        }
    }

    /// The REST service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn rpc_url(&self, name: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/rpc/{name}"))?)
    }

    fn batch_url(&self) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/rpc"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn send(
        &self,
        rpc: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<String, Error> {
        let resp = builder
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("device rejected credentials for user '{}'", self.username),
            });
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(Error::Rpc {
                rpc: rpc.to_owned(),
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        // Junos reports RPC failures as XML even when JSON was requested.
        if let Some(message) = rpc_error_message(&body) {
            return Err(Error::Rpc {
                rpc: rpc.to_owned(),
                message,
            });
        }

        trace!(rpc, bytes = body.len(), "reply received");
        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

impl Transport for RestClient {
    fn host(&self) -> &str {
        &self.host
    }

    async fn execute_rpc(&self, rpc: &Rpc) -> Result<Value, Error> {
        let url = self.rpc_url(rpc.name())?;
        debug!("GET {} ({rpc})", url);

        let query: Vec<(&str, &str)> = rpc
            .params()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref().unwrap_or("")))
            .collect();

        let body = self
            .send(rpc.name(), self.http.get(url).query(&query))
            .await?;
        parse_json(&body).map(decode_operational)
    }

    async fn fetch_config(&self, filter: &str) -> Result<Value, Error> {
        let url = self.batch_url()?;
        debug!("POST {} (get-configuration)", url);

        let document = format!("<get-configuration>{filter}</get-configuration>");
        let builder = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(document);

        let body = self.send("get-configuration", builder).await?;
        parse_json(&body).map(decode_config)
    }
}

// ── Reply parsing ────────────────────────────────────────────────────

fn parse_json(body: &str) -> Result<Value, Error> {
    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

/// Pull `<error-message>` out of an XML `<rpc-error>` reply.
fn rpc_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim_start();
    if !trimmed.starts_with('<') || !trimmed.contains("rpc-error") {
        return None;
    }
    let message = trimmed
        .split_once("<error-message>")
        .and_then(|(_, rest)| rest.split_once("</error-message>"))
        .map_or_else(|| preview(trimmed).to_owned(), |(msg, _)| msg.trim().to_owned());
    Some(message)
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
