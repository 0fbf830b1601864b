// ── Runtime connection configuration ──
//
// Describes how to reach one device. Carries credentials and connection
// tuning but never touches disk: the CLI resolves a profile into a
// `DeviceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use junosnap_api::{RestClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Default, since Junos ships self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single device.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// REST service root (e.g. `https://10.0.0.1:3443`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl DeviceConfig {
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }

    /// Build a REST session for this device.
    pub fn connect(&self) -> Result<RestClient, CoreError> {
        RestClient::new(
            self.url.clone(),
            self.username.clone(),
            self.password.clone(),
            &self.transport_config(),
        )
        .map_err(|e| CoreError::Config {
            message: format!("cannot build client for {}: {e}", self.url),
        })
    }
}
