//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoEnumIterator;

use junosnap_core::Domain;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Parse a domain name as given to `junosnap get`.
pub fn parse_domain(name: &str) -> Result<Domain, CliError> {
    name.parse().map_err(|_| CliError::Validation {
        field: "domain".into(),
        reason: format!(
            "unknown domain '{name}', expected one of: {}",
            Domain::iter().map(Domain::as_str).collect::<Vec<_>>().join(", ")
        ),
    })
}

/// Decode a serialized record back into its model for table rendering.
pub fn typed<T: DeserializeOwned>(value: &Value) -> Result<T, CliError> {
    Ok(serde_json::from_value(value.clone())?)
}

/// A stderr spinner, only for interactive table output.
pub fn spinner(global: &GlobalOpts, message: &str) -> Option<ProgressBar> {
    if global.quiet || global.output != OutputFormat::Table || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

/// `3d 4h 12m` style uptime, from seconds.
pub fn format_uptime(secs: u64) -> String {
    if secs == 0 {
        return String::new();
    }
    // Drop seconds below a minute of precision for anything longer than an hour.
    let rounded = if secs >= 3600 { secs - secs % 60 } else { secs };
    humantime::format_duration(Duration::from_secs(rounded)).to_string()
}

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    bytesize::ByteSize::b(bytes).to_string()
}

pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
