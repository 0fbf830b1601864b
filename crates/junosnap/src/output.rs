//! Output formatting: table, JSON, YAML.
//!
//! Renders data in the format selected by `--output`. Tables use `tabled`,
//! structured formats use serde. Colors go through `owo-colors` and are
//! switched off globally when the terminal or `--color` says so.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Apply `--color` to every `if_supports_color` call site.
pub fn init_color(mode: ColorMode) {
    owo_colors::set_override(should_color(mode));
}

pub fn heading(text: &str) -> String {
    text.if_supports_color(owo_colors::Stream::Stdout, |t| t.bold())
        .to_string()
}

pub fn dim(text: &str) -> String {
    text.if_supports_color(owo_colors::Stream::Stdout, |t| t.dimmed())
        .to_string()
}

/// Color a state word: healthy states green, failed states red.
pub fn status(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    if matches!(lower.as_str(), "ok" | "up" | "full" | "true" | "master" | "dr" | "bdr") {
        text.if_supports_color(owo_colors::Stream::Stdout, |t| t.green())
            .to_string()
    } else if matches!(lower.as_str(), "failed" | "down" | "absent" | "false" | "error") {
        text.if_supports_color(owo_colors::Stream::Stdout, |t| t.red())
            .to_string()
    } else {
        text.to_owned()
    }
}

/// A failure line for stderr.
pub fn failure(label: &str, message: &str) -> String {
    format!(
        "{} {label}: {message}",
        "✗".if_supports_color(owo_colors::Stream::Stderr, |t| t.red())
    )
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render any serializable value in a structured format. Table and plain
/// output are handled by the callers, so they fall back to pretty JSON here.
pub fn render_structured<T>(format: OutputFormat, data: &T) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table | OutputFormat::Json | OutputFormat::Plain => {
            Ok(serde_json::to_string_pretty(data)?)
        }
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// A titled table, or a dimmed `(none)` for empty data.
pub fn render_table<R: Tabled>(title: &str, rows: &[R]) -> String {
    if rows.is_empty() {
        return format!("{}\n{}", heading(title), dim("(none)"));
    }
    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!("{}\n{table}", heading(title))
}

/// Aligned `key: value` lines under a title, for single records.
pub fn render_detail(title: &str, fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut lines = vec![heading(title)];
    for (key, value) in fields {
        let value = if value.is_empty() { dim("-") } else { value.clone() };
        lines.push(format!("  {key:<width$}  {value}"));
    }
    lines.join("\n")
}

/// Plain lines for one record: the `key` field of every item in a list, or
/// `field=value` for each scalar field of a single record.
pub fn render_plain(value: &serde_json::Value, key: &str) -> String {
    use serde_json::Value;

    fn scalar(v: &Value) -> Option<String> {
        match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get(key).and_then(scalar))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(k, v)| scalar(v).map(|v| format!("{k}={v}")))
            .collect::<Vec<_>>()
            .join("\n"),
        other => scalar(other).unwrap_or_default(),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    #[test]
    fn empty_table_says_none() {
        owo_colors::set_override(false);
        assert_eq!(render_table::<Row>("NTP", &[]), "NTP\n(none)");
    }

    #[test]
    fn table_has_title_and_rows() {
        owo_colors::set_override(false);
        let out = render_table("VLANs", &[Row { name: "Servers" }]);
        assert!(out.starts_with("VLANs\n"));
        assert!(out.contains("Servers"));
    }

    #[test]
    fn detail_aligns_keys() {
        owo_colors::set_override(false);
        let out = render_detail("Facts", &[("Host", "sw1".into()), ("Serial", String::new())]);
        assert_eq!(out, "Facts\n  Host    sw1\n  Serial  -");
    }

    #[test]
    fn plain_lists_keys_or_fields() {
        let list = serde_json::json!([{"server": "10.0.0.1"}, {"server": "10.0.0.2"}]);
        assert_eq!(render_plain(&list, "server"), "10.0.0.1\n10.0.0.2");

        let record = serde_json::json!({"id": "10.255.0.1", "reference": "100m", "areas": []});
        assert_eq!(render_plain(&record, "id"), "id=10.255.0.1\nreference=100m");
    }

    #[test]
    fn yaml_and_compact_json() {
        let data = serde_json::json!({"id": 10});
        assert_eq!(render_structured(OutputFormat::JsonCompact, &data).unwrap(), r#"{"id":10}"#);
        assert_eq!(render_structured(OutputFormat::Yaml, &data).unwrap(), "id: 10\n");
    }
}
