//! Terminal output formatting
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use serde_json::Value;

use crate::config::OutputFormat;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Render a query result in the requested format.
///
/// Text: `none` for null, strings verbatim, objects as `key=value` pairs.
/// Json: compact JSON.
pub fn render(format: OutputFormat, result: &Value) -> String {
    match format {
        OutputFormat::Json => result.to_string(),
        OutputFormat::Text => match result {
            Value::Null => "none".to_string(),
            Value::String(s) => s.clone(),
            Value::Object(fields) => fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, render(OutputFormat::Text, v)))
                .collect::<Vec<_>>()
                .join(" "),
            other => other.to_string(),
        },
    }
}
