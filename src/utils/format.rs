//! Table formatting and output utilities
//!
//! This module renders snapshots and parameter catalogs as tables, JSON,
//! YAML or env-file text, and prints colored status lines.

use crate::config::{ConfigSnapshot, ParameterSpec, Value};
use crate::error::Result;
use clap::ValueEnum;
use crossterm::style::{Color as CrosstermColor, Stylize};
use crossterm::terminal::size;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Padding, Style, Width},
    Table, Tabled,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    /// `KEY=VALUE` lines, loadable again with `--env-file`
    Env,
}

/// One row of the `params` listing
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ParameterRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub param_type: String,
    #[tabled(rename = "Required")]
    pub required: bool,
    #[tabled(rename = "Default")]
    pub default: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&ParameterSpec> for ParameterRow {
    fn from(spec: &ParameterSpec) -> Self {
        Self {
            name: spec.name().to_string(),
            param_type: spec.param_type().to_string(),
            required: spec.is_required(),
            default: spec.default().map(|v| v.to_string()).unwrap_or_default(),
            description: spec.description().unwrap_or_default().to_string(),
        }
    }
}

/// Table formatter with color support
pub struct TableFormatter {
    format: OutputFormat,
    no_color: bool,
}

impl TableFormatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    /// Render a resolved snapshot
    pub fn format_snapshot(&self, snapshot: &ConfigSnapshot) -> Result<String> {
        match self.format {
            OutputFormat::Table if snapshot.is_empty() => Ok(NO_DATA.to_string()),
            OutputFormat::Table => Ok(self.format_as_table(snapshot.entries())),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(snapshot)?),
            OutputFormat::Env => Ok(snapshot
                .iter()
                .filter_map(|entry| env_line(&entry.name, &entry.value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Render the declared parameter catalog
    pub fn format_parameters(&self, specs: &[ParameterSpec]) -> Result<String> {
        let rows: Vec<ParameterRow> = specs.iter().map(ParameterRow::from).collect();
        match self.format {
            OutputFormat::Table if rows.is_empty() => Ok(NO_DATA.to_string()),
            OutputFormat::Table => Ok(self.format_as_table(&rows)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(&rows)?),
            OutputFormat::Env => Ok(rows
                .iter()
                .map(|row| format!("{}={}", row.name, quote_env_value(&row.default)))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Render one resolved value
    ///
    /// In env format an unset value renders as an empty string, so it stays
    /// absent when the output is loaded again.
    pub fn format_value(&self, name: &str, value: &Value) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(value.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
            OutputFormat::Env => Ok(env_line(name, value).unwrap_or_default()),
        }
    }

    /// Format data as a styled table
    fn format_as_table<T: Tabled>(&self, data: &[T]) -> String {
        let mut table = Table::new(data);

        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Padding::new(1, 1, 0, 0));

        if !self.no_color {
            table.with(Modify::new(Rows::first()).with(Color::FG_BLUE));
        }

        // Auto-adjust width to terminal
        if let Ok((width, _)) = size() {
            table.with(Width::wrap(width as usize));
        }

        table.to_string()
    }
}

const NO_DATA: &str = "No data to display";

/// `NAME=value` line for a resolved value, `None` when unset
fn env_line(name: &str, value: &Value) -> Option<String> {
    if value.is_unset() {
        return None;
    }
    Some(format!("{}={}", name, quote_env_value(&value.to_string())))
}

fn is_bare_env_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | ',' | '@' | '+')
}

/// Quote a value for env-file output when it would not survive a re-read
///
/// Anything beyond a conservative bare character set is written in double
/// quotes with `\\`, `\"`, `\$` and `\n` escaped, which the env-file
/// reader decodes back to the original text.
pub fn quote_env_value(value: &str) -> String {
    if value.chars().all(is_bare_env_char) {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Colored status lines for command results
pub struct DisplayUtils {
    no_color: bool,
}

impl DisplayUtils {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        if self.no_color {
            println!("✓ {}", message);
        } else {
            println!("✓ {}", message.with(CrosstermColor::Green));
        }
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) {
        if self.no_color {
            eprintln!("✗ {}", message);
        } else {
            eprintln!("✗ {}", message.with(CrosstermColor::Red));
        }
    }
}
