//! Output formatting: status lines, tables, JSON, YAML, plain.
//!
//! Status lines are the colored `Returned code ...` lines printed once per
//! request. Everything else renders in the format selected by `--output`.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use bigctl_core::Outcome;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Heading,
    Dim,
}

pub fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match tone {
        Tone::Good => text.green().to_string(),
        Tone::Warn => text.yellow().to_string(),
        Tone::Bad => text.red().to_string(),
        Tone::Heading => text.bright_white().to_string(),
        Tone::Dim => text.dimmed().to_string(),
    }
}

/// Green for success, yellow for "already exists" and informational
/// codes, red for everything else.
pub fn tone_for(outcome: &Outcome) -> Tone {
    match outcome {
        Outcome::Success { .. } => Tone::Good,
        Outcome::Conflict { .. } | Outcome::Informational { .. } => Tone::Warn,
        Outcome::Failed { .. } => Tone::Bad,
    }
}

pub fn status_line(outcome: &Outcome, color: bool) -> String {
    paint(&outcome.to_string(), tone_for(outcome), color)
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a raw appliance body. Table mode has no schema to work with, so
/// it falls back to pretty JSON; non-JSON bodies pass through untouched.
pub fn render_body(format: OutputFormat, body: &str) -> String {
    if body.trim().is_empty() {
        return String::new();
    }
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim_end().to_owned();
    };
    match format {
        OutputFormat::Table | OutputFormat::Json => render_json(&value, false),
        OutputFormat::JsonCompact | OutputFormat::Plain => render_json(&value, true),
        OutputFormat::Yaml => render_yaml(&value),
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

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
