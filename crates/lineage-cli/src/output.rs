//! Shared output layer for pretty/text/JSON parity across all commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`]
//!    if piped.

use lineage_core::TreeError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 60;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<16} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Compact plain text for pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Returns `true` if pretty output was requested.
    #[must_use]
    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }
}

fn parse_mode(raw: &str) -> Option<OutputMode> {
    match raw.trim().to_lowercase().as_str() {
        "json" => Some(OutputMode::Json),
        "text" => Some(OutputMode::Text),
        "pretty" => Some(OutputMode::Pretty),
        _ => None,
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    json_flag: bool,
    format_env: Option<&str>,
    user_output: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    if let Some(mode) = format_env.and_then(parse_mode) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(parse_mode) {
        return mode;
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from the `--json` flag, the `FORMAT` env var,
/// the user config and the terminal.
#[must_use]
pub fn resolve_output_mode(json_flag: bool, user_output: Option<&str>) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    resolve_output_mode_inner(
        json_flag,
        format_env.as_deref(),
        user_output,
        io::stdout().is_terminal(),
    )
}

/// A failure surfaced to the user, with a stable code and optional hint.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl From<&TreeError> for CliError {
    fn from(err: &TreeError) -> Self {
        let code = err.code();
        Self {
            error: err.to_string(),
            code: code.code(),
            hint: code.hint(),
        }
    }
}

/// Marker for a failure that has already been written to stderr.
///
/// `main` exits non-zero on it without printing anything further, so each
/// failure reaches the user exactly once.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("failure already reported")
    }
}

impl std::error::Error for Reported {}

/// Print a failure on stderr (JSON object in JSON mode) and hand back a
/// [`Reported`] marker for `main` to exit non-zero with.
pub fn fail(mode: OutputMode, err: &TreeError) -> anyhow::Error {
    let cli_error = CliError::from(err);
    if mode.is_json() {
        match serde_json::to_string_pretty(&cli_error) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{}", cli_error.error),
        }
    } else {
        eprintln!("error[{}]: {}", cli_error.code, cli_error.error);
        if let Some(hint) = cli_error.hint {
            eprintln!("hint: {hint}");
        }
    }
    anyhow::Error::new(Reported)
}

/// Serialize `value` as pretty JSON on stdout.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins_over_env_and_config() {
        let mode = resolve_output_mode_inner(true, Some("pretty"), Some("text"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn env_var_wins_over_user_config() {
        assert_eq!(
            resolve_output_mode_inner(false, Some("json"), Some("pretty"), true),
            OutputMode::Json
        );
    }

    #[test]
    fn user_config_wins_over_tty() {
        assert_eq!(
            resolve_output_mode_inner(false, None, Some("text"), true),
            OutputMode::Text
        );
    }

    #[test]
    fn unknown_values_fall_back_to_tty() {
        assert_eq!(
            resolve_output_mode_inner(false, Some("fancy"), Some("fancier"), true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(false, Some("fancy"), None, false),
            OutputMode::Text
        );
    }

    #[test]
    fn piped_default_is_text() {
        assert_eq!(
            resolve_output_mode_inner(false, None, None, false),
            OutputMode::Text
        );
    }

    #[test]
    fn cli_error_carries_code_and_hint() {
        let err = TreeError::NothingToSave;
        let cli_error = CliError::from(&err);
        assert_eq!(cli_error.code, "E3001");
        assert!(cli_error.hint.is_some());
    }
}
