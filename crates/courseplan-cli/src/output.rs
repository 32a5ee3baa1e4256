//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: plain text for people, or stable JSON for scripts.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `FORMAT` env var → `"human"` | `"json"`
//! 3. `output` key in the user config
//! 4. Default: [`OutputMode::Human`]
//!
//! Resolution itself lives in `courseplan_core::config`; this module only
//! maps the settled string onto [`OutputMode`].

use courseplan_core::error::ErrorCode;
use serde::Serialize;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text matching the interactive menu.
    Human,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Map the resolved config value onto a mode. Anything but `json` is human.
    pub fn from_resolved(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Human
        }
    }

    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "catalog_not_loaded").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Stable `E####` identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl CliError {
    /// Create an error carrying the tag, code, and hint of `code`.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.tag().to_string()),
            code: Some(code.code()),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In human mode,
/// the provided `human_fn` closure is called to produce text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, mode, value, human_fn)
}

/// [`render`] into an arbitrary writer.
pub fn render_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, out)?,
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}

/// [`render_error`] into an arbitrary writer.
pub fn render_error_to(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn resolved_value_maps_to_mode() {
        assert_eq!(OutputMode::from_resolved("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_resolved("JSON"), OutputMode::Json);
        assert_eq!(OutputMode::from_resolved("human"), OutputMode::Human);
        assert_eq!(OutputMode::from_resolved("anything"), OutputMode::Human);
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }

    #[test]
    fn from_code_carries_hint_and_tags() {
        let err = CliError::from_code(ErrorCode::CatalogNotLoaded, "nothing loaded");
        assert_eq!(err.error_code.as_deref(), Some("catalog_not_loaded"));
        assert_eq!(err.code, Some("E2001"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn json_error_is_wrapped() {
        let mut buf = Vec::new();
        let err = CliError::from_code(ErrorCode::CourseNotFound, "course X was not found");
        render_error_to(&mut buf, OutputMode::Json, &err).expect("render");
        let json: Value = serde_json::from_slice(&buf).expect("valid JSON");
        assert_eq!(json["error"]["error_code"], "course_not_found");
        assert_eq!(json["error"]["message"], "course X was not found");
        assert!(json["error"].get("suggestion").is_none());
    }

    #[test]
    fn human_error_includes_suggestion() {
        let mut buf = Vec::new();
        let err = CliError::from_code(ErrorCode::StoreOpenFailed, "boom");
        render_error_to(&mut buf, OutputMode::Human, &err).expect("render");
        assert_eq!(
            String::from_utf8_lossy(&buf),
            "error: boom\n  suggestion: Check that the store directory exists and is writable.\n"
        );
    }

    #[test]
    fn render_to_uses_human_closure() {
        let mut buf = Vec::new();
        render_to(&mut buf, OutputMode::Human, &3_u32, |v, w| writeln!(w, "n={v}"))
            .expect("render");
        assert_eq!(String::from_utf8_lossy(&buf), "n=3\n");
    }
}
