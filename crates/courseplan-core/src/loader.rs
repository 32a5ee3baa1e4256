//! Catalog parsing from delimited text.
//!
//! # Record format
//!
//! One course per line, comma separated:
//!
//! ```text
//! code,title[,prerequisite...]
//! ```
//!
//! - Blank lines and lines starting with `#` are comments.
//! - Every field is BOM-stripped and trimmed. There is no quoting, so titles
//!   cannot contain commas.
//! - A trailing comma does not produce an extra field (`A,` has one field).
//! - Records with fewer than two fields, or whose code normalizes to empty,
//!   are skipped with a [`LoadWarning`].
//! - A later record with the same code replaces the earlier one.
//!
//! Loading always builds a fresh [`Catalog`]; callers swap it in only when the
//! load succeeds.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::code::{CourseCode, strip_bom};
use crate::error::ErrorCode;
use crate::model::{Catalog, Course};

/// Field separator for catalog records.
pub const DELIMITER: char = ',';

/// Errors that prevent a catalog source from being read at all.
///
/// Malformed records are not errors; they surface as [`LoadWarning`]s.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open catalog file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read catalog at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::CatalogReadFailed
    }
}

/// Why a record was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    TooFewFields { found: usize },
    EmptyCode,
}

/// A skipped record, reported by 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    pub line: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::TooFewFields { found } => write!(
                f,
                "line {}: expected at least 2 fields, found {found}; skipping",
                self.line
            ),
            SkipReason::EmptyCode => write!(
                f,
                "line {}: course code is empty after normalization; skipping",
                self.line
            ),
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub warnings: Vec<LoadWarning>,
    /// Non-comment records seen, including skipped ones.
    pub records: usize,
    /// Records that replaced an earlier record with the same code.
    pub replaced: usize,
}

impl LoadReport {
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.catalog.len()
    }
}

/// Parse an in-memory text block.
#[must_use]
pub fn parse_catalog(text: &str) -> LoadReport {
    let mut builder = CatalogBuilder::default();
    for (idx, line) in text.lines().enumerate() {
        builder.push_line(idx + 1, line);
    }
    builder.finish()
}

/// Parse records from any buffered reader.
///
/// Lines are decoded lossily, so invalid UTF-8 degrades to replacement
/// characters instead of failing the load.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if the underlying reader fails.
#[instrument(skip(reader))]
pub fn read_catalog<R: BufRead>(mut reader: R) -> Result<LoadReport, LoadError> {
    let mut builder = CatalogBuilder::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        line_no += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                line: line_no,
                source,
            })?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        builder.push_line(line_no, line.trim_end_matches(['\n', '\r']));
    }

    Ok(builder.finish())
}

/// Open and parse a catalog file.
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be opened and
/// [`LoadError::Read`] if reading fails part-way.
#[instrument]
pub fn load_catalog_file(path: &Path) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_catalog(BufReader::new(file))
}

#[derive(Debug, Default)]
struct CatalogBuilder {
    report: LoadReport,
}

impl CatalogBuilder {
    fn push_line(&mut self, line_no: usize, line: &str) {
        let check = strip_bom(line).trim();
        if check.is_empty() || check.starts_with('#') {
            return;
        }
        self.report.records += 1;

        let fields = split_fields(line);
        if fields.len() < 2 {
            self.skip(line_no, SkipReason::TooFewFields {
                found: fields.len(),
            });
            return;
        }

        let code = CourseCode::normalize(fields[0]);
        if code.is_empty() {
            self.skip(line_no, SkipReason::EmptyCode);
            return;
        }

        let mut course = Course::new(code, fields[1]);
        for raw in &fields[2..] {
            course.add_prerequisite(raw);
        }

        if let Some(previous) = self.report.catalog.insert(course) {
            debug!(code = %previous.code, line = line_no, "duplicate course code, keeping later record");
            self.report.replaced += 1;
        }
    }

    fn skip(&mut self, line: usize, reason: SkipReason) {
        let warning = LoadWarning { line, reason };
        warn!("{warning}");
        self.report.warnings.push(warning);
    }

    fn finish(self) -> LoadReport {
        debug!(
            courses = self.report.catalog.len(),
            records = self.report.records,
            skipped = self.report.warnings.len(),
            "catalog parsed"
        );
        self.report
    }
}

/// Split a record into trimmed, BOM-free fields.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line
        .split(DELIMITER)
        .map(|field| strip_bom(field).trim())
        .collect();
    if line.ends_with(DELIMITER) {
        fields.pop();
    }
    fields
}
