//! Command handlers.
//!
//! One-shot subcommands load the catalog, answer one query, and exit. The
//! interactive menu in [`menu`] keeps a catalog in a [`menu::Session`] and
//! reuses the human writers exported by each handler module.

pub mod completions;
pub mod list;
pub mod menu;
pub mod order;
pub mod show;
pub mod store;

use std::path::Path;

use courseplan_core::config::EffectiveConfig;
use courseplan_core::error::ErrorCode;
use courseplan_core::report::QueryError;
use courseplan_core::{Catalog, load_catalog_file};

use crate::output::{CliError, OutputMode, render_error};

/// Shown whenever a query runs against an empty catalog.
pub const EMPTY_CATALOG_MESSAGE: &str = "No data loaded. Please load the data structure first.";

/// User-facing text for an informational query outcome.
pub fn query_message(err: &QueryError) -> String {
    match err {
        QueryError::EmptyCatalog => EMPTY_CATALOG_MESSAGE.to_string(),
        QueryError::NotFound { query } => format!("Course {query} was not found."),
    }
}

/// Resolve the catalog path for a one-shot command and load it.
///
/// Skipped records are echoed to stderr as warnings in human mode.
///
/// # Errors
///
/// Returns an error when no path is available or the file cannot be read.
pub fn load_catalog(
    file: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
    config: &EffectiveConfig,
) -> anyhow::Result<Catalog> {
    let Some(path) = config.catalog_path(project_root, file) else {
        render_error(
            output,
            &CliError::from_code(ErrorCode::CatalogNotLoaded, "no catalog file given"),
        )?;
        anyhow::bail!("no catalog file given");
    };

    match load_catalog_file(&path) {
        Ok(report) => {
            if !output.is_json() {
                for warning in &report.warnings {
                    eprintln!("Warning: {warning}");
                }
            }
            Ok(report.catalog)
        }
        Err(err) => {
            render_error(output, &CliError::from_code(err.code(), err.to_string()))?;
            Err(err.into())
        }
    }
}

/// Report a query miss from a one-shot command and fail it.
///
/// # Errors
///
/// Always returns an error so the process exits non-zero.
pub fn fail_query(output: OutputMode, err: &QueryError) -> anyhow::Result<()> {
    render_error(output, &CliError::from_code(err.code(), query_message(err)))?;
    anyhow::bail!("{err}")
}
