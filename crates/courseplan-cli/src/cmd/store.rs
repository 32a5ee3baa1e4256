//! `cplan check-store` — confirm the local SQLite store can be opened.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use courseplan_core::config::EffectiveConfig;
use courseplan_core::store::{StoreStatus, probe_store};

use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct CheckStoreArgs {
    /// Database file to open or create. Defaults to `[store] path`
    /// (courses.db).
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute `cplan check-store`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output fails.
pub fn run_check_store(
    args: &CheckStoreArgs,
    output: OutputMode,
    project_root: &Path,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let path = args
        .path
        .as_ref()
        .map_or_else(|| config.store_path(project_root), |p| project_root.join(p));

    match probe_store(&path) {
        Ok(status) => render(output, &status, write_store_status),
        Err(err) => {
            render_error(output, &CliError::from_code(err.code(), err.to_string()))?;
            Err(err.into())
        }
    }
}

/// Human rendering shared with the menu.
pub fn write_store_status(status: &StoreStatus, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "Connected to SQLite database successfully! ({}, SQLite {})",
        status.path.display(),
        status.sqlite_version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_names_path_and_version() {
        let status = StoreStatus {
            path: PathBuf::from("courses.db"),
            sqlite_version: "3.45.0".to_string(),
            existed: true,
        };
        let mut buf = Vec::new();
        write_store_status(&status, &mut buf).expect("write");
        assert_eq!(
            String::from_utf8_lossy(&buf),
            "Connected to SQLite database successfully! (courses.db, SQLite 3.45.0)\n"
        );
    }
}
