//! Local SQLite store connectivity check.
//!
//! The planner keeps its catalog in memory. This module only confirms that a
//! named local database file can be opened (created if missing) and queried.
//! No schema is applied and no catalog data is written.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ErrorCode;

/// Busy timeout applied to probe connections.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open store {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store {path} did not answer a probe query: {source}")]
    Probe {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::StoreOpenFailed
    }
}

/// A successful connection check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub path: PathBuf,
    pub sqlite_version: String,
    /// False when the probe had to create the file.
    pub existed: bool,
}

/// Open (or create) the database at `path` and run a trivial query.
///
/// # Errors
///
/// Returns [`StoreError::Open`] if SQLite cannot open or create the file and
/// [`StoreError::Probe`] if the connection cannot answer a query.
#[instrument]
pub fn probe_store(path: &Path) -> Result<StoreStatus, StoreError> {
    let existed = path.exists();
    let display = path.display().to_string();

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )
    .map_err(|source| StoreError::Open {
        path: display.clone(),
        source,
    })?;

    let sqlite_version = check_connection(&conn).map_err(|source| StoreError::Probe {
        path: display,
        source,
    })?;

    debug!(%sqlite_version, existed, "store probe succeeded");

    Ok(StoreStatus {
        path: path.to_path_buf(),
        sqlite_version,
        existed,
    })
}

fn check_connection(conn: &Connection) -> rusqlite::Result<String> {
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))
}
