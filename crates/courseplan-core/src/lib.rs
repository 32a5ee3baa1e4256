#![forbid(unsafe_code)]
//! courseplan-core library.
//!
//! Loads a course catalog from delimited text, derives the prerequisite
//! graph, and answers listing, detail, and study-order queries.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at module seams, `anyhow::Result`
//!   where a caller only needs context (configuration).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod code;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod model;
pub mod report;
pub mod store;

pub use code::CourseCode;
pub use loader::{LoadError, LoadReport, LoadWarning, load_catalog_file, parse_catalog};
pub use model::{Catalog, Course};
