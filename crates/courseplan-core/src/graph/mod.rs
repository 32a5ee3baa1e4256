//! Prerequisite graph and study ordering.
//!
//! # Overview
//!
//! The graph is derived from a [`Catalog`](crate::model::Catalog) snapshot on
//! demand and thrown away after use. It is never updated incrementally.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog
//!        ↓  build::DependencyGraph::from_catalog()
//! DependencyGraph (successor lists + in-degree, may contain cycles)
//!        ↓  order::study_order()
//! StudyOrder (Kahn order, lexicographic tie-break, unresolved codes)
//!        ↓  cycles::diagnose()          (only when unresolved is non-empty)
//! CycleReport (SCC cycles + codes blocked behind them)
//! ```
//!
//! ## Edge Direction
//!
//! An edge `P → C` means "P is a prerequisite of C". Edges exist only when
//! both endpoints are catalog keys; dangling prerequisites add nothing.

pub mod build;
pub mod cycles;
pub mod order;

pub use build::DependencyGraph;
pub use cycles::{CycleReport, diagnose, find_cycles};
pub use order::{StudyOrder, study_order};
