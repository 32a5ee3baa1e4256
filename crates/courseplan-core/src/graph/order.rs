//! Kahn's algorithm with a lexicographic tie-break.
//!
//! The ready set is a `BTreeSet`, so whenever several courses are free at the
//! same time the smallest code is taken first. The result is a pure function
//! of the catalog content.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::code::CourseCode;
use crate::graph::build::DependencyGraph;

/// Output of [`study_order`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudyOrder {
    /// Courses in a valid study order. Partial when `unresolved` is non-empty.
    pub order: Vec<CourseCode>,
    /// Courses never released because they sit on, or behind, a cycle.
    pub unresolved: Vec<CourseCode>,
}

impl StudyOrder {
    /// True when every course was placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// True when a prerequisite cycle kept some courses out of the order.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        !self.is_complete()
    }

    /// Position of `code` in the order, if placed.
    #[must_use]
    pub fn position(&self, code: &CourseCode) -> Option<usize> {
        self.order.iter().position(|c| c == code)
    }
}

/// Compute a study order for `graph`.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
#[must_use]
pub fn study_order(graph: &DependencyGraph) -> StudyOrder {
    let mut remaining = graph.in_degrees().clone();

    let mut ready: BTreeSet<CourseCode> = remaining
        .iter()
        .filter_map(|(code, degree)| (*degree == 0).then(|| code.clone()))
        .collect();

    let mut order: Vec<CourseCode> = Vec::with_capacity(graph.node_count());

    while let Some(current) = ready.pop_first() {
        for successor in graph.successors(&current) {
            if let Some(entry) = remaining.get_mut(successor) {
                if *entry > 0 {
                    *entry -= 1;
                    if *entry == 0 {
                        ready.insert(successor.clone());
                    }
                }
            }
        }
        order.push(current);
    }

    let unresolved: Vec<CourseCode> = remaining
        .into_iter()
        .filter_map(|(code, degree)| (degree > 0).then_some(code))
        .collect();

    if unresolved.is_empty() {
        debug!(placed = order.len(), "study order complete");
    } else {
        warn!(
            placed = order.len(),
            unresolved = unresolved.len(),
            "prerequisite cycle detected; order is partial"
        );
    }

    StudyOrder { order, unresolved }
}
