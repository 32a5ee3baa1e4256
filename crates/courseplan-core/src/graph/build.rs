//! Graph construction from a catalog snapshot.
//!
//! Every catalog code gets a successor entry (possibly empty) and an in-degree
//! entry (possibly zero). For each course `C` and each prerequisite `P` that
//! is itself in the catalog, `C` is pushed onto `P`'s successors and `C`'s
//! in-degree goes up by one.
//!
//! ## Duplicate Prerequisites
//!
//! Nothing is collapsed. A course listing `P` twice gets two successor
//! entries under `P` and two units of in-degree; the sorter decrements once
//! per entry, so the two stay in step.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::code::CourseCode;
use crate::model::Catalog;

/// Successor lists and in-degree counts keyed by course code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    successors: BTreeMap<CourseCode, Vec<CourseCode>>,
    in_degree: BTreeMap<CourseCode, usize>,
}

impl DependencyGraph {
    /// Build the graph for `catalog`.
    #[instrument(skip(catalog), fields(courses = catalog.len()))]
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut successors: BTreeMap<CourseCode, Vec<CourseCode>> = catalog
            .codes()
            .map(|code| (code.clone(), Vec::new()))
            .collect();
        let mut in_degree: BTreeMap<CourseCode, usize> =
            catalog.codes().map(|code| (code.clone(), 0)).collect();

        let mut dangling = 0usize;
        for course in catalog.iter() {
            for prereq in &course.prerequisites {
                let Some(list) = successors.get_mut(prereq) else {
                    dangling += 1;
                    continue;
                };
                list.push(course.code.clone());
                if let Some(degree) = in_degree.get_mut(&course.code) {
                    *degree += 1;
                }
            }
        }

        let graph = Self {
            successors,
            in_degree,
        };
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dangling,
            "dependency graph built"
        );
        graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.in_degree.len()
    }

    /// Number of edges, counting duplicates.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.in_degree.contains_key(code)
    }

    /// Courses that list `code` as a prerequisite, one entry per listing.
    #[must_use]
    pub fn successors(&self, code: &CourseCode) -> &[CourseCode] {
        self.successors.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of in-catalog prerequisite listings for `code`.
    #[must_use]
    pub fn in_degree(&self, code: &CourseCode) -> Option<usize> {
        self.in_degree.get(code).copied()
    }

    /// All in-degrees in ascending code order.
    #[must_use]
    pub const fn in_degrees(&self) -> &BTreeMap<CourseCode, usize> {
        &self.in_degree
    }

    /// All codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &CourseCode> {
        self.in_degree.keys()
    }

    /// Project into a petgraph graph for SCC analysis.
    ///
    /// Parallel edges are merged; multiplicity does not affect reachability.
    #[must_use]
    pub fn to_petgraph(&self) -> (DiGraph<CourseCode, ()>, HashMap<CourseCode, NodeIndex>) {
        let mut graph = DiGraph::<CourseCode, ()>::with_capacity(self.node_count(), self.edge_count());
        let mut node_map: HashMap<CourseCode, NodeIndex> = HashMap::with_capacity(self.node_count());

        for code in self.codes() {
            let idx = graph.add_node(code.clone());
            node_map.insert(code.clone(), idx);
        }

        for (prereq, dependents) in &self.successors {
            let from = node_map[prereq];
            for dependent in dependents {
                let to = node_map[dependent];
                if !graph.contains_edge(from, to) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        (graph, node_map)
    }
}
