//! Naming the cycles that stop a study order from completing.
//!
//! Kahn's algorithm only tells us *which* courses were never released. Some of
//! them sit on a cycle, others merely depend on one. Tarjan's SCC over the
//! petgraph projection separates the two.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::code::CourseCode;
use crate::graph::build::DependencyGraph;
use crate::graph::order::StudyOrder;

/// Cycles found in the graph and the courses stuck behind them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Each cycle as its sorted member codes. Self-prerequisites appear as a
    /// one-element cycle.
    pub cycles: Vec<Vec<CourseCode>>,
    /// Unresolved courses that are not on a cycle themselves.
    pub blocked: Vec<CourseCode>,
}

impl CycleReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty() && self.blocked.is_empty()
    }
}

/// Find every cycle in `graph`, sorted.
#[must_use]
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<CourseCode>> {
    let (pg, _) = graph.to_petgraph();

    let mut cycles: Vec<Vec<CourseCode>> = tarjan_scc(&pg)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || component.first().is_some_and(|node| has_self_loop(&pg, *node))
        })
        .map(|component| {
            let mut codes: Vec<CourseCode> = component
                .into_iter()
                .filter_map(|idx| pg.node_weight(idx).cloned())
                .collect();
            codes.sort_unstable();
            codes
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Explain an incomplete [`StudyOrder`].
///
/// Returns an empty report when the order is complete.
#[must_use]
pub fn diagnose(graph: &DependencyGraph, order: &StudyOrder) -> CycleReport {
    if order.is_complete() {
        return CycleReport::default();
    }

    let cycles = find_cycles(graph);
    let on_cycle: BTreeSet<&CourseCode> = cycles.iter().flatten().collect();
    let blocked = order
        .unresolved
        .iter()
        .filter(|code| !on_cycle.contains(code))
        .cloned()
        .collect();

    CycleReport { cycles, blocked }
}

fn has_self_loop(graph: &DiGraph<CourseCode, ()>, node: NodeIndex) -> bool {
    graph.find_edge(node, node).is_some()
}
