/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Condensation of a graph modulo its strongly connected components.

use crate::sccs::Sccs;
use anyhow::{ensure, Result};
use condag::graphs::vec_graph::DiGraph;
use std::collections::HashSet;
use std::ops::Deref;

/// The condensation of a graph: one node per strongly connected component.
///
/// This is a thin wrapper around a [`DiGraph`] whose purpose is to witness,
/// in the type, that the wrapped graph is acyclic: no cycle can span two
/// distinct components, or they would have been merged into one. The wrapper
/// derefs to the underlying graph, so it can be fed directly to the
/// topological sorter and to the path solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct Condensation(DiGraph);

impl Condensation {
    /// Returns `true`.
    ///
    /// Acyclicity of a condensation is a mathematical property, not a
    /// runtime check; this method exists so that downstream assertions can
    /// name the invariant they rely on.
    pub const fn is_dag(&self) -> bool {
        true
    }

    /// Returns the underlying graph, consuming the wrapper.
    pub fn into_inner(self) -> DiGraph {
        self.0
    }
}

impl Deref for Condensation {
    type Target = DiGraph;

    fn deref(&self) -> &DiGraph {
        &self.0
    }
}

/// Collapses a graph and its strongly connected components into a
/// [`Condensation`].
///
/// Every arc of the original graph is mapped through the component map of
/// `sccs`. Arcs whose endpoints fall into the same component are dropped;
/// among multiple arcs connecting the same ordered pair of components, only
/// the first one encountered (in insertion order) is kept, weight included.
/// A min/max/sum weight policy would be equally defensible; first-seen is
/// the documented choice.
///
/// Fails if the component map of `sccs` does not cover exactly the nodes of
/// `graph`. Runs in O(E).
///
/// # Examples
/// ```
/// use condag::graphs::vec_graph::DiGraph;
/// use condag_algo::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// // One cycle 0 -> 1 -> 2 -> 0, then a tail 2 -> 3 -> 4
/// let graph = DiGraph::from_arcs([
///     (0, 1, 1.0),
///     (1, 2, 1.0),
///     (2, 0, 1.0),
///     (2, 3, 1.0),
///     (3, 4, 1.0),
/// ]);
/// let (sccs, _) = tarjan(&graph, no_logging![]);
/// let condensation = condense(&graph, &sccs)?;
/// assert_eq!(condensation.num_nodes(), 3);
/// assert_eq!(condensation.num_arcs(), 2);
/// assert!(condensation.is_dag());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn condense(graph: &DiGraph, sccs: &Sccs) -> Result<Condensation> {
    ensure!(
        sccs.components().len() == graph.num_nodes(),
        "component map covers {} nodes, but the graph has {}",
        sccs.components().len(),
        graph.num_nodes()
    );

    let component = sccs.components();
    let mut condensation = DiGraph::new(sccs.num_components());
    let mut seen = HashSet::new();

    for arc in graph.arcs() {
        let src = component[arc.src];
        let dst = component[arc.dst];
        // Arcs within a component would be self-loops
        if src != dst && seen.insert((src, dst)) {
            // Cannot fail: component indices are < num_components
            condensation.add_arc(src, dst, arc.weight).unwrap();
        }
    }

    Ok(Condensation(condensation))
}
