/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Sccs;
use crate::metrics::Metrics;
use condag::graphs::vec_graph::DiGraph;
use condag::visits::depth_first::{Event, SeqDfs};
use dsi_progress_logger::ProgressLog;
use no_break::NoBreak;
use std::ops::ControlFlow::Continue;
use std::time::Instant;

/// Discovery index of a node that has not been visited yet, and component
/// index of a node whose component is still open.
const UNSET: usize = usize::MAX;

/// Tarjan's algorithm for strongly connected components.
///
/// Each node receives a monotonically increasing discovery index and a
/// low link, initially equal to the discovery index. The low link is
/// tightened along tree arcs when the visit retreats from them, and by arcs
/// pointing at nodes whose component is still open; arcs pointing at closed
/// components are ignored. A node whose low link is still equal to its
/// discovery index after its subtree has been explored is a component root:
/// the component stack is popped down to and including it, and all popped
/// nodes share a new component index.
///
/// Components are therefore produced in reverse-finish order, not sorted by
/// node identifier. Since the underlying visit is iterative, arbitrarily
/// deep graphs cannot overflow the native call stack.
///
/// Next to the components, this function returns a [`Metrics`] snapshot
/// counting node visits, arc explorations, component-stack operations and
/// low-link tightenings. Runs in O(V+E).
pub fn tarjan(graph: &DiGraph, pl: &mut impl ProgressLog) -> (Sccs, Metrics) {
    let num_nodes = graph.num_nodes();
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing strongly connected components...");

    let start = Instant::now();
    let mut metrics = Metrics::new();

    let mut disc = vec![UNSET; num_nodes].into_boxed_slice();
    let mut low = vec![0; num_nodes].into_boxed_slice();
    let mut component = vec![UNSET; num_nodes].into_boxed_slice();
    let mut component_stack = Vec::with_capacity(16);
    let mut node_lists = Vec::new();
    let mut time = 0;

    let mut visit = SeqDfs::new(graph);
    visit
        .visit(0..num_nodes, |event| {
            match event {
                Event::Previsit { node, parent, .. } => {
                    pl.light_update();
                    disc[node] = time;
                    low[node] = time;
                    time += 1;
                    component_stack.push(node);
                    metrics.visits += 1;
                    metrics.stack_ops += 1;
                    if parent != node {
                        // A tree arc was traversed to get here
                        metrics.arc_explorations += 1;
                    }
                }
                Event::Revisit { node, pred, .. } => {
                    metrics.arc_explorations += 1;
                    // Only arcs into a still-open component can tighten the
                    // low link; closed components are unrelated.
                    if component[node] == UNSET {
                        low[pred] = low[pred].min(disc[node]);
                        metrics.low_link_updates += 1;
                    }
                }
                Event::Postvisit { node, parent } => {
                    if low[node] == disc[node] {
                        // node is a component root
                        let index = node_lists.len();
                        let mut nodes = Vec::new();
                        loop {
                            // Safe as the stack contains at least node
                            let popped = component_stack.pop().unwrap();
                            component[popped] = index;
                            nodes.push(popped);
                            metrics.stack_ops += 1;
                            if popped == node {
                                break;
                            }
                        }
                        node_lists.push(nodes);
                    }
                    if parent != node {
                        // Propagate knowledge to the parent
                        low[parent] = low[parent].min(low[node]);
                        metrics.low_link_updates += 1;
                    }
                }
                _ => {}
            }
            Continue(())
        })
        .continue_value_no_break();

    metrics.elapsed = start.elapsed();
    pl.done();
    (Sccs::new(component, node_lists), metrics)
}
