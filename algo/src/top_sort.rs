/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::metrics::Metrics;
use condag::graphs::vec_graph::DiGraph;
use dsi_progress_logger::ProgressLog;
use std::collections::VecDeque;
use std::time::Instant;

/// The result of a topological sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSort {
    order: Box<[usize]>,
    is_dag: bool,
}

impl TopSort {
    /// Returns the nodes in topological order.
    ///
    /// If the graph was not acyclic, this is a strict prefix: a partial
    /// order respecting all resolved dependencies, missing exactly the nodes
    /// trapped in or downstream of a cycle.
    #[inline(always)]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns whether the sorted graph was acyclic, that is, whether
    /// [`order`](TopSort::order) contains every node.
    #[inline(always)]
    pub fn is_dag(&self) -> bool {
        self.is_dag
    }
}

/// Kahn's algorithm for topological sorting.
///
/// Computes the in-degree of every node, seeds a FIFO queue with the nodes
/// of in-degree zero, and repeatedly dequeues a node, appends it to the
/// order, and decrements the in-degrees of its successors, enqueueing each
/// the instant its in-degree reaches zero.
///
/// If the returned order is shorter than the number of nodes, the graph
/// contains at least one cycle and [`is_dag`](TopSort::is_dag) is false;
/// when it is true, every arc `(u, v)` has `u` before `v` in the order.
///
/// Next to the order, this function returns a [`Metrics`] snapshot counting
/// queue operations and in-degree decrements. Runs in O(V+E).
pub fn top_sort(graph: &DiGraph, pl: &mut impl ProgressLog) -> (TopSort, Metrics) {
    let num_nodes = graph.num_nodes();
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing topological sort");

    let start = Instant::now();
    let mut metrics = Metrics::new();

    let mut in_degree = graph.in_degrees();
    let mut order = Vec::with_capacity(num_nodes);
    let mut queue = VecDeque::new();

    for node in 0..num_nodes {
        if in_degree[node] == 0 {
            queue.push_back(node);
            metrics.queue_ops += 1;
        }
    }

    while let Some(node) = queue.pop_front() {
        pl.light_update();
        order.push(node);
        metrics.queue_ops += 1;

        for arc in graph.successors(node) {
            in_degree[arc.dst] -= 1;
            metrics.in_degree_updates += 1;

            if in_degree[arc.dst] == 0 {
                queue.push_back(arc.dst);
                metrics.queue_ops += 1;
            }
        }
    }

    metrics.elapsed = start.elapsed();
    pl.done();

    let is_dag = order.len() == num_nodes;
    (
        TopSort {
            order: order.into_boxed_slice(),
            is_dag,
        },
        metrics,
    )
}
