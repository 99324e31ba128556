/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Single-source shortest and longest paths on DAGs, and the global
//! critical path.
//!
//! Both solvers are a single relaxation pass over a topological order: every
//! predecessor of a node is finalized before the node itself is processed,
//! so one left-to-right sweep suffices. The two directions share the same
//! relaxation core and differ only in the unreached sentinel
//! ([`f64::INFINITY`] vs. [`f64::NEG_INFINITY`]) and in the acceptance
//! comparison.
//!
//! Cyclic inputs are not an error: the solvers verify acyclicity by running
//! [`top_sort`](crate::top_sort) and yield `None` when the graph is not a
//! DAG. Callers must branch on the presence of the result, not catch
//! anything.

use crate::metrics::Metrics;
use crate::top_sort::top_sort;
use anyhow::{ensure, Result};
use condag::graphs::vec_graph::DiGraph;
use dsi_progress_logger::ProgressLog;
use std::time::Instant;

/// The direction of a relaxation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Minimize,
    Maximize,
}

impl Mode {
    /// The distance of an unreached node.
    fn sentinel(self) -> f64 {
        match self {
            Mode::Minimize => f64::INFINITY,
            Mode::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Whether `candidate` beats `current` in this direction.
    fn improves(self, candidate: f64, current: f64) -> bool {
        match self {
            Mode::Minimize => candidate < current,
            Mode::Maximize => candidate > current,
        }
    }
}

/// Distances and parents computed by a single-source relaxation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    source: usize,
    distances: Box<[f64]>,
    parents: Box<[Option<usize>]>,
}

impl PathResult {
    /// Returns the source of the run.
    #[inline(always)]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the best known distance from the source to every node.
    ///
    /// Unreached nodes hold the directional sentinel: [`f64::INFINITY`] for
    /// shortest paths, [`f64::NEG_INFINITY`] for longest paths.
    #[inline(always)]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Returns, for every node, the predecessor on its best path, or `None`
    /// for the source and for unreached nodes.
    #[inline(always)]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Reconstructs the path from the source to `target` by walking parents
    /// backward, or returns `None` if `target` was not reached.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a node of the graph the run was made on.
    pub fn path(&self, target: usize) -> Option<Vec<usize>> {
        if !self.distances[target].is_finite() {
            return None;
        }
        let mut path = vec![target];
        let mut node = target;
        while let Some(parent) = self.parents[node] {
            path.push(parent);
            node = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// The longest path in a whole DAG, over all possible sources.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPath {
    result: PathResult,
    end: usize,
    length: f64,
}

impl CriticalPath {
    /// Returns the single-source run the critical path was found in.
    pub fn result(&self) -> &PathResult {
        &self.result
    }

    /// Returns the node the critical path starts from.
    pub fn start(&self) -> usize {
        self.result.source()
    }

    /// Returns the node the critical path ends in.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the total weight of the critical path.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the critical path as a node sequence, start to end.
    pub fn path(&self) -> Vec<usize> {
        // Safe as the end node was reached in the stored run
        self.result.path(self.end).unwrap()
    }
}

/// One relaxation pass from `source` over a topologically valid `order`.
///
/// Nodes whose distance is still the sentinel are skipped: they are not
/// reachable from the source and must not contaminate their successors.
fn relax(
    graph: &DiGraph,
    source: usize,
    order: &[usize],
    mode: Mode,
    metrics: &mut Metrics,
) -> PathResult {
    let num_nodes = graph.num_nodes();
    let mut distances = vec![mode.sentinel(); num_nodes].into_boxed_slice();
    let mut parents = vec![None; num_nodes].into_boxed_slice();
    distances[source] = 0.0;

    for &node in order {
        if distances[node] == mode.sentinel() {
            continue;
        }
        for arc in graph.successors(node) {
            let candidate = distances[node] + arc.weight;
            metrics.relaxations += 1;
            metrics.comparisons += 1;

            if mode.improves(candidate, distances[arc.dst]) {
                distances[arc.dst] = candidate;
                parents[arc.dst] = Some(node);
                metrics.distance_updates += 1;
            }
        }
    }

    PathResult {
        source,
        distances,
        parents,
    }
}

fn single_source(
    graph: &DiGraph,
    source: usize,
    mode: Mode,
    pl: &mut impl ProgressLog,
) -> Result<(Option<PathResult>, Metrics)> {
    ensure!(
        source < graph.num_nodes(),
        "source {} out of bounds (the graph has {} nodes)",
        source,
        graph.num_nodes()
    );

    let start = Instant::now();

    // Verify acyclicity and obtain a processing order
    let (sort, mut metrics) = top_sort(graph, pl);
    if !sort.is_dag() {
        metrics.elapsed = start.elapsed();
        return Ok((None, metrics));
    }

    let result = relax(graph, source, sort.order(), mode, &mut metrics);
    metrics.elapsed = start.elapsed();
    Ok((Some(result), metrics))
}

/// Computes shortest paths from `source` to every node of a DAG.
///
/// Fails if `source` is out of bounds. Yields `None` if the graph contains
/// a cycle: that is the expected outcome of misapplying a DAG path solver,
/// not an error, and the [`Metrics`] gathered up to the cycle detection are
/// still returned.
///
/// Runs in O(V+E), dominated by the embedded topological sort.
///
/// # Examples
/// ```
/// use condag::graphs::vec_graph::DiGraph;
/// use condag_algo::paths::shortest_paths;
/// use dsi_progress_logger::no_logging;
///
/// let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 2.0), (0, 2, 4.0)]);
/// let (result, _) = shortest_paths(&graph, 0, no_logging![])?;
/// let result = result.unwrap();
/// assert_eq!(result.distances(), &[0.0, 1.0, 3.0]);
/// assert_eq!(result.path(2), Some(vec![0, 1, 2]));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn shortest_paths(
    graph: &DiGraph,
    source: usize,
    pl: &mut impl ProgressLog,
) -> Result<(Option<PathResult>, Metrics)> {
    single_source(graph, source, Mode::Minimize, pl)
}

/// Computes longest paths from `source` to every node of a DAG.
///
/// The dual of [`shortest_paths`]: distances start at
/// [`f64::NEG_INFINITY`] and relaxations maximize. Same contract otherwise.
pub fn longest_paths(
    graph: &DiGraph,
    source: usize,
    pl: &mut impl ProgressLog,
) -> Result<(Option<PathResult>, Metrics)> {
    single_source(graph, source, Mode::Maximize, pl)
}

/// Finds the critical path of a DAG: the longest path over *all* sources,
/// not relative to a fixed one.
///
/// Runs a longest-path relaxation pass with every node as source and tracks
/// the global maximum finite distance together with its end node. The
/// topological order is computed once and shared by all passes; the graph
/// is verified to be acyclic by that same sort, so a cyclic graph (or an
/// empty one) yields `None`.
///
/// The returned [`Metrics`] aggregate every relaxation pass. Runs in
/// O(V·(V+E)).
pub fn critical_path(
    graph: &DiGraph,
    pl: &mut impl ProgressLog,
) -> (Option<CriticalPath>, Metrics) {
    let num_nodes = graph.num_nodes();
    pl.item_name("source");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing critical path");

    let start = Instant::now();

    let (sort, mut metrics) = top_sort(graph, pl);
    if !sort.is_dag() || num_nodes == 0 {
        metrics.elapsed = start.elapsed();
        pl.done();
        return (None, metrics);
    }

    let mut best: Option<CriticalPath> = None;
    for source in 0..num_nodes {
        pl.light_update();
        let result = relax(graph, source, sort.order(), Mode::Maximize, &mut metrics);

        // First node attaining the maximum finite distance of this run
        let mut end = source;
        let mut length = f64::NEG_INFINITY;
        for (node, &distance) in result.distances().iter().enumerate() {
            if distance != f64::NEG_INFINITY && distance > length {
                end = node;
                length = distance;
            }
        }

        if best.as_ref().is_none_or(|best| length > best.length) {
            best = Some(CriticalPath {
                result,
                end,
                length,
            });
        }
    }

    metrics.elapsed = start.elapsed();
    pl.done();
    (best, metrics)
}
