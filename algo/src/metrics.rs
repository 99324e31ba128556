/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Per-invocation operation counters.
//!
//! Every algorithm entry point of this crate returns, next to its result, a
//! [`Metrics`] value describing the work it performed: category-specific
//! operation counters and wall-clock elapsed time. A fresh value is created
//! for each invocation and finalized when the algorithm completes, so
//! invocations remain independent and testable in isolation; there is no
//! ambient global state.
//!
//! Only the counters relevant to an algorithm are ever nonzero: Tarjan
//! populates the traversal counters, Kahn the queue counters, the path
//! solvers the relaxation counters (plus, transitively, the queue counters of
//! the embedded topological sort they run for verification).

use std::time::Duration;

/// A counter bag scoped to one algorithm invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Nodes visited for the first time during a depth-first traversal.
    pub visits: u64,
    /// Arcs explored during a depth-first traversal.
    pub arc_explorations: u64,
    /// Pushes onto and pops off the component stack.
    pub stack_ops: u64,
    /// Low-link tightenings (counted whether or not the value changed).
    pub low_link_updates: u64,

    /// Enqueues and dequeues of the FIFO queue of Kahn's algorithm.
    pub queue_ops: u64,
    /// In-degree decrements of Kahn's algorithm.
    pub in_degree_updates: u64,

    /// Arc relaxations attempted by a path solver.
    pub relaxations: u64,
    /// Distance comparisons performed by a path solver.
    pub comparisons: u64,
    /// Distance (and parent) updates accepted by a path solver.
    pub distance_updates: u64,

    /// Wall-clock time spent inside the algorithm.
    pub elapsed: Duration,
}

impl Metrics {
    /// Creates a zeroed counter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sum of all operation counters.
    pub fn total_ops(&self) -> u64 {
        self.visits
            + self.arc_explorations
            + self.stack_ops
            + self.low_link_updates
            + self.queue_ops
            + self.in_degree_updates
            + self.relaxations
            + self.comparisons
            + self.distance_updates
    }

    /// Adds every counter of `other` to `self`, including elapsed time.
    ///
    /// Used by driver code that reports a single aggregate for an algorithm
    /// invoked repeatedly (e.g., the critical-path search).
    pub fn absorb(&mut self, other: &Metrics) {
        self.visits += other.visits;
        self.arc_explorations += other.arc_explorations;
        self.stack_ops += other.stack_ops;
        self.low_link_updates += other.low_link_updates;
        self.queue_ops += other.queue_ops;
        self.in_degree_updates += other.in_degree_updates;
        self.relaxations += other.relaxations;
        self.comparisons += other.comparisons;
        self.distance_updates += other.distance_updates;
        self.elapsed += other.elapsed;
    }
}
