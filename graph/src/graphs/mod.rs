/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of graphs.

pub mod vec_graph;

pub mod prelude {
    pub use super::vec_graph::{Arc, DiGraph};
    pub use super::GraphError;
}

use thiserror::Error;

/// Errors raised while building a graph.
///
/// All of these denote caller misuse: they are never transient, and retrying
/// the same call can never succeed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A node identifier outside the range `[0, num_nodes)`.
    #[error("node {node} out of bounds (the graph has {num_nodes} nodes)")]
    NodeOutOfBounds { node: usize, num_nodes: usize },
}
