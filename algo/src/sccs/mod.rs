/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strongly connected components.
//!
//! The only algorithm provided for directed graphs is [Tarjan's
//! algorithm](tarjan), which computes the components in a single depth-first
//! visit.
//!
//! # Examples
//! ```
//! use condag::graphs::vec_graph::DiGraph;
//! use condag_algo::sccs::*;
//! use dsi_progress_logger::no_logging;
//!
//! let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (1, 3, 1.0)]);
//!
//! let (mut sccs, metrics) = tarjan(&graph, no_logging![]);
//! assert_eq!(metrics.visits, 4);
//!
//! // Let's sort the components by size
//! let sizes = sccs.sort_by_size();
//!
//! assert_eq!(sizes, vec![3, 1].into_boxed_slice());
//! assert_eq!(sccs.components(), &vec![0, 0, 0, 1]);
//! ```

mod tarjan;
pub use tarjan::*;

/// Strongly connected components.
///
/// An instance of this structure stores the [index of the
/// component](Sccs::components) of each node and the [partition of the
/// nodes](Sccs::node_lists) into components. Components are numbered from 0
/// to [`num_components`](Sccs::num_components); every node belongs to
/// exactly one component, and every component is non-empty.
///
/// Moreover, this structure makes it possible to [sort the components by
/// size](Sccs::sort_by_size).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sccs {
    components: Box<[usize]>,
    node_lists: Vec<Vec<usize>>,
}

impl Sccs {
    /// Creates a new instance from a per-node component map and the matching
    /// partition.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the two representations are inconsistent.
    pub fn new(components: Box<[usize]>, node_lists: Vec<Vec<usize>>) -> Self {
        debug_assert_eq!(
            components.len(),
            node_lists.iter().map(Vec::len).sum::<usize>()
        );
        debug_assert!(node_lists
            .iter()
            .enumerate()
            .all(|(index, nodes)| nodes.iter().all(|&node| components[node] == index)));
        Sccs {
            components,
            node_lists,
        }
    }

    /// Returns the number of strongly connected components.
    pub fn num_components(&self) -> usize {
        self.node_lists.len()
    }

    /// Returns a slice containing, for each node, the index of the component
    /// it belongs to.
    #[inline(always)]
    pub fn components(&self) -> &[usize] {
        &self.components
    }

    /// Returns the partition of the nodes into components.
    ///
    /// Components appear in discovery order; nodes within a component appear
    /// in the order they were popped off the component stack.
    #[inline(always)]
    pub fn node_lists(&self) -> &[Vec<usize>] {
        &self.node_lists
    }

    /// Returns the sizes of all components.
    pub fn compute_sizes(&self) -> Box<[usize]> {
        self.node_lists
            .iter()
            .map(Vec::len)
            .collect::<Vec<_>>()
            .into_boxed_slice()
    }

    /// Renumbers the components by decreasing size.
    ///
    /// After a call to this method, the sizes of strongly connected
    /// components will be decreasing in the component index. The method
    /// returns the sizes of the components after the renumbering.
    pub fn sort_by_size(&mut self) -> Box<[usize]> {
        let sizes = self.compute_sizes();
        let mut sort_perm = Vec::from_iter(0..sizes.len());
        sort_perm.sort_unstable_by(|&x, &y| sizes[y].cmp(&sizes[x]));
        let mut inv_perm = vec![0; sizes.len()];
        sort_perm
            .iter()
            .enumerate()
            .for_each(|(i, &x)| inv_perm[x] = i);

        self.components
            .iter_mut()
            .for_each(|component| *component = inv_perm[*component]);

        let mut node_lists = vec![Vec::new(); self.node_lists.len()];
        for (component, nodes) in std::mem::take(&mut self.node_lists).into_iter().enumerate() {
            node_lists[inv_perm[component]] = nodes;
        }
        self.node_lists = node_lists;

        let mut sizes = sizes;
        sizes.sort_by(|&x, &y| y.cmp(&x));
        sizes
    }
}
