/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::GraphError;

/// A weighted arc of a [`DiGraph`].
///
/// Weights are arbitrary finite reals: fractional, zero and negative values
/// are all legal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// The source node.
    pub src: usize,
    /// The target node.
    pub dst: usize,
    /// The weight of the arc.
    pub weight: f64,
}

/// A mutable weighted directed graph based on a vector of vectors.
///
/// Nodes are dense identifiers in `[0, num_nodes)` and carry no metadata.
/// Besides the successor lists, the graph keeps every arc in insertion order,
/// which makes whole-graph scans (e.g., [`in_degrees`](DiGraph::in_degrees)
/// or the construction of a condensation) independent of the adjacency
/// structure.
///
/// The graph is append-only: arcs can be added but never removed. Once a
/// graph is handed to the algorithms it is treated as read-only.
///
/// # Examples
///
/// ```
/// use condag::graphs::vec_graph::DiGraph;
///
/// let mut g = DiGraph::new(3);
/// g.add_arc(0, 1, 1.0)?;
/// g.add_arc(1, 2, 0.5)?;
/// assert_eq!(g.num_nodes(), 3);
/// assert_eq!(g.num_arcs(), 2);
/// assert_eq!(g.successors(1)[0].dst, 2);
/// # Ok::<(), condag::graphs::GraphError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiGraph {
    /// For each node, its list of outgoing arcs, in insertion order.
    succ: Vec<Vec<Arc>>,
    /// Every arc of the graph, in insertion order.
    arcs: Vec<Arc>,
}

impl DiGraph {
    /// Creates a new graph with `n` isolated nodes.
    pub fn new(n: usize) -> Self {
        Self {
            succ: Vec::from_iter((0..n).map(|_| Vec::new())),
            arcs: Vec::new(),
        }
    }

    /// Creates a graph from an iterator of `(src, dst, weight)` triples.
    ///
    /// The number of nodes is one more than the largest node identifier
    /// appearing in the triples.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        let n = arcs
            .iter()
            .map(|&(u, v, _)| u.max(v) + 1)
            .max()
            .unwrap_or(0);
        let mut g = Self::new(n);
        for (u, v, w) in arcs {
            // Cannot fail: n covers every endpoint
            g.add_arc(u, v, w).unwrap();
        }
        g
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.succ.len()
    }

    /// Returns the number of arcs.
    #[inline(always)]
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Appends an arc to the graph.
    ///
    /// Returns [`GraphError::NodeOutOfBounds`] if either endpoint is not in
    /// `[0, num_nodes)`.
    pub fn add_arc(&mut self, src: usize, dst: usize, weight: f64) -> Result<(), GraphError> {
        let num_nodes = self.num_nodes();
        for node in [src, dst] {
            if node >= num_nodes {
                return Err(GraphError::NodeOutOfBounds { node, num_nodes });
            }
        }
        let arc = Arc { src, dst, weight };
        self.succ[src].push(arc);
        self.arcs.push(arc);
        Ok(())
    }

    /// Returns the arcs leaving `node`, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in `[0, num_nodes)`.
    #[inline(always)]
    pub fn successors(&self, node: usize) -> &[Arc] {
        &self.succ[node]
    }

    /// Returns every arc of the graph, in insertion order.
    #[inline(always)]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Returns, for each node, the number of arcs pointing at it.
    ///
    /// This is a full O(E) scan of the arc list.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut in_degree = vec![0; self.num_nodes()];
        for arc in &self.arcs {
            in_degree[arc.dst] += 1;
        }
        in_degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_isolated() {
        let g = DiGraph::new(4);
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 0);
        for v in 0..4 {
            assert!(g.successors(v).is_empty());
        }
    }

    #[test]
    fn test_add_arc_out_of_bounds() {
        let mut g = DiGraph::new(2);
        assert_eq!(
            g.add_arc(0, 2, 1.0),
            Err(GraphError::NodeOutOfBounds {
                node: 2,
                num_nodes: 2
            })
        );
        assert_eq!(
            g.add_arc(5, 1, 1.0),
            Err(GraphError::NodeOutOfBounds {
                node: 5,
                num_nodes: 2
            })
        );
        assert_eq!(g.num_arcs(), 0);
    }

    #[test]
    fn test_insertion_order() {
        let mut g = DiGraph::new(3);
        g.add_arc(0, 2, 3.0).unwrap();
        g.add_arc(0, 1, 1.0).unwrap();
        g.add_arc(1, 2, -0.5).unwrap();
        let dsts: Vec<_> = g.successors(0).iter().map(|a| a.dst).collect();
        assert_eq!(dsts, vec![2, 1]);
        let all: Vec<_> = g.arcs().iter().map(|a| (a.src, a.dst)).collect();
        assert_eq!(all, vec![(0, 2), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_in_degrees() {
        let g = DiGraph::from_arcs([(0, 1, 1.0), (2, 1, 1.0), (1, 2, 2.0), (0, 2, 0.0)]);
        assert_eq!(g.in_degrees(), vec![0, 2, 2]);
    }

    #[test]
    fn test_parallel_arcs_kept() {
        let g = DiGraph::from_arcs([(0, 1, 1.0), (0, 1, 2.0)]);
        assert_eq!(g.num_arcs(), 2);
        assert_eq!(g.successors(0).len(), 2);
    }

    #[test]
    fn test_empty() {
        let g = DiGraph::new(0);
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.in_degrees(), Vec::<usize>::new());
    }
}
