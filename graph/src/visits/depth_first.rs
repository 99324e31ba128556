/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Depth-first visits.
//!
//! Since [`Event`] carries the predecessor of the visited node, all
//! post-initialization events can be interpreted as arc events; the only
//! exceptions are the previsit and postvisit events of a root.

use crate::graphs::vec_graph::{Arc, DiGraph};
use std::ops::ControlFlow::{self, Continue};
use sux::bits::BitVec;

/// Types of callback events generated during a depth-first visit.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Event {
    /// This event should be used to set up state at the start of each visit
    /// tree.
    ///
    /// Note that this event will not happen if the root of the tree has
    /// already been visited.
    Init {
        /// The root of the current visit tree, that is, the first node that
        /// will be visited.
        root: usize,
    },
    /// The node has been encountered for the first time: we are traversing a
    /// new tree arc, unless all node fields are equal to the root.
    Previsit {
        /// The current node.
        node: usize,
        /// The parent of [`node`](`Event::Previsit::node`) in the visit tree,
        /// or [`root`](`Event::Previsit::root`) if
        /// [`node`](`Event::Previsit::node`) is the root.
        parent: usize,
        /// The root of the current visit tree.
        root: usize,
        /// The length of the visit path from the root to
        /// [`node`](`Event::Previsit::node`).
        depth: usize,
    },
    /// The node has been encountered before: we are traversing a back arc, a
    /// forward arc, or a cross arc.
    Revisit {
        /// The current node.
        node: usize,
        /// The predecessor of [`node`](`Event::Revisit::node`) used to reach
        /// it.
        pred: usize,
        /// Whether the node is currently on the visit path, that is, whether
        /// we are traversing a back arc, and retreating from it.
        on_stack: bool,
    },
    /// The enumeration of the successors of the node has been completed: we
    /// are retreating from a tree arc, unless both node fields are equal.
    Postvisit {
        /// The current node.
        node: usize,
        /// The parent of [`node`](`Event::Postvisit::node`) in the visit
        /// tree, or [`node`](`Event::Postvisit::node`) itself if it is the
        /// root.
        parent: usize,
    },
    /// The visit of the current tree has been completed.
    Done {
        /// The root of the current visit tree.
        root: usize,
    },
}

/// A sequential depth-first visit keeping track of predecessors and of the
/// nodes on the visit path.
///
/// The implementation is iterative: the visit path is an explicit stack of
/// successor iterators, one per node on the path, so arbitrarily deep graphs
/// cannot overflow the native call stack. Entries on the stack pair the
/// iterator on the successors of a node with the *parent* of the node, which
/// makes it possible to avoid storing both the current and the parent node.
///
/// # Examples
///
/// Let's test acyclicity:
///
/// ```
/// use condag::graphs::vec_graph::DiGraph;
/// use condag::visits::depth_first::{Event, SeqDfs};
/// use condag::visits::StoppedWhenDone;
/// use std::ops::ControlFlow::{Break, Continue};
///
/// let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (1, 3, 1.0)]);
/// let mut visit = SeqDfs::new(&graph);
///
/// assert!(visit
///     .visit(0..graph.num_nodes(), |event| {
///         match event {
///             // Stop the visit as soon as a back arc is found
///             Event::Revisit { on_stack: true, .. } => Break(StoppedWhenDone),
///             _ => Continue(()),
///         }
///     })
///     .is_break()); // As the graph is not acyclic
/// ```
pub struct SeqDfs<'a> {
    graph: &'a DiGraph,
    /// One entry per node on the visit path: the iterator on the successors
    /// of the node, and the node's parent.
    stack: Vec<(std::slice::Iter<'a, Arc>, usize)>,
    known: BitVec,
    on_path: BitVec,
}

impl<'a> SeqDfs<'a> {
    /// Creates a new sequential visit on the given graph.
    pub fn new(graph: &'a DiGraph) -> Self {
        let num_nodes = graph.num_nodes();
        Self {
            graph,
            stack: Vec::with_capacity(16),
            known: BitVec::new(num_nodes),
            on_path: BitVec::new(num_nodes),
        }
    }

    /// Resets the visit status, making it possible to reuse it.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.known.reset();
        self.on_path.reset();
    }

    /// Visits the graph starting from each of the given roots in turn,
    /// skipping roots that have already been visited.
    ///
    /// Passing `0..graph.num_nodes()` as roots guarantees that every node is
    /// visited exactly once, regardless of connectivity.
    pub fn visit<R, E, C>(&mut self, roots: R, mut callback: C) -> ControlFlow<E, ()>
    where
        R: IntoIterator<Item = usize>,
        C: FnMut(Event) -> ControlFlow<E, ()>,
    {
        for root in roots {
            if self.known.get(root) {
                continue;
            }

            callback(Event::Init { root })?;

            self.known.set(root, true);
            callback(Event::Previsit {
                node: root,
                parent: root,
                root,
                depth: 0,
            })?;

            self.stack.push((self.graph.successors(root).iter(), root));
            self.on_path.set(root, true);

            // The node currently being visited; its parent is read back from
            // the stack at each iteration of the 'recurse loop.
            let mut curr = root;

            'recurse: loop {
                let depth = self.stack.len();
                let Some((iter, parent)) = self.stack.last_mut() else {
                    callback(Event::Done { root })?;
                    break;
                };

                for &Arc { dst: succ, .. } in iter {
                    if self.known.get(succ) {
                        callback(Event::Revisit {
                            node: succ,
                            pred: curr,
                            on_stack: self.on_path.get(succ),
                        })?;
                    } else {
                        self.known.set(succ, true);
                        callback(Event::Previsit {
                            node: succ,
                            parent: curr,
                            root,
                            depth,
                        })?;

                        // curr is the parent of succ
                        self.stack.push((self.graph.successors(succ).iter(), curr));
                        self.on_path.set(succ, true);

                        // At the next iteration, succ will be the current node
                        curr = succ;
                        continue 'recurse;
                    }
                }

                callback(Event::Postvisit {
                    node: curr,
                    parent: *parent,
                })?;

                self.on_path.set(curr, false);

                // We are going up one stack level, so the next current node
                // is the current parent.
                curr = *parent;
                self.stack.pop();
            }
        }

        Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visits::StoppedWhenDone;
    use std::ops::ControlFlow::Break;

    fn events(graph: &DiGraph) -> Vec<Event> {
        let mut visit = SeqDfs::new(graph);
        let mut events = Vec::new();
        let result: ControlFlow<std::convert::Infallible> =
            visit.visit(0..graph.num_nodes(), |event| {
                events.push(event);
                Continue(())
            });
        result.continue_value().unwrap();
        events
    }

    #[test]
    fn test_path_events() {
        let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0)]);
        assert_eq!(
            events(&graph),
            vec![
                Event::Init { root: 0 },
                Event::Previsit {
                    node: 0,
                    parent: 0,
                    root: 0,
                    depth: 0
                },
                Event::Previsit {
                    node: 1,
                    parent: 0,
                    root: 0,
                    depth: 1
                },
                Event::Previsit {
                    node: 2,
                    parent: 1,
                    root: 0,
                    depth: 2
                },
                Event::Postvisit { node: 2, parent: 1 },
                Event::Postvisit { node: 1, parent: 0 },
                Event::Postvisit { node: 0, parent: 0 },
                Event::Done { root: 0 },
            ]
        );
    }

    #[test]
    fn test_back_arc_on_stack() {
        let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 0, 1.0)]);
        assert!(events(&graph).contains(&Event::Revisit {
            node: 0,
            pred: 1,
            on_stack: true
        }));
    }

    #[test]
    fn test_cross_arc_off_stack() {
        // 0 -> 1, 0 -> 2, 2 -> 1: by the time 2 explores 1, 1 has been
        // postvisited and is off the path.
        let graph = DiGraph::from_arcs([(0, 1, 1.0), (0, 2, 1.0), (2, 1, 1.0)]);
        assert!(events(&graph).contains(&Event::Revisit {
            node: 1,
            pred: 2,
            on_stack: false
        }));
    }

    #[test]
    fn test_all_nodes_covered() {
        // Disconnected graph: the outer root loop must reach 2 and 3.
        let graph = DiGraph::from_arcs([(0, 1, 1.0), (2, 3, 1.0)]);
        let previsited: Vec<_> = events(&graph)
            .into_iter()
            .filter_map(|e| match e {
                Event::Previsit { node, .. } => Some(node),
                _ => None,
            })
            .collect();
        assert_eq!(previsited, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_interruption() {
        let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        let mut visit = SeqDfs::new(&graph);
        let result = visit.visit(0..graph.num_nodes(), |event| match event {
            Event::Revisit { on_stack: true, .. } => Break(StoppedWhenDone),
            _ => Continue(()),
        });
        assert!(result.is_break());
    }

    #[test]
    fn test_reset_and_reuse() {
        let graph = DiGraph::from_arcs([(0, 1, 1.0)]);
        let mut visit = SeqDfs::new(&graph);
        let mut count = 0;
        for _ in 0..2 {
            visit.reset();
            let result: ControlFlow<std::convert::Infallible> =
                visit.visit(0..graph.num_nodes(), |event| {
                    if let Event::Previsit { .. } = event {
                        count += 1;
                    }
                    Continue(())
                });
            result.continue_value().unwrap();
        }
        assert_eq!(count, 4);
    }
}
