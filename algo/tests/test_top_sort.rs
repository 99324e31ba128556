/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use condag::graphs::vec_graph::DiGraph;
use condag_algo::{is_acyclic, top_sort};
use dsi_progress_logger::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Checks that every arc goes forward in the order.
fn assert_topological(graph: &DiGraph, order: &[usize]) {
    let mut position = vec![usize::MAX; graph.num_nodes()];
    for (index, &node) in order.iter().enumerate() {
        position[node] = index;
    }
    for arc in graph.arcs() {
        assert!(
            position[arc.src] < position[arc.dst],
            "arc ({}, {}) goes backward",
            arc.src,
            arc.dst
        );
    }
}

#[test]
fn test_dag() -> Result<()> {
    let graph = DiGraph::from_arcs([
        (0, 1, 1.0),
        (1, 2, 2.0),
        (2, 3, 3.0),
        (3, 4, 1.0),
        (0, 2, 4.0),
    ]);

    let (sort, _) = top_sort(&graph, no_logging![]);

    assert!(sort.is_dag());
    assert_eq!(sort.order().len(), graph.num_nodes());
    assert_topological(&graph, sort.order());
    assert!(is_acyclic(&graph, no_logging![]));

    Ok(())
}

#[test]
fn test_cycle() -> Result<()> {
    let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);

    let (sort, _) = top_sort(&graph, no_logging![]);

    assert!(!sort.is_dag());
    assert!(sort.order().len() < graph.num_nodes());
    assert!(!is_acyclic(&graph, no_logging![]));

    Ok(())
}

#[test]
fn test_partial_order_on_cycle() -> Result<()> {
    // The acyclic prefix resolves, the trapped suffix does not
    let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 2, 1.0)]);

    let (sort, _) = top_sort(&graph, no_logging![]);

    assert!(!sort.is_dag());
    assert_eq!(sort.order(), &[0, 1]);

    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let graph = DiGraph::new(0);

    let (sort, metrics) = top_sort(&graph, no_logging![]);

    assert!(sort.is_dag());
    assert!(sort.order().is_empty());
    assert_eq!(metrics.queue_ops, 0);

    Ok(())
}

#[test]
fn test_isolated_nodes() -> Result<()> {
    let graph = DiGraph::new(3);

    let (sort, _) = top_sort(&graph, no_logging![]);

    assert!(sort.is_dag());
    assert_eq!(sort.order(), &[0, 1, 2]);

    Ok(())
}

#[test]
fn test_metrics() -> Result<()> {
    let graph = DiGraph::from_arcs([
        (0, 1, 1.0),
        (1, 2, 2.0),
        (2, 3, 3.0),
        (3, 4, 1.0),
        (0, 2, 4.0),
    ]);

    let (_, metrics) = top_sort(&graph, no_logging![]);

    // On a DAG every node transits the queue once and every arc causes
    // exactly one in-degree decrement
    assert_eq!(metrics.queue_ops, 2 * graph.num_nodes() as u64);
    assert_eq!(metrics.in_degree_updates, graph.num_arcs() as u64);

    Ok(())
}

#[test]
fn test_random_dag() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);

    for n in (10..=100).step_by(10) {
        // Forward arcs only, so the graph is a DAG by construction
        let mut graph = DiGraph::new(n);
        for _ in 0..4 * n {
            let src = rng.random_range(0..n - 1);
            let dst = rng.random_range(src + 1..n);
            graph.add_arc(src, dst, rng.random_range(1.0..10.0))?;
        }

        let (sort, _) = top_sort(&graph, no_logging![]);

        assert!(sort.is_dag());
        assert_topological(&graph, sort.order());
        assert!(is_acyclic(&graph, no_logging![]));

        // Closing a cycle breaks it
        graph.add_arc(0, n - 1, 1.0)?;
        graph.add_arc(n - 1, 0, 1.0)?;
        let (sort, _) = top_sort(&graph, no_logging![]);
        assert!(!sort.is_dag());
        assert!(!is_acyclic(&graph, no_logging![]));
    }

    Ok(())
}
