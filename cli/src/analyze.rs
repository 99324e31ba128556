/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The `analyze` command: runs the full pipeline on JSON datasets.
//!
//! For every graph of every input dataset the pipeline computes the strongly
//! connected components, collapses them into the condensation, sorts the
//! condensation topologically, computes shortest paths from the component of
//! the declared source, and finds the critical path of the condensation.
//! Results go to a JSON report and to semicolon-separated CSV benchmark rows,
//! one row per path algorithm, whose operation and time columns aggregate the
//! whole pipeline leading to that result.

use crate::input::{self, ArcSpec, GraphSpec};
use crate::GlobalArgs;
use anyhow::{Context, Result};
use clap::Parser;
use condag::graphs::vec_graph::DiGraph;
use condag_algo::condensation::condense;
use condag_algo::metrics::Metrics;
use condag_algo::paths::{critical_path, shortest_paths, PathResult};
use condag_algo::sccs::tarjan;
use condag_algo::top_sort;
use dsi_progress_logger::{progress_logger, ProgressLog};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct CliArgs {
    /// The JSON datasets to analyze.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(short, long)]
    /// Write per-algorithm benchmark rows to this CSV file.
    pub csv: Option<PathBuf>,

    #[arg(short, long)]
    /// Write the full JSON report to this file.
    pub report: Option<PathBuf>,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let mut csv_rows = Vec::new();
    let mut results = Vec::new();

    for path in &args.inputs {
        log::info!("Loading dataset from {}", path.display());
        let dataset = input::load(path)?;
        for spec in &dataset.graphs {
            results.push(process(spec, &mut csv_rows, &mut pl)?);
        }
    }

    if let Some(path) = &args.csv {
        write_csv(path, &csv_rows)?;
    }

    if let Some(path) = &args.report {
        crate::create_parent_dir(path)?;
        let file = File::create(path)
            .with_context(|| format!("Could not create report at {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &json!({ "results": results }))?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}

/// Milliseconds spent inside an algorithm invocation.
fn ms(metrics: &Metrics) -> f64 {
    metrics.elapsed.as_secs_f64() * 1000.0
}

fn process(spec: &GraphSpec, csv_rows: &mut Vec<String>, pl: &mut impl ProgressLog) -> Result<Value> {
    let graph = spec.to_graph()?;
    let vertices = graph.num_nodes();
    let edges = graph.num_arcs();

    let (sccs, tarjan_metrics) = tarjan(&graph, pl);
    log::info!(
        "Graph {}: {} strongly connected components",
        spec.id,
        sccs.num_components()
    );

    let condensation = condense(&graph, &sccs)?;
    let (sort, topo_metrics) = top_sort(&condensation, pl);
    debug_assert!(sort.is_dag());

    let dag_source = sccs.components()[spec.source];
    let (sp, sp_metrics) = shortest_paths(&condensation, dag_source, pl)?;
    let (cp, lp_metrics) = critical_path(&condensation, pl);

    let mut graph_json = json!({
        "graph_id": spec.id,
        "input_stats": {
            "vertices": vertices,
            "edges": edges,
            "density": spec.density,
            "variant": spec.variant,
            "source": spec.source,
        },
        "tarjan_scc": {
            "num_sccs": sccs.num_components(),
            "sccs": sccs.node_lists(),
            "operations_count": tarjan_metrics.total_ops(),
            "execution_time_ms": ms(&tarjan_metrics),
        },
        "condensation_graph": {
            "vertices": condensation.num_nodes(),
            "edges": condensation.num_arcs(),
        },
        "topological_sort": {
            "topological_order": sort.order(),
            "operations_count": topo_metrics.total_ops(),
            "execution_time_ms": ms(&topo_metrics),
        },
    });

    if let Some(sp) = &sp {
        let sp_path = representative_path(sp);
        let sp_arcs = path_arcs(&condensation, &sp_path);
        let sp_length: f64 = sp_arcs.iter().map(|arc| arc.w).sum();
        let total_ops =
            tarjan_metrics.total_ops() + topo_metrics.total_ops() + sp_metrics.total_ops();
        let total_time = ms(&tarjan_metrics) + ms(&topo_metrics) + ms(&sp_metrics);

        graph_json["shortest_path"] = json!({
            "source": spec.source,
            "path": sp_path,
            "edges": sp_arcs,
            "path_length": sp_length,
            "operations_count": sp_metrics.total_ops(),
            "execution_time_ms": ms(&sp_metrics),
            "total_operations_count": total_ops,
            "total_execution_time_ms": total_time,
        });

        csv_rows.push(format!(
            "{};{};{};{};{};DAG-ShortestPath;{};{:.3};{:.2}",
            spec.id, vertices, edges, spec.density, spec.variant, total_ops, total_time, sp_length
        ));
    }

    if let Some(cp) = &cp {
        let cp_path = cp.path();
        let cp_arcs = path_arcs(&condensation, &cp_path);
        let total_ops =
            tarjan_metrics.total_ops() + topo_metrics.total_ops() + lp_metrics.total_ops();
        let total_time = ms(&tarjan_metrics) + ms(&topo_metrics) + ms(&lp_metrics);

        graph_json["longest_path"] = json!({
            "critical_path_length": cp.length(),
            "critical_path": cp_path,
            "edges": cp_arcs,
            "operations_count": lp_metrics.total_ops(),
            "execution_time_ms": ms(&lp_metrics),
            "total_operations_count": total_ops,
            "total_execution_time_ms": total_time,
        });

        csv_rows.push(format!(
            "{};{};{};{};{};DAG-LongestPath;{};{:.3};{:.2}",
            spec.id,
            vertices,
            edges,
            spec.density,
            spec.variant,
            total_ops,
            total_time,
            cp.length()
        ));
    }

    Ok(graph_json)
}

/// Picks the deepest reconstructible path of a single-source run, falling
/// back to the lone source when nothing else was reached.
fn representative_path(result: &PathResult) -> Vec<usize> {
    let mut best = Vec::new();
    for (node, &distance) in result.distances().iter().enumerate() {
        if distance.is_finite() && distance != 0.0 {
            // Safe as the distance is finite, so the node was reached
            let path = result.path(node).unwrap();
            if path.len() > best.len() {
                best = path;
            }
        }
    }
    if best.is_empty() {
        best.push(result.source());
    }
    best
}

/// Resolves a node sequence into the arcs connecting consecutive nodes.
fn path_arcs(dag: &DiGraph, path: &[usize]) -> Vec<ArcSpec> {
    let mut arcs = Vec::new();
    for window in path.windows(2) {
        if let Some(arc) = dag
            .successors(window[0])
            .iter()
            .find(|arc| arc.dst == window[1])
        {
            arcs.push(ArcSpec {
                u: arc.src,
                v: arc.dst,
                w: arc.weight,
            });
        }
    }
    arcs
}

fn write_csv(path: &Path, rows: &[String]) -> Result<()> {
    crate::create_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("Could not create CSV at {}", path.display()))?;
    let mut file = BufWriter::new(file);
    writeln!(
        file,
        "graph_id;vertices;edges;density;variant;algorithm;total_operations_count;total_execution_time_ms;path_length"
    )?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    log::info!("Benchmark rows written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsi_progress_logger::no_logging;
    use std::io::Write;

    #[test]
    fn test_representative_path() -> Result<()> {
        let graph = DiGraph::from_arcs([(0, 1, 1.0), (1, 2, 1.0), (0, 3, 1.0)]);

        let (result, _) = shortest_paths(&graph, 0, no_logging![])?;
        assert_eq!(representative_path(&result.unwrap()), vec![0, 1, 2]);

        // A sink reaches nothing but itself
        let (result, _) = shortest_paths(&graph, 2, no_logging![])?;
        assert_eq!(representative_path(&result.unwrap()), vec![2]);

        Ok(())
    }

    #[test]
    fn test_path_arcs() {
        let graph = DiGraph::from_arcs([(0, 1, 2.5), (1, 2, 1.5)]);

        let arcs = path_arcs(&graph, &[0, 1, 2]);
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].w, 2.5);
        assert_eq!(arcs[1].w, 1.5);
        assert_eq!(arcs.iter().map(|arc| arc.w).sum::<f64>(), 4.0);
    }

    #[test]
    fn test_end_to_end() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("input.json");
        let csv_path = dir.path().join("output.csv");
        let report_path = dir.path().join("report.json");

        // Cycle {0, 1, 2} followed by the chain 3, 4
        let mut input = File::create(&input_path)?;
        write!(
            input,
            r#"{{"graphs": [{{"id": 1, "n": 5, "source": 0,
                "density": "sparse", "variant": "one_cycle",
                "edges": [
                    {{"u": 0, "v": 1, "w": 1.0}},
                    {{"u": 1, "v": 2, "w": 1.0}},
                    {{"u": 2, "v": 0, "w": 1.0}},
                    {{"u": 2, "v": 3, "w": 2.0}},
                    {{"u": 3, "v": 4, "w": 3.0}}
                ]}}]}}"#
        )?;

        main(
            GlobalArgs { log_interval: None },
            CliArgs {
                inputs: vec![input_path],
                csv: Some(csv_path.clone()),
                report: Some(report_path.clone()),
            },
        )?;

        let csv = std::fs::read_to_string(&csv_path)?;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "graph_id;vertices;edges;density;variant;algorithm;total_operations_count;total_execution_time_ms;path_length"
        );
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains(";DAG-ShortestPath;"));
        assert!(rows[1].contains(";DAG-LongestPath;"));
        // The critical path of the condensation is 2.0 + 3.0
        assert!(rows[1].ends_with(";5.00"));

        let report: Value = serde_json::from_reader(File::open(&report_path)?)?;
        let result = &report["results"][0];
        assert_eq!(result["graph_id"], 1);
        assert_eq!(result["tarjan_scc"]["num_sccs"], 3);
        assert_eq!(result["condensation_graph"]["vertices"], 3);
        assert_eq!(result["condensation_graph"]["edges"], 2);
        assert_eq!(result["longest_path"]["critical_path_length"], 5.0);
        assert_eq!(result["shortest_path"]["path_length"], 5.0);

        Ok(())
    }
}
