/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The `generate` command: produces random JSON datasets.
//!
//! Each dataset contains a fixed schedule of graphs of growing size whose
//! cycle structure is controlled by a variant: pure DAGs, a single global
//! cycle, two bridged cycles, or several strongly connected components wired
//! into a DAG. Sparse graphs get about 1.8 arcs per node, dense ones about 4.
//! Weights are drawn uniformly from [1, 10] and rounded to one decimal digit.

use crate::input::{ArcSpec, Dataset, GraphSpec};
use crate::GlobalArgs;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Density {
    Sparse,
    Dense,
}

impl Density {
    fn as_str(self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Dense => "dense",
        }
    }

    /// Target number of arcs for a graph with `n` nodes.
    fn target_arcs(self, n: usize) -> usize {
        match self {
            Density::Sparse => (n as f64 * 1.8) as usize,
            Density::Dense => (n * 4).min(n * (n - 1) / 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    PureDag,
    OneCycle,
    TwoCycles,
    Mixed,
    ManySccs,
}

impl Variant {
    fn as_str(self) -> &'static str {
        match self {
            Variant::PureDag => "pure_dag",
            Variant::OneCycle => "one_cycle",
            Variant::TwoCycles => "two_cycles",
            Variant::Mixed => "mixed",
            Variant::ManySccs => "many_sccs",
        }
    }

    /// A source most analyses are interesting from: inside the component
    /// structure for many-SCC graphs, node 0 otherwise.
    fn source(self, n: usize) -> usize {
        match self {
            Variant::ManySccs => n / 3,
            _ => 0,
        }
    }
}

/// The size and variant schedule of a dataset.
const SCHEDULE: [(usize, Variant); 9] = [
    (6, Variant::PureDag),
    (8, Variant::OneCycle),
    (10, Variant::TwoCycles),
    (12, Variant::Mixed),
    (16, Variant::Mixed),
    (20, Variant::Mixed),
    (25, Variant::ManySccs),
    (35, Variant::PureDag),
    (50, Variant::ManySccs),
];

#[derive(Parser, Debug)]
pub struct CliArgs {
    /// The path of the JSON dataset to write.
    pub dest: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Density::Sparse)]
    /// The density of the generated graphs.
    pub density: Density,

    #[arg(short, long)]
    /// The seed of the pseudorandom number generator; random if not provided.
    pub seed: Option<u64>,
}

pub fn main(_global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let dataset = generate_dataset(args.density, &mut rng);

    crate::create_parent_dir(&args.dest)?;
    let file = File::create(&args.dest)
        .with_context(|| format!("Could not create dataset at {}", args.dest.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &dataset)?;
    log::info!(
        "Wrote {} {} graphs to {}",
        dataset.graphs.len(),
        args.density.as_str(),
        args.dest.display()
    );

    Ok(())
}

fn generate_dataset(density: Density, rng: &mut SmallRng) -> Dataset {
    let graphs = SCHEDULE
        .iter()
        .enumerate()
        .map(|(index, &(n, variant))| generate_graph(index as u64 + 1, n, variant, density, rng))
        .collect();
    Dataset { graphs }
}

fn generate_graph(
    id: u64,
    n: usize,
    variant: Variant,
    density: Density,
    rng: &mut SmallRng,
) -> GraphSpec {
    let target = density.target_arcs(n);
    let mut arcs = ArcBag::new(rng);

    match variant {
        Variant::PureDag => pure_dag(n, target, &mut arcs),
        Variant::OneCycle => one_cycle(n, target, &mut arcs),
        Variant::TwoCycles => two_cycles(n, target, &mut arcs),
        Variant::Mixed => several_sccs(n, target, 3, 5, &mut arcs),
        Variant::ManySccs => several_sccs(n, target, 5, 10, &mut arcs),
    }

    GraphSpec {
        id,
        n,
        edges: arcs.arcs,
        source: variant.source(n),
        density: density.as_str().to_string(),
        variant: variant.as_str().to_string(),
    }
}

/// Deduplicating arc collector drawing weights from [1, 10], rounded to one
/// decimal digit.
struct ArcBag<'a> {
    arcs: Vec<ArcSpec>,
    seen: HashSet<(usize, usize)>,
    rng: &'a mut SmallRng,
}

impl<'a> ArcBag<'a> {
    fn new(rng: &'a mut SmallRng) -> Self {
        ArcBag {
            arcs: Vec::new(),
            seen: HashSet::new(),
            rng,
        }
    }

    fn len(&self) -> usize {
        self.arcs.len()
    }

    fn add(&mut self, u: usize, v: usize) {
        if self.seen.insert((u, v)) {
            let w = ((1.0 + self.rng.random::<f64>() * 9.0) * 10.0).round() / 10.0;
            self.arcs.push(ArcSpec { u, v, w });
        }
    }
}

const MAX_ATTEMPTS: usize = 10_000;

/// Assigns levels to the nodes and adds only arcs going to a higher level.
fn pure_dag(n: usize, target: usize, arcs: &mut ArcBag) {
    let num_levels = 3.max((n as f64).sqrt() as usize);
    let level: Vec<usize> = (0..n).map(|node| node * num_levels / n).collect();

    // A forward backbone keeps the graph connected level to level
    for u in 0..n - 1 {
        if let Some(v) = (u + 1..n).find(|&v| level[v] > level[u]) {
            arcs.add(u, v);
        }
    }

    let mut attempts = 0;
    while arcs.len() < target && attempts < MAX_ATTEMPTS {
        let u = arcs.rng.random_range(0..n);
        let v = arcs.rng.random_range(0..n);
        if u < v && level[u] < level[v] {
            arcs.add(u, v);
        }
        attempts += 1;
    }
}

/// One global cycle through every node, plus random extra arcs.
fn one_cycle(n: usize, target: usize, arcs: &mut ArcBag) {
    for u in 0..n - 1 {
        arcs.add(u, u + 1);
    }
    arcs.add(n - 1, 0);

    let mut attempts = 0;
    while arcs.len() < target && attempts < MAX_ATTEMPTS {
        let u = arcs.rng.random_range(0..n);
        let v = arcs.rng.random_range(0..n);
        if u != v {
            arcs.add(u, v);
        }
        attempts += 1;
    }
}

/// Two cycles over the two halves of the nodes, bridged by one arc.
fn two_cycles(n: usize, target: usize, arcs: &mut ArcBag) {
    let split = n / 2;

    for u in 0..split - 1 {
        arcs.add(u, u + 1);
    }
    arcs.add(split - 1, 0);

    for u in split..n - 1 {
        arcs.add(u, u + 1);
    }
    arcs.add(n - 1, split);

    let u = arcs.rng.random_range(0..split);
    let v = split + arcs.rng.random_range(0..n - split);
    arcs.add(u, v);

    // Extra arcs stay within their half so the two components survive
    let mut attempts = 0;
    while arcs.len() < target && attempts < MAX_ATTEMPTS {
        let u = arcs.rng.random_range(0..n);
        let v = arcs.rng.random_range(0..n);
        let same_half = (u < split) == (v < split);
        if u != v && same_half {
            arcs.add(u, v);
        }
        attempts += 1;
    }
}

/// Several cyclic components chained into a DAG, with random skip arcs
/// between components and random arcs within them.
fn several_sccs(n: usize, target: usize, min_sccs: usize, max_sccs: usize, arcs: &mut ArcBag) {
    let num_sccs = (min_sccs + arcs.rng.random_range(0..=max_sccs - min_sccs)).min(n / 2);

    let mut components: Vec<Vec<usize>> = Vec::with_capacity(num_sccs);
    let per_component = n / num_sccs;
    let remainder = n % num_sccs;
    let mut current = 0;
    for index in 0..num_sccs {
        let size = per_component + usize::from(index < remainder);
        components.push((current..current + size).collect());
        current += size;
    }

    // A cycle through every non-singleton component
    for component in &components {
        if component.len() == 1 {
            continue;
        }
        for window in component.windows(2) {
            arcs.add(window[0], window[1]);
        }
        arcs.add(component[component.len() - 1], component[0]);
    }

    // Chain the components so the condensation is connected
    for pair in components.windows(2) {
        let u = pair[0][arcs.rng.random_range(0..pair[0].len())];
        let v = pair[1][arcs.rng.random_range(0..pair[1].len())];
        arcs.add(u, v);
    }

    // Forward skip arcs between distant components
    for from in 0..num_sccs.saturating_sub(1) {
        for to in from + 2..num_sccs {
            if arcs.len() as f64 >= target as f64 * 0.8 {
                break;
            }
            if arcs.rng.random::<f64>() < 0.5 {
                let u = components[from][arcs.rng.random_range(0..components[from].len())];
                let v = components[to][arcs.rng.random_range(0..components[to].len())];
                arcs.add(u, v);
            }
        }
    }

    let mut attempts = 0;
    while arcs.len() < target && attempts < MAX_ATTEMPTS {
        let component = &components[arcs.rng.random_range(0..num_sccs)];
        if component.len() > 1 {
            let u = component[arcs.rng.random_range(0..component.len())];
            let v = component[arcs.rng.random_range(0..component.len())];
            if u != v {
                arcs.add(u, v);
            }
        }
        attempts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condag_algo::sccs::tarjan;
    use condag_algo::{is_acyclic, top_sort};
    use dsi_progress_logger::no_logging;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    #[test]
    fn test_datasets_validate() {
        for density in [Density::Sparse, Density::Dense] {
            let dataset = generate_dataset(density, &mut rng());
            assert_eq!(dataset.graphs.len(), SCHEDULE.len());
            for spec in &dataset.graphs {
                spec.validate().unwrap();
                assert_eq!(spec.density, density.as_str());
            }
        }
    }

    #[test]
    fn test_weights_in_range() {
        let dataset = generate_dataset(Density::Dense, &mut rng());
        for spec in &dataset.graphs {
            for arc in &spec.edges {
                assert!((1.0..=10.0).contains(&arc.w));
                // Rounded to one decimal digit
                assert_eq!((arc.w * 10.0).round() / 10.0, arc.w);
            }
        }
    }

    #[test]
    fn test_no_duplicate_arcs() {
        let dataset = generate_dataset(Density::Dense, &mut rng());
        for spec in &dataset.graphs {
            let mut seen = HashSet::new();
            for arc in &spec.edges {
                assert!(seen.insert((arc.u, arc.v)));
            }
        }
    }

    #[test]
    fn test_pure_dag_is_acyclic() {
        let mut rng = rng();
        for n in [6, 20, 35] {
            let spec = generate_graph(1, n, Variant::PureDag, Density::Dense, &mut rng);
            let graph = spec.to_graph().unwrap();
            assert!(is_acyclic(&graph, no_logging![]));
            let (sort, _) = top_sort(&graph, no_logging![]);
            assert!(sort.is_dag());
        }
    }

    #[test]
    fn test_one_cycle_is_one_component() {
        let spec = generate_graph(1, 8, Variant::OneCycle, Density::Sparse, &mut rng());
        let graph = spec.to_graph().unwrap();
        let (sccs, _) = tarjan(&graph, no_logging![]);
        assert_eq!(sccs.num_components(), 1);
    }

    #[test]
    fn test_two_cycles_are_two_components() {
        let spec = generate_graph(1, 10, Variant::TwoCycles, Density::Sparse, &mut rng());
        let graph = spec.to_graph().unwrap();
        let (sccs, _) = tarjan(&graph, no_logging![]);
        assert_eq!(sccs.num_components(), 2);
    }

    #[test]
    fn test_many_sccs_component_count() {
        let spec = generate_graph(1, 50, Variant::ManySccs, Density::Sparse, &mut rng());
        let graph = spec.to_graph().unwrap();
        let (sccs, _) = tarjan(&graph, no_logging![]);
        assert!((5..=10).contains(&sccs.num_components()));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = generate_dataset(Density::Sparse, &mut rng());
        let b = generate_dataset(Density::Sparse, &mut rng());
        assert_eq!(a, b);
    }
}
