/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! JSON dataset model.
//!
//! A dataset is a single JSON document with a `graphs` array; each entry
//! carries a numeric `id`, the number of nodes `n`, an `edges` array of
//! `{"u", "v", "w"}` objects, an optional `source` node (defaulting to 0),
//! and the free-form `density` and `variant` tags used to label benchmark
//! rows. Unknown fields are ignored.

use anyhow::{ensure, Context, Result};
use condag::graphs::vec_graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn unknown() -> String {
    "unknown".to_string()
}

/// One weighted arc of a dataset graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub u: usize,
    pub v: usize,
    pub w: f64,
}

/// One graph of a dataset, together with its benchmark labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub id: u64,
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<ArcSpec>,
    #[serde(default)]
    pub source: usize,
    #[serde(default = "unknown")]
    pub density: String,
    #[serde(default = "unknown")]
    pub variant: String,
}

impl GraphSpec {
    /// Checks the structural constraints of the entry.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.n > 0, "the number of nodes must be positive");
        ensure!(
            self.source < self.n,
            "source {} out of bounds (the graph has {} nodes)",
            self.source,
            self.n
        );
        for arc in &self.edges {
            ensure!(
                arc.u < self.n && arc.v < self.n,
                "arc ({}, {}) out of bounds (the graph has {} nodes)",
                arc.u,
                arc.v,
                self.n
            );
        }
        Ok(())
    }

    /// Builds the in-memory graph described by the entry.
    pub fn to_graph(&self) -> Result<DiGraph> {
        let mut graph = DiGraph::new(self.n);
        for arc in &self.edges {
            graph.add_arc(arc.u, arc.v, arc.w)?;
        }
        Ok(graph)
    }
}

/// A whole dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub graphs: Vec<GraphSpec>,
}

/// Loads and validates a dataset from a JSON file.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let dataset: Dataset = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse {}", path.display()))?;

    for spec in &dataset.graphs {
        spec.validate()
            .with_context(|| format!("Invalid graph {} in {}", spec.id, path.display()))?;
    }

    Ok(dataset)
}
