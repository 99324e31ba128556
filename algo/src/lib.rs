/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

mod acyclicity;
pub use acyclicity::*;

pub mod condensation;
pub mod metrics;
pub mod paths;
pub mod sccs;

mod top_sort;
pub use top_sort::*;

pub mod prelude {
    pub use crate::acyclicity::is_acyclic;
    pub use crate::condensation::{condense, Condensation};
    pub use crate::metrics::Metrics;
    pub use crate::paths::{
        critical_path, longest_paths, shortest_paths, CriticalPath, PathResult,
    };
    pub use crate::sccs::{tarjan, Sccs};
    pub use crate::top_sort::{top_sort, TopSort};
}
