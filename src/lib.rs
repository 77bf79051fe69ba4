//! # graphmatch
//!
//! Structural queries on small undirected, unweighted graphs given as adjacency matrices.
//!
//! This crate provides:
//! - A compact bitset graph model with a validating matrix parser.
//! - Matchings: exhaustive enumeration, a branch-and-bound maximum matching,
//!   a greedy maximal matching, and the perfect-matching test.
//! - An edge-centric connectivity check.
//! - Eulerian paths and circuits via stack-based Hierholzer construction.
//!
//! ## Quick Start
//!
//! ```
//! use graphmatch::analysis::{analyze_text, AnalysisConfig};
//!
//! let report = analyze_text(
//!     "0,1,0,1\n1,0,1,0\n0,1,0,1\n1,0,1,0",
//!     &AnalysisConfig::default(),
//! )
//! .expect("valid matrix");
//!
//! assert_eq!(report.maximum_matching.edges(), &[(0, 1), (2, 3)]);
//! assert!(report.perfect_matching.is_some());
//! assert_eq!(report.eulerian_path, Some(vec![0, 1, 2, 3, 0]));
//! ```
//!
//! ## Working with Graphs Directly
//!
//! ```
//! use graphmatch::prelude::*;
//!
//! // Triangle
//! let graph = parse_adjacency_matrix("011\n101\n110").unwrap();
//! let limits = SearchLimits::default();
//!
//! assert_eq!(find_maximal_matching(&graph).len(), 1);
//! assert_eq!(find_perfect_matching(&graph, &limits).unwrap(), None);
//! assert_eq!(find_all_matchings(&graph, &limits).unwrap().len(), 4);
//! assert_eq!(find_eulerian_path(&graph).map(|p| p.len()), Some(4));
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Bitset adjacency model, parsing and writing.
//! - [`connectivity`]: Reachability over vertices that carry edges.
//! - [`matching`]: Matching enumeration and the maximum/maximal/perfect queries.
//! - [`euler`]: Eulerian feasibility and path construction.
//! - [`analysis`]: All queries at once, with configurable search limits.
//! - [`error`]: Parse and query errors.
//!
//! ## Performance Notes
//!
//! - The graph representation uses `u64` bitsets, limiting graphs to 64 vertices.
//! - Matching enumeration is exponential; [`matching::SearchLimits`] bounds it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // LaTeX-style notation in docs
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod analysis;
pub mod connectivity;
pub mod error;
pub mod euler;
pub mod graph;
pub mod matching;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::analysis::{analyze, analyze_text, AnalysisConfig, GraphReport};
    pub use crate::connectivity::is_connected;
    pub use crate::error::{GraphError, ParseError};
    pub use crate::euler::{eulerian_feasibility, find_eulerian_path, Feasibility};
    pub use crate::graph::{parse_adjacency_matrix, Edge, Graph};
    pub use crate::matching::{
        find_all_matchings, find_maximal_matching, find_maximum_matching, find_perfect_matching,
        Matching, SearchLimits,
    };
}
