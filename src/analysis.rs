//! One-shot analysis of a graph: every matching query plus the Eulerian path.

use crate::error::GraphError;
use crate::euler::find_eulerian_path;
use crate::graph::{parse_adjacency_matrix, Graph};
use crate::matching::{
    find_all_matchings, find_maximal_matching, find_maximum_matching, Matching, SearchLimits,
};
use std::fmt;

// ============================================================================
// Configuration
// ============================================================================

/// Analysis configuration parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Bounds on the exhaustive matching searches.
    pub limits: SearchLimits,
    /// Also materialize every matching (see [`find_all_matchings`]).
    pub enumerate_all: bool,
}

// ============================================================================
// Report
// ============================================================================

/// Results of every query on one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphReport {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Greedy maximal matching.
    pub maximal_matching: Matching,
    /// First maximum matching in enumeration order.
    pub maximum_matching: Matching,
    /// The maximum matching, if it covers every vertex.
    pub perfect_matching: Option<Matching>,
    /// Eulerian path (start-to-end), if one exists.
    pub eulerian_path: Option<Vec<usize>>,
    /// Every matching, when [`AnalysisConfig::enumerate_all`] is set.
    pub all_matchings: Option<Vec<Matching>>,
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices: {}, Edges: {}", self.vertex_count, self.edge_count)?;
        writeln!(f, "Maximal Matching: {}", self.maximal_matching)?;
        writeln!(f, "Maximum Matching: {}", self.maximum_matching)?;
        match &self.perfect_matching {
            Some(m) => writeln!(f, "Perfect Matching: {m}")?,
            None => writeln!(f, "Perfect Matching: None")?,
        }
        match &self.eulerian_path {
            Some(path) => {
                let vertices: Vec<String> = path.iter().map(ToString::to_string).collect();
                writeln!(f, "Eulerian Path: [{}]", vertices.join(", "))?;
            }
            None => writeln!(f, "Eulerian Path: None")?,
        }
        if let Some(all) = &self.all_matchings {
            writeln!(f, "All Matchings ({}):", all.len())?;
            for m in all {
                writeln!(f, "  {m}")?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Runs every query on `graph`.
///
/// Limits are checked before any algorithm runs, so an error means no results at all.
///
/// # Errors
/// Returns [`GraphError::GraphTooLarge`] if the graph exceeds the configured edge limit, or
/// [`GraphError::TooManyMatchings`] if `enumerate_all` is set and the enumeration exceeds
/// its limit.
pub fn analyze(graph: &Graph, cfg: &AnalysisConfig) -> Result<GraphReport, GraphError> {
    cfg.limits.check(graph)?;

    let n = graph.vertex_count();
    let edge_count = graph.edge_count();
    log::info!("analyzing graph with {n} vertices and {edge_count} edges");

    let all_matchings = if cfg.enumerate_all {
        Some(find_all_matchings(graph, &cfg.limits)?)
    } else {
        None
    };

    let maximal_matching = find_maximal_matching(graph);
    let maximum_matching = find_maximum_matching(graph, &cfg.limits)?;
    // Same rule as `find_perfect_matching`, without repeating the maximum search.
    let perfect_matching = (n % 2 == 0 && maximum_matching.len() == n / 2)
        .then(|| maximum_matching.clone());
    let eulerian_path = find_eulerian_path(graph);

    log::info!(
        "maximal={} maximum={} perfect={} eulerian={}",
        maximal_matching.len(),
        maximum_matching.len(),
        perfect_matching.is_some(),
        eulerian_path.is_some()
    );

    Ok(GraphReport {
        vertex_count: n,
        edge_count,
        maximal_matching,
        maximum_matching,
        perfect_matching,
        eulerian_path,
        all_matchings,
    })
}

/// Parses an adjacency matrix and runs every query on it.
///
/// # Errors
/// Returns [`GraphError::InvalidInput`] if the text is malformed, or any error from [`analyze`].
pub fn analyze_text(text: &str, cfg: &AnalysisConfig) -> Result<GraphReport, GraphError> {
    let graph = parse_adjacency_matrix(text)?;
    analyze(&graph, cfg)
}

// ============================================================================
// Tests
// ============================================================================
