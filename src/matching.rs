//! Matchings: exhaustive enumeration, maximum, greedy maximal, and perfect.
//!
//! All searches walk the graph's edge sequence (see [`Graph::edges`]) in its fixed
//! row-major order and track matched vertices in a `u64` bitset. Extending a
//! matching only ever considers edges *after* the last chosen one, so every
//! matching is produced exactly once.
//!
//! The exhaustive search is exponential in the worst case. Callers bound it with
//! [`SearchLimits`]; limits are checked before any search starts.

use crate::error::GraphError;
use crate::graph::{bit, Edge, Graph, MAX_VERTICES};
use std::fmt;

// ============================================================================
// Configuration
// ============================================================================

/// Default edge bound for the exhaustive searches.
pub const DEFAULT_MAX_EDGES: usize = 64;

/// Default bound on materialized matchings.
pub const DEFAULT_MAX_MATCHINGS: usize = 1_000_000;

/// Bounds on the exhaustive matching searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Graphs with more edges than this are rejected with [`GraphError::GraphTooLarge`].
    pub max_edges: usize,
    /// [`find_all_matchings`] fails with [`GraphError::TooManyMatchings`] rather than
    /// materialize more matchings than this.
    pub max_matchings: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_edges: DEFAULT_MAX_EDGES,
            max_matchings: DEFAULT_MAX_MATCHINGS,
        }
    }
}

impl SearchLimits {
    /// Fails fast if `graph` has more edges than `max_edges`.
    ///
    /// # Errors
    /// Returns [`GraphError::GraphTooLarge`] when the edge count exceeds the limit.
    pub fn check(&self, graph: &Graph) -> Result<(), GraphError> {
        let edges = graph.edge_count();
        if edges > self.max_edges {
            return Err(GraphError::GraphTooLarge {
                edges,
                limit: self.max_edges,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Matching
// ============================================================================

/// A set of vertex-disjoint edges, kept in the order they were chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Matching {
    edges: Vec<Edge>,
}

impl Matching {
    /// Creates an empty matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a list of edges. Disjointness is not checked; see [`Matching::is_valid_in`].
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Returns the edges in the order they were chosen.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consumes the matching, returning its edges.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the matching has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Bitset of matched vertices.
    ///
    /// # Panics
    /// Panics if an endpoint is `>= 64`.
    pub fn vertices(&self) -> u64 {
        self.edges.iter().fold(0, |acc, &(u, v)| {
            assert!(
                u < MAX_VERTICES && v < MAX_VERTICES,
                "edge ({u}, {v}) is outside the {MAX_VERTICES}-vertex range"
            );
            acc | bit(u) | bit(v)
        })
    }

    /// Returns `true` if vertex `v` is an endpoint of some edge.
    pub fn covers(&self, v: usize) -> bool {
        self.edges.iter().any(|&(a, b)| a == v || b == v)
    }

    /// Returns `true` if every edge exists in `graph` and no vertex is used twice.
    pub fn is_valid_in(&self, graph: &Graph) -> bool {
        let n = graph.vertex_count();
        let mut seen = 0u64;
        for &(u, v) in &self.edges {
            if u >= n || v >= n || !graph.has_edge(u, v) {
                return false;
            }
            let mask = bit(u) | bit(v);
            if seen & mask != 0 {
                return false;
            }
            seen |= mask;
        }
        true
    }

    /// Returns `true` if no edge of `graph` can be added without breaking disjointness.
    ///
    /// A matching with an endpoint outside `graph` is never maximal in it.
    pub fn is_maximal_in(&self, graph: &Graph) -> bool {
        let n = graph.vertex_count();
        if self.edges.iter().any(|&(u, v)| u >= n || v >= n) {
            return false;
        }
        let matched = self.vertices();
        graph
            .edges()
            .iter()
            .all(|&(u, v)| matched & (bit(u) | bit(v)) != 0)
    }
}

impl From<Vec<Edge>> for Matching {
    fn from(edges: Vec<Edge>) -> Self {
        Self::from_edges(edges)
    }
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (u, v)) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({u}, {v})")?;
        }
        write!(f, "]")
    }
}

// ============================================================================
// Enumeration
// ============================================================================

/// Depth-first enumeration state over a fixed edge sequence.
struct Enumerator<'a> {
    edges: &'a [Edge],
    stack: Vec<Edge>,
}

impl Enumerator<'_> {
    /// Visits the current matching, then every extension by a later disjoint edge.
    ///
    /// Returns `false` as soon as `visit` asks to stop.
    fn walk<F>(&mut self, from: usize, matched: u64, visit: &mut F) -> bool
    where
        F: FnMut(&[Edge]) -> bool,
    {
        if !visit(&self.stack) {
            return false;
        }
        for i in from..self.edges.len() {
            let (u, v) = self.edges[i];
            let mask = bit(u) | bit(v);
            if matched & mask != 0 {
                continue;
            }
            self.stack.push((u, v));
            let keep_going = self.walk(i + 1, matched | mask, visit);
            self.stack.pop();
            if !keep_going {
                return false;
            }
        }
        true
    }
}

/// Streams every matching of `graph` to `visit`, in enumeration order.
///
/// The empty matching comes first; after each matching come all of its extensions
/// by edges later in the edge sequence. `visit` returns `false` to stop early.
/// Returns `true` if the enumeration ran to completion.
pub fn for_each_matching<F: FnMut(&[Edge]) -> bool>(graph: &Graph, mut visit: F) -> bool {
    let edges = graph.edges();
    let mut enumerator = Enumerator {
        edges: &edges,
        stack: Vec::with_capacity(graph.vertex_count() / 2),
    };
    enumerator.walk(0, 0, &mut visit)
}

/// Returns every matching of `graph`, including the empty one and all non-maximal ones.
///
/// # Errors
/// Returns [`GraphError::GraphTooLarge`] if the graph exceeds `limits.max_edges`, or
/// [`GraphError::TooManyMatchings`] if there are more than `limits.max_matchings` matchings.
pub fn find_all_matchings(
    graph: &Graph,
    limits: &SearchLimits,
) -> Result<Vec<Matching>, GraphError> {
    limits.check(graph)?;

    let mut all = Vec::new();
    let completed = for_each_matching(graph, |m| {
        if all.len() == limits.max_matchings {
            return false;
        }
        all.push(Matching::from_edges(m.to_vec()));
        true
    });
    if !completed {
        log::debug!("matching enumeration stopped at limit {}", limits.max_matchings);
        return Err(GraphError::TooManyMatchings {
            limit: limits.max_matchings,
        });
    }

    log::debug!(
        "enumerated {} matchings over {} edges",
        all.len(),
        graph.edge_count()
    );
    Ok(all)
}

// ============================================================================
// Maximum matching (branch-and-bound)
// ============================================================================

struct MaximumSearch<'a> {
    edges: &'a [Edge],
    /// `reach[i]` is the set of endpoints of `edges[i..]`; `reach[edges.len()] == 0`.
    reach: Vec<u64>,
    stack: Vec<Edge>,
    best: Vec<Edge>,
    /// No matching can be larger than this.
    target: usize,
    nodes: u64,
}

impl<'a> MaximumSearch<'a> {
    fn new(edges: &'a [Edge], n: usize) -> Self {
        let mut reach = vec![0u64; edges.len() + 1];
        for i in (0..edges.len()).rev() {
            let (u, v) = edges[i];
            reach[i] = reach[i + 1] | bit(u) | bit(v);
        }
        let target = (n / 2).min(reach[0].count_ones() as usize / 2);
        Self {
            edges,
            reach,
            stack: Vec::with_capacity(target),
            best: Vec::new(),
            target,
            nodes: 0,
        }
    }

    /// Returns `true` once the incumbent reaches `target` and the search can stop.
    fn search(&mut self, from: usize, matched: u64) -> bool {
        self.nodes += 1;
        if self.stack.len() > self.best.len() {
            self.best.clone_from(&self.stack);
            if self.best.len() >= self.target {
                return true;
            }
        }

        for i in from..self.edges.len() {
            // At most half the free vertices still touched by edges[i..] can be matched.
            // Ties keep the incumbent, so it stays the first maximum in enumeration order.
            let remaining = self.edges.len() - i;
            let reachable = (self.reach[i] & !matched).count_ones() as usize;
            if self.stack.len() + remaining.min(reachable / 2) <= self.best.len() {
                return false;
            }

            let (u, v) = self.edges[i];
            let mask = bit(u) | bit(v);
            if matched & mask != 0 {
                continue;
            }
            self.stack.push((u, v));
            if self.search(i + 1, matched | mask) {
                return true;
            }
            self.stack.pop();
        }
        false
    }
}

/// Returns a matching of greatest size.
///
/// Among maximum matchings, returns the first one produced by [`for_each_matching`].
/// The search prunes branches whose remaining edges cannot match enough free vertices
/// to beat the best matching found so far, and stops as soon as every vertex with an
/// edge (up to one, for an odd count) is matched.
///
/// # Errors
/// Returns [`GraphError::GraphTooLarge`] if the graph exceeds `limits.max_edges`.
pub fn find_maximum_matching(graph: &Graph, limits: &SearchLimits) -> Result<Matching, GraphError> {
    limits.check(graph)?;

    let edges = graph.edges();
    let mut search = MaximumSearch::new(&edges, graph.vertex_count());
    search.search(0, 0);

    log::debug!(
        "maximum matching of size {} after {} search nodes",
        search.best.len(),
        search.nodes
    );
    Ok(Matching::from_edges(search.best))
}

// ============================================================================
// Maximal and perfect matchings
// ============================================================================

/// Greedy maximal matching: one pass over the edge sequence, taking each edge whose
/// endpoints are both still free.
///
/// The result is maximal but not necessarily maximum.
pub fn find_maximal_matching(graph: &Graph) -> Matching {
    let mut matched = 0u64;
    let mut edges = Vec::with_capacity(graph.vertex_count() / 2);
    for (u, v) in graph.edges() {
        let mask = bit(u) | bit(v);
        if matched & mask == 0 {
            edges.push((u, v));
            matched |= mask;
        }
    }
    Matching::from_edges(edges)
}

/// Returns the maximum matching if it covers every vertex, otherwise `None`.
///
/// Graphs with an odd number of vertices never have a perfect matching. The graph
/// with no vertices has the empty perfect matching.
///
/// # Errors
/// Returns [`GraphError::GraphTooLarge`] if the graph exceeds `limits.max_edges`.
pub fn find_perfect_matching(
    graph: &Graph,
    limits: &SearchLimits,
) -> Result<Option<Matching>, GraphError> {
    limits.check(graph)?;
    let n = graph.vertex_count();
    if n % 2 == 1 {
        return Ok(None);
    }
    let maximum = find_maximum_matching(graph, limits)?;
    Ok((maximum.len() == n / 2).then_some(maximum))
}

// ============================================================================
// Tests
// ============================================================================
