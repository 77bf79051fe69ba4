//! Edge-centric connectivity: are all vertices that carry edges mutually reachable?
//!
//! Isolated vertices (degree zero) are ignored, so a graph with a single edged
//! component plus any number of isolated vertices counts as connected. This is
//! the precondition the Eulerian constructor needs.

use crate::graph::{bit, Graph};

/// Returns the lowest-index vertex with nonzero degree, if any.
pub fn first_non_isolated(graph: &Graph) -> Option<usize> {
    (0..graph.vertex_count()).find(|&v| graph.degree(v) > 0)
}

/// Returns the bitset of vertices reachable from `start` by depth-first traversal.
///
/// Neighbors are visited in ascending index order; the traversal uses an explicit
/// stack rather than recursion.
pub fn reachable_from(graph: &Graph, start: usize) -> u64 {
    debug_assert!(start < graph.vertex_count());
    let mut visited = bit(start);
    let mut stack = Vec::with_capacity(graph.vertex_count());
    stack.push(start);

    while let Some(v) = stack.pop() {
        let mut t = graph.neighbors(v) & !visited;
        while t != 0 {
            let w = t.trailing_zeros() as usize;
            t &= t - 1;
            visited |= bit(w);
            stack.push(w);
        }
    }
    visited
}

/// Returns `true` iff every vertex with nonzero degree is reachable from the first such vertex.
///
/// A graph without edges is vacuously connected.
pub fn is_connected(graph: &Graph) -> bool {
    let Some(start) = first_non_isolated(graph) else {
        return true;
    };
    let visited = reachable_from(graph, start);
    let connected = (0..graph.vertex_count())
        .all(|v| graph.degree(v) == 0 || visited & bit(v) != 0);
    log::trace!("connectivity from vertex {start}: visited={visited:#x}, connected={connected}");
    connected
}
