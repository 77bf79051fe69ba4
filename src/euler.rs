//! Eulerian paths and circuits.
//!
//! Construction is Hierholzer's algorithm with an explicit stack over a private copy
//! of the adjacency rows; edges are cleared from the copy as they are consumed.

use crate::connectivity::is_connected;
use crate::graph::{bit, Graph};

/// Outcome of the Eulerian feasibility test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feasibility {
    /// Vertices with edges do not all lie in one component.
    Disconnected,
    /// The number of odd-degree vertices is neither 0 nor 2.
    TooManyOddVertices {
        /// Number of odd-degree vertices.
        count: usize,
    },
    /// All degrees are even; a circuit is attempted from vertex 0.
    Circuit,
    /// Exactly two odd-degree vertices; a path is attempted from `start` (the lower one).
    Path {
        /// First odd-degree vertex.
        start: usize,
        /// Second odd-degree vertex.
        end: usize,
    },
}

impl Feasibility {
    /// Vertex to start the construction from, if the test passed.
    pub fn start_vertex(self) -> Option<usize> {
        match self {
            Feasibility::Circuit => Some(0),
            Feasibility::Path { start, .. } => Some(start),
            Feasibility::Disconnected | Feasibility::TooManyOddVertices { .. } => None,
        }
    }
}

/// Checks connectivity (ignoring isolated vertices) and degree parity.
pub fn eulerian_feasibility(graph: &Graph) -> Feasibility {
    if !is_connected(graph) {
        return Feasibility::Disconnected;
    }
    match graph.odd_degree_vertices().as_slice() {
        [] => Feasibility::Circuit,
        &[start, end] => Feasibility::Path { start, end },
        odd => Feasibility::TooManyOddVertices { count: odd.len() },
    }
}

/// Returns a walk that traverses every edge exactly once, or `None`.
///
/// The walk is returned start-to-end and has `edge_count + 1` vertices. With two odd
/// vertices it starts at the lower one; otherwise it starts at vertex 0. A graph with
/// vertices but no edges yields `[0]`; the graph with no vertices yields `None`.
pub fn find_eulerian_path(graph: &Graph) -> Option<Vec<usize>> {
    let n = graph.vertex_count();
    if n == 0 {
        return None;
    }

    let feasibility = eulerian_feasibility(graph);
    let Some(start) = feasibility.start_vertex() else {
        log::debug!("no eulerian path: {feasibility:?}");
        return None;
    };

    let edge_count = graph.edge_count();
    let mut local: Vec<u64> = graph.rows().to_vec();
    let mut stack = Vec::with_capacity(edge_count + 1);
    let mut path = Vec::with_capacity(edge_count + 1);
    stack.push(start);

    while let Some(&v) = stack.last() {
        let remaining = local[v];
        if remaining == 0 {
            path.push(v);
            stack.pop();
        } else {
            let u = remaining.trailing_zeros() as usize;
            local[v] &= !bit(u);
            local[u] &= !bit(v);
            stack.push(u);
        }
    }

    // Edges unreachable from `start` are left unconsumed (e.g. an all-even graph whose
    // vertex 0 is isolated).
    if path.len() != edge_count + 1 {
        log::debug!(
            "no eulerian path from vertex {start}: walk covers {} of {edge_count} edges",
            path.len().saturating_sub(1)
        );
        return None;
    }

    path.reverse();
    Some(path)
}

/// Returns `true` if `path` walks along existing edges and uses every edge of `graph` exactly once.
pub fn is_eulerian_path(graph: &Graph, path: &[usize]) -> bool {
    let n = graph.vertex_count();
    if path.len() != graph.edge_count() + 1 || path.iter().any(|&v| v >= n) {
        return false;
    }
    let mut unused: Vec<u64> = graph.rows().to_vec();
    for step in path.windows(2) {
        let (a, b) = (step[0], step[1]);
        if unused[a] & bit(b) == 0 {
            return false;
        }
        unused[a] &= !bit(b);
        unused[b] &= !bit(a);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::graph_from;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    #[test]
    fn four_cycle_has_circuit() {
        let g = graph_from("0,1,0,1\n1,0,1,0\n0,1,0,1\n1,0,1,0");
        assert_eq!(eulerian_feasibility(&g), Feasibility::Circuit);
        let path = find_eulerian_path(&g).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 0]);
        assert!(is_eulerian_path(&g, &path));
    }

    #[test]
    fn triangle_has_circuit_of_length_four() {
        let g = graph_from("0,1,1\n1,0,1\n1,1,0");
        let path = find_eulerian_path(&g).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), path.last());
        assert!(is_eulerian_path(&g, &path));
    }

    #[test]
    fn path_starts_at_lower_odd_vertex() {
        // Example graph: degrees 2, 3, 3, 2.
        let g = graph_from("0,1,1,0\n1,0,1,1\n1,1,0,1\n0,1,1,0");
        assert_eq!(eulerian_feasibility(&g), Feasibility::Path { start: 1, end: 2 });
        let path = find_eulerian_path(&g).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], 1);
        assert_eq!(path[5], 2);
        assert!(is_eulerian_path(&g, &path));
    }

    #[test]
    fn two_disjoint_edges_have_no_path() {
        let g = graph_from("0100\n1000\n0001\n0010");
        assert_eq!(eulerian_feasibility(&g), Feasibility::Disconnected);
        assert_eq!(find_eulerian_path(&g), None);
    }

    #[test]
    fn star_has_too_many_odd_vertices() {
        let g = graph_from("0111\n1000\n1000\n1000");
        assert_eq!(
            eulerian_feasibility(&g),
            Feasibility::TooManyOddVertices { count: 4 }
        );
        assert_eq!(find_eulerian_path(&g), None);
    }

    #[test]
    fn empty_graphs() {
        assert_eq!(find_eulerian_path(&Graph::empty(0)), None);
        assert_eq!(find_eulerian_path(&Graph::empty(1)), Some(vec![0]));
        assert_eq!(find_eulerian_path(&Graph::empty(4)), Some(vec![0]));
    }

    #[test]
    fn circuit_away_from_isolated_vertex_zero_is_rejected() {
        // Triangle on 1, 2, 3 with vertex 0 isolated: connected and all-even, but the
        // walk from vertex 0 consumes nothing.
        let g = graph_from("0000\n0011\n0101\n0110");
        assert_eq!(eulerian_feasibility(&g), Feasibility::Circuit);
        assert_eq!(find_eulerian_path(&g), None);
    }

    #[test]
    fn single_edge_path() {
        let g = graph_from("000\n001\n010");
        assert_eq!(find_eulerian_path(&g), Some(vec![1, 2]));
    }

    #[test]
    fn working_copy_leaves_graph_untouched() {
        let g = graph_from("0,1,1\n1,0,1\n1,1,0");
        let before = g.clone();
        let first = find_eulerian_path(&g);
        assert_eq!(g, before);
        assert_eq!(find_eulerian_path(&g), first);
    }

    #[test]
    fn validator_rejects_bad_walks() {
        let g = graph_from("0,1,0,1\n1,0,1,0\n0,1,0,1\n1,0,1,0");
        assert!(!is_eulerian_path(&g, &[0, 1, 2, 3]));
        assert!(!is_eulerian_path(&g, &[0, 2, 1, 3, 0]));
        assert!(!is_eulerian_path(&g, &[0, 1, 0, 1, 0]));
        assert!(!is_eulerian_path(&g, &[0, 1, 2, 3, 9]));
    }

    #[test]
    fn existence_matches_feasibility_on_random_graphs() {
        let mut rng = XorShiftRng::seed_from_u64(0xE11E);
        for _ in 0..300 {
            let n = rng.random_range(1..10);
            let p = rng.random_range(0.1..0.9);
            let g = Graph::random(&mut rng, n, p);
            let feasibility = eulerian_feasibility(&g);
            match find_eulerian_path(&g) {
                Some(path) => {
                    assert!(feasibility.start_vertex().is_some());
                    assert_eq!(path[0], feasibility.start_vertex().unwrap());
                    assert!(is_eulerian_path(&g, &path));
                }
                None => {
                    // Feasible graphs only fail when vertex 0 is isolated in the all-even case.
                    if feasibility.start_vertex().is_some() {
                        assert_eq!(feasibility, Feasibility::Circuit);
                        assert_eq!(g.degree(0), 0);
                        assert!(g.edge_count() > 0);
                    }
                }
            }
        }
    }
}
