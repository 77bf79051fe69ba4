//! Adjacency-matrix graph model for small undirected graphs (currently \(n \le 64\)).

use crate::error::{GraphError, ParseError};
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Largest supported vertex count (one `u64` neighbor bitset per vertex).
pub const MAX_VERTICES: usize = 64;

/// An undirected edge `(u, v)` with `u < v`.
pub type Edge = (usize, usize);

/// Returns a mask with the lowest `n` bits set.
#[inline(always)]
pub const fn low_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

#[inline(always)]
pub(crate) const fn bit(v: usize) -> u64 {
    1u64 << v
}

// ============================================================================
// Graph
// ============================================================================

/// A finite undirected, unweighted graph over vertices `0..n`.
///
/// Representation: `adj[v]` is the neighbor bitset of vertex `v`. The matrix is
/// symmetric with a zero diagonal; constructors validate this.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Graph {
    n: usize,
    adj: Vec<u64>,
}

impl Graph {
    /// Creates a graph on `n` vertices with no edges.
    ///
    /// # Panics
    /// Panics if `n > 64`.
    pub fn empty(n: usize) -> Self {
        assert!(n <= MAX_VERTICES, "graph supports at most {MAX_VERTICES} vertices");
        Self {
            n,
            adj: vec![0u64; n],
        }
    }

    /// Creates a graph from row bitsets.
    ///
    /// # Panics
    /// Panics if there are more than 64 rows. Panics in debug builds if the input contains
    /// out-of-range bits, self-loops, or is not symmetric.
    pub fn from_adj(adj: Vec<u64>) -> Self {
        let n = adj.len();
        assert!(n <= MAX_VERTICES, "graph supports at most {MAX_VERTICES} vertices");
        let mask = low_bits(n);

        for i in 0..n {
            debug_assert_eq!(adj[i] & !mask, 0, "adj contains bits outside n");
            debug_assert_eq!((adj[i] >> i) & 1, 0, "self-loop at vertex {i}");
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let aij = (adj[i] >> j) & 1;
                let aji = (adj[j] >> i) & 1;
                debug_assert_eq!(aij, aji, "adj is not symmetric at ({i},{j})");
            }
        }

        Self { n, adj }
    }

    /// Creates a graph from a square `0/1` matrix, validating every entry.
    ///
    /// # Errors
    /// Returns an error if the matrix is non-square, has entries other than `0`/`1`,
    /// has self-loops, is not symmetric, or has more than 64 rows.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ParseError> {
        let n = rows.len();
        if n > MAX_VERTICES {
            return Err(ParseError::TooManyVertices { n });
        }

        let mut adj = Vec::with_capacity(n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(ParseError::NonSquare {
                    row: i,
                    expected: n,
                    got: row.len(),
                });
            }
            let mut mask = 0u64;
            for (j, &x) in row.iter().enumerate() {
                match x {
                    0 => {}
                    1 => mask |= bit(j),
                    other => {
                        return Err(ParseError::InvalidEntry {
                            row: i,
                            col: j,
                            token: other.to_string(),
                        })
                    }
                }
            }
            adj.push(mask);
        }

        validate_rows(&adj)?;
        Ok(Self { n, adj })
    }

    /// Generates an Erdős–Rényi random graph `G(n, p)`.
    ///
    /// # Panics
    /// Panics if `n > 64`, and in debug builds if `p` is outside `[0, 1]`.
    pub fn random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut g = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    g.adj[i] |= bit(j);
                    g.adj[j] |= bit(i);
                }
            }
        }
        g
    }

    /// Returns the number of vertices.
    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Returns the neighbor bitsets, one per vertex.
    #[inline(always)]
    pub fn rows(&self) -> &[u64] {
        &self.adj
    }

    /// Returns the neighbor bitset of vertex `v`.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> u64 {
        self.adj[v]
    }

    /// Returns whether the edge `(u, v)` exists. Out-of-range vertices have no edges.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.n && v < self.n && (self.adj[u] & bit(v)) != 0
    }

    /// Returns the degree of vertex `v` (its row sum).
    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].count_ones() as usize
    }

    /// Returns the total number of edges in the graph.
    #[inline]
    pub fn edge_count(&self) -> usize {
        let sum: u32 = self.adj.iter().map(|row| row.count_ones()).sum();
        (sum as usize) / 2
    }

    /// Returns the edges in row-major upper-triangle order: increasing `u`, then `v > u`.
    ///
    /// Matching enumeration and the greedy pass both depend on this order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::with_capacity(self.edge_count());
        for u in 0..self.n {
            let mut t = self.adj[u] & !low_bits(u + 1);
            while t != 0 {
                let v = t.trailing_zeros() as usize;
                t &= t - 1;
                out.push((u, v));
            }
        }
        out
    }

    /// Returns the vertices of odd degree, ascending.
    pub fn odd_degree_vertices(&self) -> Vec<usize> {
        (0..self.n).filter(|&v| self.degree(v) % 2 == 1).collect()
    }

    /// Saves the adjacency matrix to a file as comma-separated `0/1` rows.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let mut f = File::create(filename)?;
        self.write_to(&mut f)
    }

    /// Writes the adjacency matrix to a writer as comma-separated `0/1` rows.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{self}")
    }

    /// Loads a graph from a file containing an adjacency matrix.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the matrix is malformed.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, GraphError> {
        let text = std::fs::read_to_string(filename)?;
        Ok(parse_adjacency_matrix(&text)?)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                if j > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", (self.adj[i] >> j) & 1)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn validate_rows(rows: &[u64]) -> Result<(), ParseError> {
    let n = rows.len();
    for i in 0..n {
        if ((rows[i] >> i) & 1) != 0 {
            return Err(ParseError::SelfLoop { vertex: i });
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let a_ij = ((rows[i] >> j) & 1) as u8;
            let a_ji = ((rows[j] >> i) & 1) as u8;
            if a_ij != a_ji {
                return Err(ParseError::NotSymmetric { i, j, a_ij, a_ji });
            }
        }
    }
    Ok(())
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a `0/1` adjacency matrix from text.
///
/// Rules:
/// - One row per line; blank lines are ignored.
/// - Entries are comma-separated (`0,1,1`), whitespace-separated (`0 1 1`),
///   or a compact run of digits (`011`).
/// - The matrix must be square, symmetric, and have a zero diagonal.
/// - `n` must be `<= 64`. Empty input is the graph with no vertices.
///
/// # Errors
/// Returns an error if the input is non-square, contains invalid entries,
/// has self-loops, is not symmetric, or is too large.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, ParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let n = lines.len();
    if n > MAX_VERTICES {
        return Err(ParseError::TooManyVertices { n });
    }

    let mut rows = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let tokens = split_row(line);
        if tokens.len() != n {
            return Err(ParseError::NonSquare {
                row: i,
                expected: n,
                got: tokens.len(),
            });
        }
        let mut mask = 0u64;
        for (j, token) in tokens.iter().enumerate() {
            match token.parse::<u8>() {
                Ok(0) => {}
                Ok(1) => mask |= bit(j),
                _ => {
                    return Err(ParseError::InvalidEntry {
                        row: i,
                        col: j,
                        token: (*token).to_string(),
                    })
                }
            }
        }
        rows.push(mask);
    }

    validate_rows(&rows)?;
    Ok(Graph { n, adj: rows })
}

fn split_row(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else if line.contains(char::is_whitespace) {
        line.split_whitespace().collect()
    } else {
        line.char_indices()
            .map(|(i, c)| &line[i..i + c.len_utf8()])
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
