//! Error types for matrix parsing and graph queries.

use thiserror::Error;

/// Errors encountered while parsing/validating an adjacency matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Matrix is not square.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a token that is not `0` or `1`.
    #[error("invalid entry at ({row}, {col}): {token:?} (expected 0 or 1)")]
    InvalidEntry {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending token.
        token: String,
    },
    /// The matrix is larger than 64 vertices, which doesn't fit in a `u64` bitset.
    #[error("matrix has {n} vertices; this implementation supports n <= 64")]
    TooManyVertices {
        /// Number of vertices in the matrix.
        n: usize,
    },
    /// Diagonal contains a `1`.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i},{j}): A[i][j]={a_ij}, A[j][i]={a_ji}")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Value at A[i][j].
        a_ij: u8,
        /// Value at A[j][i].
        a_ji: u8,
    },
}

/// Errors surfaced by graph queries.
///
/// Every variant is raised before an algorithm starts producing results, so a
/// failed query never yields partial output.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The adjacency matrix was malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ParseError),
    /// The graph has more edges than the exhaustive matching search accepts.
    #[error("graph too large: {edges} edges exceeds the limit of {limit}")]
    GraphTooLarge {
        /// Edge count of the graph.
        edges: usize,
        /// Configured edge limit.
        limit: usize,
    },
    /// Enumerating all matchings would produce more than `limit` matchings.
    #[error("graph too large: more than {limit} matchings to enumerate")]
    TooManyMatchings {
        /// Configured matching limit.
        limit: usize,
    },
    /// I/O error (file not found, etc.).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for GraphError {
    fn from(e: std::io::Error) -> Self {
        GraphError::Io(e.to_string())
    }
}
