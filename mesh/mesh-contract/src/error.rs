//! Error types for simplification.

use thiserror::Error;

/// Errors that can occur when setting up a simplification.
///
/// Everything here is detected before the first contraction. Once a
/// [`Simplifier`](crate::Simplifier) exists, stepping it cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimplifyError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// A face references a vertex that does not exist.
    #[error("Face {face} references vertex {index}, but mesh has only {vertex_count} vertices")]
    InvalidIndex {
        /// Position of the face in the input.
        face: usize,
        /// The out-of-range index.
        index: u32,
        /// Number of input vertices.
        vertex_count: usize,
    },

    /// A face repeats a vertex.
    #[error("Face {face} is degenerate: {vertices:?}")]
    DegenerateFace {
        /// Position of the face in the input.
        face: usize,
        /// The face's vertex indices.
        vertices: [u32; 3],
    },

    /// A vertex has a NaN or infinite coordinate.
    #[error("Vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(u32),

    /// An edge is shared by more than two distinct triangles.
    #[error("Edge ({0}, {1}) is shared by {2} triangles")]
    NonManifoldEdge(u32, u32, usize),

    /// Invalid target ratio.
    #[error("Invalid target ratio: {0} (must be between 0.0 and 1.0)")]
    InvalidRatio(f64),

    /// Invalid maximum contraction cost.
    #[error("Invalid maximum cost: {0} (must be non-negative and not NaN)")]
    InvalidMaxCost(f64),
}

/// Result type for simplification setup.
pub type SimplifyResult<T> = std::result::Result<T, SimplifyError>;
