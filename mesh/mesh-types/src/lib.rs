//! Core mesh types for surface simplification.
//!
//! This crate provides the exchange types that sit on either side of the
//! simplifier:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - Closed reference surfaces: [`unit_tetrahedron`], [`unit_octahedron`],
//!   [`unit_cube`], [`icosphere`]
//!
//! Nothing here knows about adjacency or quadrics; those live in
//! `mesh-contract`, which reads an [`IndexedMesh`] once and writes a new
//! one when it finishes. Coordinates are unit-agnostic `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Point3, Vertex};
//!
//! // Create a simple triangle mesh
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.faces.len(), 1);
//! assert_eq!(mesh.euler_characteristic(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod primitives;
mod triangle;
mod vertex;

// Re-export core types
pub use mesh::IndexedMesh;
pub use primitives::{icosphere, unit_cube, unit_octahedron, unit_tetrahedron};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
