//! Topology-preserving mesh simplification by edge contraction.
//!
//! This crate simplifies triangulated 2-manifolds by repeatedly contracting
//! the edge whose contraction moves the surface least, as measured by
//! quadric error metrics (QEM). An edge is only contracted when it passes
//! the link condition, so the simplified surface is homeomorphic to the
//! input: no pinches, no fused sheets, no lost handles.
//!
//! # Features
//!
//! - **Link condition**: Edges that would change the topology are never contracted
//! - **Quadric error metrics**: Contract the cheapest edge first, at its optimal position
//! - **Incremental bookkeeping**: Quadrics, graph and triangles are patched per contraction
//! - **Stepwise control**: Drive the [`Simplifier`] one [`Step`] at a time or run to a target
//! - **Target control**: Specify target by triangle count, ratio or maximum cost
//!
//! # Example
//!
//! ```
//! use mesh_types::icosphere;
//! use mesh_contract::{SimplifyParams, simplify_mesh};
//!
//! // Create a mesh
//! let sphere = icosphere(2);
//!
//! // Simplify to 25% of original triangles
//! let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.25)).unwrap();
//! println!("{}", result);
//! assert_eq!(result.mesh.euler_characteristic(), 2);
//! ```
//!
//! # Algorithm
//!
//! 1. Every vertex, edge and triangle gets a quadric: the sum of the squared
//!    distances to the planes of the triangles containing it
//! 2. Every edge is queued with the cost of contracting it to the point that
//!    minimizes `Q(a) + Q(b)`
//! 3. The cheapest edge is popped; stale edges and edges failing the link
//!    condition are dropped, otherwise the edge is contracted to a fresh
//!    vertex and the edges around it are queued
//! 4. Step 3 repeats until a stopping criterion holds or the queue drains
//!
//! Vertex ids are never reused and vertex quadrics never change, so queued
//! candidates are invalidated lazily: a candidate is valid iff its edge
//! still exists.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod contraction;
mod element;
mod error;
mod graph;
mod link;
mod params;
mod placement;
mod points;
mod quadric;
mod result;
mod simplify;
mod table;
mod triangulation;
mod validate;

// Re-export main types and functions
pub use contraction::{ContractionDelta, Elements, apply, contract};
pub use element::{Edge, Face, VertexId};
pub use error::{SimplifyError, SimplifyResult};
pub use graph::TopologyGraph;
pub use link::{Rejection, VertexLink, edge_link, is_safe, link_condition, vertex_link};
pub use params::SimplifyParams;
pub use placement::{Placement, solve_position};
pub use points::PointStore;
pub use quadric::{Quadric, SINGULAR_EPSILON};
pub use result::SimplificationResult;
pub use simplify::{ContractionSummary, Simplifier, Step, simplify_mesh};
pub use table::{QuadricTable, face_quadric};
pub use triangulation::Triangulation;
pub use validate::{validate_input, validate_parts};
