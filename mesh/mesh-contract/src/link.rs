//! Link condition for edge contractions.
//!
//! Contracting `(a, b)` preserves the topological type of a triangulated
//! 2-manifold iff `Lk(a) ∩ Lk(b) = Lk(a, b)` (Edelsbrunner & Harer,
//! *Computational Topology*, III.2). On a surface the edge link is two
//! vertices, so the intersection of the vertex links may contain exactly
//! those two vertices and no edge.
//!
//! A surface with boundary is handled by coning the boundary off to a
//! virtual vertex: every boundary vertex has it in its link, so an interior
//! edge joining two boundary vertices fails the condition (contracting it
//! would pinch the surface).

use std::fmt;

use hashbrown::HashSet;

use crate::element::{Edge, VertexId};
use crate::graph::TopologyGraph;
use crate::triangulation::Triangulation;

/// The link of a vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLink {
    /// Neighboring vertices.
    pub vertices: HashSet<VertexId>,
    /// The side opposite the vertex in each incident face.
    pub edges: HashSet<Edge>,
    /// Whether the link contains the virtual boundary vertex.
    pub on_boundary: bool,
}

/// Reason a contraction was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The edge is not in the graph (already contracted away).
    MissingEdge,
    /// The edge link does not have exactly two vertices.
    NotInterior {
        /// Number of faces on the edge.
        faces: usize,
    },
    /// The endpoints share a neighbor outside the edge link.
    ExtraCommonNeighbor(VertexId),
    /// Both vertex links contain the same edge.
    SharedLinkEdge(Edge),
    /// Both endpoints lie on the boundary.
    PinchesBoundary,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEdge => write!(f, "edge does not exist"),
            Self::NotInterior { faces } => write!(f, "edge borders {faces} faces, not 2"),
            Self::ExtraCommonNeighbor(v) => {
                write!(f, "endpoints share neighbor {v} outside the edge link")
            }
            Self::SharedLinkEdge(e) => write!(f, "vertex links share edge {e}"),
            Self::PinchesBoundary => write!(f, "both endpoints are on the boundary"),
        }
    }
}

/// Compute the link of `v`.
#[must_use]
pub fn vertex_link(
    graph: &TopologyGraph,
    triangulation: &Triangulation,
    v: VertexId,
) -> VertexLink {
    VertexLink {
        vertices: graph.neighbors(v).collect(),
        edges: triangulation
            .faces_of(v)
            .filter_map(|f| f.side_opposite(v))
            .collect(),
        on_boundary: triangulation.is_boundary_vertex(v),
    }
}

/// Compute the link of `edge`: the corners opposite it, sorted.
#[must_use]
pub fn edge_link(triangulation: &Triangulation, edge: Edge) -> Vec<VertexId> {
    triangulation.opposite_vertices(edge)
}

/// Check the link condition, reporting the first violation found.
///
/// # Errors
///
/// Returns the [`Rejection`] describing why contracting `edge` would
/// change the topology of the surface (or why it cannot be contracted at
/// all).
pub fn link_condition(
    graph: &TopologyGraph,
    triangulation: &Triangulation,
    edge: Edge,
) -> Result<(), Rejection> {
    if !graph.has_edge(edge) {
        return Err(Rejection::MissingEdge);
    }

    let link = edge_link(triangulation, edge);
    if link.len() != 2 {
        return Err(Rejection::NotInterior { faces: link.len() });
    }

    let [a, b] = edge.vertices();
    let lk_a = vertex_link(graph, triangulation, a);
    let lk_b = vertex_link(graph, triangulation, b);

    let mut common: Vec<VertexId> = lk_a.vertices.intersection(&lk_b.vertices).copied().collect();
    common.sort_unstable();
    if let Some(&extra) = common.iter().find(|v| !link.contains(v)) {
        return Err(Rejection::ExtraCommonNeighbor(extra));
    }

    let mut shared: Vec<Edge> = lk_a.edges.intersection(&lk_b.edges).copied().collect();
    shared.sort_unstable();
    if let Some(&e) = shared.first() {
        return Err(Rejection::SharedLinkEdge(e));
    }

    if lk_a.on_boundary && lk_b.on_boundary {
        return Err(Rejection::PinchesBoundary);
    }

    Ok(())
}

/// Check whether contracting `edge` preserves the surface's topology.
///
/// Returns `false` (never panics) for edges that are not in the graph.
///
/// # Example
///
/// ```
/// use mesh_contract::{Edge, Face, TopologyGraph, Triangulation, is_safe};
///
/// // Every edge of a tetrahedron is unsafe
/// let faces = [Face::new(0, 1, 2), Face::new(0, 1, 3), Face::new(0, 2, 3), Face::new(1, 2, 3)];
/// let graph = TopologyGraph::from_faces(faces);
/// let triangulation = Triangulation::from_faces(faces);
/// assert!(!is_safe(&graph, &triangulation, Edge::new(0, 1)));
/// ```
#[must_use]
pub fn is_safe(graph: &TopologyGraph, triangulation: &Triangulation, edge: Edge) -> bool {
    link_condition(graph, triangulation, edge).is_ok()
}
