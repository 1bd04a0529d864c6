//! Edge contraction: delta computation and application.
//!
//! Contracting the edge `(a, b)` replaces both endpoints by a new vertex `c`:
//!
//! ```text
//!     Before:              After:
//!        x                    x
//!       /|\                   |
//!      / | \                  |
//!     /  |  \                 |
//!    a---+---b    ->          c
//!     \  |  /                 |
//!      \ | /                  |
//!       \|/                   |
//!        y                    y
//! ```
//!
//! The two faces on `(a, b)` vanish, every other face around `a` or `b`
//! is re-targeted to `c`. [`contract`] only computes what changes;
//! [`apply`] performs it.

use hashbrown::HashSet;
use mesh_types::Point3;

use crate::element::{Edge, Face, VertexId};
use crate::graph::TopologyGraph;
use crate::points::PointStore;
use crate::triangulation::Triangulation;

/// A set of vertices, edges and faces, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elements {
    /// Vertex ids.
    pub nodes: Vec<VertexId>,
    /// Canonical edges.
    pub edges: Vec<Edge>,
    /// Canonical faces.
    pub faces: Vec<Face>,
}

impl Elements {
    fn sort(&mut self) {
        self.nodes.sort_unstable();
        self.edges.sort_unstable();
        self.faces.sort_unstable();
    }
}

/// Exactly how one edge contraction changes the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionDelta {
    /// The contracted edge `(a, b)`.
    pub edge: Edge,
    /// Id of the vertex `c` replacing both endpoints.
    pub new_vertex: VertexId,
    /// Link of the contracted edge: the corners opposite it, sorted.
    pub link: Vec<VertexId>,
    /// Elements that disappear.
    pub removed: Elements,
    /// Elements that appear.
    pub added: Elements,
}

/// Compute the delta of contracting `edge` to a new vertex at `position`.
///
/// Appends `position` to `points` under a fresh id and leaves `graph` and
/// `triangulation` untouched. The caller must have checked
/// [`is_safe`](crate::is_safe): on an edge whose link does not have exactly
/// two vertices the result is meaningless.
///
/// # Example
///
/// ```
/// use mesh_contract::{Edge, Face, PointStore, TopologyGraph, Triangulation, contract};
/// use mesh_types::{Point3, unit_octahedron};
///
/// let octa = unit_octahedron();
/// let faces: Vec<Face> = octa.faces.iter().map(|&f| Face::from_array(f)).collect();
/// let graph = TopologyGraph::from_faces(faces.iter().copied());
/// let triangulation = Triangulation::from_faces(faces);
/// let mut points = PointStore::from_points(octa.vertices.iter().map(|v| v.position).collect());
///
/// let delta = contract(&graph, &triangulation, &mut points, Edge::new(0, 2), Point3::origin());
/// assert_eq!(delta.new_vertex, 6);
/// assert_eq!(delta.removed.faces.len(), 6);
/// assert_eq!(delta.added.faces.len(), 4);
/// ```
#[must_use]
pub fn contract(
    graph: &TopologyGraph,
    triangulation: &Triangulation,
    points: &mut PointStore,
    edge: Edge,
    position: Point3<f64>,
) -> ContractionDelta {
    let [a, b] = edge.vertices();
    let link = triangulation.opposite_vertices(edge);
    debug_assert_eq!(link.len(), 2, "contracting {edge} with link {link:?}");

    let c = points.push(position);

    let mut removed = Elements {
        nodes: vec![a, b],
        edges: vec![edge],
        faces: Vec::new(),
    };
    let mut added = Elements {
        nodes: vec![c],
        ..Elements::default()
    };

    // Neighbors shared through the edge link get one merged edge; the rest
    // of each endpoint's fan is re-targeted one to one.
    for x in graph.neighbors(a).filter(|&x| x != b) {
        removed.edges.push(Edge::new(a, x));
        added.edges.push(Edge::new(c, x));
    }
    for x in graph.neighbors(b).filter(|&x| x != a) {
        removed.edges.push(Edge::new(b, x));
        if !graph.has_edge(Edge::new(a, x)) {
            added.edges.push(Edge::new(c, x));
        }
    }

    // The two faces on the edge sit in both fans
    let fan: HashSet<Face> = triangulation
        .faces_of(a)
        .chain(triangulation.faces_of(b))
        .collect();
    for face in fan {
        removed.faces.push(face);
        if face.contains(a) && face.contains(b) {
            continue;
        }
        let [x, y] = remaining(face, a, b);
        added.faces.push(Face::new(x, y, c));
    }

    removed.sort();
    added.sort();

    ContractionDelta {
        edge,
        new_vertex: c,
        link,
        removed,
        added,
    }
}

/// The two corners of `face` other than whichever of `a`, `b` it contains.
fn remaining(face: Face, a: VertexId, b: VertexId) -> [VertexId; 2] {
    let mut rest = [0; 2];
    let mut n = 0;
    for v in face.vertices() {
        if v != a && v != b && n < 2 {
            rest[n] = v;
            n += 1;
        }
    }
    rest
}

/// Apply a delta to the graph and the triangulation.
///
/// Removal happens before addition: faces, edges, then nodes go out, then
/// nodes, edges and faces come in.
pub fn apply(
    delta: &ContractionDelta,
    graph: &mut TopologyGraph,
    triangulation: &mut Triangulation,
) {
    for &face in &delta.removed.faces {
        triangulation.remove(face);
    }
    for &edge in &delta.removed.edges {
        graph.remove_edge(edge);
    }
    for &v in &delta.removed.nodes {
        let dangling = graph.remove_node(v);
        debug_assert!(
            dangling.as_ref().is_none_or(Vec::is_empty),
            "vertex {v} still had edges {dangling:?}"
        );
    }

    for &v in &delta.added.nodes {
        graph.add_node(v);
    }
    for &edge in &delta.added.edges {
        graph.add_edge(edge);
    }
    for &face in &delta.added.faces {
        triangulation.insert(face);
    }
}
