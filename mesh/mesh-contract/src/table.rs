//! Per-element quadric bookkeeping.

use hashbrown::HashMap;

use crate::contraction::ContractionDelta;
use crate::element::{Edge, Face, VertexId};
use crate::graph::TopologyGraph;
use crate::points::PointStore;
use crate::quadric::Quadric;
use crate::triangulation::Triangulation;

/// Quadrics for every live vertex, edge and face.
///
/// Three typed maps keyed by canonical ids. At bootstrap the quadric of a
/// vertex (edge) is the sum of the plane quadrics of the faces containing it.
/// After a contraction the new vertex and edges inherit the error of what
/// they replace, so the new vertex keeps accumulating the planes of the
/// original surface around it.
#[derive(Debug, Clone, Default)]
pub struct QuadricTable {
    vertices: HashMap<VertexId, Quadric>,
    edges: HashMap<Edge, Quadric>,
    faces: HashMap<Face, Quadric>,
}

/// Plane quadric of a face at the current point positions.
#[must_use]
pub fn face_quadric(face: Face, points: &PointStore) -> Quadric {
    Quadric::from_triangle(&points.triangle(face))
}

impl QuadricTable {
    /// Compute quadrics for every vertex, edge and face.
    ///
    /// Each face is visited once; its quadric is stored under the face and
    /// added to its three vertices and three edges. Graph nodes without
    /// faces get the zero quadric.
    #[must_use]
    pub fn bootstrap(
        graph: &TopologyGraph,
        triangulation: &Triangulation,
        points: &PointStore,
    ) -> Self {
        let mut table = Self {
            vertices: graph.nodes().map(|v| (v, Quadric::ZERO)).collect(),
            edges: HashMap::with_capacity(graph.edge_count()),
            faces: HashMap::with_capacity(triangulation.len()),
        };

        for face in triangulation.iter() {
            let q = face_quadric(face, points);
            table.faces.insert(face, q);
            for v in face.vertices() {
                *table.vertices.entry(v).or_default() += q;
            }
            for edge in face.edges() {
                *table.edges.entry(edge).or_default() += q;
            }
        }

        table
    }

    /// Patch the table for a contraction that was just applied.
    ///
    /// With `(a, b)` contracted into `c` and `x` ranging over the new
    /// neighbors of `c`:
    ///
    /// - `Q(c) = Q(a) + Q(b) - Q(a, b)`, so the two vanished faces count once
    /// - `Q(c, x) = Q(a, x) + Q(b, x) - Q(a, b, x)` when `x` is in the edge link
    /// - `Q(c, x) = Q(a, x)` (or `Q(b, x)`) when only one endpoint touched `x`
    /// - new faces get a fresh plane quadric from `points`
    ///
    /// Entries of removed elements are evicted afterwards.
    pub fn update_for_contraction(&mut self, delta: &ContractionDelta, points: &PointStore) {
        let [a, b] = delta.edge.vertices();
        let c = delta.new_vertex;

        let q_c = self.vertex_or_zero(a) + self.vertex_or_zero(b) - self.edge_or_zero(delta.edge);

        let mut new_edges = Vec::with_capacity(delta.added.edges.len());
        for &edge in &delta.added.edges {
            let Some(x) = edge.other(c) else {
                continue;
            };
            let (ax, bx) = (Edge::new(a, x), Edge::new(b, x));
            let q = if delta.link.contains(&x) {
                let shared = self.face_or_zero(Face::new(a, b, x));
                self.edge_or_zero(ax) + self.edge_or_zero(bx) - shared
            } else if self.edges.contains_key(&ax) {
                self.edge_or_zero(ax)
            } else {
                self.edge_or_zero(bx)
            };
            new_edges.push((edge, q));
        }

        for &v in &delta.removed.nodes {
            self.vertices.remove(&v);
        }
        for edge in &delta.removed.edges {
            self.edges.remove(edge);
        }
        for face in &delta.removed.faces {
            self.faces.remove(face);
        }

        self.vertices.insert(c, q_c);
        self.edges.extend(new_edges);
        for &face in &delta.added.faces {
            self.faces.insert(face, face_quadric(face, points));
        }
    }

    /// Quadric of a vertex.
    #[inline]
    #[must_use]
    pub fn vertex(&self, v: VertexId) -> Option<&Quadric> {
        self.vertices.get(&v)
    }

    /// Quadric of an edge.
    #[inline]
    #[must_use]
    pub fn edge(&self, edge: Edge) -> Option<&Quadric> {
        self.edges.get(&edge)
    }

    /// Quadric of a face.
    #[inline]
    #[must_use]
    pub fn face(&self, face: Face) -> Option<&Quadric> {
        self.faces.get(&face)
    }

    /// Number of entries per map as `(vertices, edges, faces)`.
    #[must_use]
    pub fn len(&self) -> (usize, usize, usize) {
        (self.vertices.len(), self.edges.len(), self.faces.len())
    }

    /// Check whether the table holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }

    // Missing entries on the update path mean a boundary edge slipped past
    // the link check.
    fn vertex_or_zero(&self, v: VertexId) -> Quadric {
        debug_assert!(self.vertices.contains_key(&v), "no quadric for vertex {v}");
        self.vertices.get(&v).copied().unwrap_or_default()
    }

    fn edge_or_zero(&self, edge: Edge) -> Quadric {
        debug_assert!(self.edges.contains_key(&edge), "no quadric for edge {edge}");
        self.edges.get(&edge).copied().unwrap_or_default()
    }

    fn face_or_zero(&self, face: Face) -> Quadric {
        debug_assert!(self.faces.contains_key(&face), "no quadric for face {face}");
        self.faces.get(&face).copied().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contraction::{apply, contract};
    use mesh_types::{IndexedMesh, Point3, icosphere, unit_octahedron};

    struct Fixture {
        graph: TopologyGraph,
        triangulation: Triangulation,
        points: PointStore,
    }

    fn fixture(mesh: &IndexedMesh) -> Fixture {
        let faces: Vec<Face> = mesh.faces.iter().map(|&f| Face::from_array(f)).collect();
        Fixture {
            graph: TopologyGraph::from_faces(faces.iter().copied()),
            triangulation: Triangulation::from_faces(faces),
            points: PointStore::from_points(mesh.vertices.iter().map(|v| v.position).collect()),
        }
    }

    fn incident_sum(triangulation: &Triangulation, table: &QuadricTable, v: VertexId) -> Quadric {
        triangulation
            .faces_of(v)
            .map(|f| *table.face(f).unwrap())
            .sum()
    }

    #[test]
    fn bootstrap_covers_every_element() {
        let fx = fixture(&unit_octahedron());
        let table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);
        assert_eq!(table.len(), (6, 12, 8));
        assert!(!table.is_empty());
    }

    #[test]
    fn bootstrap_is_additive() {
        let fx = fixture(&icosphere(1));
        let table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);

        for v in fx.graph.nodes() {
            let expected = incident_sum(&fx.triangulation, &table, v);
            assert!(table.vertex(v).unwrap().max_abs_diff(&expected) < 1e-12);
        }
        for edge in fx.graph.edges() {
            let expected: Quadric = fx
                .triangulation
                .faces_of_edge(edge)
                .into_iter()
                .map(|f| *table.face(f).unwrap())
                .sum();
            assert!(table.edge(edge).unwrap().max_abs_diff(&expected) < 1e-12);
        }
    }

    #[test]
    fn small_scale_faces_keep_their_planes() {
        let mut mesh = icosphere(1);
        for v in &mut mesh.vertices {
            v.position = Point3::from(v.position.coords * 1e-4);
        }
        let fx = fixture(&mesh);
        let table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);

        for face in fx.triangulation.iter() {
            assert_ne!(*table.face(face).unwrap(), Quadric::ZERO, "{face}");
        }
        for v in fx.graph.nodes() {
            assert!(table.vertex(v).unwrap().minor_determinant().abs() > 1e-10);
        }
    }

    #[test]
    fn vertex_error_vanishes_at_its_position() {
        let fx = fixture(&icosphere(1));
        let table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);
        for v in fx.graph.nodes() {
            assert!(table.vertex(v).unwrap().evaluate(&fx.points[v]).abs() < 1e-12);
        }
    }

    #[test]
    fn update_derives_new_entries() {
        let mut fx = fixture(&unit_octahedron());
        let mut table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);
        let before = table.clone();

        let edge = Edge::new(0, 2);
        let delta = contract(&fx.graph, &fx.triangulation, &mut fx.points, edge, Point3::origin());
        apply(&delta, &mut fx.graph, &mut fx.triangulation);
        table.update_for_contraction(&delta, &fx.points);

        let c = delta.new_vertex;
        let expected_c = *before.vertex(0).unwrap() + *before.vertex(2).unwrap()
            - *before.edge(edge).unwrap();
        assert!(table.vertex(c).unwrap().max_abs_diff(&expected_c) < 1e-12);

        // +z is in the edge link
        let expected_c4 = *before.edge(Edge::new(0, 4)).unwrap()
            + *before.edge(Edge::new(2, 4)).unwrap()
            - *before.face(Face::new(0, 2, 4)).unwrap();
        assert!(table.edge(Edge::new(c, 4)).unwrap().max_abs_diff(&expected_c4) < 1e-12);

        // -x only touched +y
        let expected_c1 = *before.edge(Edge::new(1, 2)).unwrap();
        assert!(table.edge(Edge::new(c, 1)).unwrap().max_abs_diff(&expected_c1) < 1e-12);

        // New faces are fresh plane quadrics
        for &face in &delta.added.faces {
            let fresh = face_quadric(face, &fx.points);
            assert_eq!(table.face(face), Some(&fresh));
        }
    }

    #[test]
    fn update_evicts_removed_entries() {
        let mut fx = fixture(&unit_octahedron());
        let mut table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);

        let delta = contract(
            &fx.graph,
            &fx.triangulation,
            &mut fx.points,
            Edge::new(0, 2),
            Point3::origin(),
        );
        apply(&delta, &mut fx.graph, &mut fx.triangulation);
        table.update_for_contraction(&delta, &fx.points);

        assert!(table.vertex(0).is_none());
        assert!(table.vertex(2).is_none());
        for &edge in &delta.removed.edges {
            assert!(table.edge(edge).is_none());
        }
        for &face in &delta.removed.faces {
            assert!(table.face(face).is_none());
        }
        assert_eq!(table.len(), (5, 9, 6));
    }

    #[test]
    fn untouched_vertices_stay_additive() {
        let mut fx = fixture(&icosphere(2));
        let mut table = QuadricTable::bootstrap(&fx.graph, &fx.triangulation, &fx.points);

        let edge = Edge::new(0, fx.graph.neighbors(0).min().unwrap());
        let touched: Vec<VertexId> = fx
            .graph
            .neighbors(0)
            .chain(fx.graph.neighbors(edge.vertices()[1]))
            .collect();
        let position = fx.points.midpoint(edge);

        let delta = contract(&fx.graph, &fx.triangulation, &mut fx.points, edge, position);
        apply(&delta, &mut fx.graph, &mut fx.triangulation);
        table.update_for_contraction(&delta, &fx.points);

        for v in fx.graph.nodes() {
            if v == delta.new_vertex || touched.contains(&v) {
                continue;
            }
            let expected = incident_sum(&fx.triangulation, &table, v);
            assert!(table.vertex(v).unwrap().max_abs_diff(&expected) < 1e-12);
        }
    }
}
