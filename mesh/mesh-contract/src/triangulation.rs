//! Face set with vertex incidence.

use hashbrown::{HashMap, HashSet};

use crate::element::{Edge, Face, VertexId};

/// The set of canonical triangles of the surface.
///
/// Alongside the face set it keeps a vertex → incident faces index so that
/// star and link queries touch only the faces around a vertex.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    faces: HashSet<Face>,
    incidence: HashMap<VertexId, HashSet<Face>>,
}

impl Triangulation {
    /// Create an empty triangulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a triangulation, collapsing duplicate faces.
    #[must_use]
    pub fn from_faces(faces: impl IntoIterator<Item = Face>) -> Self {
        let mut triangulation = Self::new();
        for face in faces {
            triangulation.insert(face);
        }
        triangulation
    }

    /// Insert a face. Returns `false` if it was already present.
    pub fn insert(&mut self, face: Face) -> bool {
        if !self.faces.insert(face) {
            return false;
        }
        for v in face.vertices() {
            self.incidence.entry(v).or_default().insert(face);
        }
        true
    }

    /// Remove a face. Returns `false` if it was not present.
    pub fn remove(&mut self, face: Face) -> bool {
        if !self.faces.remove(&face) {
            return false;
        }
        for v in face.vertices() {
            if let Some(star) = self.incidence.get_mut(&v) {
                star.remove(&face);
                if star.is_empty() {
                    self.incidence.remove(&v);
                }
            }
        }
        true
    }

    /// Check whether a face is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, face: Face) -> bool {
        self.faces.contains(&face)
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check whether there are no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over all faces in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = Face> + '_ {
        self.faces.iter().copied()
    }

    /// Faces incident to `v`, in arbitrary order.
    pub fn faces_of(&self, v: VertexId) -> impl Iterator<Item = Face> + '_ {
        self.incidence.get(&v).into_iter().flatten().copied()
    }

    /// Faces containing both endpoints of `edge`, sorted.
    #[must_use]
    pub fn faces_of_edge(&self, edge: Edge) -> Vec<Face> {
        let [a, b] = edge.vertices();
        let mut faces: Vec<Face> = self.faces_of(a).filter(|f| f.contains(b)).collect();
        faces.sort_unstable();
        faces
    }

    /// Corners opposite `edge` in the faces that contain it, sorted.
    ///
    /// This is the link of the edge: two vertices for an interior edge of a
    /// manifold, one for a boundary edge.
    #[must_use]
    pub fn opposite_vertices(&self, edge: Edge) -> Vec<VertexId> {
        let mut opposite: Vec<VertexId> = self
            .faces_of_edge(edge)
            .into_iter()
            .filter_map(|f| f.opposite(edge))
            .collect();
        opposite.sort_unstable();
        opposite
    }

    /// Check whether `edge` borders exactly one face.
    #[must_use]
    pub fn is_boundary_edge(&self, edge: Edge) -> bool {
        let [a, b] = edge.vertices();
        self.faces_of(a).filter(|f| f.contains(b)).count() == 1
    }

    /// Check whether `v` is an endpoint of some boundary edge.
    ///
    /// In the star of `v` every incident edge `(v, x)` of a closed fan is
    /// shared by two faces; an edge seen only once is on the boundary.
    #[must_use]
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        let mut seen: HashMap<VertexId, usize> = HashMap::new();
        for face in self.faces_of(v) {
            for x in face.vertices() {
                if x != v {
                    *seen.entry(x).or_default() += 1;
                }
            }
        }
        seen.values().any(|&count| count == 1)
    }
}
