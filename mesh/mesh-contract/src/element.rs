//! Canonical keys for vertices, edges and triangles.
//!
//! Edges and faces are unordered simplices. Their keys store the vertex ids
//! sorted ascending so that `(a, b)` and `(b, a)` hash and compare equal.

use std::fmt;

/// Stable vertex handle: an index into the [`PointStore`](crate::PointStore).
pub type VertexId = u32;

/// An undirected edge, stored with its endpoints sorted.
///
/// # Example
///
/// ```
/// use mesh_contract::Edge;
///
/// assert_eq!(Edge::new(5, 3), Edge::new(3, 5));
/// assert_eq!(Edge::new(5, 3).vertices(), [3, 5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge([VertexId; 2]);

impl Edge {
    /// Create the canonical edge between two distinct vertices.
    #[inline]
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        debug_assert_ne!(a, b, "edge endpoints must be distinct");
        if a < b { Self([a, b]) } else { Self([b, a]) }
    }

    /// Endpoints in ascending order.
    #[inline]
    #[must_use]
    pub const fn vertices(self) -> [VertexId; 2] {
        self.0
    }

    /// Check whether `v` is an endpoint.
    #[inline]
    #[must_use]
    pub const fn contains(self, v: VertexId) -> bool {
        self.0[0] == v || self.0[1] == v
    }

    /// The endpoint that is not `v`, or `None` if `v` is not an endpoint.
    #[inline]
    #[must_use]
    pub const fn other(self, v: VertexId) -> Option<VertexId> {
        if self.0[0] == v {
            Some(self.0[1])
        } else if self.0[1] == v {
            Some(self.0[0])
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}

/// An unordered triangle, stored with its vertices sorted.
///
/// # Example
///
/// ```
/// use mesh_contract::{Edge, Face};
///
/// let face = Face::new(7, 2, 4);
/// assert_eq!(face.vertices(), [2, 4, 7]);
/// assert_eq!(face.opposite(Edge::new(7, 2)), Some(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Face([VertexId; 3]);

impl Face {
    /// Create the canonical triangle over three distinct vertices.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        let mut v = [a, b, c];
        v.sort_unstable();
        debug_assert!(v[0] != v[1] && v[1] != v[2], "face vertices must be distinct");
        Self(v)
    }

    /// Create a face from an index triple in any order.
    #[inline]
    #[must_use]
    pub fn from_array([a, b, c]: [VertexId; 3]) -> Self {
        Self::new(a, b, c)
    }

    /// Vertices in ascending order.
    #[inline]
    #[must_use]
    pub const fn vertices(self) -> [VertexId; 3] {
        self.0
    }

    /// Check whether `v` is one of the corners.
    #[inline]
    #[must_use]
    pub const fn contains(self, v: VertexId) -> bool {
        self.0[0] == v || self.0[1] == v || self.0[2] == v
    }

    /// The three edges of the face.
    #[must_use]
    pub fn edges(self) -> [Edge; 3] {
        let [a, b, c] = self.0;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(a, c)]
    }

    /// The corner opposite `edge`, or `None` if the edge is not a side of this face.
    #[must_use]
    pub fn opposite(self, edge: Edge) -> Option<VertexId> {
        let [a, b] = edge.vertices();
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        self.0.into_iter().find(|&v| v != a && v != b)
    }

    /// The side of the face that does not touch `v`.
    #[must_use]
    pub fn side_opposite(self, v: VertexId) -> Option<Edge> {
        let [a, b, c] = self.0;
        match v {
            _ if v == a => Some(Edge::new(b, c)),
            _ if v == b => Some(Edge::new(a, c)),
            _ if v == c => Some(Edge::new(a, b)),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_is_order_independent() {
        assert_eq!(Edge::new(5, 3), Edge::new(3, 5));
        assert_eq!(Edge::new(3, 5).vertices(), [3, 5]);
    }

    #[test]
    fn edge_other_endpoint() {
        let e = Edge::new(1, 9);
        assert_eq!(e.other(1), Some(9));
        assert_eq!(e.other(9), Some(1));
        assert_eq!(e.other(4), None);
        assert!(e.contains(9));
        assert!(!e.contains(2));
    }

    #[test]
    fn face_is_order_independent() {
        let f = Face::new(3, 1, 2);
        assert_eq!(f, Face::new(2, 3, 1));
        assert_eq!(f, Face::from_array([1, 2, 3]));
        assert_eq!(f.vertices(), [1, 2, 3]);
    }

    #[test]
    fn face_edges() {
        let f = Face::new(0, 4, 2);
        let edges = f.edges();
        assert!(edges.contains(&Edge::new(0, 2)));
        assert!(edges.contains(&Edge::new(2, 4)));
        assert!(edges.contains(&Edge::new(0, 4)));
    }

    #[test]
    fn face_opposite_corner() {
        let f = Face::new(0, 4, 2);
        assert_eq!(f.opposite(Edge::new(4, 0)), Some(2));
        assert_eq!(f.opposite(Edge::new(4, 5)), None);
        assert_eq!(f.side_opposite(2), Some(Edge::new(0, 4)));
        assert_eq!(f.side_opposite(7), None);
    }

    #[test]
    fn display() {
        assert_eq!(Edge::new(2, 1).to_string(), "(1, 2)");
        assert_eq!(Face::new(2, 3, 1).to_string(), "(1, 2, 3)");
    }
}
