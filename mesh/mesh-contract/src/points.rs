//! Append-only point arena.

// Vertex ids are u32 like IndexedMesh face indices
#![allow(clippy::cast_possible_truncation)]

use std::ops::Index;

use mesh_types::{Point3, Triangle};

use crate::element::{Edge, Face, VertexId};

/// Growable store of vertex coordinates addressed by stable ids.
///
/// The store never shrinks and never overwrites an entry: a contraction
/// appends the merged vertex under a fresh id and the two old ids become
/// tombstones that nothing references any more. Compacting would invalidate
/// ids held by the graph, the triangulation, the quadric table and queued
/// candidates.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point3<f64>>,
}

impl PointStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a store holding `points` under ids `0..points.len()`.
    #[must_use]
    pub const fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Append a point and return its id.
    pub fn push(&mut self, point: Point3<f64>) -> VertexId {
        let id = self.next_id();
        self.points.push(point);
        id
    }

    /// The id the next [`push`](Self::push) will return.
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> VertexId {
        self.points.len() as VertexId
    }

    /// Look up a point, returning `None` for ids never allocated.
    #[inline]
    #[must_use]
    pub fn get(&self, id: VertexId) -> Option<&Point3<f64>> {
        self.points.get(id as usize)
    }

    /// Number of allocated ids, tombstones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether no point was ever allocated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All allocated points in id order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consume the store and return the raw point vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// Midpoint of an edge's endpoints.
    #[must_use]
    pub fn midpoint(&self, edge: Edge) -> Point3<f64> {
        let [a, b] = edge.vertices();
        let (pa, pb) = (self[a], self[b]);
        Point3::new(
            f64::midpoint(pa.x, pb.x),
            f64::midpoint(pa.y, pb.y),
            f64::midpoint(pa.z, pb.z),
        )
    }

    /// Resolve a face to its corner positions.
    #[must_use]
    pub fn triangle(&self, face: Face) -> Triangle {
        let [a, b, c] = face.vertices();
        Triangle::new(self[a], self[b], self[c])
    }
}

impl Index<VertexId> for PointStore {
    type Output = Point3<f64>;

    fn index(&self, id: VertexId) -> &Self::Output {
        &self.points[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_allocates_sequential_ids() {
        let mut store = PointStore::new();
        assert!(store.is_empty());
        assert_eq!(store.push(Point3::new(0.0, 0.0, 0.0)), 0);
        assert_eq!(store.push(Point3::new(1.0, 0.0, 0.0)), 1);
        assert_eq!(store.next_id(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_out_of_range() {
        let store = PointStore::from_points(vec![Point3::origin()]);
        assert!(store.get(0).is_some());
        assert!(store.get(1).is_none());
    }

    #[test]
    fn midpoint_is_exact() {
        let store = PointStore::from_points(vec![
            Point3::new(0.0, 2.0, -4.0),
            Point3::new(1.0, 4.0, 4.0),
        ]);
        assert_eq!(store.midpoint(Edge::new(1, 0)), Point3::new(0.5, 3.0, 0.0));
    }

    #[test]
    fn triangle_resolves_positions() {
        let store = PointStore::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let tri = store.triangle(Face::new(2, 0, 1));
        assert!((tri.area() - 0.5).abs() < 1e-12);
    }
}
