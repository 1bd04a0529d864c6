//! Optimal position of a contracted vertex.

use mesh_types::Point3;

use crate::element::Edge;
use crate::points::PointStore;
use crate::quadric::Quadric;
use crate::table::QuadricTable;

/// Where a contraction would place its new vertex, and at what cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position minimizing the combined quadric (or the edge midpoint).
    pub position: Point3<f64>,
    /// `Q(a) + Q(b)`.
    pub quadric: Quadric,
    /// `quadric` evaluated at `position`.
    pub cost: f64,
    /// Whether the linear system was singular and the midpoint was used.
    pub fallback: bool,
}

/// Solve for the contraction point of `edge`.
///
/// Minimizes `vᵀ Q v` over the new position with `Q = Q(a) + Q(b)`. When the
/// 3×3 block of `Q` is singular (flat or otherwise degenerate neighborhood)
/// the exact midpoint of the endpoints is used instead; this never fails.
///
/// # Example
///
/// ```
/// use mesh_contract::{
///     Edge, Face, PointStore, QuadricTable, TopologyGraph, Triangulation, solve_position,
/// };
/// use mesh_types::Point3;
///
/// // A flat square: every plane is z = 0, so the system is singular
/// let faces = [Face::new(0, 1, 2), Face::new(0, 2, 3)];
/// let graph = TopologyGraph::from_faces(faces);
/// let triangulation = Triangulation::from_faces(faces);
/// let points = PointStore::from_points(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
/// let table = QuadricTable::bootstrap(&graph, &triangulation, &points);
///
/// let placement = solve_position(Edge::new(0, 2), &table, &points);
/// assert!(placement.fallback);
/// assert_eq!(placement.position, Point3::new(0.5, 0.5, 0.0));
/// ```
#[must_use]
pub fn solve_position(edge: Edge, quadrics: &QuadricTable, points: &PointStore) -> Placement {
    let [a, b] = edge.vertices();
    let quadric = quadrics.vertex(a).copied().unwrap_or_default()
        + quadrics.vertex(b).copied().unwrap_or_default();

    let (position, fallback) = match quadric.optimal_point() {
        Some(p) => (p, false),
        None => (points.midpoint(edge), true),
    };

    Placement {
        position,
        quadric,
        cost: quadric.evaluate(&position),
        fallback,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::element::Face;
    use crate::graph::TopologyGraph;
    use crate::triangulation::Triangulation;
    use approx::assert_relative_eq;
    use mesh_types::{icosphere, unit_cube};

    fn table_for(faces: &[[u32; 3]], points: &PointStore) -> QuadricTable {
        let faces: Vec<Face> = faces.iter().map(|&f| Face::from_array(f)).collect();
        let graph = TopologyGraph::from_faces(faces.iter().copied());
        let triangulation = Triangulation::from_faces(faces);
        QuadricTable::bootstrap(&graph, &triangulation, points)
    }

    #[test]
    fn flat_neighborhood_falls_back_to_midpoint() {
        let points = PointStore::from_points(vec![
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(2.0, 0.0, 3.0),
            Point3::new(2.0, 2.0, 3.0),
            Point3::new(0.0, 2.0, 3.0),
        ]);
        let table = table_for(&[[0, 1, 2], [0, 2, 3]], &points);

        let placement = solve_position(Edge::new(2, 0), &table, &points);
        assert!(placement.fallback);
        assert_eq!(placement.position, Point3::new(1.0, 1.0, 3.0));
        assert!(placement.cost.abs() < 1e-12);
    }

    #[test]
    fn small_scale_sphere_never_falls_back() {
        let sphere = icosphere(1);
        let points = PointStore::from_points(
            sphere.vertices.iter().map(|v| Point3::from(v.position.coords * 1e-4)).collect(),
        );
        let table = table_for(&sphere.faces, &points);

        for &[a, b, c] in &sphere.faces {
            for edge in [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)] {
                let placement = solve_position(edge, &table, &points);
                assert!(!placement.fallback, "{edge}");
                assert!(placement.cost >= -1e-18);
                assert!((placement.position.coords.norm() - 1e-4).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn cube_edge_solves_to_its_midpoint() {
        // Corner 0 sees x = 0, y = 0, z = 0 twice each; corner 1 sees y = 0 and
        // z = 0 once and x = 1 twice. The x terms balance halfway.
        let cube = unit_cube();
        let points = PointStore::from_points(cube.vertices.iter().map(|v| v.position).collect());
        let table = table_for(&cube.faces, &points);

        let placement = solve_position(Edge::new(0, 1), &table, &points);
        assert!(!placement.fallback);
        assert_relative_eq!(placement.position.x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(placement.position.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(placement.position.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(placement.cost, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn cube_diagonal_is_pulled_toward_the_heavier_corner() {
        let cube = unit_cube();
        let points = PointStore::from_points(cube.vertices.iter().map(|v| v.position).collect());
        let table = table_for(&cube.faces, &points);

        // 2x^2 + (x - 1)^2 is minimized at x = 1/3, likewise y.
        let placement = solve_position(Edge::new(0, 2), &table, &points);
        assert!(!placement.fallback);
        assert_relative_eq!(placement.position.x, 1.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(placement.position.y, 1.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(placement.position.z, 0.0, epsilon = 1e-9);
        assert!(placement.cost > 0.0);
    }

    #[test]
    fn cost_matches_quadric() {
        let cube = unit_cube();
        let points = PointStore::from_points(cube.vertices.iter().map(|v| v.position).collect());
        let table = table_for(&cube.faces, &points);

        let placement = solve_position(Edge::new(0, 2), &table, &points);
        assert_relative_eq!(placement.cost, placement.quadric.evaluate(&placement.position));
    }
}
