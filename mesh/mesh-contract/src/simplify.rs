//! Greedy simplification driver.
//!
//! Repeatedly contracts the cheapest edge whose contraction keeps the
//! surface's topology, using a min-heap of candidates keyed by quadric cost.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Vertex};
use tracing::{debug, info, trace};

use crate::contraction::{apply, contract};
use crate::element::{Edge, Face, VertexId};
use crate::error::SimplifyResult;
use crate::graph::TopologyGraph;
use crate::link::{Rejection, link_condition};
use crate::params::SimplifyParams;
use crate::placement::solve_position;
use crate::points::PointStore;
use crate::result::SimplificationResult;
use crate::table::QuadricTable;
use crate::triangulation::Triangulation;
use crate::validate::{validate_input, validate_parts};

/// An edge contraction candidate in the priority queue.
///
/// The position and cost are computed once, when the candidate is queued.
/// They stay correct for as long as the edge exists, because vertex
/// quadrics and positions never change after a vertex is created.
#[derive(Debug, Clone)]
struct CollapseCandidate {
    edge: Edge,
    cost: f64,
    position: Point3<f64>,
}

impl PartialEq for CollapseCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CollapseCandidate {}

impl PartialOrd for CollapseCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CollapseCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (smaller cost = higher priority),
        // then the smaller edge first so runs are reproducible
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.edge.cmp(&self.edge))
    }
}

/// What one contraction did.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractionSummary {
    /// The contracted edge.
    pub edge: Edge,
    /// Id of the vertex that replaced its endpoints.
    pub new_vertex: VertexId,
    /// Where the new vertex was placed.
    pub position: Point3<f64>,
    /// Quadric error at that position.
    pub cost: f64,
}

/// Outcome of a single [`Simplifier::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The cheapest candidate was contracted.
    Contracted(ContractionSummary),
    /// The cheapest candidate failed the link condition and was dropped.
    Rejected {
        /// The dropped edge.
        edge: Edge,
        /// Why contracting it would change the topology.
        reason: Rejection,
    },
    /// The cheapest candidate's edge had already been contracted away.
    Stale(Edge),
    /// No candidates remain.
    Drained,
}

/// Owns a mesh under simplification and contracts it one edge at a time.
///
/// Every [`step`](Self::step) leaves the graph, triangulation and quadric
/// table mutually consistent, so the mesh can be inspected or the run
/// stopped between any two steps.
///
/// # Example
///
/// ```
/// use mesh_contract::{Simplifier, Step};
/// use mesh_types::unit_octahedron;
///
/// let mut simplifier = Simplifier::new(&unit_octahedron()).unwrap();
/// while !matches!(simplifier.step(), Step::Contracted(_)) {}
///
/// assert_eq!(simplifier.vertex_count(), 5);
/// assert_eq!(simplifier.edge_count(), 9);
/// assert_eq!(simplifier.face_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Simplifier {
    graph: TopologyGraph,
    triangulation: Triangulation,
    points: PointStore,
    quadrics: QuadricTable,
    queue: BinaryHeap<CollapseCandidate>,
    original_triangles: usize,
    contractions_performed: usize,
    contractions_rejected: usize,
    stale_skipped: usize,
}

impl Simplifier {
    /// Validate `mesh` and prepare it for simplification.
    ///
    /// # Errors
    ///
    /// Any [`SimplifyError`](crate::SimplifyError) reported by
    /// [`validate_input`].
    pub fn new(mesh: &IndexedMesh) -> SimplifyResult<Self> {
        let faces = validate_input(mesh)?;
        let points = mesh.vertices.iter().map(|v| v.position).collect();
        Ok(Self::build(points, faces))
    }

    /// Validate raw points and triangles and prepare them for simplification.
    ///
    /// # Errors
    ///
    /// Any [`SimplifyError`](crate::SimplifyError) reported by
    /// [`validate_parts`].
    pub fn from_parts(points: &[Point3<f64>], faces: &[[u32; 3]]) -> SimplifyResult<Self> {
        let faces = validate_parts(points, faces)?;
        Ok(Self::build(points.to_vec(), faces))
    }

    fn build(points: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        let graph = TopologyGraph::from_faces(faces.iter().copied());
        let triangulation = Triangulation::from_faces(faces);
        let points = PointStore::from_points(points);
        let quadrics = QuadricTable::bootstrap(&graph, &triangulation, &points);

        let mut simplifier = Self {
            original_triangles: triangulation.len(),
            graph,
            triangulation,
            points,
            quadrics,
            queue: BinaryHeap::new(),
            contractions_performed: 0,
            contractions_rejected: 0,
            stale_skipped: 0,
        };

        let mut edges: Vec<Edge> = simplifier.graph.edges().collect();
        edges.sort_unstable();
        simplifier.queue.reserve(edges.len());
        for edge in edges {
            simplifier.enqueue(edge);
        }

        debug!(
            vertices = simplifier.vertex_count(),
            edges = simplifier.edge_count(),
            faces = simplifier.face_count(),
            "Bootstrapped quadrics"
        );

        simplifier
    }

    fn enqueue(&mut self, edge: Edge) {
        let placement = solve_position(edge, &self.quadrics, &self.points);
        self.queue.push(CollapseCandidate {
            edge,
            cost: placement.cost,
            position: placement.position,
        });
    }

    /// Perform one scheduler transition.
    ///
    /// Pops the cheapest candidate and either discards it (its edge is gone,
    /// or contracting it would change the topology) or contracts it. A
    /// contraction is applied in full before this returns, and the edges
    /// around the new vertex are queued.
    pub fn step(&mut self) -> Step {
        let Some(candidate) = self.queue.pop() else {
            return Step::Drained;
        };
        let edge = candidate.edge;

        if let Err(reason) = link_condition(&self.graph, &self.triangulation, edge) {
            if reason == Rejection::MissingEdge {
                trace!(%edge, "Skipping stale candidate");
                self.stale_skipped += 1;
                return Step::Stale(edge);
            }
            debug!(%edge, %reason, cost = candidate.cost, "Rejected contraction");
            self.contractions_rejected += 1;
            return Step::Rejected { edge, reason };
        }

        let delta = contract(
            &self.graph,
            &self.triangulation,
            &mut self.points,
            edge,
            candidate.position,
        );
        self.quadrics.update_for_contraction(&delta, &self.points);
        apply(&delta, &mut self.graph, &mut self.triangulation);
        self.contractions_performed += 1;

        for &added in &delta.added.edges {
            self.enqueue(added);
        }

        debug!(
            %edge,
            new_vertex = delta.new_vertex,
            cost = candidate.cost,
            faces = self.face_count(),
            "Contracted edge"
        );

        Step::Contracted(ContractionSummary {
            edge,
            new_vertex: delta.new_vertex,
            position: candidate.position,
            cost: candidate.cost,
        })
    }

    /// Step until `stop` returns `true` or the queue drains.
    ///
    /// `stop` is checked before every step. Returns the number of
    /// contractions performed by this call.
    pub fn run_until<F>(&mut self, mut stop: F) -> usize
    where
        F: FnMut(&Self) -> bool,
    {
        let before = self.contractions_performed;
        while !stop(self) {
            if matches!(self.step(), Step::Drained) {
                break;
            }
        }
        self.contractions_performed - before
    }

    /// Simplify until the targets in `params` are met or no safe edge remains.
    ///
    /// A run stops before a step when the triangle count is at or below the
    /// target, or when the cheapest queued candidate costs more than
    /// `params.max_cost`.
    #[must_use]
    pub fn run(mut self, params: &SimplifyParams) -> SimplificationResult {
        let target = params.target_for(self.original_triangles);

        info!(
            original = self.original_triangles,
            target = target,
            max_cost = ?params.max_cost,
            "Starting mesh simplification"
        );

        let max_cost = params.max_cost;
        self.run_until(|s| {
            s.face_count() <= target
                || max_cost.is_some_and(|max| s.queue.peek().is_some_and(|c| c.cost > max))
        });

        let result = self.finish();

        info!(
            final_triangles = result.final_triangles,
            contractions = result.contractions_performed,
            rejected = result.contractions_rejected,
            stale = result.stale_skipped,
            "Mesh simplification complete"
        );

        result
    }

    /// Stop simplifying and package the current mesh.
    #[must_use]
    pub fn finish(self) -> SimplificationResult {
        let mesh = self.to_indexed_mesh();
        let final_triangles = self.face_count();
        let final_vertices = self.vertex_count();
        let original_triangles = self.original_triangles;
        let contractions_performed = self.contractions_performed;
        let contractions_rejected = self.contractions_rejected;
        let stale_skipped = self.stale_skipped;
        let (points, triangles) = self.into_parts();

        SimplificationResult {
            mesh,
            points,
            triangles,
            original_triangles,
            final_triangles,
            final_vertices,
            contractions_performed,
            contractions_rejected,
            stale_skipped,
        }
    }

    /// The 1-skeleton.
    #[must_use]
    pub const fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// The triangle set.
    #[must_use]
    pub const fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// All points ever created, tombstones included.
    #[must_use]
    pub const fn points(&self) -> &PointStore {
        &self.points
    }

    /// Per-element quadrics.
    #[must_use]
    pub const fn quadrics(&self) -> &QuadricTable {
        &self.quadrics
    }

    /// Number of live vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of live triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.triangulation.len()
    }

    /// Number of queued candidates, stale ones included.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of triangles before the first contraction.
    #[must_use]
    pub const fn original_triangles(&self) -> usize {
        self.original_triangles
    }

    /// Number of contractions performed so far.
    #[must_use]
    pub const fn contractions_performed(&self) -> usize {
        self.contractions_performed
    }

    /// `V - E + F` of the live mesh.
    #[must_use]
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }

    /// Check that every side of every triangle is an edge of the graph.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.triangulation
            .iter()
            .all(|face| face.edges().iter().all(|&e| self.graph.has_edge(e)))
    }

    /// Consume the simplifier, returning every point ever created and the
    /// surviving triangles (sorted) over those ids.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<[u32; 3]>) {
        let triangles = self.sorted_triangles();
        (self.points.into_vec(), triangles)
    }

    /// Build a compact mesh holding only the live vertices.
    ///
    /// Vertices keep the relative order of their ids. Triangles come out in
    /// sorted order with their vertices ascending; winding is not tracked.
    #[must_use]
    pub fn to_indexed_mesh(&self) -> IndexedMesh {
        let triangles = self.sorted_triangles();

        let mut live: Vec<VertexId> = triangles.iter().flatten().copied().collect();
        live.sort_unstable();
        live.dedup();

        let remap: HashMap<VertexId, u32> = live
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new as u32))
            .collect();

        let vertices = live
            .iter()
            .map(|&id| Vertex::new(self.points[id]))
            .collect();
        let faces = triangles
            .iter()
            .map(|t| t.map(|v| remap.get(&v).copied().unwrap_or_default()))
            .collect();

        IndexedMesh::from_parts(vertices, faces)
    }

    fn sorted_triangles(&self) -> Vec<[u32; 3]> {
        let mut triangles: Vec<[u32; 3]> = self.triangulation.iter().map(Face::vertices).collect();
        triangles.sort_unstable();
        triangles
    }
}

/// Simplify a mesh by contracting edges in order of quadric error.
///
/// # Arguments
///
/// * `mesh` - The input mesh; must be a triangulated 2-manifold, possibly with boundary
/// * `params` - Stopping criteria
///
/// # Returns
///
/// A [`SimplificationResult`] containing the simplified mesh and statistics.
///
/// # Errors
///
/// Returns an error if `params` are invalid or `mesh` fails
/// [`validate_input`].
///
/// # Example
///
/// ```
/// use mesh_types::icosphere;
/// use mesh_contract::{SimplifyParams, simplify_mesh};
///
/// let sphere = icosphere(2);
/// let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.5)).unwrap();
/// assert!(result.final_triangles <= 160);
/// println!("{}", result);
/// ```
pub fn simplify_mesh(
    mesh: &IndexedMesh,
    params: &SimplifyParams,
) -> SimplifyResult<SimplificationResult> {
    params.validate()?;
    Ok(Simplifier::new(mesh)?.run(params))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::{icosphere, unit_octahedron, unit_tetrahedron};

    fn candidate(a: u32, b: u32, cost: f64) -> CollapseCandidate {
        CollapseCandidate {
            edge: Edge::new(a, b),
            cost,
            position: Point3::origin(),
        }
    }

    #[test]
    fn heap_pops_cheapest_then_smallest_edge() {
        let mut heap = BinaryHeap::new();
        heap.push(candidate(0, 1, 2.0));
        heap.push(candidate(4, 5, 1.0));
        heap.push(candidate(2, 3, 1.0));
        heap.push(candidate(0, 9, 0.5));

        let order: Vec<Edge> = std::iter::from_fn(|| heap.pop().map(|c| c.edge)).collect();
        assert_eq!(
            order,
            vec![Edge::new(0, 9), Edge::new(2, 3), Edge::new(4, 5), Edge::new(0, 1)]
        );
    }

    #[test]
    fn new_queues_every_edge() {
        let simplifier = Simplifier::new(&unit_octahedron()).unwrap();
        assert_eq!(simplifier.queue_len(), 12);
        assert_eq!(simplifier.vertex_count(), 6);
        assert_eq!(simplifier.euler_characteristic(), 2);
        assert!(simplifier.is_consistent());
    }

    #[test]
    fn contraction_requeues_new_edges() {
        let mut simplifier = Simplifier::new(&unit_octahedron()).unwrap();
        let Step::Contracted(summary) = simplifier.step() else {
            panic!("every octahedron edge is safe");
        };
        assert_eq!(summary.new_vertex, 6);
        // 12 - 1 popped + 4 edges at the new vertex
        assert_eq!(simplifier.queue_len(), 15);
        assert_eq!(simplifier.quadrics().len(), (5, 9, 6));
    }

    #[test]
    fn tetrahedron_only_rejects() {
        let mut simplifier = Simplifier::new(&unit_tetrahedron()).unwrap();
        let mut rejected = 0;
        loop {
            match simplifier.step() {
                Step::Rejected { .. } => rejected += 1,
                Step::Drained => break,
                other => panic!("unexpected step {other:?}"),
            }
        }
        assert_eq!(rejected, 6);
        assert_eq!(simplifier.face_count(), 4);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut simplifier = Simplifier::new(&icosphere(1)).unwrap();
        simplifier.run_until(|s| s.face_count() <= 20);
        let result = simplifier.finish();
        assert!(result.stale_skipped > 0);
        assert_eq!(result.final_triangles, 20);
    }

    #[test]
    fn run_until_counts_its_own_contractions() {
        let mut simplifier = Simplifier::new(&icosphere(1)).unwrap();
        assert_eq!(simplifier.run_until(|s| s.contractions_performed() >= 3), 3);
        assert_eq!(simplifier.run_until(|s| s.contractions_performed() >= 5), 2);
        assert_eq!(simplifier.face_count(), 80 - 10);
    }

    #[test]
    fn run_stops_at_max_cost() {
        let cost_free = Simplifier::new(&icosphere(1))
            .unwrap()
            .run(&SimplifyParams::default().with_max_cost(0.0));
        assert_eq!(cost_free.contractions_performed, 0);
        assert_eq!(cost_free.final_triangles, 80);
    }

    #[test]
    fn compacted_mesh_matches_counts() {
        let result = Simplifier::new(&icosphere(1))
            .unwrap()
            .run(&SimplifyParams::with_target_triangles(40));
        assert_eq!(result.final_triangles, 40);
        assert_eq!(result.mesh.faces.len(), 40);
        assert_eq!(result.mesh.vertices.len(), result.final_vertices);
        assert_eq!(result.final_vertices, 22);
        assert_eq!(result.points.len(), 42 + result.contractions_performed);
        assert_eq!(result.mesh.euler_characteristic(), 2);
    }

    #[test]
    fn simplify_mesh_validates_params() {
        let params = SimplifyParams {
            target_ratio: f64::NAN,
            ..Default::default()
        };
        assert!(simplify_mesh(&unit_octahedron(), &params).is_err());
    }
}
