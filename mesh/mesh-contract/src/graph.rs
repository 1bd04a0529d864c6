//! Undirected vertex adjacency.

use hashbrown::{HashMap, HashSet};

use crate::element::{Edge, Face, VertexId};

/// Undirected adjacency over vertex ids.
///
/// Nodes and edges are managed explicitly: removing a node enumerates and
/// removes its incident edges itself and reports them, so callers always
/// know which edges disappeared.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    adjacency: HashMap<VertexId, HashSet<VertexId>>,
    edge_count: usize,
}

impl TopologyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the 1-skeleton of a set of faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_contract::{Face, TopologyGraph};
    ///
    /// let graph = TopologyGraph::from_faces([Face::new(0, 1, 2), Face::new(1, 2, 3)]);
    /// assert_eq!(graph.node_count(), 4);
    /// assert_eq!(graph.edge_count(), 5);
    /// ```
    #[must_use]
    pub fn from_faces(faces: impl IntoIterator<Item = Face>) -> Self {
        let mut graph = Self::new();
        for face in faces {
            for edge in face.edges() {
                graph.add_edge(edge);
            }
        }
        graph
    }

    /// Insert an isolated node. Returns `false` if it already existed.
    pub fn add_node(&mut self, v: VertexId) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, HashSet::new());
        true
    }

    /// Remove a node together with every edge incident to it.
    ///
    /// Returns the incident edges that were removed, sorted. Returns `None`
    /// if the node did not exist.
    pub fn remove_node(&mut self, v: VertexId) -> Option<Vec<Edge>> {
        let neighbors = self.adjacency.remove(&v)?;
        let mut removed = Vec::with_capacity(neighbors.len());
        for n in neighbors {
            if let Some(set) = self.adjacency.get_mut(&n) {
                set.remove(&v);
            }
            self.edge_count -= 1;
            removed.push(Edge::new(v, n));
        }
        removed.sort_unstable();
        Some(removed)
    }

    /// Insert an edge, creating missing endpoint nodes. Returns `false` if
    /// the edge already existed.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let [a, b] = edge.vertices();
        let inserted = self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    /// Remove an edge, keeping its endpoint nodes. Returns `false` if the
    /// edge did not exist.
    pub fn remove_edge(&mut self, edge: Edge) -> bool {
        let [a, b] = edge.vertices();
        let removed = self
            .adjacency
            .get_mut(&a)
            .is_some_and(|set| set.remove(&b));
        if removed {
            if let Some(set) = self.adjacency.get_mut(&b) {
                set.remove(&a);
            }
            self.edge_count -= 1;
        }
        removed
    }

    /// Check whether a node exists.
    #[inline]
    #[must_use]
    pub fn contains_node(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Check whether an edge exists.
    #[inline]
    #[must_use]
    pub fn has_edge(&self, edge: Edge) -> bool {
        let [a, b] = edge.vertices();
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Neighbor set of a node (empty for unknown nodes).
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.get(&v).into_iter().flatten().copied()
    }

    /// Number of neighbors of a node.
    #[must_use]
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency.get(&v).map_or(0, HashSet::len)
    }

    /// Vertices adjacent to both endpoints of `edge`, sorted.
    #[must_use]
    pub fn common_neighbors(&self, edge: Edge) -> Vec<VertexId> {
        let [a, b] = edge.vertices();
        let (Some(na), Some(nb)) = (self.adjacency.get(&a), self.adjacency.get(&b)) else {
            return Vec::new();
        };
        let (small, large) = if na.len() <= nb.len() { (na, nb) } else { (nb, na) };
        let mut common: Vec<VertexId> = small
            .iter()
            .filter(|v| large.contains(*v))
            .copied()
            .collect();
        common.sort_unstable();
        common
    }

    /// Number of nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterate over all nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterate over every edge once, in arbitrary order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&v, set)| {
            set.iter()
                .filter(move |&&n| v < n)
                .map(move |&n| Edge::new(v, n))
        })
    }
}
