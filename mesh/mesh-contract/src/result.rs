//! Result types for simplification runs.

// Triangle counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::{IndexedMesh, Point3};

/// Result of a simplification run.
#[derive(Debug, Clone)]
pub struct SimplificationResult {
    /// The simplified mesh, compacted to the vertices its faces use.
    pub mesh: IndexedMesh,

    /// Every point ever created, indexed by vertex id. Contracted vertices
    /// keep their slot, so only points reachable from `triangles` are live.
    pub points: Vec<Point3<f64>>,

    /// Surviving triangles over ids into `points`, sorted.
    pub triangles: Vec<[u32; 3]>,

    /// Number of triangles in the input (after removing duplicates).
    pub original_triangles: usize,

    /// Number of triangles after simplification.
    pub final_triangles: usize,

    /// Number of live vertices after simplification.
    pub final_vertices: usize,

    /// Number of edge contractions performed.
    pub contractions_performed: usize,

    /// Number of candidates rejected because contracting them would change
    /// the topology.
    pub contractions_rejected: usize,

    /// Number of queued candidates whose edge no longer existed.
    pub stale_skipped: usize,
}

impl SimplificationResult {
    /// Get the reduction ratio (final / original).
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Get the percentage of triangles removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Check if any contraction occurred.
    #[must_use]
    pub const fn was_simplified(&self) -> bool {
        self.contractions_performed > 0
    }
}

impl std::fmt::Display for SimplificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Simplification: {} → {} triangles ({:.1}% reduction, {} contractions, {} rejected)",
            self.original_triangles,
            self.final_triangles,
            self.reduction_percent(),
            self.contractions_performed,
            self.contractions_rejected
        )
    }
}
