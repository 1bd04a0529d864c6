//! Property-based tests for simplification.
//!
//! These tests use proptest to perturb reference surfaces and verify that
//! contraction never changes their topology.
//!
//! Run with: cargo test -p mesh-contract -- proptest

#![allow(clippy::unwrap_used)]

use mesh_contract::{Simplifier, SimplifyParams, Step, validate_parts};
use mesh_types::{IndexedMesh, Point3, icosphere};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// An icosphere of level 0 to 2 with every vertex pushed along its radius.
fn arb_bumpy_sphere() -> impl Strategy<Value = IndexedMesh> {
    (0u32..=2).prop_flat_map(|level| {
        let sphere = icosphere(level);
        let n = sphere.vertices.len();
        prop::collection::vec(0.9..1.1f64, n).prop_map(move |scales| {
            let mut mesh = sphere.clone();
            for (v, s) in mesh.vertices.iter_mut().zip(scales) {
                v.position = Point3::from(v.position.coords * s);
            }
            mesh
        })
    })
}

/// Arbitrary points and index triples, mostly invalid.
fn arb_soup() -> impl Strategy<Value = (Vec<Point3<f64>>, Vec<[u32; 3]>)> {
    let point = prop::array::uniform3(-10.0..10.0f64).prop_map(Point3::from);
    (
        prop::collection::vec(point, 0..12),
        prop::collection::vec(prop::array::uniform3(0u32..14), 0..20),
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Validation reports an error or a face list, never panics.
    #[test]
    fn validation_never_panics((points, faces) in arb_soup()) {
        if let Ok(distinct) = validate_parts(&points, &faces) {
            prop_assert!(distinct.len() <= faces.len());
            prop_assert!(!distinct.is_empty());
        }
    }

    /// Every step keeps triangles backed by edges and the sphere a sphere.
    #[test]
    fn steps_preserve_topology(mesh in arb_bumpy_sphere()) {
        let mut simplifier = Simplifier::new(&mesh).unwrap();

        loop {
            let faces = simplifier.face_count();
            let step = simplifier.step();
            if step == Step::Drained {
                break;
            }
            let expected = if matches!(step, Step::Contracted(_)) { faces - 2 } else { faces };
            prop_assert_eq!(simplifier.face_count(), expected);
            prop_assert!(simplifier.is_consistent());
            prop_assert_eq!(simplifier.euler_characteristic(), 2);
        }

        prop_assert!(simplifier.face_count() >= 4);
    }

    /// A run stops at its target unless the queue drains first.
    #[test]
    fn run_respects_target(mesh in arb_bumpy_sphere(), ratio in 0.0..1.0f64) {
        let original = mesh.faces.len();
        let params = SimplifyParams::with_target_ratio(ratio);
        let target = params.target_for(original);

        let mut simplifier = Simplifier::new(&mesh).unwrap();
        simplifier.run_until(|s| s.face_count() <= target);

        prop_assert!(simplifier.face_count() <= target || simplifier.queue_len() == 0);
        // Contractions remove two triangles at a time and never overshoot
        prop_assert!(simplifier.face_count() + 2 > target.min(original));

        let result = simplifier.finish();
        prop_assert_eq!(result.final_triangles, original - 2 * result.contractions_performed);
        prop_assert_eq!(result.mesh.faces.len(), result.final_triangles);
        prop_assert_eq!(result.mesh.vertices.len(), result.final_triangles / 2 + 2);
        prop_assert_eq!(result.points.len(), mesh.vertices.len() + result.contractions_performed);
    }
}
