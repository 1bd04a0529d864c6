//! Input checks run before any structure is built.

use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, Point3, Vertex};

use crate::element::{Edge, Face};
use crate::error::{SimplifyError, SimplifyResult};

/// Validate a mesh and return its distinct faces in input order.
///
/// # Errors
///
/// See [`validate_parts`].
pub fn validate_input(mesh: &IndexedMesh) -> SimplifyResult<Vec<Face>> {
    let non_finite = mesh.vertices.iter().position(|v| !v.is_finite());
    validate_faces(mesh.vertices.len(), non_finite, &mesh.faces)
}

/// Validate raw points and triangles and return the distinct faces in
/// input order.
///
/// Faces with the same three vertices (in any order) are kept once.
///
/// # Errors
///
/// - [`SimplifyError::EmptyMesh`] / [`SimplifyError::NoFaces`] for empty input
/// - [`SimplifyError::NonFiniteVertex`] for NaN or infinite coordinates
/// - [`SimplifyError::InvalidIndex`] for a face index past the last point
/// - [`SimplifyError::DegenerateFace`] for a face repeating a vertex
/// - [`SimplifyError::NonManifoldEdge`] for an edge in more than two faces
pub fn validate_parts(points: &[Point3<f64>], faces: &[[u32; 3]]) -> SimplifyResult<Vec<Face>> {
    let non_finite = points.iter().position(|&p| !Vertex::new(p).is_finite());
    validate_faces(points.len(), non_finite, faces)
}

fn validate_faces(
    vertex_count: usize,
    non_finite: Option<usize>,
    faces: &[[u32; 3]],
) -> SimplifyResult<Vec<Face>> {
    if vertex_count == 0 {
        return Err(SimplifyError::EmptyMesh);
    }
    if faces.is_empty() {
        return Err(SimplifyError::NoFaces);
    }
    if let Some(bad) = non_finite {
        return Err(SimplifyError::NonFiniteVertex(
            u32::try_from(bad).unwrap_or(u32::MAX),
        ));
    }

    let mut seen = HashSet::with_capacity(faces.len());
    let mut distinct = Vec::with_capacity(faces.len());

    for (i, &[a, b, c]) in faces.iter().enumerate() {
        if let Some(&index) = [a, b, c].iter().find(|&&v| v as usize >= vertex_count) {
            return Err(SimplifyError::InvalidIndex {
                face: i,
                index,
                vertex_count,
            });
        }
        if a == b || b == c || a == c {
            return Err(SimplifyError::DegenerateFace {
                face: i,
                vertices: [a, b, c],
            });
        }
        let face = Face::new(a, b, c);
        if seen.insert(face) {
            distinct.push(face);
        }
    }

    let mut edge_faces: HashMap<Edge, usize> = HashMap::with_capacity(distinct.len() * 3 / 2);
    for face in &distinct {
        for edge in face.edges() {
            *edge_faces.entry(edge).or_insert(0) += 1;
        }
    }
    let mut crowded: Vec<(Edge, usize)> = edge_faces.into_iter().filter(|&(_, n)| n > 2).collect();
    crowded.sort_unstable();
    if let Some(&(edge, count)) = crowded.first() {
        let [a, b] = edge.vertices();
        return Err(SimplifyError::NonManifoldEdge(a, b, count));
    }

    Ok(distinct)
}
