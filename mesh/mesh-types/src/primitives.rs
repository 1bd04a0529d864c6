//! Closed reference surfaces.
//!
//! Every primitive here is a closed, orientable 2-manifold of genus zero
//! with counter-clockwise winding viewed from outside, which makes them the
//! natural fixtures for topology-preserving simplification.

use std::collections::HashMap;

use crate::{IndexedMesh, Vertex};

/// Create a unit cube mesh from (0,0,0) to (1,1,1).
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertices.len(), 8);
/// assert_eq!(cube.faces.len(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(8, 12);

    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0)); // 0
    mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0)); // 1
    mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0)); // 2
    mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0)); // 3
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0)); // 4
    mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 1.0)); // 5
    mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 1.0)); // 6
    mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 1.0)); // 7

    // Bottom face (z=0)
    mesh.faces.push([0, 2, 1]);
    mesh.faces.push([0, 3, 2]);

    // Top face (z=1)
    mesh.faces.push([4, 5, 6]);
    mesh.faces.push([4, 6, 7]);

    // Front face (y=0)
    mesh.faces.push([0, 1, 5]);
    mesh.faces.push([0, 5, 4]);

    // Back face (y=1)
    mesh.faces.push([3, 7, 6]);
    mesh.faces.push([3, 6, 2]);

    // Left face (x=0)
    mesh.faces.push([0, 4, 7]);
    mesh.faces.push([0, 7, 3]);

    // Right face (x=1)
    mesh.faces.push([1, 2, 6]);
    mesh.faces.push([1, 6, 5]);

    mesh
}

/// Create a regular tetrahedron inscribed in the cube `[-1, 1]^3`.
///
/// This is the smallest closed triangulated surface: no edge of it can be
/// contracted without changing its topology.
///
/// # Example
///
/// ```
/// use mesh_types::unit_tetrahedron;
///
/// let tet = unit_tetrahedron();
/// assert_eq!(tet.vertices.len(), 4);
/// assert_eq!(tet.faces.len(), 4);
/// ```
#[must_use]
pub fn unit_tetrahedron() -> IndexedMesh {
    IndexedMesh::from_parts(
        vec![
            Vertex::from_coords(1.0, 1.0, 1.0),
            Vertex::from_coords(1.0, -1.0, -1.0),
            Vertex::from_coords(-1.0, 1.0, -1.0),
            Vertex::from_coords(-1.0, -1.0, 1.0),
        ],
        vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
    )
}

/// Create a regular octahedron with vertices on the unit axes.
///
/// Vertex order is `+x, -x, +y, -y, +z, -z`.
///
/// # Example
///
/// ```
/// use mesh_types::unit_octahedron;
///
/// let octa = unit_octahedron();
/// assert_eq!(octa.vertices.len(), 6);
/// assert_eq!(octa.faces.len(), 8);
/// ```
#[must_use]
pub fn unit_octahedron() -> IndexedMesh {
    IndexedMesh::from_parts(
        vec![
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(-1.0, 0.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
            Vertex::from_coords(0.0, -1.0, 0.0),
            Vertex::from_coords(0.0, 0.0, 1.0),
            Vertex::from_coords(0.0, 0.0, -1.0),
        ],
        vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

/// Create a unit icosphere by repeated 4-to-1 subdivision of an icosahedron.
///
/// Level `n` has `20 * 4^n` triangles; every vertex lies on the unit sphere.
///
/// # Example
///
/// ```
/// use mesh_types::icosphere;
///
/// assert_eq!(icosphere(0).faces.len(), 20);
/// assert_eq!(icosphere(2).faces.len(), 320);
/// ```
#[must_use]
pub fn icosphere(subdivisions: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(12, 20);

    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;

    let ico_verts = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];

    for v in &ico_verts {
        let len = v[2].mul_add(v[2], v[0].mul_add(v[0], v[1] * v[1])).sqrt();
        mesh.vertices
            .push(Vertex::from_coords(v[0] / len, v[1] / len, v[2] / len));
    }

    let ico_faces: [[u32; 3]; 20] = [
        [0, 2, 1],
        [3, 1, 2],
        [3, 5, 4],
        [3, 4, 8],
        [0, 7, 6],
        [0, 6, 9],
        [4, 11, 10],
        [6, 10, 11],
        [2, 9, 5],
        [11, 5, 9],
        [1, 8, 7],
        [10, 7, 8],
        [3, 2, 5],
        [3, 8, 1],
        [0, 9, 2],
        [0, 1, 7],
        [6, 11, 9],
        [6, 7, 10],
        [4, 5, 11],
        [4, 10, 8],
    ];
    mesh.faces.extend_from_slice(&ico_faces);

    for _ in 0..subdivisions {
        mesh = subdivide_sphere(&mesh);
    }

    mesh
}

fn subdivide_sphere(mesh: &IndexedMesh) -> IndexedMesh {
    let mut new_mesh = IndexedMesh::with_capacity(mesh.vertices.len() * 4, mesh.faces.len() * 4);
    new_mesh.vertices.clone_from(&mesh.vertices);

    let mut edge_midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for &[v0, v1, v2] in &mesh.faces {
        let m01 = get_midpoint(v0, v1, &mut new_mesh.vertices, &mut edge_midpoints);
        let m12 = get_midpoint(v1, v2, &mut new_mesh.vertices, &mut edge_midpoints);
        let m20 = get_midpoint(v2, v0, &mut new_mesh.vertices, &mut edge_midpoints);

        new_mesh.faces.push([v0, m01, m20]);
        new_mesh.faces.push([v1, m12, m01]);
        new_mesh.faces.push([v2, m20, m12]);
        new_mesh.faces.push([m01, m12, m20]);
    }

    new_mesh
}

#[allow(clippy::cast_possible_truncation)]
fn get_midpoint(
    v1: u32,
    v2: u32,
    vertices: &mut Vec<Vertex>,
    edge_midpoints: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };

    if let Some(&idx) = edge_midpoints.get(&key) {
        return idx;
    }

    let p1 = vertices[v1 as usize].position;
    let p2 = vertices[v2 as usize].position;

    let mx = f64::midpoint(p1.x, p2.x);
    let my = f64::midpoint(p1.y, p2.y);
    let mz = f64::midpoint(p1.z, p2.z);
    let len = mz.mul_add(mz, mx.mul_add(mx, my * my)).sqrt();

    let idx = vertices.len() as u32;
    vertices.push(Vertex::from_coords(mx / len, my / len, mz / len));
    edge_midpoints.insert(key, idx);
    idx
}
