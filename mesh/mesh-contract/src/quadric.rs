//! Quadric error metric.
//!
//! A quadric measures the sum of squared distances from a point to a set of
//! planes. Quadrics add and subtract coefficient-wise, which is what lets
//! the table patch vertex and edge errors after a contraction instead of
//! recomputing them.

// Algorithm uses standard mathematical variable names
#![allow(clippy::many_single_char_names)]

use std::ops::{Add, AddAssign, Sub, SubAssign};

use mesh_types::{Point3, Triangle};
use nalgebra::Matrix4;

/// Determinants below this are treated as a singular 3×3 system.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Quadric error matrix (4x4 symmetric matrix stored as 10 values).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quadric {
    // Symmetric 4x4 matrix stored as upper triangle:
    // [a b c d]
    // [  e f g]
    // [    h i]
    // [      j]
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    i: f64,
    j: f64,
}

impl Quadric {
    /// The zero quadric (no planes).
    pub const ZERO: Self = Self {
        a: 0.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 0.0,
        f: 0.0,
        g: 0.0,
        h: 0.0,
        i: 0.0,
        j: 0.0,
    };

    /// Create a quadric from a plane equation (ax + by + cz + d = 0).
    ///
    /// The plane should have a normalized normal vector (a, b, c). The result
    /// is the outer product of `[a, b, c, d]` with itself.
    #[must_use]
    pub fn from_plane(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            a: a * a,
            b: a * b,
            c: a * c,
            d: a * d,
            e: b * b,
            f: b * c,
            g: b * d,
            h: c * c,
            i: c * d,
            j: d * d,
        }
    }

    /// Quadric of a triangle's supporting plane.
    ///
    /// A degenerate triangle has no plane and contributes nothing.
    #[must_use]
    pub fn from_triangle(triangle: &Triangle) -> Self {
        triangle
            .plane()
            .map_or(Self::ZERO, |(n, d)| Self::from_plane(n.x, n.y, n.z, d))
    }

    /// Evaluate the quadric error `vᵀ Q v` for `v = [x, y, z, 1]`.
    ///
    /// Returns the sum of squared distances from the point to all planes
    /// that contributed to this quadric.
    #[must_use]
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let (x, y, z) = (p.x, p.y, p.z);
        x.mul_add(
            x.mul_add(self.a, 2.0 * y.mul_add(self.b, z.mul_add(self.c, self.d))),
            y.mul_add(
                y.mul_add(self.e, 2.0 * z.mul_add(self.f, self.g)),
                z.mul_add(z.mul_add(self.h, 2.0 * self.i), self.j),
            ),
        )
    }

    /// Determinant of the upper-left 3×3 block.
    #[must_use]
    pub fn minor_determinant(&self) -> f64 {
        self.a.mul_add(
            self.f.mul_add(-self.f, self.e * self.h),
            self.b.mul_add(
                self.c.mul_add(self.f, -self.b * self.h),
                self.c * self.e.mul_add(-self.c, self.b * self.f),
            ),
        )
    }

    /// Find the point that minimizes the error, or `None` if the 3×3 block
    /// is singular.
    ///
    /// Solves `A p = -v` where `A` is the upper-left block and `v` the first
    /// three entries of the last column.
    #[must_use]
    pub fn optimal_point(&self) -> Option<Point3<f64>> {
        // [a b c] [x]   [-d]
        // [b e f] [y] = [-g]
        // [c f h] [z]   [-i]
        let det = self.minor_determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;

        let m00 = self.f.mul_add(-self.f, self.e * self.h) * inv_det;
        let m01 = self.c.mul_add(self.f, -self.b * self.h) * inv_det;
        let m02 = self.c.mul_add(-self.e, self.b * self.f) * inv_det;
        let m11 = self.c.mul_add(-self.c, self.a * self.h) * inv_det;
        let m12 = self.b.mul_add(self.c, -self.a * self.f) * inv_det;
        let m22 = self.b.mul_add(-self.b, self.a * self.e) * inv_det;

        let x = m00.mul_add(-self.d, m01.mul_add(-self.g, m02 * -self.i));
        let y = m01.mul_add(-self.d, m11.mul_add(-self.g, m12 * -self.i));
        let z = m02.mul_add(-self.d, m12.mul_add(-self.g, m22 * -self.i));

        Some(Point3::new(x, y, z))
    }

    /// Expand to the full symmetric 4×4 matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::new(
            self.a, self.b, self.c, self.d, //
            self.b, self.e, self.f, self.g, //
            self.c, self.f, self.h, self.i, //
            self.d, self.g, self.i, self.j,
        )
    }

    /// Largest absolute coefficient difference to `other`.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.coefficients()
            .iter()
            .zip(other.coefficients())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    const fn coefficients(&self) -> [f64; 10] {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i, self.j,
        ]
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
        self.e += other.e;
        self.f += other.f;
        self.g += other.g;
        self.h += other.h;
        self.i += other.i;
        self.j += other.j;
    }
}

impl SubAssign for Quadric {
    fn sub_assign(&mut self, other: Self) {
        self.a -= other.a;
        self.b -= other.b;
        self.c -= other.c;
        self.d -= other.d;
        self.e -= other.e;
        self.f -= other.f;
        self.g -= other.g;
        self.h -= other.h;
        self.i -= other.i;
        self.j -= other.j;
    }
}

impl Add for Quadric {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sub for Quadric {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl std::iter::Sum for Quadric {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
