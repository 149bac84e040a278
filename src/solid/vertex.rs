//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};

/// A vertex of a polygon, holding position, normal and texture coordinate.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Vector2<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`] with a zero texture coordinate.
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non‑unit) normal; it is **copied verbatim**, the
    ///   BSP code only ever looks at polygon planes.
    #[inline]
    pub fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Self::with_uv(pos, normal, Vector2::zeros())
    }

    /// Create a new [`Vertex`] carrying a texture coordinate.
    ///
    /// Components are stored as given; [`Polygon::new`](crate::solid::polygon::Polygon::new)
    /// rejects non-finite positions.
    pub const fn with_uv(pos: Point3<Real>, normal: Vector3<Real>, uv: Vector2<Real>) -> Self {
        Vertex { pos, normal, uv }
    }

    /// Flip vertex normal in place.
    ///
    /// # Example
    /// ```rust
    /// # use nalgebra::{Point3, Vector3};
    /// # use csgbsp::solid::vertex::Vertex;
    /// let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::x());
    /// v.flip();
    /// assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0), "position remains the same");
    /// assert_eq!(v.normal, -Vector3::x(), "the normal is negated");
    /// ```
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Create a new vertex between `self` and `other` by linearly
    /// interpolating every attribute with parameter `t`.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`. The interpolated normal
    /// is not renormalised.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        Vertex {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: self.normal + (other.normal - self.normal) * t,
            uv: self.uv + (other.uv - self.uv) * t,
        }
    }

    /// Move the position by `v`. Normal and texture coordinate are untouched.
    pub fn translate(&mut self, v: &Vector3<Real>) {
        self.pos += *v;
    }

    /// Rotate position and normal about the world origin.
    pub fn rotate(&mut self, rotation: &UnitQuaternion<Real>) {
        self.pos = rotation * self.pos;
        self.normal = rotation * self.normal;
    }

    /// Scale the position component-wise.
    ///
    /// Unless the scale is uniform and positive, the normal is transformed by
    /// the inverse-transpose of the scale matrix (a component-wise division)
    /// and keeps its original length. Callers must reject zero factors
    /// beforehand.
    pub fn scale(&mut self, factors: &Vector3<Real>) {
        self.pos.coords.component_mul_assign(factors);

        let uniform_positive =
            factors.x == factors.y && factors.x == factors.z && factors.x > 0.0;
        if !uniform_positive {
            let len = self.normal.norm();
            let n = self.normal.component_div(factors);
            let n_len = n.norm();
            if n_len > Real::EPSILON {
                self.normal = n * (len / n_len);
            }
        }
    }

    /// Euclidean distance between vertex positions.
    pub fn distance_to(&self, other: &Vertex) -> Real {
        (self.pos - other.pos).norm()
    }

    /// `true` when position, normal and texture coordinate all agree within `eps`.
    pub fn approx_eq(&self, other: &Vertex, eps: Real) -> bool {
        (self.pos - other.pos).amax() <= eps
            && (self.normal - other.normal).amax() <= eps
            && (self.uv - other.uv).amax() <= eps
    }
}
