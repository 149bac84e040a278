//! Struct and functions for working with planes: point classification and
//! polygon splitting.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::solid::polygon::Polygon;
use crate::solid::vertex::Vertex;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::fmt::Debug;

// Plane classification bits. A polygon's class is the OR of its vertex classes.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Output of [`Plane::split_polygon`]: `(coplanar_front, coplanar_back, front, back)`.
pub type SplitBuckets<S> = (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>);

/// A plane in 3D space, represented as `normal · p = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Normal vector; unit length unless a caller built the plane by hand.
    pub normal: Vector3<Real>,
    /// Signed distance from the origin along `normal`.
    pub offset: Real,
}

impl Plane {
    /// Create a plane from a normal and offset, normalising both by `|normal|`.
    pub fn from_normal(normal: Vector3<Real>, offset: Real) -> Self {
        let len = normal.norm();
        if len < Real::EPSILON {
            return Plane { normal, offset };
        }
        Plane {
            normal: normal / len,
            offset: offset / len,
        }
    }

    /// Create a plane through three points. The normal follows the right-hand
    /// rule: `normalize((b - a) × (c - a))`.
    ///
    /// ## Errors
    /// [`ValidationError::DegeneratePlane`] if the points are collinear or coincident.
    /// Collinearity is judged relative to the edge lengths, so tiny but
    /// well-shaped triangles are accepted.
    pub fn from_points(
        a: Point3<Real>,
        b: Point3<Real>,
        c: Point3<Real>,
    ) -> Result<Self, ValidationError> {
        let (ab, ac) = (b - a, c - a);
        let n = ab.cross(&ac);
        let len = n.norm();
        if len <= Real::EPSILON * ab.norm() * ac.norm() || !len.is_finite() {
            return Err(ValidationError::DegeneratePlane(a));
        }
        let normal = n / len;
        Ok(Plane {
            normal,
            offset: normal.dot(&a.coords),
        })
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.offset
    }

    /// Flip the plane in place: the front half-space becomes the back one.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Signed distance from `point` to the plane, in units of `|normal|`.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`] using the
    /// `EPSILON` tolerance band.
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon; returns the OR of its vertex classes.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Move the plane by `v`. Assumes a unit normal.
    pub fn translate(&mut self, v: &Vector3<Real>) {
        self.offset += self.normal.dot(v);
    }

    /// Rotate the plane about the world origin. The offset is invariant.
    pub fn rotate(&mut self, rotation: &UnitQuaternion<Real>) {
        self.normal = rotation * self.normal;
    }

    /// Splits `polygon` by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Coplanar polygons are routed by orientation (same-facing goes to
    /// `coplanar_front`), polygons wholly on one side are passed through
    /// unchanged, and spanning polygons are cut into a front and a back
    /// fragment. Fragments with fewer than three vertices are dropped.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> SplitBuckets<S> {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let (f, b) = self.split_spanning(polygon, &types);
                if f.len() >= 3 {
                    front.push(polygon.fragment(f));
                } else {
                    tracing::trace!(vertices = f.len(), "dropped degenerate front fragment");
                }
                if b.len() >= 3 {
                    back.push(polygon.fragment(b));
                } else {
                    tracing::trace!(vertices = b.len(), "dropped degenerate back fragment");
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }

    /// Walk every edge of a spanning polygon and distribute its vertices into
    /// front and back loops, inserting one shared vertex per true crossing.
    fn split_spanning<S: Clone>(
        &self,
        polygon: &Polygon<S>,
        types: &[i8],
    ) -> (Vec<Vertex>, Vec<Vertex>) {
        let n = polygon.vertices.len();
        let mut f = Vec::with_capacity(n + 1);
        let mut b = Vec::with_capacity(n + 1);

        for i in 0..n {
            let j = (i + 1) % n;
            let (ti, tj) = (types[i], types[j]);
            let vi = &polygon.vertices[i];
            let vj = &polygon.vertices[j];

            if ti != BACK {
                f.push(*vi);
            }
            if ti != FRONT {
                b.push(*vi);
            }

            if (ti | tj) == SPANNING {
                let denom = self.normal.dot(&(vj.pos - vi.pos));
                // an edge parallel to the plane cannot cross it; treat it as on-plane
                if denom.abs() > EPSILON {
                    let t = (self.offset - self.normal.dot(&vi.pos.coords)) / denom;
                    let v = vi.interpolate(vj, t);
                    f.push(v);
                    b.push(v);
                }
            }
        }

        (f, b)
    }
}
