//! Struct and functions for working with convex planar `Polygon`s.

use crate::errors::ValidationError;
use crate::float_types::{
    EPSILON, Real,
    parry3d::bounding_volume::Aabb,
};
use crate::solid::Solid;
use crate::solid::plane::Plane;
use crate::solid::vertex::Vertex;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::fmt::Debug;

/// A convex, planar polygon with counter-clockwise winding when seen from the
/// side its plane normal points to.
///
/// `metadata` is an opaque provenance tag. It is copied onto every fragment a
/// split produces and otherwise ignored by the boolean operators.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon from a convex, planar loop of at least three vertices.
    ///
    /// The plane is derived from the first three vertices, or from Newell's
    /// normal over the whole loop when those three are collinear.
    ///
    /// ## Errors
    /// * [`ValidationError::TooFewPoints`] for fewer than three vertices
    /// * [`ValidationError::InvalidCoordinate`] for NaN or infinite positions
    /// * [`ValidationError::DegeneratePlane`] if the whole loop is collinear
    /// * [`ValidationError::NonPlanar`] if a vertex lies more than `EPSILON` off the plane
    /// * [`ValidationError::NonConvex`] if the loop turns against the plane normal
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewPoints {
                count: vertices.len(),
            });
        }
        if let Some(v) = vertices.iter().find(|v| !v.pos.coords.iter().all(|c| c.is_finite())) {
            return Err(ValidationError::InvalidCoordinate(v.pos));
        }

        let plane = plane_from_vertices(&vertices)?;

        for v in &vertices {
            let distance = plane.signed_distance(&v.pos);
            if distance.abs() > EPSILON {
                return Err(ValidationError::NonPlanar {
                    point: v.pos,
                    distance,
                });
            }
        }

        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i].pos;
            let b = vertices[(i + 1) % n].pos;
            let c = vertices[(i + 2) % n].pos;
            if (b - a).cross(&(c - b)).dot(&plane.normal) < -EPSILON {
                return Err(ValidationError::NonConvex(b));
            }
        }

        Ok(Polygon {
            vertices,
            plane,
            metadata,
        })
    }

    /// Build a split fragment of `self`: the fragment lies in the same plane
    /// and carries the same metadata.
    pub(crate) fn fragment(&self, vertices: Vec<Vertex>) -> Self {
        Polygon {
            vertices,
            plane: self.plane.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Reverse the winding, flip every vertex normal and flip the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    pub fn translate(&mut self, v: &Vector3<Real>) {
        for vert in &mut self.vertices {
            vert.translate(v);
        }
        self.plane.translate(v);
    }

    /// Rotate about the world origin; the plane is rotated analytically.
    pub fn rotate(&mut self, rotation: &UnitQuaternion<Real>) {
        for vert in &mut self.vertices {
            vert.rotate(rotation);
        }
        self.plane.rotate(rotation);
    }

    /// Scale component-wise about the world origin and re-derive the plane
    /// from the scaled positions.
    ///
    /// A mirroring scale (negative determinant) reverses the vertex order so
    /// the plane keeps facing outward.
    ///
    /// ## Errors
    /// [`ValidationError::DegenerateScale`] if any factor is zero or not finite.
    pub fn scale(&mut self, factors: &Vector3<Real>) -> Result<(), ValidationError> {
        if factors.iter().any(|f| *f == 0.0 || !f.is_finite()) {
            return Err(ValidationError::DegenerateScale(*factors));
        }

        let mut vertices = self.vertices.clone();
        for vert in &mut vertices {
            vert.scale(factors);
        }
        if factors.x * factors.y * factors.z < 0.0 {
            vertices.reverse();
        }

        // leave `self` untouched on error
        self.plane = plane_from_vertices(&vertices)?;
        self.vertices = vertices;
        Ok(())
    }

    /// Extrude this polygon along its plane normal by `distance`, returning a
    /// closed prism whose faces all point outward.
    ///
    /// `polygons[0]` is the base cap, `polygons[1]` the far cap (offset by
    /// `distance`), followed by two side triangles per edge.
    ///
    /// ## Errors
    /// [`ValidationError::DegenerateExtrusion`] if `|distance| <= EPSILON`, or
    /// any validation error raised while building the side triangles.
    pub fn extrude(&self, distance: Real) -> Result<Solid<S>, ValidationError> {
        if distance.abs() <= EPSILON || !distance.is_finite() {
            return Err(ValidationError::DegenerateExtrusion { distance });
        }

        let dir = self.plane.normal * distance;

        let mut far = self.clone();
        far.translate(&dir);

        let mut base = self.clone();
        base.flip();

        let n = self.vertices.len();
        let mut polygons = Vec::with_capacity(2 + 2 * n);
        polygons.push(base);
        polygons.push(far.clone());

        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b) = (self.vertices[i], self.vertices[j]);
            let (a_far, b_far) = (far.vertices[i], far.vertices[j]);

            for tri in [[a, b, a_far], [b, b_far, a_far]] {
                let mut side = Polygon::new(tri.to_vec(), self.metadata.clone())?;
                side.set_new_normal();
                polygons.push(side);
            }
        }

        if distance < 0.0 {
            for p in &mut polygons {
                p.flip();
            }
        }

        Ok(Solid::from_polygons(&polygons))
    }

    /// Fan-triangulate the (convex) vertex loop.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let v0 = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|w| [v0, w[0], w[1]])
            .collect()
    }

    /// Surface area of the polygon.
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() * 0.5)
            .sum()
    }

    /// Arithmetic mean of the vertex positions.
    pub fn centroid(&self) -> Point3<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Axis-aligned bounding box of the vertex positions.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins = mins.inf(&v.pos);
            maxs = maxs.sup(&v.pos);
        }
        Aabb::new(mins, maxs)
    }

    /// Assign the plane normal to every vertex normal (flat shading).
    pub fn set_new_normal(&mut self) {
        let normal = self.plane.normal;
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }
}

/// Derive a plane from a vertex loop: the first three vertices if they are
/// not collinear, Newell's normal over the whole loop otherwise.
fn plane_from_vertices(vertices: &[Vertex]) -> Result<Plane, ValidationError> {
    if let Ok(plane) = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos) {
        return Ok(plane);
    }

    // relative to the first vertex, so far-from-origin loops keep their precision
    let origin = vertices[0].pos;
    let (newell, perimeter) = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .fold((Vector3::zeros(), 0.0), |(acc, len), (curr, next)| {
            let (a, b) = (curr.pos - origin, next.pos - origin);
            (acc + a.cross(&b), len + (next.pos - curr.pos).norm())
        });
    let len = newell.norm();
    if len <= Real::EPSILON * perimeter * perimeter || !len.is_finite() {
        return Err(ValidationError::DegeneratePlane(origin));
    }
    let normal = newell / len;
    Ok(Plane {
        normal,
        offset: normal.dot(&origin.coords),
    })
}
