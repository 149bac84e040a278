//! `Solid` struct and implementations of the `CSG` trait for `Solid`

use crate::errors::ValidationError;
use crate::float_types::{
    Real,
    parry3d::{
        bounding_volume::Aabb,
        query::{Ray, RayCast},
        shape::Triangle,
    },
};
use crate::solid::{bsp::Node, polygon::Polygon, vertex::Vertex};
use crate::traits::CSG;
use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};
use std::{fmt::Debug, sync::OnceLock};
use tracing::{debug, trace};

pub mod bsp;
pub mod plane;
pub mod polygon;
#[cfg(feature = "shapes")]
pub mod shapes;
pub mod vertex;

/// A closed volume described by its boundary polygons.
#[derive(Clone, Debug)]
pub struct Solid<S: Clone + Send + Sync + Debug> {
    /// Boundary polygons, outward facing
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone + Send + Sync + Debug> Default for Solid<S> {
    fn default() -> Self {
        <Self as CSG>::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Build a Solid from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        Solid {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
        }
    }

    pub fn polygons(&self) -> &[Polygon<S>] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices from the solid.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Total area of the boundary polygons.
    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Signed enclosed volume (divergence theorem over the fan triangles).
    ///
    /// Negative for an inside-out solid such as the result of [`CSG::inverse`].
    pub fn volume(&self) -> Real {
        self.polygons
            .iter()
            .flat_map(Polygon::triangulate)
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Point containment by ray casting.
    ///
    /// The nearest boundary crossing along a fixed ray decides: leaving through
    /// a face (normal along the ray) means the point was inside. With no
    /// crossing at all only an inside-out solid contains the point.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        // off every axis and diagonal so rays rarely graze the edges of
        // axis-aligned geometry
        let dir = Vector3::new(1.0, 1.3, 1.7);
        let ray = Ray::new(*point, dir);
        let iso = Isometry3::identity();

        let mut nearest: Option<(Real, &Polygon<S>)> = None;
        for poly in &self.polygons {
            for [a, b, c] in poly.triangulate() {
                let triangle = Triangle::new(a.pos, b.pos, c.pos);
                if let Some(hit) = triangle.cast_ray_and_get_normal(&iso, &ray, Real::MAX, true) {
                    if nearest.is_none_or(|(toi, _)| hit.time_of_impact < toi) {
                        nearest = Some((hit.time_of_impact, poly));
                    }
                }
            }
        }

        match nearest {
            Some((_, poly)) => poly.plane.normal.dot(&dir) > 0.0,
            None => self.volume() < 0.0,
        }
    }

    /// Build the two operand trees a boolean operation works on.
    fn operand_trees(&self, other: &Solid<S>) -> (Node<S>, Node<S>) {
        let a = Node::from_polygons(&self.polygons);
        let b = Node::from_polygons(&other.polygons);
        trace!(
            a_nodes = a.node_count(),
            a_depth = a.depth(),
            b_nodes = b.node_count(),
            b_depth = b.depth(),
            "built operand trees"
        );
        (a, b)
    }
}

impl<S: Clone + Send + Sync + Debug> CSG for Solid<S> {
    /// Returns a new empty Solid
    fn new() -> Self {
        Solid {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Return a new Solid representing union of the two Solids.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Solid<S>) -> Solid<S> {
        debug!(lhs = self.polygons.len(), rhs = other.polygons.len(), "union");
        if self.is_empty() || other.is_empty() {
            debug!("union with an empty operand returns the other operand");
            let kept = if self.is_empty() { other } else { self };
            return Solid::from_polygons(&kept.polygons);
        }

        let (mut a, mut b) = self.operand_trees(other);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        let result = Solid::from_polygons(&a.all_polygons());
        debug!(polygons = result.polygons.len(), "union done");
        result
    }

    /// Return a new Solid representing the space in `self` that is not in `other`.
    ///
    /// ```text
    /// let c = a.subtract(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn subtract(&self, other: &Solid<S>) -> Solid<S> {
        debug!(lhs = self.polygons.len(), rhs = other.polygons.len(), "subtract");
        if self.is_empty() {
            debug!("subtract from an empty solid is empty");
            return Solid::new();
        }
        if other.is_empty() {
            debug!("subtracting an empty solid returns the minuend");
            return Solid::from_polygons(&self.polygons);
        }

        let (mut a, mut b) = self.operand_trees(other);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        let result = Solid::from_polygons(&a.all_polygons());
        debug!(polygons = result.polygons.len(), "subtract done");
        result
    }

    /// Return a new Solid representing the space both solids share.
    ///
    /// ```text
    /// let c = a.intersect(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersect(&self, other: &Solid<S>) -> Solid<S> {
        debug!(lhs = self.polygons.len(), rhs = other.polygons.len(), "intersect");
        if self.is_empty() || other.is_empty() {
            debug!("intersect with an empty operand is empty");
            return Solid::new();
        }

        let (mut a, mut b) = self.operand_trees(other);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        let result = Solid::from_polygons(&a.all_polygons());
        debug!(polygons = result.polygons.len(), "intersect done");
        result
    }

    /// Return the space in exactly one of the two solids: `(a - b) ∪ (b - a)`.
    fn xor(&self, other: &Solid<S>) -> Solid<S> {
        self.subtract(other).union(&other.subtract(self))
    }

    /// Invert this Solid (flip inside vs. outside)
    fn inverse(&self) -> Solid<S> {
        let mut solid = Solid::from_polygons(&self.polygons);
        for p in &mut solid.polygons {
            p.flip();
        }
        solid
    }

    fn translate_vector(&self, vector: Vector3<Real>) -> Solid<S> {
        let mut solid = Solid::from_polygons(&self.polygons);
        for p in &mut solid.polygons {
            p.translate(&vector);
        }
        solid
    }

    fn rotate(&self, rotation: &UnitQuaternion<Real>) -> Solid<S> {
        let mut solid = Solid::from_polygons(&self.polygons);
        for p in &mut solid.polygons {
            p.rotate(rotation);
        }
        solid
    }

    fn scale(&self, factors: Vector3<Real>) -> Result<Solid<S>, ValidationError> {
        let mut solid = Solid::from_polygons(&self.polygons);
        for p in &mut solid.polygons {
            p.scale(&factors)?;
        }
        Ok(solid)
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    ///
    /// An empty solid yields a degenerate box at the origin.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut vertices = self.polygons.iter().flat_map(|p| p.vertices.iter());
            let Some(first) = vertices.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };
            let (mins, maxs) = vertices.fold((first.pos, first.pos), |(mins, maxs), v| {
                (mins.inf(&v.pos), maxs.sup(&v.pos))
            });
            Aabb::new(mins, maxs)
        })
    }
}
