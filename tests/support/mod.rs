//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use csgbsp::{
    float_types::Real,
    solid::{Solid, polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box(polygons: &[Polygon<()>]) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for v in polygons.iter().flat_map(|p| p.vertices.iter()) {
        for axis in 0..3 {
            bb[axis] = bb[axis].min(v.pos[axis]);
            bb[axis + 3] = bb[axis + 3].max(v.pos[axis]);
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts, None).unwrap()
}

/// Unit cube (radius 0.5) centred on `center`.
pub fn unit_cube(x: Real, y: Real, z: Real) -> Solid<()> {
    Solid::cube(0.5, Point3::new(x, y, z), None).unwrap()
}

/// A `n`³ grid of sample points over `[lo, hi]`³, placed at cell centres.
/// Pick `lo`/`hi` so no sample lands on a face of the solids under test.
pub fn sample_points(lo: Real, hi: Real, n: usize) -> Vec<Point3<Real>> {
    let step = (hi - lo) / n as Real;
    let coord = |i: usize| lo + (i as Real + 0.5) * step;
    let mut points = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point3::new(coord(i), coord(j), coord(k)));
            }
        }
    }
    points
}

/// Sample points where the two solids disagree about containment.
pub fn containment_mismatches(
    a: &Solid<()>,
    b: &Solid<()>,
    points: &[Point3<Real>],
) -> Vec<Point3<Real>> {
    points
        .iter()
        .filter(|p| a.contains_point(p) != b.contains_point(p))
        .copied()
        .collect()
}
