//! Validation errors

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// All the possible validation issues we might encounter while constructing
/// or transforming geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewPoints) A polygon has fewer than 3 vertices
    #[error("(TooFewPoints) A polygon needs at least 3 vertices, got {count}")]
    TooFewPoints { count: usize },
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// (DegeneratePlane) Three points are collinear or coincident
    #[error("(DegeneratePlane) Degenerate polygon: vertices do not define a plane at: {0}")]
    DegeneratePlane(Point3<Real>),
    /// (NonPlanar) A vertex lies off the polygon's plane
    #[error("(NonPlanar) Vertex {point} lies {distance} away from the polygon's plane")]
    NonPlanar { point: Point3<Real>, distance: Real },
    /// (NonConvex) The vertex loop turns against the polygon's normal
    #[error("(NonConvex) The polygon is not convex at: {0}")]
    NonConvex(Point3<Real>),
    /// (DegenerateScale) A scale factor is zero
    #[error("(DegenerateScale) Scale factors {0} collapse the geometry")]
    DegenerateScale(Vector3<Real>),
    /// (DegenerateExtrusion) An extrusion distance is zero
    #[error("(DegenerateExtrusion) Cannot extrude by {distance}")]
    DegenerateExtrusion { distance: Real },
    /// In general, anything else
    #[error("{}{}", .0, at_suffix(.1))]
    Other(String, Option<Point3<Real>>),
}

fn at_suffix(point: &Option<Point3<Real>>) -> String {
    point.map(|p| format!(" at: {p}")).unwrap_or_default()
}
