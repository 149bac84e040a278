use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use nalgebra::{UnitQuaternion, Vector3};

/// Boolean operations + transformations
///
/// Every operation treats `self` and `other` as immutable values and returns
/// a new solid.
pub trait CSG: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn subtract(&self, other: &Self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
    fn xor(&self, other: &Self) -> Self;

    /// Complement: swap inside and outside everywhere in space.
    fn inverse(&self) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self;

    /// Returns a new Self rotated about the world origin.
    fn rotate(&self, rotation: &UnitQuaternion<Real>) -> Self;

    /// Returns a new Self scaled component-wise about the world origin.
    ///
    /// ## Errors
    /// [`ValidationError::DegenerateScale`] if any factor is zero or not finite.
    fn scale(&self, factors: Vector3<Real>) -> Result<Self, ValidationError>;

    fn bounding_box(&self) -> Aabb;

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Rotates by Euler angles in radians: first about Z, then Y, then X,
    /// all about the world axes.
    fn rotate_euler(&self, x_rad: Real, y_rad: Real, z_rad: Real) -> Self {
        let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x_rad);
        let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y_rad);
        let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z_rad);

        self.rotate(&(rx * ry * rz))
    }

    /// Returns a new solid translated so that its bounding-box center is at the origin (0,0,0).
    fn center(&self) -> Self {
        let aabb = self.bounding_box();
        let center = aabb.center();
        self.translate(-center.x, -center.y, -center.z)
    }

    /// Translates the object so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }
}
