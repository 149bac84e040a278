// Re-export parry for the crate's float size
pub use parry3d_f64 as parry3d;

/// Scalar type used for every coordinate, normal and offset.
pub type Real = f64;

/// Tolerance used everywhere a signed distance to a plane is compared against
/// zero. Points within `EPSILON` of a plane are classified as lying on it.
pub const EPSILON: Real = 1e-5;

// Pi
/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
