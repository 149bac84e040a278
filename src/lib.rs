//! **Constructive Solid Geometry (CSG)** on polygonal solids, built around
//! Boolean operations (*union*, *subtract*, *intersect*, *xor*, *inverse*) on
//! sets of convex polygons stored in [BSP](solid::bsp) trees.
//!
//! A [`Solid`] is a flat list of outward-facing convex [`Polygon`]s. Every
//! operation in [`CSG`] treats its operands as immutable values and returns a
//! new solid.
//!
//! ```
//! use csgbsp::{CSG, Solid};
//! use nalgebra::Point3;
//!
//! let a: Solid<()> = Solid::cube(0.5, Point3::origin(), None).unwrap();
//! let b = Solid::cube(0.5, Point3::new(0.5, 0.0, 0.0), None).unwrap();
//!
//! let both = a.intersect(&b);
//! assert!((both.volume() - 0.5).abs() < 1e-9);
//! ```
//!
//! # Features
//! #### Default
//! - **shapes**: cube, cuboid, sphere, cylinder, cone and quad generators
//!
//! The crate logs through [`tracing`]; install a subscriber to see boolean
//! operation and tree-building events.

#![forbid(unsafe_code)]
#![warn(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod solid;
pub mod traits;

pub use errors::ValidationError;
pub use solid::Solid;
pub use solid::plane::Plane;
pub use solid::polygon::Polygon;
pub use solid::vertex::Vertex;
pub use traits::CSG;
