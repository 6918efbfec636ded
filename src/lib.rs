//! Quaternion algebra and the small set of 3D primitives built on it.
//!
//! [`Quaternion`] carries the algebra, [`Rotation`] is a quaternion that is
//! known to be unit length, and [`Line`] and [`Plane`] answer distance,
//! projection, reflection and intersection queries on [`Vec3`] points.
//! [`batch`] rotates JSON point lists.

mod vector;
mod quaternion;
mod rotation;
mod line;
mod plane;
mod space;
pub mod io;
pub mod error;
pub mod batch;
pub mod config;

pub use crate::error::{GeomError, GeomResult};
pub use crate::line::Line;
pub use crate::plane::{Plane, PARALLEL_TOLERANCE};
pub use crate::quaternion::{Quaternion, UNIT_TOLERANCE};
pub use crate::rotation::Rotation;
pub use crate::space::InnerSpace;
pub use crate::vector::Vec3;

/// Tolerance used by the `approx_eq` helpers.
pub const EPSILON: f64 = 1e-9;
