use std::ops::{Add, Sub, Mul, Div};

use crate::error::{GeomError, GeomResult};

/// Arithmetic shared by [`Vec3`](crate::Vec3) and
/// [`Quaternion`](crate::Quaternion): an inner product and everything
/// derived from it.
pub trait InnerSpace:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    fn dot(self, other: Self) -> f64;

    /// Largest absolute component.
    fn max_abs_component(self) -> f64;

    fn magnitude_sq(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm over every component.
    fn magnitude(self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    /// Divides every component by the magnitude.
    ///
    /// The value is first scaled by its largest component so squaring
    /// neither overflows nor underflows for any finite non-zero input.
    /// Fails with [`GeomError::DegenerateNormalization`] when the value is
    /// zero or has a non-finite component, so a NaN never leaks out of here.
    fn normalize(self) -> GeomResult<Self> {
        let scale = self.max_abs_component();
        if scale == 0.0 || !scale.is_finite() {
            return Err(GeomError::DegenerateNormalization);
        }
        let scaled = self / scale;
        let len = scaled.magnitude();
        if !len.is_finite() {
            return Err(GeomError::DegenerateNormalization);
        }
        Ok(scaled / len)
    }

    fn is_unit(self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() <= tolerance
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }
}
