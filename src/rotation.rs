use std::ops::Mul;
use std::fmt;

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::error::GeomResult;
use crate::quaternion::Quaternion;
use crate::space::InnerSpace;
use crate::vector::Vec3;

/// A rotation in 3D, stored as a unit quaternion.
///
/// Every constructor normalizes its input or fails, so `rotate` never has
/// to check anything.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Rotation(Quaternion);

impl Rotation {
    pub const fn identity() -> Self {
        Self(Quaternion::identity())
    }

    /// Renormalizes `q`. Fails if `q` is zero.
    pub fn from_quaternion(q: Quaternion) -> GeomResult<Self> {
        Ok(Self(q.normalize()?))
    }

    pub fn from_axis_angle(axis: Vec3, angle: f64) -> GeomResult<Self> {
        Quaternion::from_axis_angle(axis, angle).map(Self)
    }

    pub fn quaternion(&self) -> Quaternion {
        self.0
    }

    pub fn rotate(&self, vec: Vec3) -> Vec3 {
        self.0.sandwich(vec)
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.conjugate())
    }

    /// Interpolates along the shorter arc between the two rotations.
    ///
    /// `q` and `-q` are the same rotation, so `other` is flipped onto the
    /// hemisphere of `self` before handing the pair to
    /// [`Quaternion::slerp`]. The result is renormalized.
    pub fn slerp(self, other: Rotation, t: f64) -> Self {
        let q = Quaternion::slerp(self.0, self.same_hemisphere(other.0), t);
        // Both endpoints are unit with a non-negative dot product, so every
        // branch of the slerp yields a magnitude of at least 1/sqrt(2).
        Self(q / q.magnitude())
    }

    /// Rotation angle between the two, in `[0, pi]`.
    pub fn angle_to(&self, other: Rotation) -> f64 {
        Quaternion::angle_between(self.0, self.same_hemisphere(other.0))
    }

    fn same_hemisphere(&self, q: Quaternion) -> Quaternion {
        if self.0.dot(q) < 0.0 { -q } else { q }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Rotation {
    type Output = Self;

    /// `a * b` applies `b` first, then `a`.
    fn mul(self, other: Self) -> Self::Output {
        Self(self.0 * other.0)
    }
}

impl Mul<Vec3> for Rotation {
    type Output = Vec3;

    fn mul(self, vec: Vec3) -> Vec3 {
        self.rotate(vec)
    }
}

impl From<Rotation> for Quaternion {
    fn from(rot: Rotation) -> Quaternion {
        rot.0
    }
}

impl TryFrom<Quaternion> for Rotation {
    type Error = crate::GeomError;

    fn try_from(q: Quaternion) -> GeomResult<Self> {
        Self::from_quaternion(q)
    }
}

impl AbsDiffEq for Rotation {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for Rotation {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

impl UlpsEq for Rotation {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.0.ulps_eq(&other.0, epsilon, max_ulps)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
