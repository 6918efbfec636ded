use std::ops::{Neg, Add, Sub, Mul, Div};
use std::fmt;

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use log::debug;

use crate::EPSILON;
use crate::error::{GeomError, GeomResult};
use crate::space::InnerSpace;
use crate::vector::Vec3;

/// Largest deviation from unit magnitude `rotate` accepts.
pub const UNIT_TOLERANCE: f64 = 1e-6;

/// Below this `sin(θ/2)` slerp falls back to the plain midpoint.
const SLERP_SIN_THRESHOLD: f64 = 0.001;

/// Scalar-first quaternion `w + xi + yj + zk`.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Wraps a 3-vector as a pure quaternion (w = 0).
    pub fn from_vector(vec: Vec3) -> Self {
        Self::new(0.0, vec.x, vec.y, vec.z)
    }

    /// The x, y, z part.
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Unit rotation of `angle` radians about `axis`. The axis does not
    /// need to be normalized, but it must not be zero.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> GeomResult<Self> {
        let axis = axis.normalize()?;
        let (s, c) = (angle / 2.0).sin_cos();
        Ok(Self::new(c, axis.x * s, axis.y * s, axis.z * s))
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Cross product of the vector parts. The w components are ignored and
    /// the result always has w = 0.
    pub fn cross(&self, other: Quaternion) -> Self {
        Self::from_vector(self.vector().cross(other.vector()))
    }

    /// Rotates `vec` by the sandwich product `q * (0, vec) * conj(q)`.
    ///
    /// `self` must be a unit quaternion. Use [`Rotation`](crate::Rotation)
    /// to get that guarantee from the type instead.
    pub fn rotate(&self, vec: Vec3) -> GeomResult<Vec3> {
        let magnitude = self.magnitude();
        if (magnitude - 1.0).abs() > UNIT_TOLERANCE {
            return Err(GeomError::NotUnitQuaternion { magnitude });
        }
        Ok(self.sandwich(vec))
    }

    pub(crate) fn sandwich(&self, vec: Vec3) -> Vec3 {
        (*self * Self::from_vector(vec) * self.conjugate()).vector()
    }

    /// Spherical linear interpolation from `q1` (t = 0) to `q2` (t = 1).
    ///
    /// There is no shortest-path correction. When `|q1 · q2| >= 1` the
    /// endpoints are treated as coincident and `q1` is returned for every
    /// `t`. When the half angle is tiny the unnormalized midpoint is
    /// returned instead. `t` is not clamped.
    pub fn slerp(q1: Quaternion, q2: Quaternion, t: f64) -> Self {
        let cos_half_theta = q1.dot(q2);
        if cos_half_theta.abs() >= 1.0 {
            debug!("slerp endpoints coincide (cos = {cos_half_theta}), returning start");
            return q1;
        }

        let half_theta = cos_half_theta.acos();
        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        if sin_half_theta.abs() < SLERP_SIN_THRESHOLD {
            debug!("slerp endpoints nearly parallel, using midpoint");
            return q1 * 0.5 + q2 * 0.5;
        }

        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        q1 * ratio_a + q2 * ratio_b
    }

    /// `2 * acos(q1 · q2)`, with the dot product clamped into the domain
    /// of `acos`.
    pub fn angle_between(q1: Quaternion, q2: Quaternion) -> f64 {
        2.0 * q1.dot(q2).clamp(-1.0, 1.0).acos()
    }

    /// Component-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: Quaternion) -> bool {
        self.abs_diff_eq(&other, EPSILON)
    }
}

impl InnerSpace for Quaternion {
    fn dot(self, other: Quaternion) -> f64 {
        self.w*other.w + self.x*other.x + self.y*other.y + self.z*other.z
    }

    fn max_abs_component(self) -> f64 {
        self.w.abs().max(self.vector().max_abs_component())
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.w + other.w, self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.w - other.w, self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::new(self.w * other, self.x * other, self.y * other, self.z * other)
    }
}

impl Div<f64> for Quaternion {
    type Output = Self;

    fn div(self, other: f64) -> Self::Output {
        Self::new(self.w / other, self.x / other, self.y / other, self.z / other)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. Not commutative.
    fn mul(self, other: Self) -> Self::Output {
        let (w1, x1, y1, z1) = (self.w, self.x, self.y, self.z);
        let (w2, x2, y2, z2) = (other.w, other.x, other.y, other.z);

        Self::new(
            w1*w2 - x1*x2 - y1*y2 - z1*z2,
            w1*x2 + x1*w2 + y1*z2 - z1*y2,
            w1*y2 - x1*z2 + y1*w2 + z1*x2,
            w1*z2 + x1*y2 - y1*x2 + z1*w2,
        )
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(arr: [f64; 4]) -> Quaternion {
        Quaternion::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> [f64; 4] {
        [q.w, q.x, q.y, q.z]
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.vector().abs_diff_eq(&other.vector(), epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.vector().relative_eq(&other.vector(), epsilon, max_relative)
    }
}

impl UlpsEq for Quaternion {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.w.ulps_eq(&other.w, epsilon, max_ulps)
            && self.vector().ulps_eq(&other.vector(), epsilon, max_ulps)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}


#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use cgmath::Rotation as _;

    use super::*;

    fn to_cgmath(q: Quaternion) -> cgmath::Quaternion<f64> {
        cgmath::Quaternion::new(q.w, q.x, q.y, q.z)
    }

    fn sample_rotations() -> Vec<Quaternion> {
        vec![
            Quaternion::identity(),
            Quaternion::new(0.0, 1.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.7).unwrap(),
            Quaternion::from_axis_angle(Vec3::new(-4.0, 0.5, 2.0), 2.9).unwrap(),
            Quaternion::from_axis_angle(Vec3::unit_z(), -1.2).unwrap(),
        ]
    }

    #[test]
    fn add() {
        let q1 = Quaternion::new(0.0, 1.0, 2.0, 3.0);
        let q2 = Quaternion::new(0.0, 4.0, 5.0, 6.0);
        assert_eq!(q1 + q2, Quaternion::new(0.0, 5.0, 7.0, 9.0));
        assert_eq!(q2 - q1, Quaternion::new(0.0, 3.0, 3.0, 3.0));
        assert_eq!(q1 * 2.0, Quaternion::new(0.0, 2.0, 4.0, 6.0));
    }

    #[test]
    fn dot_product() {
        let q1 = Quaternion::new(0.0, 1.0, 2.0, 3.0);
        let q2 = Quaternion::new(0.0, 4.0, 5.0, 6.0);
        assert_eq!(q1.dot(q2), 32.0);
        assert_eq!(Quaternion::new(2.0, 0.0, 0.0, 0.0).dot(Quaternion::new(3.0, 1.0, 0.0, 0.0)), 6.0);
    }

    #[test]
    fn cross_product() {
        let q1 = Quaternion::new(0.0, 1.0, 2.0, 3.0);
        let q2 = Quaternion::new(0.0, 4.0, 5.0, 6.0);
        assert_eq!(q1.cross(q2), Quaternion::new(0.0, -3.0, 6.0, -3.0));
        // w is ignored
        assert_eq!(Quaternion::new(7.0, 1.0, 2.0, 3.0).cross(q2), q1.cross(q2));
    }

    #[test]
    fn hamilton_basis() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
        assert_eq!(i * j * k, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn product_with_conjugate_is_squared_norm() {
        for q in [
            Quaternion::new(1.0, 2.0, 3.0, 4.0),
            Quaternion::new(-0.5, 0.25, 8.0, -3.0),
            Quaternion::new(0.0, 0.0, 0.0, 0.0),
        ] {
            let p = q * q.conjugate();
            assert_relative_eq!(p.w, q.magnitude_sq(), max_relative = 1e-12);
            assert_abs_diff_eq!(p.vector(), Vec3::zero(), epsilon = 1e-12);
        }
    }

    #[test]
    fn normalize() {
        let q = Quaternion::new(1.0, 1.0, 1.0, 1.0).normalize().unwrap();
        assert_eq!(q, Quaternion::new(0.5, 0.5, 0.5, 0.5));
        assert!(matches!(
            Quaternion::default().normalize(),
            Err(GeomError::DegenerateNormalization)
        ));
    }

    #[test]
    fn from_axis_angle_normalizes_axis() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 5.0, 0.0), FRAC_PI_2).unwrap();
        let s = (FRAC_PI_2 / 2.0).sin();
        assert_relative_eq!(q, Quaternion::new(s, 0.0, s, 0.0), epsilon = 1e-12);
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn from_axis_angle_zero_axis_fails() {
        assert!(matches!(
            Quaternion::from_axis_angle(Vec3::zero(), 1.0),
            Err(GeomError::DegenerateNormalization)
        ));
    }

    #[test]
    fn rotate_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vec3::unit_z(), FRAC_PI_2).unwrap();
        let v = q.rotate(Vec3::unit_x()).unwrap();
        assert_abs_diff_eq!(v, Vec3::unit_y(), epsilon = 1e-12);
    }

    #[test]
    fn rotate_half_turn_about_x() {
        let q = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let v = q.rotate(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(v, Vec3::new(1.0, -2.0, -3.0));
    }

    #[test]
    fn rotate_rejects_non_unit() {
        let q = Quaternion::new(0.0, 2.0, 0.0, 0.0);
        match q.rotate(Vec3::unit_y()) {
            Err(GeomError::NotUnitQuaternion { magnitude }) => assert_eq!(magnitude, 2.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rotate_preserves_length() {
        let vecs = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-7.5, 0.1, 4.0),
            Vec3::new(0.0, 0.0, -2.0),
        ];
        for q in sample_rotations() {
            for v in vecs {
                let r = q.rotate(v).unwrap();
                assert_relative_eq!(r.magnitude(), v.magnitude(), max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn rotate_fixes_axis() {
        let axis = Vec3::new(1.0, -2.0, 0.5);
        for angle in [0.3, 1.0, PI, 5.0] {
            let q = Quaternion::from_axis_angle(axis, angle).unwrap();
            let v = axis * 3.0;
            assert_abs_diff_eq!(q.rotate(v).unwrap(), v, epsilon = 1e-12);
        }
    }

    #[test]
    fn rotate_matches_cgmath() {
        let v = Vec3::new(0.3, -1.5, 2.25);
        for q in sample_rotations() {
            let ours = q.rotate(v).unwrap();
            let theirs = to_cgmath(q).rotate_vector(cgmath::Vector3::new(v.x, v.y, v.z));
            assert_abs_diff_eq!(ours, Vec3::new(theirs.x, theirs.y, theirs.z), epsilon = 1e-12);
        }
    }

    #[test]
    fn slerp_endpoints() {
        let q1 = Quaternion::identity();
        let q2 = Quaternion::from_axis_angle(Vec3::unit_z(), FRAC_PI_2).unwrap();
        assert_relative_eq!(Quaternion::slerp(q1, q2, 0.0), q1, epsilon = 1e-12);
        assert_relative_eq!(Quaternion::slerp(q1, q2, 1.0), q2, epsilon = 1e-12);
    }

    #[test]
    fn slerp_halfway() {
        let q1 = Quaternion::identity();
        let q2 = Quaternion::from_axis_angle(Vec3::unit_z(), FRAC_PI_2).unwrap();
        let mid = Quaternion::from_axis_angle(Vec3::unit_z(), FRAC_PI_2 / 2.0).unwrap();
        assert_relative_eq!(Quaternion::slerp(q1, q2, 0.5), mid, epsilon = 1e-12);
    }

    #[test]
    fn slerp_matches_cgmath() {
        let q1 = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.4).unwrap();
        let q2 = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 2.0), 1.9).unwrap();
        assert!(q1.dot(q2) > 0.0);
        for t in [0.1, 0.3, 0.75] {
            let ours = Quaternion::slerp(q1, q2, t);
            let theirs = to_cgmath(q1).slerp(to_cgmath(q2), t);
            let theirs = Quaternion::new(theirs.s, theirs.v.x, theirs.v.y, theirs.v.z);
            assert_abs_diff_eq!(ours, theirs, epsilon = 1e-12);
        }
    }

    #[test]
    fn slerp_with_itself() {
        for q in sample_rotations() {
            for t in [0.0, 0.25, 0.5, 1.0] {
                assert_abs_diff_eq!(Quaternion::slerp(q, q, t), q, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn slerp_coincident_returns_start() {
        // dot >= 1 in magnitude: antipodal pair, start returned for every t
        let q1 = Quaternion::identity();
        let q2 = -q1;
        for t in [0.0, 0.5, 1.0] {
            assert_eq!(Quaternion::slerp(q1, q2, t), q1);
        }
    }

    #[test]
    fn slerp_nearly_parallel_returns_midpoint() {
        let q1 = Quaternion::identity();
        let q2 = Quaternion::from_axis_angle(Vec3::unit_x(), 0.001).unwrap();
        let expected = q1 * 0.5 + q2 * 0.5;
        assert_eq!(Quaternion::slerp(q1, q2, 0.9), expected);
    }

    #[test]
    fn angle_between() {
        for q in sample_rotations() {
            assert_abs_diff_eq!(Quaternion::angle_between(q, q), 0.0, epsilon = 1e-6);
        }
        let q1 = Quaternion::identity();
        let q2 = Quaternion::from_axis_angle(Vec3::unit_y(), 1.25).unwrap();
        assert_relative_eq!(Quaternion::angle_between(q1, q2), 1.25, epsilon = 1e-12);
        // dot slightly above 1 is clamped instead of producing NaN
        let big = Quaternion::new(1.0 + 1e-12, 0.0, 0.0, 0.0);
        assert_eq!(Quaternion::angle_between(big, q1), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(Quaternion::new(1.0, -2.0, 0.5, 3.0).to_string(), "(1, -2, 0.5, 3)");
    }

    #[test]
    fn approx_eq_on_computed_values() {
        let q = Quaternion::from_axis_angle(Vec3::unit_z(), 0.5).unwrap();
        let round_trip = q * q.conjugate();
        assert!(round_trip.approx_eq(Quaternion::identity()));
        assert!(!q.approx_eq(q + Quaternion::new(0.0, 0.0, 0.0, 1e-6)));
    }

    #[test]
    fn array_conversions() {
        let q = Quaternion::from([0.5, -1.0, 2.0, 3.5]);
        assert_eq!(q, Quaternion::new(0.5, -1.0, 2.0, 3.5));
        let arr: [f64; 4] = q.into();
        assert_eq!(arr, [0.5, -1.0, 2.0, 3.5]);
    }

    #[test]
    fn lerp_between_quaternions() {
        let a = Quaternion::new(1.0, 0.0, 2.0, -4.0);
        let b = Quaternion::new(3.0, 2.0, 0.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 0.5), Quaternion::new(2.0, 1.0, 1.0, -2.0));
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn normalize_large_quaternion() {
        let q = Quaternion::new(0.0, 0.0, 4e300, 0.0).normalize().unwrap();
        assert_eq!(q, Quaternion::new(0.0, 0.0, 1.0, 0.0));
    }
}

