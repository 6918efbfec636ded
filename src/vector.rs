use std::ops::{Neg, Add, AddAssign, Sub, SubAssign, Mul, Div};
use std::iter::Sum;
use std::fmt;

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::EPSILON;
use crate::space::InnerSpace;

/// A plain 3-vector. Points, directions and normals are all `Vec3`.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn cross(&self, vec: Vec3) -> Self {
        Self::new(
            self.y*vec.z - self.z*vec.y,
            self.z*vec.x - self.x*vec.z,
            self.x*vec.y - self.y*vec.x,
        )
    }

    /// Component-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: Vec3) -> bool {
        self.abs_diff_eq(&other, EPSILON)
    }
}

impl InnerSpace for Vec3 {
    fn dot(self, vec: Vec3) -> f64 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z
    }

    fn max_abs_component(self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::new(self.x * other, self.y * other, self.z * other)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, other: f64) -> Self::Output {
        Self::new(self.x / other, self.y / other, self.z / other)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Vec3 {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(vec: Vec3) -> [f64; 3] {
        [vec.x, vec.y, vec.z]
    }
}

impl<'a> Sum<&'a Vec3> for Vec3 {
    fn sum<I>(iter: I) -> Self where I: Iterator<Item = &'a Self> {
        iter.fold(Vec3::zero(), |acc, vec| acc + *vec)
    }
}

impl Sum for Vec3 {
    fn sum<I>(iter: I) -> Self where I: Iterator<Item = Self> {
        iter.fold(Vec3::zero(), |acc, vec| acc + vec)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for Vec3 {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}


#[test]
fn cross_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let cross = v.cross(v2);
    assert!(cross == Vec3::new(-45.0, 0.0, 30.0));
}

#[test]
fn dot_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let dot = v.dot(v2);
    assert!(dot == 53.0);
}

#[test]
fn normalize_test() {
    let v = Vec3::new(3.0, 0.0, 4.0).normalize().unwrap();
    approx::assert_relative_eq!(v, Vec3::new(0.6, 0.0, 0.8));
    approx::assert_relative_eq!(v.magnitude(), 1.0);
}

#[test]
fn normalize_zero_fails() {
    assert!(matches!(
        Vec3::zero().normalize(),
        Err(crate::GeomError::DegenerateNormalization)
    ));
}

#[test]
fn sum_test() {
    let pts = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 1.0), Vec3::unit_z()];
    let total: Vec3 = pts.iter().sum();
    assert!(total == Vec3::new(0.0, 2.5, 5.0));
}

#[test]
fn normalize_extreme_magnitudes() {
    let huge = Vec3::new(1e200, 0.0, 0.0).normalize().unwrap();
    assert!(huge == Vec3::unit_x());

    let tiny = Vec3::new(0.0, 1e-200, -1e-200).normalize().unwrap();
    let h = std::f64::consts::FRAC_1_SQRT_2;
    approx::assert_relative_eq!(tiny, Vec3::new(0.0, h, -h), epsilon = 1e-15);

    assert!(Vec3::new(f64::NAN, 1.0, 0.0).normalize().is_err());
    assert!(Vec3::new(f64::INFINITY, 1.0, 0.0).normalize().is_err());
}

#[test]
fn lerp_test() {
    let a = Vec3::new(1.0, -2.0, 4.0);
    let b = Vec3::new(3.0, 2.0, 0.0);
    assert!(a.lerp(b, 0.0) == a);
    assert!(a.lerp(b, 0.5) == Vec3::new(2.0, 0.0, 2.0));
    assert!(a.lerp(b, 1.0) == b);
}

#[test]
fn approx_eq_test() {
    let rot = crate::Rotation::from_axis_angle(Vec3::unit_z(), std::f64::consts::FRAC_PI_2).unwrap();
    let v = rot.rotate(Vec3::new(1.0, 0.0, 2.0));
    assert!(v.approx_eq(Vec3::new(0.0, 1.0, 2.0)));
    assert!(!v.approx_eq(Vec3::new(0.0, 1.0, 2.0 + 1e-6)));
}

#[test]
fn assign_ops_and_arrays() {
    let mut v = Vec3::from([1.0, 2.0, 3.0]);
    v += Vec3::new(1.0, 1.0, 1.0);
    v -= Vec3::new(0.5, 0.0, 4.0);
    let arr: [f64; 3] = v.into();
    assert!(arr == [1.5, 3.0, 0.0]);
}
