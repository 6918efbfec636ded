use log::debug;

use crate::error::GeomResult;
use crate::line::Line;
use crate::space::InnerSpace;
use crate::vector::Vec3;

/// Below this `|direction · normal|` a line counts as parallel to a plane.
pub const PARALLEL_TOLERANCE: f64 = 1e-6;

/// A plane through `point` with unit `normal`.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}
impl Plane {
    /// Fails if `normal` is zero.
    pub fn new(point: Vec3, normal: Vec3) -> GeomResult<Self> {
        Ok(Self {
            point,
            normal: normal.normalize()?,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Always unit length.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Positive on the side the normal points to, negative on the other,
    /// zero on the plane.
    pub fn signed_distance_to_point(&self, point: Vec3) -> f64 {
        self.normal.dot(point - self.point)
    }

    pub fn project_point_onto_plane(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance_to_point(point)
    }

    /// Mirror image of `point` across the plane.
    pub fn reflect_point_across_plane(&self, point: Vec3) -> Vec3 {
        point - self.normal * (2.0 * self.signed_distance_to_point(point))
    }

    pub fn is_parallel_to(&self, line: &Line) -> bool {
        line.direction().dot(self.normal).abs() < PARALLEL_TOLERANCE
    }

    /// Parameter `t` at which `line.point_at(t)` meets the plane.
    ///
    /// `None` when the line is parallel to the plane. A line lying in the
    /// plane is parallel too and also gives `None`.
    pub fn line_intersection_parameter(&self, line: &Line) -> Option<f64> {
        let denom = line.direction().dot(self.normal);
        if denom.abs() < PARALLEL_TOLERANCE {
            debug!("line {:?} is parallel to plane {:?}", line, self);
            return None;
        }
        let t = self.signed_distance_to_point(line.point()) / denom;
        Some(-t)
    }

    pub fn line_intersection(&self, line: &Line) -> Option<Vec3> {
        self.line_intersection_parameter(line)
            .map(|t| line.point_at(t))
    }
}
