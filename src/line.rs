use crate::error::GeomResult;
use crate::space::InnerSpace;
use crate::vector::Vec3;

/// An infinite line through `point` along a unit `direction`.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Line {
    point: Vec3,
    direction: Vec3,
}
impl Line {
    /// Fails if `direction` is zero.
    pub fn new(point: Vec3, direction: Vec3) -> GeomResult<Self> {
        Ok(Self {
            point,
            direction: direction.normalize()?,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Always unit length.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        self.point + self.direction * t
    }

    /// Perpendicular distance from `point` to the line.
    pub fn shortest_distance_to_point(&self, point: Vec3) -> f64 {
        let offset = self.direction.cross(point - self.point);
        offset.magnitude() / self.direction.magnitude()
    }

    /// Orthogonal projection of `point` onto the line.
    ///
    /// `(d × v) × d` is the component of `v` perpendicular to the unit
    /// direction `d`, so stepping back by it from `point` lands on the line.
    pub fn closest_point_on_line_to_point(&self, point: Vec3) -> Vec3 {
        let offset = self.direction.cross(point - self.point);
        let rejection = offset.cross(self.direction);
        point - rejection
    }
}
