//! Axis-aligned bounding boxes
//!
//! The box type used by every level of the hierarchy. An "empty" box has
//! `min = +inf` and `max = -inf`, which makes it the identity for
//! [`AABB::union`] and guarantees it never intersects anything.

use crate::foundation::math::{self, Axis, Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The empty box, identity for [`AABB::union`]
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Create an AABB centered at a point with given extents (half-size)
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box enclosing every point
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_point(point);
        }
        aabb
    }

    /// True if the box encloses no point at all
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include a point
    pub fn expand_point(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Component-wise union of two boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full edge lengths of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the min-to-max diagonal, zero for an empty box
    pub fn diagonal_length(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.size().magnitude()
        }
    }

    /// Check if this AABB contains a point (boundary included)
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Boxes that only touch on a face, edge or corner count as intersecting.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Axis along which the box is longest (ties prefer X, then Y)
    pub fn largest_axis(&self) -> Axis {
        Axis::of_largest(&self.size())
    }

    /// Split the box in two at the midpoint of `axis`
    pub fn split(&self, axis: Axis) -> (AABB, AABB) {
        let i = axis.index();
        let mid = (self.min[i] + self.max[i]) * 0.5;

        let mut first_max = self.max;
        first_max[i] = mid;

        let mut second_min = self.min;
        second_min[i] = mid;

        (AABB::new(self.min, first_max), AABB::new(second_min, self.max))
    }

    /// The 8 corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned box enclosing this box after a homogeneous transform
    ///
    /// All 8 corners are transformed, so under rotation the result is the
    /// tightest axis-aligned box around the rotated box, not around the
    /// geometry it was built from. Empty boxes are returned unchanged.
    pub fn transform(&self, matrix: &Mat4) -> AABB {
        if self.is_empty() {
            return *self;
        }

        let mut result = AABB::empty();
        for corner in &self.corners() {
            result.expand_point(&math::transform_point(matrix, corner));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> AABB {
        AABB::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_empty_box_is_union_identity() {
        let b = unit_box();
        assert_eq!(AABB::empty().union(&b), b);
        assert_eq!(b.union(&AABB::empty()), b);
        assert!(AABB::empty().is_empty());
        assert!(!b.is_empty());
    }

    #[test]
    fn test_union_covers_both() {
        let a = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = AABB::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::new(0.5, 3.0, 0.7));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(u.max, Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_empty_never_intersects() {
        let b = unit_box();
        assert!(!AABB::empty().intersects(&b));
        assert!(!b.intersects(&AABB::empty()));
        assert!(!AABB::empty().intersects(&AABB::empty()));
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let a = unit_box();
        let b = AABB::from_center_extents(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = AABB::from_center_extents(Vec3::new(1.01, 0.0, 0.0), Vec3::repeat(0.5));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_disjoint_on_single_axis() {
        let a = unit_box();
        let b = AABB::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::repeat(0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_largest_axis_ties() {
        assert_eq!(unit_box().largest_axis(), Axis::X);
        let tall = AABB::new(Vec3::zeros(), Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(tall.largest_axis(), Axis::Y);
        let deep = AABB::new(Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(deep.largest_axis(), Axis::Z);
    }

    #[test]
    fn test_transform_identity_round_trip() {
        let b = AABB::new(Vec3::new(-1.0, 2.0, 0.5), Vec3::new(3.0, 4.0, 0.75));
        assert_eq!(b.transform(&Mat4::identity()), b);
    }

    #[test]
    fn test_transform_translation() {
        let moved = unit_box().transform(&Mat4::new_translation(&Vec3::new(100.0, 0.0, 0.0)));
        assert_relative_eq!(moved.min, Vec3::new(99.5, -0.5, -0.5), epsilon = 1e-4);
        assert_relative_eq!(moved.max, Vec3::new(100.5, 0.5, 0.5), epsilon = 1e-4);
    }

    #[test]
    fn test_transform_rotation_grows_box() {
        let rotation = Mat4::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_4);
        let rotated = unit_box().transform(&rotation);
        let half_diag = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(rotated.max.x, half_diag, epsilon = 1e-5);
        assert_relative_eq!(rotated.min.y, -half_diag, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.z, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_scale() {
        let scaled = unit_box().transform(&Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 4.0)));
        assert_relative_eq!(scaled.max, Vec3::new(1.0, 0.5, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_transform_keeps_empty() {
        let moved = AABB::empty().transform(&Mat4::new_translation(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(moved.is_empty());
    }

    #[test]
    fn test_split_at_midpoint() {
        let b = AABB::new(Vec3::zeros(), Vec3::new(4.0, 2.0, 2.0));
        let (lo, hi) = b.split(Axis::X);
        assert_eq!(lo.max.x, 2.0);
        assert_eq!(hi.min.x, 2.0);
        assert_eq!(lo.union(&hi), b);
    }

    #[test]
    fn test_from_points_contains_all() {
        let points = [
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-3.0, 2.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let b = AABB::from_points(&points);
        for p in &points {
            assert!(b.contains_point(p));
        }
        assert_eq!(b.min, Vec3::new(-3.0, -1.0, -1.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 5.0));
    }
}
