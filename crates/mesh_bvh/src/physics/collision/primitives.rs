//! Primitive collision shapes and intersection algorithms
//!
//! Provides the world-space triangle used by the narrow phase.

use crate::foundation::math::{Axis, Vec3};

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Triangle vertices in world space
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl From<[Vec3; 3]> for Triangle {
    fn from([v0, v1, v2]: [Vec3; 3]) -> Self {
        Self::new(v0, v1, v2)
    }
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unnormalized plane normal (right-hand rule), zero for a degenerate triangle
    pub fn plane_normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2)
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Signed distances of `other`'s vertices to this triangle's plane
    ///
    /// Scaled by the length of [`Triangle::plane_normal`]; only the signs
    /// are meaningful.
    pub fn plane_distances(&self, other: &Triangle) -> [f32; 3] {
        let normal = self.plane_normal();
        let offset = -normal.dot(&self.v0);
        [
            normal.dot(&other.v0) + offset,
            normal.dot(&other.v1) + offset,
            normal.dot(&other.v2) + offset,
        ]
    }

    /// Projected interval of the triangle on a coordinate axis
    pub fn project(&self, axis: Axis) -> (f32, f32) {
        let i = axis.index();
        let (p0, p1, p2) = (self.v0[i], self.v1[i], self.v2[i]);
        (p0.min(p1).min(p2), p0.max(p1).max(p2))
    }

    /// Test if this triangle intersects another triangle
    ///
    /// 1. Reject if `other` lies strictly on one side of this plane.
    /// 2. Reject if `self` lies strictly on one side of `other`'s plane.
    /// 3. Project both triangles onto the coordinate axis where the planes'
    ///    intersection direction is largest (ties prefer X, then Y) and
    ///    report whether the two intervals overlap.
    ///
    /// This is an approximation: coplanar and edge-grazing configurations
    /// can produce false negatives or false positives.
    pub fn intersects_triangle(&self, other: &Triangle) -> bool {
        fn one_side(d: [f32; 3]) -> bool {
            (d[0] > 0.0 && d[1] > 0.0 && d[2] > 0.0) ||
            (d[0] < 0.0 && d[1] < 0.0 && d[2] < 0.0)
        }

        if one_side(self.plane_distances(other)) {
            return false;
        }

        if one_side(other.plane_distances(self)) {
            return false;
        }

        let direction = self.plane_normal().cross(&other.plane_normal());
        let axis = Axis::of_largest(&direction.abs());

        let (min_a, max_a) = self.project(axis);
        let (min_b, max_b) = other.project(axis);
        max_a >= min_b && max_b >= min_a
    }
}
