//! Math utilities and types
//!
//! Provides the fundamental math types used by the hierarchy and the
//! collision tests.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis (index 0)
    X,
    /// The Y axis (index 1)
    Y,
    /// The Z axis (index 2)
    Z,
}

impl Axis {
    /// All axes in tie-break order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1 or 2)
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis for a component index, `None` if the index is not 0, 1 or 2
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }

    /// Axis of the largest component of `v`
    ///
    /// Ties prefer X over Y and Y over Z.
    pub fn of_largest(v: &Vec3) -> Self {
        if v.x >= v.y && v.x >= v.z {
            Self::X
        } else if v.y >= v.z {
            Self::Y
        } else {
            Self::Z
        }
    }
}

/// Transform a point by a full 4x4 homogeneous matrix
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*point)).coords
}
