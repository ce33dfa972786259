//! # Mesh BVH
//!
//! Bounding volume hierarchies over triangle meshes, used to detect
//! collisions between two rigid, independently transformed meshes.
//!
//! ## Features
//!
//! - **Shared Geometry**: every node references one read-only vertex buffer
//! - **Median Splits**: subdivision along the longest axis at the median centroid
//! - **Transform Caching**: world-space boxes refreshed only when a model matrix changes
//! - **Pairwise Traversal**: box pruning with a triangle-level narrow phase
//!
//! ## Quick Start
//!
//! ```rust
//! use mesh_bvh::prelude::*;
//!
//! let cube = TriangleMesh::cube(1.0);
//! let a = CollisionMesh::from_indices(&cube.vertices, &cube.indices, BvhConfig::default())?;
//! let mut b = a.clone();
//!
//! b.set_transform(&Mat4::new_translation(&Vec3::new(100.0, 0.0, 0.0)));
//! assert!(!a.intersects(&b));
//!
//! b.set_transform(&Mat4::new_translation(&Vec3::new(0.25, 0.0, 0.0)));
//! assert!(a.intersects(&b));
//! # Ok::<(), mesh_bvh::bvh::MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod bvh;
pub mod physics;
pub mod primitives;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        foundation::math::{Axis, Mat4, Vec3},
        config::{Config, ConfigError},
        bvh::{AABB, BvhConfig, BvhNode, BvhStats, BvhTree, MeshError, MeshPartition, SharedCoordinates, TriangleIndices},
        physics::collision::{collides, find_collision, CollisionMesh, Triangle, TrianglePair},
        primitives::TriangleMesh,
    };
}
