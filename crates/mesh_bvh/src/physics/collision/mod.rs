//! Collision detection between pairs of triangle meshes
//!
//! Broad phase: overlap tests between the world-space boxes of two
//! hierarchies. Narrow phase: an approximate triangle-triangle test run only
//! between leaves whose boxes overlap.
//!
//! # Architecture
//!
//! - **Model Space Storage**: hierarchies are built once from local coordinates
//! - **On-Demand Transformation**: triangles are transformed to world space only during tests
//! - **Cached Bounds**: node boxes are refreshed once per frame per mesh
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space triangle and the narrow-phase test
//! - [`traversal`] - Simultaneous descent of two hierarchies
//! - [`mesh`] - A hierarchy paired with its current model matrix

pub mod primitives;
pub mod traversal;
pub mod mesh;

// Re-export commonly used types
pub use primitives::Triangle;
pub use traversal::{collides, find_collision, find_tree_collision, trees_collide, TrianglePair};
pub use mesh::CollisionMesh;
