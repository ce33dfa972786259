//! Physics module for collision detection
//!
//! Provides hierarchical mesh-mesh collision detection for rigid,
//! independently transformed meshes.

pub mod collision;

pub use collision::{CollisionMesh, Triangle, TrianglePair};
