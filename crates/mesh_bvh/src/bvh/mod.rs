//! Bounding volume hierarchy
//!
//! Provides the object-space hierarchy used to prune pairwise mesh
//! collision tests.
//!
//! # Module Organization
//!
//! - [`bounding_box`] - Axis-aligned boxes
//! - [`partition`] - Triangle subsets over a shared vertex buffer
//! - [`node`] - Tree nodes with cached object- and world-space boxes
//! - [`tree`] - Construction, configuration and per-frame transform refresh

pub mod bounding_box;
pub mod partition;
pub mod node;
pub mod tree;

// Re-export commonly used types
pub use bounding_box::AABB;
pub use partition::{MeshError, MeshPartition, SharedCoordinates, TriangleIndices};
pub use node::BvhNode;
pub use tree::{BvhConfig, BvhStats, BvhTree};
