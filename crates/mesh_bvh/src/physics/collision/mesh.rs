//! Collision mesh representations
//!
//! A [`CollisionMesh`] keeps its hierarchy in model space and carries the
//! model matrix of the current frame. Only the cached world-space boxes
//! change when the mesh moves; triangles are transformed on the fly during
//! the narrow phase.

use std::sync::Arc;

use crate::bvh::{AABB, BvhConfig, BvhTree, MeshError, MeshPartition, SharedCoordinates, TriangleIndices};
use crate::foundation::math::{Mat4, Vec3};
use super::traversal::{self, TrianglePair};

/// A triangle mesh prepared for pairwise collision tests
#[derive(Debug, Clone)]
pub struct CollisionMesh {
    tree: BvhTree,
}

impl CollisionMesh {
    /// Build a collision mesh from model-space vertices and index triples
    pub fn new(
        vertices: SharedCoordinates,
        triangles: Vec<TriangleIndices>,
        config: BvhConfig,
    ) -> Result<Self, MeshError> {
        let partition = MeshPartition::try_new(vertices, triangles)?;
        Ok(Self::from_partition(partition, config))
    }

    /// Build a collision mesh from model-space vertices and a flat index list
    pub fn from_indices(vertices: &[Vec3], indices: &[u32], config: BvhConfig) -> Result<Self, MeshError> {
        let coordinates: SharedCoordinates = Arc::from(vertices);
        let partition = MeshPartition::from_flat_indices(coordinates, indices)?;
        Ok(Self::from_partition(partition, config))
    }

    /// Build a collision mesh over an already validated partition
    pub fn from_partition(partition: MeshPartition, config: BvhConfig) -> Self {
        let mut tree = BvhTree::build(partition, config);
        tree.update_transform(&Mat4::identity());
        Self { tree }
    }

    /// The underlying hierarchy
    pub fn tree(&self) -> &BvhTree {
        &self.tree
    }

    /// Current model matrix
    pub fn transform(&self) -> &Mat4 {
        self.tree.last_transform()
    }

    /// World-space bounds of the whole mesh
    pub fn world_aabb(&self) -> &AABB {
        self.tree.root().transformed_aabb()
    }

    /// Set the model matrix for this frame
    ///
    /// Returns `false` if the matrix is unchanged and nothing was recomputed.
    pub fn set_transform(&mut self, matrix: &Mat4) -> bool {
        self.tree.update_transform(matrix)
    }

    /// Rebuild the hierarchy with new parameters, keeping the current transform
    pub fn rebuild(&mut self, config: BvhConfig) {
        self.tree.rebuild(config);
    }

    /// Test mesh-mesh intersection
    pub fn intersects(&self, other: &CollisionMesh) -> bool {
        traversal::trees_collide(&self.tree, &other.tree)
    }

    /// First intersecting triangle pair, `triangle_a` from `self`
    pub fn first_contact(&self, other: &CollisionMesh) -> Option<TrianglePair> {
        traversal::find_tree_collision(&self.tree, &other.tree)
    }
}
