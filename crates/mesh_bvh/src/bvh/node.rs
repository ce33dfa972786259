//! Hierarchy nodes
//!
//! Each node owns the partition of the mesh it covers, the bounding box of
//! that partition in object space, and the same box after the owning tree's
//! latest model transform. Internal nodes own exactly two children.

use crate::foundation::math::Mat4;
use super::bounding_box::AABB;
use super::partition::MeshPartition;
use super::tree::BvhConfig;

/// Single node in the bounding volume hierarchy
#[derive(Debug, Clone)]
pub struct BvhNode {
    /// Triangles covered by this node
    partition: MeshPartition,

    /// Object-space bounds, fixed once the node is created
    original_aabb: AABB,

    /// World-space bounds under the tree's latest transform
    transformed_aabb: AABB,

    /// Left and right children, None if this is a leaf
    children: Option<Box<[BvhNode; 2]>>,

    /// Depth in the tree (0 = root)
    depth: u32,
}

impl BvhNode {
    /// Create a new leaf node covering `partition`
    pub fn new(partition: MeshPartition, depth: u32) -> Self {
        let original_aabb = *partition.aabb();
        Self {
            partition,
            original_aabb,
            transformed_aabb: original_aabb,
            children: None,
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Both children, None for a leaf
    pub fn children(&self) -> Option<&[BvhNode; 2]> {
        self.children.as_deref()
    }

    /// First child (centroids at or below the split median)
    pub fn left(&self) -> Option<&BvhNode> {
        self.children().map(|[left, _]| left)
    }

    /// Second child
    pub fn right(&self) -> Option<&BvhNode> {
        self.children().map(|[_, right]| right)
    }

    /// The triangles covered by this node
    pub fn partition(&self) -> &MeshPartition {
        &self.partition
    }

    /// Object-space bounding box
    pub fn original_aabb(&self) -> &AABB {
        &self.original_aabb
    }

    /// World-space bounding box as of the last transform refresh
    pub fn transformed_aabb(&self) -> &AABB {
        &self.transformed_aabb
    }

    /// Depth in the tree (0 = root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Recursively subdivide this node until the leaf criteria hold
    ///
    /// A node stays a leaf once its depth exceeds `max_depth` or it holds at
    /// most `leaf_triangle_threshold` triangles.
    pub(crate) fn build(&mut self, config: &BvhConfig) {
        self.children = None;

        if self.depth > config.max_depth
            || self.partition.triangle_count() <= config.leaf_triangle_threshold as usize
        {
            return;
        }

        let axis = self.original_aabb.largest_axis();
        self.partition.sort_by_axis(axis);
        let (first, second) = self.partition.split();

        let mut children = Box::new([
            BvhNode::new(first, self.depth + 1),
            BvhNode::new(second, self.depth + 1),
        ]);
        for child in children.iter_mut() {
            child.build(config);
        }

        self.children = Some(children);
    }

    /// Recompute the world-space box of this node and every descendant
    ///
    /// Returns the number of nodes updated.
    pub(crate) fn update_transform(&mut self, matrix: &Mat4) -> usize {
        self.transformed_aabb = self.original_aabb.transform(matrix);

        let mut count = 1;
        if let Some(ref mut children) = self.children {
            for child in children.iter_mut() {
                count += child.update_transform(matrix);
            }
        }
        count
    }

    /// Get all leaf nodes in depth-first order
    pub fn get_all_leaves<'a>(&'a self, leaves: &mut Vec<&'a BvhNode>) {
        match self.children() {
            None => leaves.push(self),
            Some(children) => {
                for child in children {
                    child.get_all_leaves(leaves);
                }
            }
        }
    }
}
