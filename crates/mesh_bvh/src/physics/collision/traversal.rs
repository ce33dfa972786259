//! Pairwise hierarchy traversal
//!
//! Walks two hierarchies together, pruning every node pair whose
//! world-space boxes do not overlap, and runs the triangle test only
//! between leaves. The search stops at the first intersecting triangle
//! pair.
//!
//! The node boxes must already reflect the matrices passed in, i.e. each
//! tree's [`BvhTree::update_transform`] has been called with the same
//! matrix this frame.

use crate::bvh::{BvhNode, BvhTree, TriangleIndices};
use crate::foundation::math::Mat4;
use super::primitives::Triangle;

/// The first pair of intersecting triangles found between two meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrianglePair {
    /// Vertex indices of the triangle in the first mesh
    pub triangle_a: TriangleIndices,
    /// Vertex indices of the triangle in the second mesh
    pub triangle_b: TriangleIndices,
}

/// True if any triangle below `node_a` intersects any triangle below `node_b`
pub fn collides(
    node_a: Option<&BvhNode>,
    transform_a: &Mat4,
    node_b: Option<&BvhNode>,
    transform_b: &Mat4,
) -> bool {
    find_collision(node_a, transform_a, node_b, transform_b).is_some()
}

/// Find the first intersecting triangle pair below two nodes
///
/// Returns `None` if either node is absent or no pair intersects.
pub fn find_collision(
    node_a: Option<&BvhNode>,
    transform_a: &Mat4,
    node_b: Option<&BvhNode>,
    transform_b: &Mat4,
) -> Option<TrianglePair> {
    let (a, b) = (node_a?, node_b?);

    if !a.transformed_aabb().intersects(b.transformed_aabb()) {
        return None;
    }

    match (a.children(), b.children()) {
        (None, None) => find_leaf_collision(a, transform_a, b, transform_b),

        (None, Some(children_b)) => children_b
            .iter()
            .find_map(|child| find_collision(Some(a), transform_a, Some(child), transform_b)),

        (Some(children_a), None) => children_a
            .iter()
            .find_map(|child| find_collision(Some(child), transform_a, Some(b), transform_b)),

        (Some(children_a), Some(children_b)) => {
            // Same four pairs either way; visiting the larger node's children
            // in the outer loop only changes the order
            let a_first = a.transformed_aabb().diagonal_length()
                >= b.transformed_aabb().diagonal_length();

            if a_first {
                children_a.iter().find_map(|child_a| {
                    children_b.iter().find_map(|child_b| {
                        find_collision(Some(child_a), transform_a, Some(child_b), transform_b)
                    })
                })
            } else {
                children_b.iter().find_map(|child_b| {
                    children_a.iter().find_map(|child_a| {
                        find_collision(Some(child_a), transform_a, Some(child_b), transform_b)
                    })
                })
            }
        }
    }
}

/// Test every triangle pair between two leaves in world space
fn find_leaf_collision(
    a: &BvhNode,
    transform_a: &Mat4,
    b: &BvhNode,
    transform_b: &Mat4,
) -> Option<TrianglePair> {
    let partition_a = a.partition();
    let partition_b = b.partition();

    let world_b: Vec<(TriangleIndices, Triangle)> = partition_b
        .triangles()
        .iter()
        .map(|tri| (*tri, Triangle::from(partition_b.world_triangle(tri, transform_b))))
        .collect();

    for tri_a in partition_a.triangles() {
        let world_a = Triangle::from(partition_a.world_triangle(tri_a, transform_a));

        for (tri_b, world_tri_b) in &world_b {
            if world_a.intersects_triangle(world_tri_b) {
                log::debug!(
                    "Triangle collision: A {:?} / B {:?}",
                    tri_a, tri_b
                );
                return Some(TrianglePair {
                    triangle_a: *tri_a,
                    triangle_b: *tri_b,
                });
            }
        }
    }

    None
}

/// True if two trees collide under their most recently applied transforms
pub fn trees_collide(tree_a: &BvhTree, tree_b: &BvhTree) -> bool {
    find_tree_collision(tree_a, tree_b).is_some()
}

/// First intersecting triangle pair between two trees, using each tree's
/// most recently applied transform
pub fn find_tree_collision(tree_a: &BvhTree, tree_b: &BvhTree) -> Option<TrianglePair> {
    find_collision(
        Some(tree_a.root()),
        tree_a.last_transform(),
        Some(tree_b.root()),
        tree_b.last_transform(),
    )
}
