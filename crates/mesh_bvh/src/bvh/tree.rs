//! Bounding volume hierarchy over a triangle mesh
//!
//! The tree is built once from object-space geometry. Each frame the mesh's
//! model matrix is pushed in with [`BvhTree::update_transform`], which
//! refreshes the cached world-space box of every node. Repeating the same
//! matrix is a no-op unless the tree was marked dirty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Mat4;
use super::node::BvhNode;
use super::partition::MeshPartition;

/// Configuration for hierarchy construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    /// Nodes deeper than this become leaves regardless of triangle count
    pub max_depth: u32,

    /// Nodes holding at most this many triangles become leaves
    pub leaf_triangle_threshold: u32,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            leaf_triangle_threshold: 4,
        }
    }
}

impl BvhConfig {
    /// Create a configuration with the default depth and leaf size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum subdivision depth
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the leaf triangle threshold
    pub fn with_leaf_triangle_threshold(mut self, threshold: u32) -> Self {
        self.leaf_triangle_threshold = threshold;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leaf_triangle_threshold == 0 {
            return Err(ConfigError::Invalid(
                "Leaf triangle threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Config for BvhConfig {}

/// Shape summary of a built tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BvhStats {
    /// Total number of nodes, internal and leaf
    pub node_count: usize,
    /// Number of leaf nodes
    pub leaf_count: usize,
    /// Deepest node depth (root = 0)
    pub depth: u32,
    /// Largest triangle count held by a single leaf
    pub max_leaf_triangles: usize,
    /// Triangles in the whole mesh
    pub triangle_count: usize,
}

/// Bounding volume hierarchy with a cached world-space transform
#[derive(Debug, Clone)]
pub struct BvhTree {
    /// Root node covering the whole mesh
    root: BvhNode,

    /// Construction parameters
    config: BvhConfig,

    /// Matrix behind the current world-space boxes
    last_transform: Mat4,

    /// Forces the next transform refresh to recompute
    dirty: bool,
}

impl BvhTree {
    /// Build a hierarchy with the default configuration
    pub fn new(partition: MeshPartition) -> Self {
        Self::build(partition, BvhConfig::default())
    }

    /// Build a hierarchy over `partition`
    ///
    /// An empty partition yields a single leaf with an empty box. A leaf
    /// threshold of zero is clamped to one.
    pub fn build(partition: MeshPartition, config: BvhConfig) -> Self {
        let config = Self::clamped(config);
        let mut root = BvhNode::new(partition, 0);
        root.build(&config);

        let tree = Self {
            root,
            config,
            last_transform: Mat4::identity(),
            dirty: true,
        };

        if log::log_enabled!(log::Level::Debug) {
            let stats = tree.stats();
            log::debug!(
                "Built BVH over {} triangles: {} nodes, {} leaves, depth {}",
                stats.triangle_count,
                stats.node_count,
                stats.leaf_count,
                stats.depth
            );
        }

        tree
    }

    /// Rebuild the hierarchy from the root's triangles with a new configuration
    ///
    /// New nodes get world-space boxes under the last applied matrix, so
    /// the tree stays usable without another [`BvhTree::update_transform`].
    pub fn rebuild(&mut self, config: BvhConfig) {
        self.config = Self::clamped(config);
        self.root.build(&self.config);
        self.root.update_transform(&self.last_transform);
    }

    fn clamped(config: BvhConfig) -> BvhConfig {
        match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{}, using a leaf threshold of 1", err);
                BvhConfig {
                    leaf_triangle_threshold: 1,
                    ..config
                }
            }
        }
    }

    /// The root node
    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    /// Construction parameters
    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// Matrix most recently applied by [`BvhTree::update_transform`]
    pub fn last_transform(&self) -> &Mat4 {
        &self.last_transform
    }

    /// True if the next transform refresh will recompute unconditionally
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next [`BvhTree::update_transform`] to recompute every box
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Refresh the world-space box of every node for a new model matrix
    ///
    /// Returns `false` without touching any node when `matrix` equals the
    /// last applied matrix and the tree is not dirty.
    pub fn update_transform(&mut self, matrix: &Mat4) -> bool {
        if !self.dirty && *matrix == self.last_transform {
            log::trace!("BVH transform unchanged, skipping refresh");
            return false;
        }

        let updated = self.root.update_transform(matrix);
        self.last_transform = *matrix;
        self.dirty = false;

        log::trace!("Refreshed world-space bounds of {} BVH nodes", updated);
        true
    }

    /// Get all leaf nodes in depth-first order
    pub fn leaves(&self) -> Vec<&BvhNode> {
        let mut leaves = Vec::new();
        self.root.get_all_leaves(&mut leaves);
        leaves
    }

    /// Summarize the shape of the tree
    pub fn stats(&self) -> BvhStats {
        fn visit(node: &BvhNode, stats: &mut BvhStats) {
            stats.node_count += 1;
            stats.depth = stats.depth.max(node.depth());

            match node.children() {
                None => {
                    stats.leaf_count += 1;
                    stats.max_leaf_triangles =
                        stats.max_leaf_triangles.max(node.partition().triangle_count());
                }
                Some(children) => {
                    for child in children {
                        visit(child, stats);
                    }
                }
            }
        }

        let mut stats = BvhStats {
            triangle_count: self.root.partition().triangle_count(),
            ..BvhStats::default()
        };
        visit(&self.root, &mut stats);
        stats
    }
}

impl fmt::Display for BvhTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(node: &BvhNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let aabb = node.original_aabb();
            writeln!(
                f,
                "{:indent$}{} depth={} triangles={} min=({:.3}, {:.3}, {:.3}) max=({:.3}, {:.3}, {:.3})",
                "",
                if node.is_leaf() { "leaf" } else { "node" },
                node.depth(),
                node.partition().triangle_count(),
                aabb.min.x, aabb.min.y, aabb.min.z,
                aabb.max.x, aabb.max.y, aabb.max.z,
                indent = node.depth() as usize * 2,
            )?;

            if let Some(children) = node.children() {
                for child in children {
                    write_node(child, f)?;
                }
            }
            Ok(())
        }

        write_node(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bvh::partition::{SharedCoordinates, TriangleIndices};
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashMap;

    /// `count` small random triangles scattered in a 20-unit cube
    fn random_soup(count: usize, seed: u64) -> MeshPartition {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut coords = Vec::with_capacity(count * 3);
        let mut triangles = Vec::with_capacity(count);
        for t in 0..count as u32 {
            let base = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            for _ in 0..3 {
                coords.push(base + Vec3::new(
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-0.5..0.5),
                ));
            }
            triangles.push([3 * t, 3 * t + 1, 3 * t + 2]);
        }
        MeshPartition::new(coords.into(), triangles)
    }

    fn triangle_multiset(triangles: &[TriangleIndices]) -> HashMap<TriangleIndices, usize> {
        let mut set = HashMap::new();
        for tri in triangles {
            *set.entry(*tri).or_insert(0) += 1;
        }
        set
    }

    #[test]
    fn test_leaves_partition_the_mesh() {
        for seed in 0..4 {
            let partition = random_soup(500, seed);
            let expected = triangle_multiset(partition.triangles());
            let tree = BvhTree::new(partition);

            let collected: Vec<TriangleIndices> = tree
                .leaves()
                .iter()
                .flat_map(|leaf| leaf.partition().triangles().iter().copied())
                .collect();
            assert_eq!(collected.len(), 500);
            assert_eq!(triangle_multiset(&collected), expected);
        }
    }

    #[test]
    fn test_node_boxes_contain_their_vertices() {
        let tree = BvhTree::new(random_soup(200, 7));
        fn check(node: &BvhNode) {
            let partition = node.partition();
            for tri in partition.triangles() {
                for v in partition.vertices(tri) {
                    assert!(node.original_aabb().contains_point(&v));
                }
            }
            if let Some(children) = node.children() {
                for child in children {
                    check(child);
                }
            }
        }
        check(tree.root());
    }

    #[test]
    fn test_strictly_binary_and_leaf_criteria() {
        let config = BvhConfig::default().with_leaf_triangle_threshold(3);
        let tree = BvhTree::build(random_soup(300, 3), config);
        for leaf in tree.leaves() {
            assert!(leaf.left().is_none() && leaf.right().is_none());
            assert!(
                leaf.partition().triangle_count() <= 3 || leaf.depth() > config.max_depth
            );
        }
        let stats = tree.stats();
        assert_eq!(stats.node_count, 2 * stats.leaf_count - 1);
        assert!(stats.max_leaf_triangles <= 3);
    }

    #[test]
    fn test_empty_mesh_is_single_empty_leaf() {
        let coords: SharedCoordinates = Vec::new().into();
        let tree = BvhTree::new(MeshPartition::new(coords, Vec::new()));
        assert!(tree.root().is_leaf());
        assert!(tree.root().original_aabb().is_empty());
        assert_eq!(tree.stats().node_count, 1);
    }

    #[test]
    fn test_single_triangle_threshold_one() {
        let config = BvhConfig::default().with_leaf_triangle_threshold(1);
        let tree = BvhTree::build(random_soup(64, 11), config);
        assert!(tree.leaves().iter().all(|leaf| leaf.partition().triangle_count() == 1));
        assert_eq!(tree.stats().leaf_count, 64);
    }

    #[test]
    fn test_depth_bound_with_degenerate_geometry() {
        // Every triangle identical: only the count fallback makes progress
        let coords: SharedCoordinates = vec![Vec3::zeros(), Vec3::x(), Vec3::y()].into();
        let config = BvhConfig::default().with_max_depth(4).with_leaf_triangle_threshold(1);
        let tree = BvhTree::build(MeshPartition::new(coords, vec![[0, 1, 2]; 1000]), config);
        assert!(tree.stats().depth <= config.max_depth + 1);
        let total: usize = tree.leaves().iter().map(|l| l.partition().triangle_count()).sum();
        assert_eq!(total, 1000);
    }

    #[test]
    fn test_depth_bound_large_mesh() {
        let tree = BvhTree::new(random_soup(1 << 16, 5));
        let stats = tree.stats();
        assert!(stats.depth <= tree.config().max_depth + 1);
        assert_eq!(stats.triangle_count, 1 << 16);
    }

    #[test]
    #[cfg_attr(debug_assertions, ignore = "slow in debug builds, run with --release")]
    fn test_depth_bound_million_triangles() {
        let tree = BvhTree::new(random_soup(1 << 20, 9));
        assert!(tree.stats().depth <= tree.config().max_depth + 1);
    }

    #[test]
    fn test_update_transform_reaches_every_node() {
        let mut tree = BvhTree::new(random_soup(100, 1));
        let matrix = Mat4::new_translation(&Vec3::new(50.0, 0.0, 0.0));
        assert!(tree.update_transform(&matrix));

        fn check(node: &BvhNode, matrix: &Mat4) {
            let expected = node.original_aabb().transform(matrix);
            assert_relative_eq!(node.transformed_aabb().min, expected.min);
            assert_relative_eq!(node.transformed_aabb().max, expected.max);
            if let Some(children) = node.children() {
                for child in children {
                    check(child, matrix);
                }
            }
        }
        check(tree.root(), &matrix);
    }

    #[test]
    fn test_update_transform_memoizes() {
        let mut tree = BvhTree::new(random_soup(50, 2));
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));

        assert!(tree.is_dirty());
        assert!(tree.update_transform(&matrix));
        assert!(!tree.is_dirty());
        assert!(!tree.update_transform(&matrix));
        assert_eq!(tree.last_transform(), &matrix);

        tree.mark_dirty();
        assert!(tree.update_transform(&matrix));

        assert!(tree.update_transform(&Mat4::identity()));
        assert_eq!(tree.root().transformed_aabb(), tree.root().original_aabb());
    }

    #[test]
    fn test_first_update_with_identity_runs() {
        let mut tree = BvhTree::new(random_soup(10, 4));
        assert!(tree.update_transform(&Mat4::identity()));
    }

    #[test]
    fn test_rebuild_with_new_config() {
        let mut tree = BvhTree::new(random_soup(256, 6));
        tree.update_transform(&Mat4::identity());
        let before = tree.stats().leaf_count;

        tree.rebuild(BvhConfig::default().with_leaf_triangle_threshold(16));
        assert!(!tree.is_dirty());
        assert!(tree.stats().leaf_count < before);
        assert!(tree.stats().max_leaf_triangles <= 16);
    }

    #[test]
    fn test_rebuild_keeps_world_bounds_current() {
        let mut tree = BvhTree::new(random_soup(128, 10));
        let matrix = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
        tree.update_transform(&matrix);

        tree.rebuild(BvhConfig::default().with_leaf_triangle_threshold(2));
        assert_eq!(*tree.last_transform(), matrix);
        for leaf in tree.leaves() {
            let expected = leaf.original_aabb().transform(&matrix);
            assert_relative_eq!(leaf.transformed_aabb().min, expected.min);
            assert_relative_eq!(leaf.transformed_aabb().max, expected.max);
        }
    }

    #[test]
    fn test_zero_leaf_threshold_is_clamped() {
        let config = BvhConfig::default().with_leaf_triangle_threshold(0);
        let tree = BvhTree::build(random_soup(10, 11), config);

        assert_eq!(tree.config().leaf_triangle_threshold, 1);
        assert!(tree.stats().depth < 10);
        for leaf in tree.leaves() {
            assert_eq!(leaf.partition().triangle_count(), 1);
        }
    }

    #[test]
    fn test_display_lists_every_node() {
        let tree = BvhTree::new(random_soup(40, 8));
        let dump = tree.to_string();
        assert_eq!(dump.lines().count(), tree.stats().node_count);
        assert!(dump.starts_with("node depth=0 triangles=40"));
    }

    #[test]
    fn test_config_validation() {
        assert!(BvhConfig::default().validate().is_ok());
        let err = BvhConfig::default().with_leaf_triangle_threshold(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: BvhConfig = toml::from_str("leaf_triangle_threshold = 1").unwrap();
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.leaf_triangle_threshold, 1);
    }
}
