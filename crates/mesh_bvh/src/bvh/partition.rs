//! Mesh partitions
//!
//! A [`MeshPartition`] is a subset of a mesh's triangles. Every partition
//! derived from the same source mesh shares one read-only coordinate buffer;
//! splitting only ever copies triangle index triples, never vertex data.

use std::sync::Arc;

use crate::foundation::math::{Axis, Mat4, Vec3};
use crate::foundation::math;
use super::bounding_box::AABB;

/// Three vertex indices into a partition's coordinate buffer
pub type TriangleIndices = [u32; 3];

/// Read-only vertex positions shared by every partition of one mesh
pub type SharedCoordinates = Arc<[Vec3]>;

/// Errors raised by the checked mesh constructors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle references a vertex past the end of the coordinate buffer
    #[error("Triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        /// Position of the offending triangle in the triangle list
        triangle: usize,
        /// The out-of-range vertex index
        index: u32,
        /// Number of vertices in the coordinate buffer
        vertex_count: usize,
    },

    /// A flat index list whose length is not a multiple of three
    #[error("Index list of length {index_count} does not describe whole triangles")]
    IncompleteTriangle {
        /// Length of the rejected index list
        index_count: usize,
    },
}

fn validate_indices(vertex_count: usize, triangles: &[TriangleIndices]) -> Result<(), MeshError> {
    for (triangle, tri) in triangles.iter().enumerate() {
        if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { triangle, index, vertex_count });
        }
    }
    Ok(())
}

/// A set of triangles referencing a shared coordinate buffer
#[derive(Debug, Clone)]
pub struct MeshPartition {
    coordinates: SharedCoordinates,
    triangles: Vec<TriangleIndices>,
    aabb: AABB,
}

impl MeshPartition {
    /// Create a partition without checking the triangle indices
    ///
    /// Every index must be in range for `coordinates`. This is checked in
    /// debug builds only; loaders should go through [`MeshPartition::try_new`].
    pub fn new(coordinates: SharedCoordinates, triangles: Vec<TriangleIndices>) -> Self {
        debug_assert!(
            validate_indices(coordinates.len(), &triangles).is_ok(),
            "triangle index out of range for {} vertices",
            coordinates.len()
        );

        let mut partition = Self {
            coordinates,
            triangles,
            aabb: AABB::empty(),
        };
        partition.update_aabb();
        partition
    }

    /// Create a partition, rejecting out-of-range triangle indices
    pub fn try_new(coordinates: SharedCoordinates, triangles: Vec<TriangleIndices>) -> Result<Self, MeshError> {
        validate_indices(coordinates.len(), &triangles)?;
        Ok(Self::new(coordinates, triangles))
    }

    /// Create a partition from a flat `[i0, i1, i2, i0, i1, i2, ...]` index list
    pub fn from_flat_indices(coordinates: SharedCoordinates, indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle { index_count: indices.len() });
        }

        let triangles = indices
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
            .collect();

        Self::try_new(coordinates, triangles)
    }

    /// The shared vertex buffer
    pub fn coordinates(&self) -> &SharedCoordinates {
        &self.coordinates
    }

    /// Triangle index triples in their current order
    pub fn triangles(&self) -> &[TriangleIndices] {
        &self.triangles
    }

    /// Bounding box of every vertex referenced by this partition
    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    /// Number of triangles in the partition
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True if the partition holds no triangle
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Object-space positions of a triangle's three vertices
    pub fn vertices(&self, tri: &TriangleIndices) -> [Vec3; 3] {
        vertices_of(&self.coordinates, tri)
    }

    /// World-space positions of a triangle's three vertices under `matrix`
    pub fn world_triangle(&self, tri: &TriangleIndices, matrix: &Mat4) -> [Vec3; 3] {
        self.vertices(tri).map(|v| math::transform_point(matrix, &v))
    }

    /// Arithmetic mean of a triangle's vertices
    pub fn centroid(&self, tri: &TriangleIndices) -> Vec3 {
        centroid_of(&self.coordinates, tri)
    }

    /// Recompute the bounding box from the referenced vertices
    fn update_aabb(&mut self) {
        let mut aabb = AABB::empty();
        for tri in &self.triangles {
            for &i in tri {
                aabb.expand_point(&self.coordinates[i as usize]);
            }
        }
        self.aabb = aabb;
    }

    /// Reorder triangles by ascending centroid coordinate along `axis`
    ///
    /// The sort is stable so equal centroids keep their relative order.
    pub fn sort_by_axis(&mut self, axis: Axis) {
        let i = axis.index();
        let coordinates = &self.coordinates;
        self.triangles.sort_by(|a, b| {
            centroid_of(coordinates, a)[i].total_cmp(&centroid_of(coordinates, b)[i])
        });
    }

    /// Split the triangles in two at the median centroid of the largest axis
    ///
    /// Triangles whose centroid is `<=` the median go to the first half. If
    /// that leaves either half empty the current triangle order is cut in
    /// half by count instead. Both results share this partition's
    /// coordinate buffer.
    pub fn split(&self) -> (MeshPartition, MeshPartition) {
        if self.triangles.is_empty() {
            return (
                MeshPartition::new(Arc::clone(&self.coordinates), Vec::new()),
                MeshPartition::new(Arc::clone(&self.coordinates), Vec::new()),
            );
        }

        let i = self.aabb.largest_axis().index();
        let centroids: Vec<f32> = self
            .triangles
            .iter()
            .map(|tri| self.centroid(tri)[i])
            .collect();

        let mut selection = centroids.clone();
        let mid = selection.len() / 2;
        let (_, &mut median, _) = selection.select_nth_unstable_by(mid, f32::total_cmp);

        let (mut first, mut second): (Vec<TriangleIndices>, Vec<TriangleIndices>) =
            (Vec::new(), Vec::new());
        for (tri, &c) in self.triangles.iter().zip(&centroids) {
            if c <= median {
                first.push(*tri);
            } else {
                second.push(*tri);
            }
        }

        // Degenerate distribution, fall back to a split by count
        if first.is_empty() || second.is_empty() {
            let half = self.triangles.len() / 2;
            first = self.triangles[..half].to_vec();
            second = self.triangles[half..].to_vec();
        }

        (
            MeshPartition::new(Arc::clone(&self.coordinates), first),
            MeshPartition::new(Arc::clone(&self.coordinates), second),
        )
    }
}

fn vertices_of(coordinates: &[Vec3], tri: &TriangleIndices) -> [Vec3; 3] {
    [
        coordinates[tri[0] as usize],
        coordinates[tri[1] as usize],
        coordinates[tri[2] as usize],
    ]
}

fn centroid_of(coordinates: &[Vec3], tri: &TriangleIndices) -> Vec3 {
    let [v0, v1, v2] = vertices_of(coordinates, tri);
    (v0 + v1 + v2) / 3.0
}
