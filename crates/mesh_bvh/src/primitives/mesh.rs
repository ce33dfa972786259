//! Indexed triangle meshes

use std::sync::Arc;

use crate::bvh::partition::{MeshError, MeshPartition, SharedCoordinates, TriangleIndices};
use crate::foundation::math::Vec3;

/// Vertex positions plus a flat triangle index list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,

    /// Index data for triangles, three per triangle
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of complete triangles described by the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples, ignoring a trailing partial triangle
    pub fn triangles(&self) -> Vec<TriangleIndices> {
        self.indices
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
            .collect()
    }

    /// Move the vertex data into a shared buffer and wrap it in a partition
    pub fn into_partition(self) -> Result<MeshPartition, MeshError> {
        let coordinates: SharedCoordinates = Arc::from(self.vertices);
        MeshPartition::from_flat_indices(coordinates, &self.indices)
    }

    /// Axis-aligned cube centered at the origin with edge length `size`
    ///
    /// 24 vertices (4 per face) and 12 outward-wound triangles.
    pub fn cube(size: f32) -> Self {
        Self::subdivided_cube(size, 1)
    }

    /// Cube whose faces are each split into a `subdivisions` x `subdivisions` grid
    ///
    /// Each face contributes `2 * subdivisions^2` triangles wound so that
    /// their normals point out of the cube. Vertices along shared edges are
    /// duplicated per face.
    pub fn subdivided_cube(size: f32, subdivisions: u32) -> Self {
        let n = subdivisions.max(1);
        let h = size * 0.5;

        // (origin, u, v) with u x v pointing out of the face
        let faces = [
            (Vec3::new(h, -h, -h), Vec3::y(), Vec3::z()),
            (Vec3::new(-h, -h, -h), Vec3::z(), Vec3::y()),
            (Vec3::new(-h, h, -h), Vec3::z(), Vec3::x()),
            (Vec3::new(-h, -h, -h), Vec3::x(), Vec3::z()),
            (Vec3::new(-h, -h, h), Vec3::x(), Vec3::y()),
            (Vec3::new(-h, -h, -h), Vec3::y(), Vec3::x()),
        ];

        let row = n + 1;
        let step = size / n as f32;
        let mut vertices = Vec::with_capacity(6 * (row * row) as usize);
        let mut indices = Vec::with_capacity(6 * 6 * (n * n) as usize);

        for (origin, u, v) in faces {
            let base = vertices.len() as u32;
            for j in 0..row {
                for i in 0..row {
                    vertices.push(origin + u * (i as f32 * step) + v * (j as f32 * step));
                }
            }

            for j in 0..n {
                for i in 0..n {
                    let a = base + j * row + i;
                    let b = a + 1;
                    let c = a + row + 1;
                    let d = a + row;
                    indices.extend_from_slice(&[a, b, c, a, c, d]);
                }
            }
        }

        Self::new(vertices, indices)
    }
}
