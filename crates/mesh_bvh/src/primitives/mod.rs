//! Primitive mesh generation
//!
//! Procedural triangle meshes for demos and tests. Real applications feed
//! the hierarchy with meshes from their own asset loaders.

pub mod mesh;

pub use mesh::TriangleMesh;
