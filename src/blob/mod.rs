//! Audio-reactive blob: icosphere mesh, deformation and material.

mod deform;
mod material;
mod mesh;
mod system;

// Re-export public types
pub use deform::{advance_transform, deform, wobble_factor, wobble_vertices, RestPose};
pub use material::{modulate, Hsl, Material, VisualMode};
pub use mesh::{BlobMesh, Transform, Vertex};
pub use system::BlobSystem;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_mesh_creation() {
        let mesh = BlobMesh::icosphere(5);

        // Check vertex count: 10 * 4^n + 2
        assert_eq!(mesh.vertex_count(), 10_242);

        // Check triangle count: 20 * 4^n triangles * 3 indices
        assert_eq!(mesh.indices.len(), 20 * 4usize.pow(5) * 3);
    }
}
