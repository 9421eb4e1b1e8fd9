//! High-level blob system with audio-reactive deformation and material.

use tracing::info;

use super::deform::{deform, RestPose};
use super::material::{modulate, Material, VisualMode};
use super::mesh::BlobMesh;
use crate::audio::Bands;
use crate::params::{BlobGeometry, DeformMapping};

/// Blob mesh, its rest pose and material
pub struct BlobSystem {
    mesh: BlobMesh,
    rest: RestPose,
    material: Material,
    mapping: DeformMapping,
}

impl BlobSystem {
    /// Build the icosphere and capture its rest pose
    pub fn new(geometry: &BlobGeometry, mapping: DeformMapping) -> Self {
        Self::with_mesh(BlobMesh::icosphere(geometry.subdivisions), mapping)
    }

    /// Wrap an existing mesh; its current positions become the rest pose
    pub fn with_mesh(mesh: BlobMesh, mapping: DeformMapping) -> Self {
        let rest = RestPose::capture(&mesh.vertices);
        info!(
            "Blob: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.indices.len() / 3
        );
        Self {
            mesh,
            rest,
            material: Material::default(),
            mapping,
        }
    }

    /// Update blob for one frame
    ///
    /// # Arguments
    /// * `elapsed_s` - Time since start in seconds
    /// * `bands` - Smoothed frequency bands
    /// * `intensity` - User reaction multiplier
    /// * `mode` - Visual mode for this frame
    pub fn update(&mut self, elapsed_s: f32, bands: &Bands, intensity: f32, mode: VisualMode) {
        deform(
            &mut self.mesh,
            &self.rest,
            bands,
            intensity,
            elapsed_s,
            &self.mapping,
        );
        modulate(&mut self.material, bands.treble * intensity, mode);
    }

    /// Replace the geometry; the old rest pose is stale and is recaptured
    pub fn replace_geometry(&mut self, mut mesh: BlobMesh) {
        mesh.transform = self.mesh.transform;
        self.rest = RestPose::capture(&mesh.vertices);
        self.mesh = mesh;
        info!("Blob geometry replaced: {} vertices", self.mesh.vertex_count());
    }

    pub fn mesh(&self) -> &BlobMesh {
        &self.mesh
    }

    pub fn rest_pose(&self) -> &RestPose {
        &self.rest
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_reactive_mapping() {
        let mut blob = BlobSystem::new(&BlobGeometry { subdivisions: 1 }, DeformMapping::default());

        let bands = Bands::new(1.0, 0.5, 0.2);
        blob.update(0.0, &bands, 1.0, VisualMode::Neon);

        // Check that audio modulation is applied
        assert!(blob.mesh().transform.scale > 1.0);
        assert!(blob.material().emissive_intensity > 1.2);
        assert!(blob.material().color.h > 0.55);
    }

    #[test]
    fn test_replace_geometry_recaptures_rest_pose() {
        let mut blob = BlobSystem::new(&BlobGeometry { subdivisions: 1 }, DeformMapping::default());
        blob.update(0.5, &Bands::new(1.0, 1.0, 1.0), 1.0, VisualMode::Neon);
        let transform = blob.mesh().transform;

        let finer = BlobMesh::icosphere(2);
        let expected = RestPose::capture(&finer.vertices);
        blob.replace_geometry(finer);

        assert_eq!(blob.rest_pose(), &expected);
        assert_eq!(blob.mesh().vertex_count(), expected.len());
        assert_eq!(blob.mesh().transform, transform);

        // Deforming the new mesh touches every vertex
        blob.update(0.5, &Bands::new(0.0, 1.0, 0.0), 1.0, VisualMode::Wire);
        assert!(blob.material().wireframe);
    }
}
