//! Fixed perspective camera looking at the blob.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Camera orbiting nothing: eye fixed, target at the origin
pub struct CameraSystem {
    eye: Vec3,
    target: Vec3,
}

impl CameraSystem {
    /// Create camera from render configuration
    pub fn new(render_config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::from_array(render_config.camera_position),
            target: Vec3::ZERO,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Arguments
    /// * `render_config` - Rendering configuration (FOV, aspect ratio, etc.)
    /// * `aspect_ratio` - Current surface width / height
    pub fn view_proj_matrix(&self, render_config: &RenderConfig, aspect_ratio: f32) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            aspect_ratio,
            render_config.near_plane,
            render_config.far_plane,
        );
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_screen_center() {
        let config = RenderConfig::default();
        let camera = CameraSystem::new(&config);
        let clip = camera.view_proj_matrix(&config, config.aspect_ratio()) * glam::Vec4::W;
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn test_unit_blob_fits_in_view() {
        let config = RenderConfig::default();
        let camera = CameraSystem::new(&config);
        let view_proj = camera.view_proj_matrix(&config, config.aspect_ratio());

        // Full bass and mid at intensity 1: scale 1.35, wobble 1.08
        let top = view_proj.project_point3(Vec3::new(0.0, 1.35 * 1.08, 0.0));
        assert!(top.y < 1.0);
    }
}
