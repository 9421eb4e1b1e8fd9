//! Rendering and scene configuration.

use serde::{Deserialize, Serialize};

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Camera eye position, looking at the origin
    pub camera_position: [f32; 3],

    /// Ambient light intensity
    pub ambient_intensity: f32,

    /// Directional light position (direction points from here to origin)
    pub light_position: [f32; 3],

    /// Directional light intensity
    pub light_intensity: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 50.0,
            near_plane: 0.1,
            far_plane: 100.0,
            camera_position: [0.0, 0.0, 3.2],
            ambient_intensity: 0.35,
            light_position: [2.0, 2.0, 2.0],
            light_intensity: 1.2,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
