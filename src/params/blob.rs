//! Blob geometry parameters and audio-reactive mapping.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisualizerError};

/// Icosphere geometry parameters (unit radius: the wobble re-projects
/// every vertex onto the unit sphere)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobGeometry {
    /// Icosahedron subdivision passes (5 = 10,242 vertices)
    pub subdivisions: u32,
}

impl Default for BlobGeometry {
    fn default() -> Self {
        Self { subdivisions: 5 }
    }
}

impl BlobGeometry {
    pub fn validate(&self) -> Result<()> {
        // Level 8 is already ~655k vertices
        if self.subdivisions > 8 {
            return Err(VisualizerError::InvalidConfig(format!(
                "Blob subdivisions must be <= 8, got {}",
                self.subdivisions
            )));
        }
        Ok(())
    }
}

/// Mapping from smoothed bands to blob motion and shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformMapping {
    /// Uniform scale gained per unit bass
    /// Formula: scale = 1 + bass * this
    pub bass_to_scale: f32,

    /// Yaw advance per frame with silence (radians)
    pub base_yaw_step: f32,

    /// Extra yaw advance per frame per unit bass (radians)
    pub bass_to_yaw_step: f32,

    /// Pitch advance per frame, independent of audio (radians)
    pub pitch_step: f32,

    /// Radial wobble amplitude per unit mid
    /// Formula: radius = 1 + sin(t * wobble_time_rate + i * wobble_phase_step) * this * mid
    pub mid_to_wobble: f32,

    /// Angular rate of the wobble wave (radians per second)
    pub wobble_time_rate: f32,

    /// Phase offset between consecutive vertices (radians)
    pub wobble_phase_step: f32,
}

impl Default for DeformMapping {
    fn default() -> Self {
        Self {
            bass_to_scale: 0.35,
            base_yaw_step: 0.003,
            bass_to_yaw_step: 0.01,
            pitch_step: 0.0015,
            mid_to_wobble: 0.08,
            wobble_time_rate: 2.0,
            wobble_phase_step: 0.02,
        }
    }
}
