//! Material state driven by treble and the visual mode.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Visual theme, chosen by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    /// Emissive, treble-tinted cyan → violet
    #[default]
    Neon,
    /// Solid neutral white
    Minimal,
    /// Neutral white wireframe
    Wire,
}

impl fmt::Display for VisualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VisualMode::Neon => "neon",
            VisualMode::Minimal => "minimal",
            VisualMode::Wire => "wire",
        };
        f.write_str(name)
    }
}

/// Colour in hue/saturation/lightness, each nominally in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Linear RGB; hue wraps, saturation and lightness clamp
    pub fn to_rgb(&self) -> [f32; 3] {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            return [l, l, l];
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        [
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        ]
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Surface appearance of the blob
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Hsl,
    pub emissive: Hsl,
    pub emissive_intensity: f32,
    pub wireframe: bool,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        let mut material = Self {
            color: Hsl::default(),
            emissive: Hsl::default(),
            emissive_intensity: 0.0,
            wireframe: false,
            metalness: 0.0,
            roughness: 1.0,
        };
        modulate(&mut material, 0.0, VisualMode::Minimal);
        material
    }
}

const NEON_BASE_HUE: f32 = 0.55;
const NEON_HUE_SWEEP: f32 = 0.2;
const NEON_BASE_GLOW: f32 = 1.2;
const NEON_GLOW_PER_TREBLE: f32 = 3.0;
const NEUTRAL: Hsl = Hsl::new(0.0, 0.0, 0.95);
const NO_EMISSION: Hsl = Hsl::new(0.0, 0.0, 0.0);

/// Overwrite every mode-dependent field of `material`
///
/// Only neon reacts to treble.
pub fn modulate(material: &mut Material, treble: f32, mode: VisualMode) {
    match mode {
        VisualMode::Neon => {
            let hue = NEON_BASE_HUE + treble * NEON_HUE_SWEEP;
            material.wireframe = false;
            material.color = Hsl::new(hue, 1.0, 0.55);
            material.emissive = Hsl::new(hue, 1.0, 0.22);
            material.emissive_intensity = NEON_BASE_GLOW + treble * NEON_GLOW_PER_TREBLE;
            material.metalness = 0.2;
            material.roughness = 0.25;
        }
        VisualMode::Minimal | VisualMode::Wire => {
            material.wireframe = mode == VisualMode::Wire;
            material.color = NEUTRAL;
            material.emissive = NO_EMISSION;
            material.emissive_intensity = 0.0;
            material.metalness = 0.1;
            material.roughness = 0.45;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_full_treble() {
        let mut material = Material::default();
        modulate(&mut material, 1.0, VisualMode::Neon);

        assert!(!material.wireframe);
        assert!((material.color.h - 0.75).abs() < 1e-6);
        assert_eq!(material.color.s, 1.0);
        assert_eq!(material.color.l, 0.55);
        assert!((material.emissive.h - 0.75).abs() < 1e-6);
        assert_eq!(material.emissive.l, 0.22);
        assert!((material.emissive_intensity - 4.2).abs() < 1e-6);
    }

    #[test]
    fn test_neon_silence() {
        let mut material = Material::default();
        modulate(&mut material, 0.0, VisualMode::Neon);
        assert!((material.color.h - 0.55).abs() < 1e-6);
        assert!((material.emissive_intensity - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_wire_ignores_treble() {
        for treble in [0.0, 0.3, 1.0, 2.0] {
            let mut material = Material::default();
            modulate(&mut material, treble, VisualMode::Wire);

            assert!(material.wireframe);
            assert_eq!(material.emissive_intensity, 0.0);
            assert_eq!(material.color, Hsl::new(0.0, 0.0, 0.95));
            assert_eq!(material.emissive, Hsl::new(0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_minimal_matches_wire_without_wireframe() {
        let mut wire = Material::default();
        let mut minimal = Material::default();
        modulate(&mut wire, 0.7, VisualMode::Wire);
        modulate(&mut minimal, 0.7, VisualMode::Minimal);

        assert!(!minimal.wireframe);
        assert_eq!(minimal.color, wire.color);
        assert_eq!(minimal.emissive, wire.emissive);
        assert_eq!(minimal.emissive_intensity, wire.emissive_intensity);
    }

    #[test]
    fn test_no_residual_state_between_modes() {
        let mut material = Material::default();
        modulate(&mut material, 1.0, VisualMode::Neon);
        modulate(&mut material, 1.0, VisualMode::Wire);
        modulate(&mut material, 0.5, VisualMode::Minimal);

        let mut fresh = Material::default();
        modulate(&mut fresh, 0.5, VisualMode::Minimal);
        assert_eq!(material, fresh);
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(Hsl::new(0.0, 0.0, 0.95).to_rgb(), [0.95, 0.95, 0.95]);

        let [r, g, b] = Hsl::new(0.0, 1.0, 0.5).to_rgb();
        assert!((r - 1.0).abs() < 1e-6 && g.abs() < 1e-6 && b.abs() < 1e-6);

        // Hue wraps past 1
        let wrapped = Hsl::new(1.25, 1.0, 0.5).to_rgb();
        let base = Hsl::new(0.25, 1.0, 0.5).to_rgb();
        for (a, b) in wrapped.iter().zip(base) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
