//! Audio playback and spectrum analysis.
//!
//! Plays a glicol-synthesized track through cpal and reduces its live
//! spectrum to three smoothed frequency bands for audio-reactive visuals.

mod analyser;
mod analysis;
mod bands;
mod smoothing;
mod spectrum;
mod synthesis;
mod system;

// Re-export public types
pub use analyser::{blackman_window, FftAnalyser, SampleTap};
pub use analysis::AudioAnalysis;
pub use bands::{extract, peak};
pub use smoothing::smooth;
pub use spectrum::{SilentSource, SpectrumFrame, SpectrumSource};
pub use synthesis::Track;
pub use system::AudioSystem;

use serde::{Deserialize, Serialize};

/// Frequency band levels, each normalized to [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

impl Bands {
    pub const ZERO: Self = Self {
        bass: 0.0,
        mid: 0.0,
        treble: 0.0,
    };

    pub const fn new(bass: f32, mid: f32, treble: f32) -> Self {
        Self { bass, mid, treble }
    }

    /// Scale all bands by the user intensity
    pub fn scaled(&self, intensity: f32) -> Self {
        Self {
            bass: self.bass * intensity,
            mid: self.mid * intensity,
            treble: self.treble * intensity,
        }
    }
}
