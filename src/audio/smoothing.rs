//! Asymmetric exponential smoothing of band levels.

use super::Bands;
use crate::params::{Ballistics, SmoothingConfig};

#[inline]
fn follow(prev: f32, raw: f32, ballistics: Ballistics) -> f32 {
    let k = ballistics.coefficient(prev, raw);
    prev + (raw - prev) * k
}

/// Move each band of `prev` toward `raw`: fast attack, slow release
///
/// With coefficients in (0, 1] the result never overshoots `raw`, so
/// inputs in [0, 1] keep the output in [0, 1].
pub fn smooth(prev: &Bands, raw: &Bands, config: &SmoothingConfig) -> Bands {
    Bands {
        bass: follow(prev.bass, raw.bass, config.bass),
        mid: follow(prev.mid, raw.mid, config.mid),
        treble: follow(prev.treble, raw.treble, config.treble),
    }
}
