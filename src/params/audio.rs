//! Audio analysis configuration: analyser resolution, band ranges, ballistics.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisualizerError};

/// Spectrum analyser configuration (analyser-node semantics)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserConfig {
    /// FFT window size (must be power of 2)
    /// Bin count exposed per frame is half of this
    pub fft_size: usize,

    /// Magnitude mapped to byte 0 (dBFS)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (dBFS)
    pub max_decibels: f32,

    /// Weight of the previous magnitude when blending frames, in [0, 1)
    pub smoothing_time_constant: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            min_decibels: -100.0,
            max_decibels: -30.0,
            smoothing_time_constant: 0.8,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins per spectrum frame
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(VisualizerError::InvalidConfig(format!(
                "FFT size must be a power of 2 in 32..=32768, got {}",
                self.fft_size
            )));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(VisualizerError::InvalidConfig(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(VisualizerError::InvalidConfig(format!(
                "smoothing_time_constant must be in [0, 1), got {}",
                self.smoothing_time_constant
            )));
        }
        Ok(())
    }
}

/// Spectrum bin ranges reduced into the three bands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandRanges {
    /// Low band bins (2..10 ≈ 43-215 Hz at 2048 / 44.1 kHz)
    pub bass: Range<usize>,

    /// Mid band bins (10..60 ≈ 215-1290 Hz)
    pub mid: Range<usize>,

    /// High band bins (60..200 ≈ 1.3-4.3 kHz)
    pub treble: Range<usize>,
}

impl Default for BandRanges {
    fn default() -> Self {
        Self {
            bass: 2..10,
            mid: 10..60,
            treble: 60..200,
        }
    }
}

impl BandRanges {
    /// Derive bin ranges from frequency edges (Hz)
    ///
    /// `edges` are the four boundaries low..mid..high..top.
    pub fn from_hz(edges: [f32; 4], sample_rate_hz: f32, fft_size: usize) -> Self {
        let hz_to_bin = |hz: f32| ((hz * fft_size as f32) / sample_rate_hz) as usize;
        let [lo, mid, high, top] = edges.map(hz_to_bin);
        Self {
            bass: lo..mid,
            mid: mid..high,
            treble: high..top,
        }
    }

    /// Ranges must ascend bass → mid → treble without overlapping
    pub fn validate(&self) -> Result<()> {
        let ordered = self.bass.start <= self.bass.end
            && self.bass.end <= self.mid.start
            && self.mid.start <= self.mid.end
            && self.mid.end <= self.treble.start
            && self.treble.start <= self.treble.end;

        if !ordered {
            return Err(VisualizerError::InvalidConfig(format!(
                "Band ranges must be ascending and disjoint, got bass {:?}, mid {:?}, treble {:?}",
                self.bass, self.mid, self.treble
            )));
        }
        Ok(())
    }
}

/// Attack/release coefficient pair for one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ballistics {
    /// Blend factor while the value rises
    pub attack: f32,

    /// Blend factor while the value falls
    pub release: f32,
}

impl Ballistics {
    pub const fn new(attack: f32, release: f32) -> Self {
        Self { attack, release }
    }

    /// Select the coefficient for a move from `prev` toward `raw`
    #[inline]
    pub fn coefficient(&self, prev: f32, raw: f32) -> f32 {
        if raw > prev {
            self.attack
        } else {
            self.release
        }
    }
}

/// Per-band smoothing ballistics
///
/// Treble moves slowest: colour changes read as flicker sooner than motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub bass: Ballistics,
    pub mid: Ballistics,
    pub treble: Ballistics,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            bass: Ballistics::new(0.28, 0.05),
            mid: Ballistics::new(0.22, 0.04),
            treble: Ballistics::new(0.14, 0.02),
        }
    }
}

impl SmoothingConfig {
    /// Each band needs attack > release, and treble ≤ mid ≤ bass
    pub fn validate(&self) -> Result<()> {
        for (name, b) in [("bass", self.bass), ("mid", self.mid), ("treble", self.treble)] {
            let in_unit = |k: f32| k > 0.0 && k <= 1.0;
            if !in_unit(b.attack) || !in_unit(b.release) {
                return Err(VisualizerError::InvalidConfig(format!(
                    "{} coefficients must lie in (0, 1], got {:?}",
                    name, b
                )));
            }
            if b.attack <= b.release {
                return Err(VisualizerError::InvalidConfig(format!(
                    "{} attack ({}) must exceed release ({})",
                    name, b.attack, b.release
                )));
            }
        }

        let ordered = |lo: Ballistics, hi: Ballistics| {
            lo.attack <= hi.attack && lo.release <= hi.release
        };
        if !ordered(self.treble, self.mid) || !ordered(self.mid, self.bass) {
            return Err(VisualizerError::InvalidConfig(
                "Smoothing coefficients must satisfy treble <= mid <= bass".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyserConfig::default().validate().is_ok());
        assert!(BandRanges::default().validate().is_ok());
        assert!(SmoothingConfig::default().validate().is_ok());
        assert_eq!(AnalyserConfig::default().bin_count(), 1024);
    }

    #[test]
    fn test_fft_size_must_be_power_of_two() {
        let config = AnalyserConfig {
            fft_size: 1000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlapping_ranges_rejected() {
        let ranges = BandRanges {
            bass: 2..20,
            mid: 10..60,
            treble: 60..200,
        };
        assert!(ranges.validate().is_err());
    }

    #[test]
    fn test_ranges_from_hz() {
        // 44100 / 2048 ≈ 21.5 Hz per bin
        let ranges = BandRanges::from_hz([43.0, 215.0, 1290.0, 4300.0], 44100.0, 2048);
        assert_eq!(ranges.bass, 1..9);
        assert!(ranges.mid.start == ranges.bass.end);
        assert!(ranges.treble.start == ranges.mid.end);
        assert!(ranges.validate().is_ok());
    }

    #[test]
    fn test_release_faster_than_attack_rejected() {
        let config = SmoothingConfig {
            mid: Ballistics::new(0.04, 0.22),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_treble_faster_than_bass_rejected() {
        let config = SmoothingConfig {
            treble: Ballistics::new(0.5, 0.1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_coefficient_selection() {
        let b = Ballistics::new(0.28, 0.05);
        assert_eq!(b.coefficient(0.0, 1.0), 0.28);
        assert_eq!(b.coefficient(1.0, 0.0), 0.05);
        assert_eq!(b.coefficient(0.5, 0.5), 0.05);
    }
}
