//! Per-session audio analysis state: sample → extract → smooth.

use tracing::{debug, info};

use super::bands::extract;
use super::smoothing::smooth;
use super::spectrum::SpectrumSource;
use super::Bands;
use crate::params::{BandRanges, SmoothingConfig};

/// Owns the spectrum source and the smoothed bands that persist across frames
pub struct AudioAnalysis<S> {
    source: S,
    ranges: BandRanges,
    smoothing: SmoothingConfig,
    raw: Bands,
    smoothed: Bands,
}

impl<S: SpectrumSource> AudioAnalysis<S> {
    pub fn new(source: S, ranges: BandRanges, smoothing: SmoothingConfig) -> Self {
        debug!(
            "Audio analysis: {} bins, bass {:?} mid {:?} treble {:?}",
            source.bin_count(),
            ranges.bass,
            ranges.mid,
            ranges.treble
        );
        Self {
            source,
            ranges,
            smoothing,
            raw: Bands::ZERO,
            smoothed: Bands::ZERO,
        }
    }

    /// Advance one frame. Call once per rendered frame: a second call in the
    /// same frame applies smoothing twice.
    pub fn update_audio(&mut self) {
        let frame = self.source.sample();
        self.raw = extract(frame, &self.ranges);
        self.smoothed = smooth(&self.smoothed, &self.raw, &self.smoothing);
    }

    /// Latest smoothed bands
    pub fn bands(&self) -> Bands {
        self.smoothed
    }

    /// This frame's unsmoothed reduction
    pub fn raw_bands(&self) -> Bands {
        self.raw
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Swap the spectrum source (e.g. once playback attaches an analyser).
    /// Smoothed bands carry over.
    pub fn replace_source(&mut self, source: S) -> S {
        info!("Spectrum source replaced ({} bins)", source.bin_count());
        std::mem::replace(&mut self.source, source)
    }

    /// Replace bin ranges after the analysis resolution changed
    pub fn set_ranges(&mut self, ranges: BandRanges) {
        info!(
            "Band ranges set: bass {:?} mid {:?} treble {:?}",
            ranges.bass, ranges.mid, ranges.treble
        );
        self.ranges = ranges;
    }

    pub fn ranges(&self) -> &BandRanges {
        &self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SilentSource, SpectrumFrame};

    /// Source returning a fixed frame
    struct ConstantSource(SpectrumFrame);

    impl SpectrumSource for ConstantSource {
        fn sample(&mut self) -> &SpectrumFrame {
            &self.0
        }

        fn bin_count(&self) -> usize {
            self.0.len()
        }
    }

    fn analysis(value: u8) -> AudioAnalysis<ConstantSource> {
        AudioAnalysis::new(
            ConstantSource(SpectrumFrame::from(vec![value; 1024])),
            BandRanges::default(),
            SmoothingConfig::default(),
        )
    }

    #[test]
    fn test_starts_at_zero() {
        let analysis = analysis(255);
        assert_eq!(analysis.bands(), Bands::ZERO);
    }

    #[test]
    fn test_update_applies_one_smoothing_step() {
        let mut analysis = analysis(255);
        analysis.update_audio();

        assert_eq!(analysis.raw_bands(), Bands::new(1.0, 1.0, 1.0));
        let bands = analysis.bands();
        assert!((bands.bass - 0.28).abs() < 1e-6);
        assert!((bands.mid - 0.22).abs() < 1e-6);
        assert!((bands.treble - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_get_bands_does_not_mutate() {
        let mut analysis = analysis(255);
        analysis.update_audio();
        let first = analysis.bands();
        let second = analysis.bands();
        assert_eq!(first, second);
    }

    #[test]
    fn test_double_update_double_applies() {
        let mut once = analysis(255);
        once.update_audio();

        let mut twice = analysis(255);
        twice.update_audio();
        twice.update_audio();

        assert!(twice.bands().bass > once.bands().bass);
    }

    #[test]
    fn test_silent_source_settles_to_zero() {
        let mut analysis = AudioAnalysis::new(
            SilentSource::new(1024),
            BandRanges::default(),
            SmoothingConfig::default(),
        );
        for _ in 0..10 {
            analysis.update_audio();
        }
        assert_eq!(analysis.bands(), Bands::ZERO);
    }
}
