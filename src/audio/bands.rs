//! Reduction of a spectrum frame into bass/mid/treble bands.

use std::ops::Range;

use super::spectrum::SpectrumFrame;
use super::Bands;
use crate::params::BandRanges;

const BYTE_MAX: f32 = 255.0;

/// Largest magnitude within `range`, clamped to the frame length.
/// An empty or out-of-frame range reads as silence.
pub fn peak(bins: &[u8], range: &Range<usize>) -> u8 {
    let end = range.end.min(bins.len());
    let start = range.start.min(end);
    bins[start..end].iter().copied().max().unwrap_or(0)
}

/// Reduce a frame to raw (unsmoothed) bands in [0, 1]
pub fn extract(frame: &SpectrumFrame, ranges: &BandRanges) -> Bands {
    let bins = frame.bins();
    let level = |range: &Range<usize>| peak(bins, range) as f32 / BYTE_MAX;

    Bands {
        bass: level(&ranges.bass),
        mid: level(&ranges.mid),
        treble: level(&ranges.treble),
    }
}
