//! FFT spectrum analyser with analyser-node byte semantics.
//!
//! The audio callback pushes samples into a `SampleTap`; the render thread
//! calls `sample()` once per frame, which windows the newest `fft_size`
//! samples, transforms them and maps smoothed magnitudes onto 0-255.

use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::{Arc, Mutex, MutexGuard};

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use tracing::debug;

use super::spectrum::{SpectrumFrame, SpectrumSource};
use crate::params::AnalyserConfig;

/// Ring of the most recent time-domain samples, shared with the audio callback
#[derive(Clone, Debug)]
pub struct SampleTap {
    inner: Arc<Mutex<TapBuffer>>,
}

#[derive(Debug)]
struct TapBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
    /// Total samples ever pushed (detects fresh audio)
    written: u64,
}

/// Write access held for the duration of one audio callback
pub struct TapWriter<'a> {
    guard: MutexGuard<'a, TapBuffer>,
}

impl TapWriter<'_> {
    pub fn push(&mut self, sample: f32) {
        let buf = &mut *self.guard;
        if buf.samples.len() == buf.capacity {
            buf.samples.pop_front();
        }
        buf.samples.push_back(sample);
        buf.written += 1;
    }
}

impl SampleTap {
    /// Tap keeping the newest `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TapBuffer {
                samples: VecDeque::with_capacity(capacity),
                capacity,
                written: 0,
            })),
        }
    }

    /// Lock the tap for writing (a poisoned lock is recovered, samples are plain data)
    pub fn writer(&self) -> TapWriter<'_> {
        TapWriter {
            guard: self.inner.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    /// Push a block of samples
    pub fn extend(&self, samples: &[f32]) {
        let mut writer = self.writer();
        for &s in samples {
            writer.push(s);
        }
    }

    /// Total number of samples pushed so far
    pub fn written(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).written
    }

    /// Copy the newest samples into `out`, right-aligned and zero-padded at the front.
    /// Returns the write counter at the time of the copy.
    fn snapshot(&self, out: &mut [f32]) -> u64 {
        let buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let available = buf.samples.len().min(out.len());
        let pad = out.len() - available;
        let skip = buf.samples.len() - available;

        out[..pad].fill(0.0);
        for (dst, &src) in out[pad..].iter_mut().zip(buf.samples.iter().skip(skip)) {
            *dst = src;
        }
        buf.written
    }
}

/// Spectrum source backed by an FFT over the shared sample tap
pub struct FftAnalyser {
    config: AnalyserConfig,
    tap: SampleTap,

    // FFT resources (pre-allocated)
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    time_domain: Vec<f32>,
    fft_buffer: Vec<Complex<f32>>,

    /// Magnitudes blended across frames by `smoothing_time_constant`
    smoothed: Vec<f32>,
    frame: SpectrumFrame,
    last_written: u64,
}

impl FftAnalyser {
    /// Create an analyser with its own sample tap
    pub fn new(config: AnalyserConfig) -> Self {
        let tap = SampleTap::new(config.fft_size);
        Self::with_tap(config, tap)
    }

    /// Create an analyser reading from an existing tap
    pub fn with_tap(config: AnalyserConfig, tap: SampleTap) -> Self {
        let n = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);

        // Pre-compute Blackman window
        let window = (0..n).map(|i| blackman_window(i, n)).collect();

        debug!(
            "FFT analyser: size {}, {} bins, {}..{} dB",
            n,
            config.bin_count(),
            config.min_decibels,
            config.max_decibels
        );

        Self {
            fft,
            window,
            time_domain: vec![0.0; n],
            fft_buffer: vec![Complex::new(0.0, 0.0); n],
            smoothed: vec![0.0; config.bin_count()],
            frame: SpectrumFrame::zeroed(config.bin_count()),
            last_written: 0,
            config,
            tap,
        }
    }

    /// Handle for the audio callback to feed samples into
    pub fn tap(&self) -> &SampleTap {
        &self.tap
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    fn recompute(&mut self) {
        let n = self.config.fft_size;
        let tau = self.config.smoothing_time_constant;
        let db_range = self.config.max_decibels - self.config.min_decibels;

        self.last_written = self.tap.snapshot(&mut self.time_domain);

        // Apply window and fill buffer
        for ((dst, &s), &w) in self
            .fft_buffer
            .iter_mut()
            .zip(&self.time_domain)
            .zip(&self.window)
        {
            *dst = Complex::new(s * w, 0.0);
        }

        // Perform FFT
        self.fft.process(&mut self.fft_buffer);

        let scale = 1.0 / n as f32;
        for (k, byte) in self.frame.bins_mut().iter_mut().enumerate() {
            let magnitude = self.fft_buffer[k].norm() * scale;
            let smoothed = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            self.smoothed[k] = smoothed;

            let db = 20.0 * smoothed.log10();
            let scaled = 255.0 * (db - self.config.min_decibels) / db_range;
            *byte = if scaled.is_finite() {
                scaled.clamp(0.0, 255.0) as u8
            } else {
                0
            };
        }
    }
}

impl SpectrumSource for FftAnalyser {
    fn sample(&mut self) -> &SpectrumFrame {
        // Only recompute when the callback delivered new audio
        if self.tap.written() != self.last_written {
            self.recompute();
        }
        &self.frame
    }

    fn bin_count(&self) -> usize {
        self.frame.len()
    }
}

/// Blackman window function for FFT analysis
pub fn blackman_window(index: usize, size: usize) -> f32 {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    let x = index as f32 / size as f32;
    A0 - A1 * (2.0 * PI * x).cos() + A2 * (4.0 * PI * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(bin: usize, size: usize, amplitude: f32) -> Vec<f32> {
        (0..size)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / size as f32).sin())
            .collect()
    }

    #[test]
    fn test_blackman_window() {
        let size = 1024;

        // Blackman window is ~0 at the edge, 1 at center
        assert!(blackman_window(0, size).abs() < 0.001);
        assert!((blackman_window(size / 2, size) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_no_audio_gives_zero_frame() {
        let mut analyser = FftAnalyser::new(AnalyserConfig::default());
        let frame = analyser.sample();
        assert_eq!(frame.len(), 1024);
        assert!(frame.is_silent());
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let config = AnalyserConfig::default();
        let mut analyser = FftAnalyser::new(config.clone());
        analyser.tap().extend(&sine(32, config.fft_size, 1.0));

        let frame = analyser.sample();
        assert_eq!(frame.bins()[32], 255);
        assert!(frame.bins()[300] < 16);
    }

    #[test]
    fn test_repeated_sample_is_identical_until_new_audio() {
        let config = AnalyserConfig::default();
        let mut analyser = FftAnalyser::new(config.clone());
        analyser.tap().extend(&sine(40, config.fft_size, 0.01));

        let first = analyser.sample().clone();
        let second = analyser.sample().clone();
        assert_eq!(first, second);

        // Time smoothing makes the next frame with the same audio brighter
        analyser.tap().extend(&sine(40, config.fft_size, 0.01));
        let third = analyser.sample().clone();
        assert!(third.bins()[40] >= first.bins()[40]);
    }

    #[test]
    fn test_silent_audio_stays_zero() {
        let config = AnalyserConfig::default();
        let mut analyser = FftAnalyser::new(config.clone());
        analyser.tap().extend(&vec![0.0; config.fft_size]);
        assert!(analyser.sample().is_silent());
    }

    #[test]
    fn test_tap_keeps_newest_samples() {
        let tap = SampleTap::new(4);
        tap.extend(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(tap.written(), 6);

        let mut out = [0.0; 4];
        tap.snapshot(&mut out);
        assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);

        let mut wide = [9.0; 6];
        tap.snapshot(&mut wide);
        assert_eq!(wide, [0.0, 0.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
