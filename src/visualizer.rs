//! Per-frame pipeline: sample → extract → smooth → deform → modulate.

use crate::audio::{AudioAnalysis, Bands, SpectrumSource};
use crate::blob::{BlobMesh, BlobSystem, Material, VisualMode};
use crate::params::{BandRanges, VisualizerConfig};

/// User-facing parameters snapshotted once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the visualizer started
    pub elapsed_s: f32,
    /// Reaction strength multiplier (practical range 0-2)
    pub intensity: f32,
    pub mode: VisualMode,
}

/// Visualizer session: audio analysis state plus the blob it drives
pub struct Visualizer<S> {
    audio: AudioAnalysis<S>,
    blob: BlobSystem,
}

impl<S: SpectrumSource> Visualizer<S> {
    /// Build the session in its initial state: zero bands, rest pose captured
    pub fn new(source: S, config: &VisualizerConfig) -> Self {
        Self {
            audio: AudioAnalysis::new(source, config.bands.clone(), config.smoothing),
            blob: BlobSystem::new(&config.geometry, config.mapping.clone()),
        }
    }

    /// Run one frame of the pipeline. Call exactly once per rendered frame.
    pub fn tick(&mut self, input: FrameInput) {
        self.audio.update_audio();
        let bands = self.audio.bands();
        self.blob
            .update(input.elapsed_s, &bands, input.intensity, input.mode);
    }

    /// Advance audio analysis only (sampling, extraction, smoothing)
    pub fn update_audio(&mut self) {
        self.audio.update_audio();
    }

    /// Latest smoothed bands
    pub fn bands(&self) -> Bands {
        self.audio.bands()
    }

    /// Swap in a new spectrum source with matching bin ranges
    /// (cached ranges are invalid once the resolution changes)
    pub fn reconfigure_analyser(&mut self, source: S, ranges: BandRanges) -> S {
        self.audio.set_ranges(ranges);
        self.audio.replace_source(source)
    }

    /// Attach a new spectrum source, keeping the current ranges
    pub fn attach_source(&mut self, source: S) -> S {
        self.audio.replace_source(source)
    }

    /// Replace the blob geometry (rest pose is recaptured)
    pub fn replace_geometry(&mut self, mesh: BlobMesh) {
        self.blob.replace_geometry(mesh);
    }

    pub fn audio(&self) -> &AudioAnalysis<S> {
        &self.audio
    }

    pub fn mesh(&self) -> &BlobMesh {
        self.blob.mesh()
    }

    pub fn material(&self) -> &Material {
        self.blob.material()
    }

    pub fn blob(&self) -> &BlobSystem {
        &self.blob
    }
}
