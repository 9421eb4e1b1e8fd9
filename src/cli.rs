//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::audio::Track;
use crate::blob::VisualMode;
use crate::params::VisualizerConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "vibeblob")]
#[command(about = "Audio-reactive 3D blob driven by a live spectrum", long_about = None)]
pub struct Args {
    /// Config file (defaults to ~/.vibeblob.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Starting visual mode
    #[arg(long, value_enum)]
    pub mode: Option<VisualMode>,

    /// Starting reaction intensity (0-2)
    #[arg(long, value_name = "FACTOR")]
    pub intensity: Option<f32>,

    /// Starting output volume (0-1)
    #[arg(long, value_name = "GAIN")]
    pub volume: Option<f32>,

    /// Starting track
    #[arg(long, value_enum)]
    pub track: Option<Track>,

    /// Icosphere subdivision level
    #[arg(long, value_name = "LEVEL")]
    pub subdivisions: Option<u32>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Apply command-line overrides on top of file/default configuration
    pub fn apply_overrides(&self, config: &mut VisualizerConfig) {
        if let Some(mode) = self.mode {
            config.session.mode = mode;
        }
        if let Some(intensity) = self.intensity {
            config.session.intensity = intensity;
        }
        if let Some(volume) = self.volume {
            config.session.volume = volume;
        }
        if let Some(track) = self.track {
            config.session.track = track;
        }
        if let Some(subdivisions) = self.subdivisions {
            config.geometry.subdivisions = subdivisions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let args = Args::parse_from(["vibeblob"]);
        let mut config = VisualizerConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config, VisualizerConfig::default());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_flags_override_session() {
        let args = Args::parse_from([
            "vibeblob",
            "--mode",
            "wire",
            "--intensity",
            "1.5",
            "--volume",
            "0.3",
            "--track",
            "deep-drift",
            "--subdivisions",
            "3",
        ]);
        let mut config = VisualizerConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.session.mode, VisualMode::Wire);
        assert_eq!(config.session.intensity, 1.5);
        assert_eq!(config.session.volume, 0.3);
        assert_eq!(config.session.track, Track::DeepDrift);
        assert_eq!(config.geometry.subdivisions, 3);
    }
}
