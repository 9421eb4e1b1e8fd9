//! Configuration file management.
//!
//! Loads user preferences from a TOML file (default `~/.vibeblob.toml`).
//! Every field is optional; missing fields fall back to compiled defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    AnalyserConfig, BandRanges, BlobGeometry, DeformMapping, RenderConfig, SmoothingConfig,
};
use crate::audio::Track;
use crate::blob::VisualMode;
use crate::error::{Result, VisualizerError};

const CONFIG_FILE_NAME: &str = ".vibeblob.toml";

/// Initial values for the user-facing controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Starting visual mode
    pub mode: VisualMode,

    /// Starting reaction intensity (practical range 0-2)
    pub intensity: f32,

    /// Starting output volume (0-1)
    pub volume: f32,

    /// Starting track
    pub track: Track,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            mode: VisualMode::Neon,
            intensity: 1.0,
            volume: 0.8,
            track: Track::default(),
        }
    }
}

/// Complete visualizer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub analyser: AnalyserConfig,
    pub bands: BandRanges,
    pub smoothing: SmoothingConfig,
    pub geometry: BlobGeometry,
    pub mapping: DeformMapping,
    pub render: RenderConfig,
    pub session: SessionDefaults,
}

impl VisualizerConfig {
    /// Default config file location in the user's home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| VisualizerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if it exists,
    /// else compiled defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load_from(&default),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.analyser.validate()?;
        self.bands.validate()?;
        self.smoothing.validate()?;
        self.geometry.validate()?;

        if self.bands.treble.end > self.analyser.bin_count() {
            tracing::warn!(
                "Treble range ends at bin {} but the analyser only has {} bins; it will be clamped",
                self.bands.treble.end,
                self.analyser.bin_count()
            );
        }
        if !(0.0..=1.0).contains(&self.session.volume) {
            return Err(VisualizerError::InvalidConfig(format!(
                "Volume must be in [0, 1], got {}",
                self.session.volume
            )));
        }
        if !self.session.intensity.is_finite() || self.session.intensity < 0.0 {
            return Err(VisualizerError::InvalidConfig(format!(
                "Intensity must be a finite value >= 0, got {}",
                self.session.intensity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = VisualizerConfig::from_toml_str("").unwrap();
        assert_eq!(config, VisualizerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let text = r#"
            [session]
            mode = "wire"
            intensity = 1.5

            [bands]
            bass = { start = 1, end = 8 }

            [smoothing.treble]
            attack = 0.1
            release = 0.01
        "#;
        let config = VisualizerConfig::from_toml_str(text).unwrap();

        assert_eq!(config.session.mode, VisualMode::Wire);
        assert_eq!(config.session.intensity, 1.5);
        assert_eq!(config.session.volume, 0.8);
        assert_eq!(config.bands.bass, 1..8);
        assert_eq!(config.bands.mid, 10..60);
        assert_eq!(config.smoothing.treble.attack, 0.1);
        assert_eq!(config.smoothing.bass.attack, 0.28);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let text = r#"
            [smoothing.bass]
            attack = 0.01
            release = 0.2
        "#;
        assert!(matches!(
            VisualizerConfig::from_toml_str(text),
            Err(VisualizerError::InvalidConfig(_))
        ));

        let text = "[analyser]\nfft_size = 1000\n";
        assert!(VisualizerConfig::from_toml_str(text).is_err());

        let text = "[session]\nvolume = 1.5\n";
        assert!(VisualizerConfig::from_toml_str(text).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            VisualizerConfig::from_toml_str("[session\nmode = 3"),
            Err(VisualizerError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = VisualizerConfig::load_from(Path::new("/nonexistent/vibeblob.toml"));
        assert!(matches!(result, Err(VisualizerError::Io { .. })));
    }
}
