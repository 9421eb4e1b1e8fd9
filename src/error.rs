//! Error types for visualizer setup.
//!
//! Only setup paths (configuration, audio device, GPU) can fail. The
//! per-frame pipeline is infallible and degrades to a neutral visual.

use std::path::PathBuf;

use thiserror::Error;

/// Visualizer setup errors
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// A configuration value is out of range or inconsistent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `VisualizerConfig`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Audio output device unavailable or stream failed
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// Glicol engine rejected a composition
    #[error("Synth error: {0}")]
    Synth(String),

    /// GPU surface, adapter or device setup failed
    #[error("Render setup error: {0}")]
    Render(String),
}

/// Result type for visualizer setup
pub type Result<T> = std::result::Result<T, VisualizerError>;
