//! Parameter definitions with units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units and ranges where they have them
//! - Defaults matching the reference look
//! - serde support so a config file can override any of them

mod audio;
mod blob;
mod config;
mod render;

// Re-export all types
pub use audio::{AnalyserConfig, BandRanges, Ballistics, SmoothingConfig};
pub use blob::{BlobGeometry, DeformMapping};
pub use config::{SessionDefaults, VisualizerConfig};
pub use render::RenderConfig;
