//! vibeblob library - audio-reactive blob visualizer
//!
//! Reduces a live spectrum to smoothed bass/mid/treble levels and maps
//! them onto the shape and material of an icosphere.

pub mod audio;
pub mod blob;
pub mod camera;
pub mod cli;
pub mod error;
pub mod logging;
pub mod params;
pub mod rendering;
pub mod visualizer;
