//! Audio playback system: glicol synthesis → gain → analyser tap → speakers.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glicol::Engine;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};

use super::analyser::SampleTap;
use super::synthesis::Track;
use crate::error::{Result, VisualizerError};

/// Glicol block size (samples per engine block, 2.9ms @ 44.1kHz)
const BLOCK_SIZE: usize = 128;

/// Safety limiter: hard clip to ±0.5 to prevent ear damage
const LIMIT: f32 = 0.5;

/// State shared with the audio callback
struct Playback {
    engine: Engine<BLOCK_SIZE>,
    volume: f32,
    playing: bool,
}

/// Audio system managing synthesis, gain and the analyser tap
pub struct AudioSystem {
    playback: Arc<Mutex<Playback>>,
    track: Track,
    sample_rate_hz: u32,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start streaming `track` (paused).
    ///
    /// Post-gain samples of the first channel are pushed into `tap`.
    pub fn new(tap: SampleTap, track: Track, volume: f32) -> Result<Self> {
        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| VisualizerError::AudioDevice("No audio output device found".into()))?;

        let config = device
            .default_output_config()
            .map_err(|e| VisualizerError::AudioDevice(format!("Failed to get audio config: {}", e)))?;

        let sample_rate_hz = config.sample_rate().0;
        let channels = config.channels() as usize;

        info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz,
            channels
        );

        // Create Glicol engine
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate_hz as usize);
        load_composition(&mut engine, track)?;

        let playback = Arc::new(Mutex::new(Playback {
            engine,
            volume: volume.clamp(0.0, 1.0),
            playing: false,
        }));
        let playback_clone = Arc::clone(&playback);

        // Build audio output stream
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut playback = playback_clone.lock().unwrap_or_else(|e| e.into_inner());
                    let mut tap = tap.writer();

                    if !playback.playing {
                        // Paused: speakers and analyser both hear silence
                        data.fill(0.0);
                        for _ in 0..data.len() / channels.max(1) {
                            tap.push(0.0);
                        }
                        return;
                    }

                    let gain = playback.volume;
                    let frames_needed = data.len() / channels.max(1);
                    let mut frame_idx = 0;

                    // Generate multiple blocks if needed to fill the entire buffer
                    while frame_idx < frames_needed {
                        let (buffers, _) = playback.engine.next_block(vec![]);
                        let samples_to_copy = (frames_needed - frame_idx).min(BLOCK_SIZE);

                        for i in 0..samples_to_copy {
                            let left = (buffers[0][i] * gain).clamp(-LIMIT, LIMIT);
                            let right = (buffers[1][i] * gain).clamp(-LIMIT, LIMIT);

                            let out_idx = (frame_idx + i) * channels;
                            for ch in 0..channels {
                                data[out_idx + ch] = if ch % 2 == 0 { left } else { right };
                            }

                            tap.push(left);
                        }

                        frame_idx += samples_to_copy;
                    }
                },
                |err| error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| VisualizerError::AudioDevice(format!("Failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| VisualizerError::AudioDevice(format!("Failed to start audio stream: {}", e)))?;

        Ok(Self {
            playback,
            track,
            sample_rate_hz,
            _stream: stream,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Playback> {
        self.playback.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn play(&self) {
        self.lock().playing = true;
        info!("Playing: {}", self.track);
    }

    pub fn pause(&self) {
        self.lock().playing = false;
        info!("Paused");
    }

    /// Toggle playback, returning the new playing state
    pub fn toggle(&self) -> bool {
        let playing = !self.is_playing();
        if playing {
            self.play();
        } else {
            self.pause();
        }
        playing
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    /// Set output gain (clamped to [0, 1]); affects the analysed signal too
    pub fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.lock().volume = volume;
        info!("Volume: {:.0}%", volume * 100.0);
    }

    pub fn volume(&self) -> f32 {
        self.lock().volume
    }

    /// Switch to another track; playback pauses like a source change would
    pub fn set_track(&mut self, track: Track) -> Result<()> {
        {
            let mut playback = self.lock();
            load_composition(&mut playback.engine, track)?;
            playback.playing = false;
        }
        self.track = track;
        info!("Track: {}", track);
        Ok(())
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}

fn load_composition(engine: &mut Engine<BLOCK_SIZE>, track: Track) -> Result<()> {
    engine.update_with_code(track.composition());
    engine
        .update()
        .map_err(|e| VisualizerError::Synth(format!("Glicol engine rejected '{}': {:?}", track, e)))
}
