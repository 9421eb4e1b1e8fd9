//! vibeblob - an audio-reactive 3D blob
//!
//! A glicol track plays through the speakers while its live spectrum
//! swells, spins and lights up an icosphere.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vibeblob::audio::{AudioSystem, FftAnalyser, SampleTap, SilentSource, SpectrumSource};
use vibeblob::blob::VisualMode;
use vibeblob::camera::CameraSystem;
use vibeblob::cli::Args;
use vibeblob::error::{Result, VisualizerError};
use vibeblob::logging;
use vibeblob::params::VisualizerConfig;
use vibeblob::rendering::{RenderSystem, Uniforms};
use vibeblob::visualizer::{FrameInput, Visualizer};

/// Intensity change per key press
const INTENSITY_STEP: f32 = 0.1;
const MAX_INTENSITY: f32 = 2.0;

/// Volume change per key press
const VOLUME_STEP: f32 = 0.05;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    visualizer: Visualizer<Box<dyn SpectrumSource>>,
    camera: CameraSystem,
    audio: Option<AudioSystem>,
    tap: SampleTap,
    analyser_attached: bool,

    // User controls
    mode: VisualMode,
    intensity: f32,
    volume: f32,

    // Configuration
    config: VisualizerConfig,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(config: VisualizerConfig) -> Self {
        // Zero frames until playback starts and the analyser is attached
        let silent: Box<dyn SpectrumSource> =
            Box::new(SilentSource::new(config.analyser.bin_count()));
        let visualizer = Visualizer::new(silent, &config);
        let camera = CameraSystem::new(&config.render);
        let tap = SampleTap::new(config.analyser.fft_size);

        Self {
            window: None,
            render_system: None,
            visualizer,
            camera,
            audio: None,
            tap,
            analyser_attached: false,
            mode: config.session.mode,
            intensity: config.session.intensity,
            volume: config.session.volume,
            config,
            start_time: Instant::now(),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("vibeblob")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.render.window_width,
                self.config.render.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| VisualizerError::Render(format!("Failed to create window: {}", e)))?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.visualizer.mesh(),
        ))?;

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn init_audio(&mut self) {
        match AudioSystem::new(
            self.tap.clone(),
            self.config.session.track,
            self.volume,
        ) {
            Ok(audio) => {
                info!("Track: {} (press Space to play)", audio.track());
                self.audio = Some(audio);
            }
            Err(e) => warn!("Audio unavailable, blob will stay at rest: {}", e),
        }
    }

    fn toggle_playback(&mut self) {
        let Some(audio) = &self.audio else {
            warn!("No audio output, nothing to play");
            return;
        };

        let playing = audio.toggle();
        info!("{}", if playing { "Playing" } else { "Paused" });

        if playing && !self.analyser_attached {
            let analyser = FftAnalyser::with_tap(self.config.analyser.clone(), self.tap.clone());
            self.visualizer.attach_source(Box::new(analyser));
            self.analyser_attached = true;
            debug!("Analyser attached to playback");
        }
    }

    fn next_track(&mut self) {
        let Some(audio) = &mut self.audio else {
            return;
        };
        let track = audio.track().next();
        match audio.set_track(track) {
            Ok(()) => info!("Track: {} (paused)", track),
            Err(e) => error!("Failed to switch track: {}", e),
        }
    }

    fn set_mode(&mut self, mode: VisualMode) {
        if self.mode != mode {
            self.mode = mode;
            info!("Mode: {}", mode);
        }
    }

    fn adjust_intensity(&mut self, delta: f32) {
        self.intensity = (self.intensity + delta).clamp(0.0, MAX_INTENSITY);
        info!("Intensity: {:.1}", self.intensity);
    }

    fn adjust_volume(&mut self, delta: f32) {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        if let Some(audio) = &self.audio {
            audio.set_volume(self.volume);
        }
        info!("Volume: {:.2}", self.volume);
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Digit1 => self.set_mode(VisualMode::Neon),
            KeyCode::Digit2 => self.set_mode(VisualMode::Minimal),
            KeyCode::Digit3 => self.set_mode(VisualMode::Wire),
            KeyCode::ArrowUp => self.adjust_intensity(INTENSITY_STEP),
            KeyCode::ArrowDown => self.adjust_intensity(-INTENSITY_STEP),
            KeyCode::Equal | KeyCode::NumpadAdd => self.adjust_volume(VOLUME_STEP),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.adjust_volume(-VOLUME_STEP),
            KeyCode::Space => self.toggle_playback(),
            KeyCode::KeyT => self.next_track(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_graphics(event_loop) {
            error!("Graphics initialization failed: {}", e);
            event_loop.exit();
            return;
        }
        self.init_audio();

        info!("vibeblob is running");
        info!("Keys: 1/2/3 mode, Up/Down intensity, +/- volume, Space play/pause, T next track, Esc quit");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key, event_loop),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        let elapsed_s = self.start_time.elapsed().as_secs_f32();

        // One pipeline tick per rendered frame
        self.visualizer.tick(FrameInput {
            elapsed_s,
            intensity: self.intensity,
            mode: self.mode,
        });

        let view_proj = self
            .camera
            .view_proj_matrix(&self.config.render, render_system.aspect_ratio());
        let mesh = self.visualizer.mesh();
        let material = self.visualizer.material();

        render_system.update_vertices(&mesh.vertices);
        render_system.update_uniforms(&Uniforms::new(
            view_proj,
            mesh.transform.model_matrix(),
            material,
            self.camera.eye(),
            &self.config.render,
        ));

        match render_system.render(material.wireframe) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(e) => error!("Render error: {:?}", e),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    let mut config = match VisualizerConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    args.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Starting: mode {}, intensity {}, volume {}, {} subdivisions",
        config.session.mode,
        config.session.intensity,
        config.session.volume,
        config.geometry.subdivisions
    );

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
