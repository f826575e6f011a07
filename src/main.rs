//! Wavesphere - a surface that ripples under a traveling wave
//!
//! Hovering the surface swaps in a fixed override palette and reverses the
//! wave; moving away restores whatever the control panel currently says.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wavesphere::binding::{bind_surface_controls, ControlBinding};
use wavesphere::camera::CameraSystem;
use wavesphere::cli::Args;
use wavesphere::clock::Clock;
use wavesphere::error::InitError;
use wavesphere::frame::{DrawOutcome, FrameDriver};
use wavesphere::mesh::BaseMesh;
use wavesphere::panel::{ControlPanel, Overlay};
use wavesphere::params::*;
use wavesphere::picking::{IntersectionMonitor, PointerState, Viewport};
use wavesphere::rendering::{RenderSystem, WindowSink};
use wavesphere::store::ParameterStore;
use wavesphere::uniforms::UniformSet;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    overlay: Option<Overlay>,

    // Parameters and controls
    store: ParameterStore,
    binding: ControlBinding<UniformSet>,
    panel: ControlPanel,

    // Per-frame systems
    driver: FrameDriver,
    camera: CameraSystem,
    pointer: PointerState,
    mesh: BaseMesh,

    // Configuration
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,

    failed: bool,
}

impl App {
    fn new(args: &Args) -> Result<Self, InitError> {
        let render_config = args.render_config();
        let surface_config = args.surface_config();
        let recording_config = args.create_recording_config()?;
        let light = LightSettings::default();

        let mut store = ParameterStore::new();
        let mut binding = ControlBinding::new();
        bind_surface_controls(
            &mut binding,
            &mut store,
            &WaveSettings::default(),
            &WaveSettings::hover_override(),
            &WaveRanges::default(),
            &light,
        )?;

        let mesh = BaseMesh::from_config(&surface_config);
        let model = surface_config.model_matrix();
        let monitor = IntersectionMonitor::new(mesh.clone(), model);

        let clock = match &recording_config {
            Some(config) => Clock::fixed_step(config.frame_step_s()),
            None => Clock::system(),
        };
        let driver = FrameDriver::new(clock, monitor, model, &light);

        let camera = CameraSystem::new(
            &CameraConfig::default(),
            Viewport::new(render_config.window_width, render_config.window_height),
        );

        Ok(Self {
            window: None,
            render_system: None,
            overlay: None,
            store,
            binding,
            panel: ControlPanel::new(render_config.panel_open),
            driver,
            camera,
            pointer: PointerState::new(),
            mesh,
            render_config,
            recording_config,
            failed: false,
        })
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Wavesphere")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.mesh,
            &self.render_config,
            self.recording_config.clone(),
        ))?;

        let (width, height) = render_system.size();
        self.camera.set_viewport(width, height);
        self.overlay = Some(Overlay::new(&window));
        self.render_system = Some(render_system);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: &dyn std::fmt::Display) {
        log::error!("{}", error);
        self.failed = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failed {
            return; // Already initialized
        }

        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, &e);
            return;
        }

        match &self.recording_config {
            Some(config) => println!(
                "\nRecording {} frames to {}/\n",
                config.total_frames(),
                config.frames_dir()
            ),
            None => {
                println!("\nWavesphere is running!");
                println!("Drag to orbit, scroll to zoom, hover the surface to override it");
                println!("Press ESC to quit\n");
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(overlay)) = (&self.window, &mut self.overlay) {
            overlay.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                self.camera.set_viewport(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer
                    .on_move(position.x, position.y, self.camera.viewport());
            }
            WindowEvent::CursorLeft { .. } => self.pointer.clear(),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_system), Some(overlay)) =
            (&self.window, &mut self.render_system, &mut self.overlay)
        else {
            return;
        };

        // Panel pass first so its edits land before the tick
        let store = &self.store;
        let panel = &mut self.panel;
        let overlay_frame = overlay.run(window, |ctx| panel.show(ctx, store));
        let ui_hijacked = overlay.wants_pointer();
        self.pointer.set_captured(ui_hijacked);
        self.camera.update_from_input(overlay.context(), ui_hijacked);
        self.binding
            .apply_edits(&mut self.store, self.driver.uniforms_mut(), &mut self.panel);

        let mut sink = WindowSink {
            renderer: render_system,
            overlay: Some(overlay_frame),
        };
        let result = self
            .driver
            .tick(&self.store, &self.pointer, &self.camera, &mut sink);

        match result {
            Ok(report) if report.outcome == DrawOutcome::Skipped => {}
            Ok(report) => {
                if let Some(config) = &self.recording_config {
                    let done = report.index + 1;
                    if done % config.fps.max(1) as u64 == 0 {
                        println!("Recorded {}/{} frames", done, config.total_frames());
                    }
                    if done >= config.total_frames() as u64 {
                        println!("Recording complete");
                        event_loop.exit();
                    }
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, &"GPU out of memory");
            }
            Err(e) => log::warn!("Frame dropped: {:?}", e),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!("Wavesphere - traveling wave on a {:?}", args.mesh);
    println!("Initializing systems...\n");

    let mut app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("{}", InitError::from(e));
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
