use snafu::ResultExt as _;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{Controls, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::{PresenterError, WindowSnafu};
use crate::frame::{Engine, FrameClock};
use crate::gpu::{GpuContext, PresentPipeline};
use crate::upscale::Upscaling;

/// How often the title bar FPS readout refreshes
const TITLE_REFRESH: Duration = Duration::from_millis(250);

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    present: Option<PresentPipeline>,
    engine: Engine,
    controls: Controls,
    clock: FrameClock,
    fps_readout: FpsReadout,
    error: Option<PresenterError>,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            present: None,
            engine: Engine::with_defaults(&mut rand::thread_rng()),
            controls: Controls::new(),
            clock: FrameClock::new(),
            fps_readout: FpsReadout::new(),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn into_result(self) -> Result<(), PresenterError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn initialise(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PresenterError> {
        let window_attrs = Window::default_attributes()
            .with_title("Metaball Field - Initializing...")
            .with_inner_size(winit::dpi::PhysicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs).context(WindowSnafu)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        log::info!("Creating present pipeline...");
        let present = PresentPipeline::new(&gpu.device, gpu.format());

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.present = Some(present);
        Ok(())
    }

    fn render(&mut self) {
        let (Some(gpu), Some(present)) = (self.gpu.as_ref(), self.present.as_mut()) else {
            return;
        };

        // 1. Simulate and evaluate the field against this frame's controls
        let elapsed = self.clock.tick(Instant::now());
        let output = self.engine.advance_frame(elapsed, self.controls.snapshot());
        let fps = output.fps;

        // 2. Upload the image; hardware upscaling leaves magnification to the sampler
        present.upload(&gpu.device, &gpu.queue, output.image);

        let surface_texture = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        // 3. Draw it over the whole surface
        present.draw(&mut encoder, &view);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        if self.fps_readout.due() {
            if let Some(window) = &self.window {
                let snapshot = self.controls.snapshot();
                let mode = if snapshot.render.hsv_mode { "HSV" } else { "Threshold" };
                let upscaling = match snapshot.upscaling {
                    Upscaling::Software => "CPU",
                    Upscaling::Hardware => "GPU",
                };
                window.set_title(&format!(
                    "Metaball Field - {fps:.0}fps - {mode} x{} ({upscaling})",
                    snapshot.scale.get()
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            // Sampling resolution
            KeyCode::ArrowRight => {
                let scale = self.controls.step_resolution(1);
                log::info!("Scale factor: x{}", scale.get());
            }
            KeyCode::ArrowLeft => {
                let scale = self.controls.step_resolution(-1);
                log::info!("Scale factor: x{}", scale.get());
            }

            // Threshold
            KeyCode::ArrowUp => {
                let threshold = self.controls.step_threshold(1);
                log::info!("Threshold: {:.3}", threshold);
            }
            KeyCode::ArrowDown => {
                let threshold = self.controls.step_threshold(-1);
                log::info!("Threshold: {:.3}", threshold);
            }

            // Colour mapping
            KeyCode::KeyH => {
                let hsv = self.controls.toggle_hsv_mode();
                log::info!("Colour mapping: {}", if hsv { "HSV" } else { "threshold" });
            }

            // Upscaling path
            KeyCode::KeyG => {
                let upscaling = self.controls.toggle_upscaling();
                log::info!("Upscaling: {:?}", upscaling);
            }

            // Restart from the stage centre
            KeyCode::KeyR => {
                self.engine.reinitialize(&mut rand::thread_rng());
            }

            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Metaball Field...");
        let (width, height) = self.engine.display_size();
        log::info!("Display size: {}x{}", width, height);

        if let Err(error) = self.initialise(event_loop) {
            log::error!("Initialization failed: {error}");
            self.error = Some(error);
            event_loop.exit();
            return;
        }

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Left/Right: Coarser/finer sampling grid");
        log::info!("  Up/Down: Raise/lower threshold");
        log::info!("  H: Toggle HSV/threshold colouring");
        log::info!("  G: Toggle GPU/CPU upscaling");
        log::info!("  R: Reinitialise sources");
        log::info!("  Escape: Quit");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Rate limits title bar updates
struct FpsReadout {
    last_update: Instant,
}

impl FpsReadout {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
        }
    }

    /// True at most once per `TITLE_REFRESH`
    fn due(&mut self) -> bool {
        if self.last_update.elapsed() >= TITLE_REFRESH {
            self.last_update = Instant::now();
            true
        } else {
            false
        }
    }
}
