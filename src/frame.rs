//! The per-frame entry point: integrate, evaluate the field, magnify.
//!
//! The engine owns no loop. Whatever drives the display calls
//! [`Engine::advance_frame`] once per refresh with the elapsed time and a
//! snapshot of the controls taken before the frame started.

use std::time::Instant;

use rand::Rng;

use crate::buffer::ColorBuffer;
use crate::config::{
    FrameConfig, CANVAS_HEIGHT, CANVAS_WIDTH, FIRST_FRAME_DELTA_MS, SOURCE_COUNT, STAGE_WIDTH,
};
use crate::field::{FieldRenderer, SamplingGrid};
use crate::simulation::{Simulation, Stage};
use crate::upscale::{expand_into, Upscaling};

/// Measures wall-clock time between successive frames.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous tick, or `None` on the first one
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f64() * 1000.0);
        self.last = Some(now);
        elapsed
    }
}

/// What a frame hands back to the presenter.
#[derive(Debug)]
pub struct FrameOutput<'frame> {
    /// Pixels to show
    pub image: &'frame ColorBuffer,
    /// Factor the presenter still has to magnify `image` by. 1 when the
    /// engine already produced a display resolution image.
    pub magnification: u32,
    /// Time step the simulation advanced by, in milliseconds
    pub delta_ms: f64,
    /// Instantaneous frame rate, rounded
    pub fps: f64,
}

/// Owns the simulation and the frame buffers.
pub struct Engine {
    display_width: u32,
    display_height: u32,
    simulation: Simulation,
    renderer: FieldRenderer,
    upscaled: ColorBuffer,
    grid: Option<SamplingGrid>,
}

impl Engine {
    pub fn new(display_width: u32, display_height: u32, simulation: Simulation) -> Self {
        Self {
            display_width,
            display_height,
            simulation,
            renderer: FieldRenderer::new(),
            upscaled: ColorBuffer::new(display_width, display_height),
            grid: None,
        }
    }

    /// An 800x600 display over a 200 unit wide stage with five sources
    pub fn with_defaults<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let stage = Stage::from_canvas(CANVAS_WIDTH, CANVAS_HEIGHT, STAGE_WIDTH);
        let simulation = Simulation::new(stage, SOURCE_COUNT, rng);
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT, simulation)
    }

    /// Throw away the current sources and start again from the stage centre
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = self.simulation.sources().len();
        self.simulation.initialize(count, rng);
        log::info!("Sources reinitialised");
    }

    /// Run one frame.
    ///
    /// `elapsed_ms` is the wall-clock time since the previous frame; `None`
    /// (the first frame) or a non-finite value is replaced by one millisecond.
    pub fn advance_frame(
        &mut self,
        elapsed_ms: Option<f64>,
        config: FrameConfig,
    ) -> FrameOutput<'_> {
        let delta_ms = frame_delta(elapsed_ms);
        self.simulation.update(delta_ms);

        let scale = config.scale.get();
        let grid = SamplingGrid::for_display(
            self.display_width,
            self.display_height,
            config.scale,
            self.simulation.stage(),
        );
        if self.grid != Some(grid) {
            log::debug!(
                "Sampling grid is now {}x{} (x{})",
                grid.width,
                grid.height,
                scale
            );
            self.grid = Some(grid);
        }

        let low_res = self
            .renderer
            .render(self.simulation.sources(), &grid, &config.render);

        let fps = (1000.0 / delta_ms).round();
        let (image, magnification) = match config.upscaling {
            Upscaling::Software if scale != 1 => {
                expand_into(low_res, scale, &mut self.upscaled);
                (&self.upscaled, 1)
            }
            Upscaling::Software => (low_res, 1),
            Upscaling::Hardware => (low_res, scale),
        };

        FrameOutput {
            image,
            magnification,
            delta_ms,
            fps,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }
}

/// Milliseconds to integrate for a frame, substituting the first-frame delta
/// where no usable measurement exists.
fn frame_delta(elapsed_ms: Option<f64>) -> f64 {
    match elapsed_ms {
        Some(elapsed) if elapsed.is_finite() => elapsed,
        Some(elapsed) => {
            log::warn!("Ignoring non-finite frame time {elapsed}");
            FIRST_FRAME_DELTA_MS
        }
        None => FIRST_FRAME_DELTA_MS,
    }
}
