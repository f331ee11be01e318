//! Inverse-distance field evaluation over a sampling grid.
//!
//! Each grid cell is mapped linearly onto the stage, the field is summed over
//! every source at that point, and the result is coloured either along a hue
//! ramp or with a hard threshold.
//!
//! A sample point that lands exactly on a source divides by zero. The
//! resulting infinity is not guarded against: it saturates the hue ramp at
//! its cap, and in threshold mode it compares greater than any threshold, so
//! the frame still renders.

use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::buffer::{ColorBuffer, Rgba};
use crate::color_math::{clamp, distance, hsv_to_rgb, remap};
use crate::config::{RenderConfig, ScaleFactor, BACKGROUND_COLOR, HUE_CAP, THRESHOLD_COLOR};
use crate::simulation::{Source, Stage};

/// Lattice of sample points laid over the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingGrid {
    pub width: u32,
    pub height: u32,
    pub stage: Stage,
}

impl SamplingGrid {
    pub fn new(width: u32, height: u32, stage: Stage) -> Self {
        Self {
            width,
            height,
            stage,
        }
    }

    /// The grid that, magnified by `scale`, covers the display
    pub fn for_display(
        display_width: u32,
        display_height: u32,
        scale: ScaleFactor,
        stage: Stage,
    ) -> Self {
        Self::new(
            display_width / scale.get(),
            display_height / scale.get(),
            stage,
        )
    }

    /// Stage x coordinate of grid column `gx`
    #[inline]
    pub fn stage_x(&self, gx: u32) -> f64 {
        remap(f64::from(gx), 0.0, f64::from(self.width), 0.0, self.stage.width)
    }

    /// Stage y coordinate of grid row `gy`
    #[inline]
    pub fn stage_y(&self, gy: u32) -> f64 {
        remap(f64::from(gy), 0.0, f64::from(self.height), 0.0, self.stage.height)
    }

    pub fn sample_point(&self, gx: u32, gy: u32) -> (f64, f64) {
        (self.stage_x(gx), self.stage_y(gy))
    }
}

/// Sum of `1 / distance` from `(x, y)` to every source.
///
/// Infinite when the point coincides with a source.
#[inline]
pub fn field_weight(x: f64, y: f64, sources: &[Source]) -> f64 {
    sources
        .iter()
        .map(|source| 1.0 / distance(x, y, source.x, source.y))
        .sum()
}

/// Map a field value to a packed `0xRRGGBB` colour.
#[inline]
pub fn color_for(weight: f64, config: &RenderConfig) -> u32 {
    if config.hsv_mode {
        let hue = clamp(remap(weight, 0.0, config.threshold, 0.0, 1.0), 0.0, HUE_CAP);
        hsv_to_rgb(hue, 1.0, 1.0)
    } else if weight > config.threshold {
        THRESHOLD_COLOR
    } else {
        BACKGROUND_COLOR
    }
}

/// Renders the field into a low resolution buffer, one pixel per grid cell.
///
/// The buffer is kept between calls only to reuse its allocation; each call
/// overwrites every pixel.
pub struct FieldRenderer {
    buffer: ColorBuffer,
}

impl FieldRenderer {
    pub fn new() -> Self {
        Self {
            buffer: ColorBuffer::new(0, 0),
        }
    }

    /// Evaluate and colour every cell of `grid`
    pub fn render(
        &mut self,
        sources: &[Source],
        grid: &SamplingGrid,
        config: &RenderConfig,
    ) -> &ColorBuffer {
        render_into(sources, grid, config, &mut self.buffer);
        &self.buffer
    }

    /// The most recently rendered buffer
    pub fn buffer(&self) -> &ColorBuffer {
        &self.buffer
    }
}

impl Default for FieldRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the field into `output`, resizing it to the grid. Rows are evaluated in parallel.
pub fn render_into(
    sources: &[Source],
    grid: &SamplingGrid,
    config: &RenderConfig,
    output: &mut ColorBuffer,
) {
    log::trace!("begin render {}x{}", grid.width, grid.height);

    output.resize(grid.width, grid.height);
    let width = grid.width as usize;
    if width == 0 {
        return;
    }

    output
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(gy, row)| {
            let my = grid.stage_y(gy as u32);
            for (gx, pixel) in row.iter_mut().enumerate() {
                let mx = grid.stage_x(gx as u32);
                let weight = field_weight(mx, my, sources);
                *pixel = Rgba::from_rgb24(color_for(weight, config));
            }
        });

    log::trace!("end render");
}
