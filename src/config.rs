use crate::color_math::{clamp, remap};
use crate::upscale::Upscaling;

/// Display resolution in pixels
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// Logical width of the stage; its height follows the canvas aspect ratio
pub const STAGE_WIDTH: f64 = 200.0;

/// Number of sources created at initialisation
pub const SOURCE_COUNT: usize = 5;

/// Divides the elapsed milliseconds before integration, so sources move at
/// one stage unit per 10ms
pub const TIME_SCALE_DIVISOR: f64 = 10.0;

/// Elapsed time used when there is no previous frame to measure from
pub const FIRST_FRAME_DELTA_MS: f64 = 1.0;

/// Supported magnification factors, coarsest first
pub const SCALE_FACTORS: [u32; 5] = [20, 10, 8, 4, 1];

/// Index into `SCALE_FACTORS` used at startup (scale 8)
pub const DEFAULT_SCALE_INDEX: usize = 2;

/// Resolution control step, in percent. One step moves one entry in `SCALE_FACTORS`.
pub const RESOLUTION_STEP_PERCENT: f64 = 25.0;

// ============================================
// Colour Mapping
// ============================================

/// Field value at which the threshold mode switches colour, and at which the
/// HSV mode reaches the top of its hue ramp
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Range the raw `[0, 100]` threshold control is mapped onto
pub const THRESHOLD_MIN: f64 = 0.06;
pub const THRESHOLD_MAX: f64 = 0.5;

/// Raw threshold control bounds and keyboard step
pub const RAW_THRESHOLD_MAX: f64 = 100.0;
pub const RAW_THRESHOLD_STEP: f64 = 5.0;

/// Upper bound of the hue ramp. Stops short of 1.0 so a saturated field
/// doesn't wrap back to red.
pub const HUE_CAP: f64 = 0.9;

/// Threshold mode colours
pub const THRESHOLD_COLOR: u32 = 0xff00ff;
pub const BACKGROUND_COLOR: u32 = 0xffffff;

/// One of the supported magnification factors between the sampling grid and the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    /// Pick a factor by its position in `SCALE_FACTORS`, clamping out of range indices.
    pub fn from_index(index: usize) -> Self {
        Self(SCALE_FACTORS[index.min(SCALE_FACTORS.len() - 1)])
    }

    /// Map a resolution control in `[0, 100]` onto the factor set. 0% is the
    /// coarsest grid, 100% samples every display pixel.
    pub fn from_percent(percent: f64) -> Self {
        let percent = clamp(percent, 0.0, 100.0);
        let percent = if percent.is_nan() { 0.0 } else { percent };
        let last = (SCALE_FACTORS.len() - 1) as f64;
        Self::from_index((percent / 100.0 * last).round() as usize)
    }

    /// Position of this factor in `SCALE_FACTORS`
    pub fn index(self) -> usize {
        SCALE_FACTORS
            .iter()
            .position(|factor| *factor == self.0)
            .unwrap_or(DEFAULT_SCALE_INDEX)
    }

    /// Resolution control percentage that selects this factor
    pub fn percent(self) -> f64 {
        self.index() as f64 * RESOLUTION_STEP_PERCENT
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::from_index(DEFAULT_SCALE_INDEX)
    }
}

/// How field values are turned into colours. Read-only for the duration of a render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Continuous hue ramp when true, two-colour threshold otherwise
    pub hsv_mode: bool,
    /// Field value separating background from foreground
    pub threshold: f64,
}

impl RenderConfig {
    /// Convert a raw `[0, 100]` control value into a threshold in
    /// `[THRESHOLD_MIN, THRESHOLD_MAX]`. Out of range input is clamped first.
    pub fn threshold_from_raw(raw: f64) -> f64 {
        let raw = clamp(raw, 0.0, RAW_THRESHOLD_MAX);
        let raw = if raw.is_nan() { 0.0 } else { raw };
        remap(raw, 0.0, RAW_THRESHOLD_MAX, THRESHOLD_MIN, THRESHOLD_MAX)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hsv_mode: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Everything a single frame needs from the outside world, captured before the frame starts.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameConfig {
    pub scale: ScaleFactor,
    pub render: RenderConfig,
    pub upscaling: Upscaling,
}

/// Mutable control state owned by the presenter.
///
/// Changes land between frames; the engine only ever sees a [`FrameConfig`] snapshot.
#[derive(Clone, Debug)]
pub struct Controls {
    scale: ScaleFactor,
    render: RenderConfig,
    raw_threshold: f64,
    upscaling: Upscaling,
}

impl Controls {
    pub fn new() -> Self {
        let render = RenderConfig::default();
        Self {
            scale: ScaleFactor::default(),
            raw_threshold: remap(
                render.threshold,
                THRESHOLD_MIN,
                THRESHOLD_MAX,
                0.0,
                RAW_THRESHOLD_MAX,
            ),
            render,
            upscaling: Upscaling::default(),
        }
    }

    /// Immutable copy for the next frame
    pub fn snapshot(&self) -> FrameConfig {
        FrameConfig {
            scale: self.scale,
            render: self.render,
            upscaling: self.upscaling,
        }
    }

    /// Set the resolution control, in percent
    pub fn set_resolution_percent(&mut self, percent: f64) -> ScaleFactor {
        self.scale = ScaleFactor::from_percent(percent);
        self.scale
    }

    /// Move the resolution control by whole steps (positive is finer)
    pub fn step_resolution(&mut self, steps: i32) -> ScaleFactor {
        let percent = self.scale.percent() + f64::from(steps) * RESOLUTION_STEP_PERCENT;
        self.set_resolution_percent(percent)
    }

    /// Set the raw `[0, 100]` threshold control
    pub fn set_raw_threshold(&mut self, raw: f64) -> f64 {
        let raw = clamp(raw, 0.0, RAW_THRESHOLD_MAX);
        self.raw_threshold = if raw.is_nan() { 0.0 } else { raw };
        self.render.threshold = RenderConfig::threshold_from_raw(self.raw_threshold);
        self.render.threshold
    }

    /// Move the raw threshold control by whole steps
    pub fn step_threshold(&mut self, steps: i32) -> f64 {
        self.set_raw_threshold(self.raw_threshold + f64::from(steps) * RAW_THRESHOLD_STEP)
    }

    pub fn toggle_hsv_mode(&mut self) -> bool {
        self.render.hsv_mode = !self.render.hsv_mode;
        self.render.hsv_mode
    }

    pub fn toggle_upscaling(&mut self) -> Upscaling {
        self.upscaling = self.upscaling.toggled();
        self.upscaling
    }

    pub fn raw_threshold(&self) -> f64 {
        self.raw_threshold
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_is_eight() {
        assert_eq!(ScaleFactor::default().get(), 8);
        assert_eq!(ScaleFactor::default().percent(), 50.0);
    }

    #[test]
    fn test_scale_from_percent_covers_factor_set() {
        let expected = [(0.0, 20), (25.0, 10), (50.0, 8), (75.0, 4), (100.0, 1)];
        for (percent, factor) in expected {
            assert_eq!(ScaleFactor::from_percent(percent).get(), factor, "{percent}%");
        }
    }

    #[test]
    fn test_scale_from_percent_clamps_out_of_range() {
        assert_eq!(ScaleFactor::from_percent(-40.0).get(), 20);
        assert_eq!(ScaleFactor::from_percent(250.0).get(), 1);
        assert_eq!(ScaleFactor::from_percent(f64::NAN).get(), 20);
        assert_eq!(ScaleFactor::from_index(99).get(), 1);
    }

    #[test]
    fn test_threshold_from_raw() {
        assert_eq!(RenderConfig::threshold_from_raw(0.0), THRESHOLD_MIN);
        assert!((RenderConfig::threshold_from_raw(100.0) - THRESHOLD_MAX).abs() < 1e-12);
        assert_eq!(RenderConfig::threshold_from_raw(-5.0), THRESHOLD_MIN);
        assert!((RenderConfig::threshold_from_raw(500.0) - THRESHOLD_MAX).abs() < 1e-12);
    }

    #[test]
    fn test_controls_start_at_defaults() {
        let controls = Controls::new();
        let snapshot = controls.snapshot();
        assert_eq!(snapshot.scale.get(), 8);
        assert!(snapshot.render.hsv_mode);
        assert_eq!(snapshot.render.threshold, DEFAULT_THRESHOLD);
        assert_eq!(snapshot.upscaling, Upscaling::Hardware);
    }

    #[test]
    fn test_controls_step_resolution_saturates() {
        let mut controls = Controls::new();
        assert_eq!(controls.step_resolution(1).get(), 4);
        assert_eq!(controls.step_resolution(1).get(), 1);
        assert_eq!(controls.step_resolution(1).get(), 1);
        assert_eq!(controls.step_resolution(-10).get(), 20);
    }

    #[test]
    fn test_controls_threshold_steps_stay_in_range() {
        let mut controls = Controls::new();
        for _ in 0..50 {
            controls.step_threshold(1);
        }
        assert_eq!(controls.raw_threshold(), RAW_THRESHOLD_MAX);
        let threshold = controls.snapshot().render.threshold;
        assert!((threshold - THRESHOLD_MAX).abs() < 1e-12);

        for _ in 0..50 {
            controls.step_threshold(-1);
        }
        assert_eq!(controls.raw_threshold(), 0.0);
        assert_eq!(controls.snapshot().render.threshold, THRESHOLD_MIN);
    }

    #[test]
    fn test_snapshot_is_detached_from_controls() {
        let mut controls = Controls::new();
        let before = controls.snapshot();
        controls.toggle_hsv_mode();
        controls.toggle_upscaling();
        controls.step_resolution(-1);
        assert!(before.render.hsv_mode);
        assert_eq!(before.upscaling, Upscaling::Hardware);
        assert_eq!(before.scale.get(), 8);
        assert_ne!(controls.snapshot(), before);
    }
}
