/// Logical bounds the sources move within, fixed for the lifetime of a run.
///
/// Positions are valid in `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Stage {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A stage `logical_width` units wide with the same aspect ratio as the canvas
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, logical_width: f64) -> Self {
        let aspect_ratio = f64::from(canvas_height) / f64::from(canvas_width);
        Self::new(logical_width, logical_width * aspect_ratio)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, STAGE_WIDTH};

    #[test]
    fn test_stage_follows_canvas_aspect() {
        let stage = Stage::from_canvas(CANVAS_WIDTH, CANVAS_HEIGHT, STAGE_WIDTH);
        assert_eq!(stage.width, 200.0);
        assert_eq!(stage.height, 150.0);
        assert_eq!(stage.center(), (100.0, 75.0));
    }

    #[test]
    fn test_contains_is_half_open() {
        let stage = Stage::new(10.0, 5.0);
        assert!(stage.contains(0.0, 0.0));
        assert!(stage.contains(9.999, 4.999));
        assert!(!stage.contains(10.0, 1.0));
        assert!(!stage.contains(1.0, 5.0));
        assert!(!stage.contains(-0.001, 1.0));
    }
}
