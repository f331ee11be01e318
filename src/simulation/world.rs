use rand::Rng;

use crate::config::{SOURCE_COUNT, TIME_SCALE_DIVISOR};
use crate::simulation::{Source, Stage};

/// Owns the sources and moves them around the stage.
pub struct Simulation {
    stage: Stage,
    sources: Vec<Source>,
}

impl Simulation {
    /// Create a simulation with `source_count` sources jittered around the stage centre
    pub fn new<R: Rng + ?Sized>(stage: Stage, source_count: usize, rng: &mut R) -> Self {
        let mut simulation = Self {
            stage,
            sources: Vec::new(),
        };
        simulation.initialize(source_count, rng);
        simulation
    }

    /// Create a simulation with the default source count
    pub fn new_default<R: Rng + ?Sized>(stage: Stage, rng: &mut R) -> Self {
        Self::new(stage, SOURCE_COUNT, rng)
    }

    /// Create a simulation from explicit sources
    pub fn with_sources(stage: Stage, sources: Vec<Source>) -> Self {
        Self { stage, sources }
    }

    /// Replace every source with `source_count` fresh ones near the stage centre
    pub fn initialize<R: Rng + ?Sized>(&mut self, source_count: usize, rng: &mut R) {
        let center = self.stage.center();
        self.sources = (0..source_count)
            .map(|_| Source::random_near(&mut *rng, center))
            .collect();
        log::debug!("Initialised {} sources around {:?}", source_count, center);
    }

    /// Advance every source by `delta_ms` milliseconds, reflecting off the stage edges.
    ///
    /// Reflection is per axis: a coordinate that leaves `[0, size)` has its
    /// velocity component negated and then takes one more step with the
    /// negated velocity. This is not a mirror about the exact edge, and a
    /// large enough step can leave the source outside until a later frame.
    pub fn update(&mut self, delta_ms: f64) {
        let step = delta_ms / TIME_SCALE_DIVISOR;
        let Stage { width, height } = self.stage;

        for source in &mut self.sources {
            source.x += source.vx * step;
            source.y += source.vy * step;

            if source.x < 0.0 || source.x >= width {
                source.vx = -source.vx;
                source.x += source.vx;
            }
            if source.y < 0.0 || source.y >= height {
                source.vy = -source.vy;
                source.y += source.vy;
            }
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn stage() -> Stage {
        Stage::new(200.0, 150.0)
    }

    #[test]
    fn test_initialize_creates_sources_near_center() {
        let mut rng = StdRng::seed_from_u64(42);
        let simulation = Simulation::new_default(stage(), &mut rng);
        assert_eq!(simulation.sources().len(), SOURCE_COUNT);
        for source in simulation.sources() {
            assert!((source.x - 100.0).abs() <= 1.0);
            assert!((source.y - 75.0).abs() <= 1.0);
            assert!((source.speed() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reinitialize_replaces_sources() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut simulation = Simulation::new(stage(), 5, &mut rng);
        simulation.initialize(2, &mut rng);
        assert_eq!(simulation.sources().len(), 2);
    }

    #[test]
    fn test_update_integrates_scaled_by_divisor() {
        let source = Source {
            x: 50.0,
            y: 60.0,
            vx: 0.6,
            vy: -0.8,
        };
        let mut simulation = Simulation::with_sources(stage(), vec![source]);
        simulation.update(20.0);
        let moved = simulation.sources()[0];
        assert!((moved.x - 51.2).abs() < 1e-12);
        assert!((moved.y - 58.4).abs() < 1e-12);
        assert_eq!((moved.vx, moved.vy), (0.6, -0.8));
    }

    #[test]
    fn test_reflects_off_far_edge() {
        let source = Source {
            x: 200.0 - 0.1,
            y: 75.0,
            vx: 1.0,
            vy: 0.0,
        };
        let mut simulation = Simulation::with_sources(stage(), vec![source]);
        simulation.update(10.0);
        let bounced = simulation.sources()[0];
        assert!(bounced.vx < 0.0);
        assert!((0.0..200.0).contains(&bounced.x), "x was {}", bounced.x);
        // Stepped past the edge by 0.9, then back by a full unit
        assert!((bounced.x - 199.9).abs() < 1e-9);
    }

    #[test]
    fn test_reflects_off_near_edge_per_axis() {
        let source = Source {
            x: 100.0,
            y: 0.05,
            vx: 0.0,
            vy: -1.0,
        };
        let mut simulation = Simulation::with_sources(stage(), vec![source]);
        simulation.update(1.0);
        let bounced = simulation.sources()[0];
        assert_eq!(bounced.vy, 1.0);
        assert_eq!(bounced.vx, 0.0);
        assert_eq!(bounced.x, 100.0);
        assert!((bounced.y - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_sources_stay_near_stage_over_many_frames() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut simulation = Simulation::new_default(stage(), &mut rng);
        // A reflected source can sit outside for one frame, but never by more than a step
        let margin = 16.0 / TIME_SCALE_DIVISOR;
        for _ in 0..10_000 {
            simulation.update(16.0);
            for source in simulation.sources() {
                assert!((-margin..200.0 + margin).contains(&source.x), "{source:?}");
                assert!((-margin..150.0 + margin).contains(&source.y), "{source:?}");
                assert!((source.speed() - 1.0).abs() < 1e-9);
            }
        }
    }
}
