use rand::Rng;

/// A point moving at unit speed that contributes an inverse distance term to the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Source {
    pub x: f64,
    pub y: f64,
    /// Unit velocity: `vx² + vy² == 1`
    pub vx: f64,
    pub vy: f64,
}

impl Source {
    /// Create a source heading along `direction` (radians)
    pub fn new(x: f64, y: f64, direction: f64) -> Self {
        Self {
            x,
            y,
            vx: direction.cos(),
            vy: direction.sin(),
        }
    }

    /// A source placed within one unit of `center` on each axis, heading in a
    /// uniformly random direction
    pub fn random_near<R: Rng + ?Sized>(rng: &mut R, center: (f64, f64)) -> Self {
        let x = center.0 + rng.gen_range(-1.0_f64..1.0);
        let y = center.1 + rng.gen_range(-1.0_f64..1.0);
        let direction = rng.gen_range(0.0_f64..std::f64::consts::TAU);
        Self::new(x, y, direction)
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_new_has_unit_speed() {
        for step in 0..16 {
            let direction = f64::from(step) * std::f64::consts::TAU / 16.0;
            let source = Source::new(0.0, 0.0, direction);
            assert!((source.speed() - 1.0).abs() < 1e-12, "direction {direction}");
        }
    }

    #[test]
    fn test_random_near_stays_within_jitter() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let source = Source::random_near(&mut rng, (100.0, 75.0));
            assert!((99.0..101.0).contains(&source.x), "x was {}", source.x);
            assert!((74.0..76.0).contains(&source.y), "y was {}", source.y);
            assert!((source.speed() - 1.0).abs() < 1e-12);
        }
    }
}
