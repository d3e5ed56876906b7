use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of the random perturbations applied during simulated training.
pub trait NoiseSource: Send {
    /// Uniform float in `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`, both ends inclusive.
    fn int_between(&mut self, low: i64, high: i64) -> i64;

    /// One element of `options`, chosen uniformly. `options` must not be empty.
    fn pick(&mut self, options: &[i64]) -> i64;
}

/// Adapts any `rand` generator to [`NoiseSource`].
#[derive(Debug, Clone)]
pub struct RandNoise<R>(R);

impl RandNoise<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> NoiseSource for RandNoise<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..=high)
    }

    fn int_between(&mut self, low: i64, high: i64) -> i64 {
        self.0.gen_range(low..=high)
    }

    fn pick(&mut self, options: &[i64]) -> i64 {
        options[self.0.gen_range(0..options.len())]
    }
}
