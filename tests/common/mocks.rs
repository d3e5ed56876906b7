use mock_training_server::training::NoiseSource;

/// Noise source that always lands in the middle of the requested range,
/// so a trained configuration equals its input.
#[derive(Debug, Default)]
pub struct MidpointNoise;

impl NoiseSource for MidpointNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (low + high) / 2.0
    }

    fn int_between(&mut self, low: i64, high: i64) -> i64 {
        low + (high - low) / 2
    }

    fn pick(&mut self, options: &[i64]) -> i64 {
        options[options.len() / 2]
    }
}

/// Noise source that always returns the upper bound.
#[derive(Debug, Default)]
pub struct CeilingNoise;

impl NoiseSource for CeilingNoise {
    fn uniform(&mut self, _low: f64, high: f64) -> f64 {
        high
    }

    fn int_between(&mut self, _low: i64, high: i64) -> i64 {
        high
    }

    fn pick(&mut self, options: &[i64]) -> i64 {
        options[options.len() - 1]
    }
}
