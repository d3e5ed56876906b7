//! Simulated classification training.
//!
//! No model is fitted: every parameter of the submitted configuration is
//! perturbed by bounded noise and the three metric weights are rescaled to
//! sum to one.

mod noise;
mod types;

pub use noise::{NoiseSource, RandNoise};
pub use types::*;

pub const BLUR_KERNEL_SIZES: [i64; 3] = [3, 5, 7];
pub const MIN_CONTOUR_AREA_FLOOR: i64 = 50;

/// Computes the "trained" configuration for `config`.
pub fn train(config: &ModelConfig, noise: &mut dyn NoiseSource) -> UpdatedConfig {
    let mut updated = UpdatedConfig {
        ssim: MetricParams {
            weight: round_to(config.ssim.weight + noise.uniform(-0.1, 0.1), 3),
            threshold: round_to(config.ssim.threshold + noise.uniform(-0.05, 0.05), 3),
        },
        mse: MetricParams {
            weight: round_to(config.mse.weight + noise.uniform(-0.05, 0.05), 3),
            threshold: round_to(config.mse.threshold + noise.uniform(-100.0, 100.0), 1),
        },
        histogram: MetricParams {
            weight: round_to(config.histogram.weight + noise.uniform(-0.05, 0.05), 3),
            threshold: round_to(config.histogram.threshold + noise.uniform(-0.05, 0.05), 3),
        },
        combined_threshold: round_to(config.combined_threshold + noise.uniform(-0.05, 0.05), 3),
        image_processing: ImageProcessing {
            resize_width: config.resize_width,
            resize_height: config.resize_height,
            blur_kernel_size: noise.pick(&BLUR_KERNEL_SIZES),
        },
        detection: Detection {
            min_contour_area: config
                .min_contour_area
                .saturating_add(noise.int_between(-20, 20))
                .max(MIN_CONTOUR_AREA_FLOOR),
            dilation_iterations: noise.int_between(1, 4),
            erosion_iterations: noise.int_between(1, 3),
        },
    };

    normalize_weights(&mut updated);
    updated
}

/// Synthetic wall-clock time reported for a training run.
pub fn sample_duration_ms(noise: &mut dyn NoiseSource) -> i64 {
    noise.int_between(1000, 5000)
}

/// Rescales the metric weights to sum to 1.0. A non-positive sum leaves
/// them as they are.
fn normalize_weights(config: &mut UpdatedConfig) {
    let total = config.weight_sum();
    if total > 0.0 {
        config.ssim.weight = round_to(config.ssim.weight / total, 3);
        config.mse.weight = round_to(config.mse.weight / total, 3);
        config.histogram.weight = round_to(config.histogram.weight / total, 3);
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
