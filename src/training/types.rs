use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SSIM_WEIGHT: f64 = 0.5;
pub const DEFAULT_SSIM_THRESHOLD: f64 = 0.85;
pub const DEFAULT_MSE_WEIGHT: f64 = 0.3;
pub const DEFAULT_MSE_THRESHOLD: f64 = 1000.0;
pub const DEFAULT_HISTOGRAM_WEIGHT: f64 = 0.2;
pub const DEFAULT_HISTOGRAM_THRESHOLD: f64 = 0.7;
pub const DEFAULT_COMBINED_THRESHOLD: f64 = 0.75;
pub const DEFAULT_RESIZE_WIDTH: i64 = 800;
pub const DEFAULT_RESIZE_HEIGHT: i64 = 600;
pub const DEFAULT_MIN_CONTOUR_AREA: i64 = 100;

/// Weight and decision threshold of one similarity metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricParams {
    pub weight: f64,
    pub threshold: f64,
}

/// Detection configuration submitted for training, with every absent or
/// non-numeric field resolved to its default.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub ssim: MetricParams,
    pub mse: MetricParams,
    pub histogram: MetricParams,
    pub combined_threshold: f64,
    pub resize_width: i64,
    pub resize_height: i64,
    pub min_contour_area: i64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            ssim: MetricParams {
                weight: DEFAULT_SSIM_WEIGHT,
                threshold: DEFAULT_SSIM_THRESHOLD,
            },
            mse: MetricParams {
                weight: DEFAULT_MSE_WEIGHT,
                threshold: DEFAULT_MSE_THRESHOLD,
            },
            histogram: MetricParams {
                weight: DEFAULT_HISTOGRAM_WEIGHT,
                threshold: DEFAULT_HISTOGRAM_THRESHOLD,
            },
            combined_threshold: DEFAULT_COMBINED_THRESHOLD,
            resize_width: DEFAULT_RESIZE_WIDTH,
            resize_height: DEFAULT_RESIZE_HEIGHT,
            min_contour_area: DEFAULT_MIN_CONTOUR_AREA,
        }
    }
}

impl ModelConfig {
    pub fn from_json(doc: &Value) -> Self {
        let defaults = Self::default();
        let float = |pointer: &str, default: f64| {
            doc.pointer(pointer)
                .and_then(Value::as_f64)
                .unwrap_or(default)
        };
        // Fractional numbers are truncated toward zero.
        let int = |pointer: &str, default: i64| {
            doc.pointer(pointer)
                .and_then(|value| {
                    value
                        .as_i64()
                        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
                })
                .unwrap_or(default)
        };

        Self {
            ssim: MetricParams {
                weight: float("/ssim/weight", defaults.ssim.weight),
                threshold: float("/ssim/threshold", defaults.ssim.threshold),
            },
            mse: MetricParams {
                weight: float("/mse/weight", defaults.mse.weight),
                threshold: float("/mse/threshold", defaults.mse.threshold),
            },
            histogram: MetricParams {
                weight: float("/histogram/weight", defaults.histogram.weight),
                threshold: float("/histogram/threshold", defaults.histogram.threshold),
            },
            combined_threshold: float("/combined_threshold", defaults.combined_threshold),
            resize_width: int("/image_processing/resize_width", defaults.resize_width),
            resize_height: int("/image_processing/resize_height", defaults.resize_height),
            min_contour_area: int("/detection/min_contour_area", defaults.min_contour_area),
        }
    }
}

/// Anomaly detection output accompanying a training request. Only the
/// number of fault regions is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnomalyResults {
    pub fault_count: usize,
}

impl AnomalyResults {
    pub fn from_json(doc: &Value) -> Self {
        let fault_count = doc
            .get("fault_regions")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        Self { fault_count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedConfig {
    pub ssim: MetricParams,
    pub mse: MetricParams,
    pub histogram: MetricParams,
    pub combined_threshold: f64,
    pub image_processing: ImageProcessing,
    pub detection: Detection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageProcessing {
    pub resize_width: i64,
    pub resize_height: i64,
    pub blur_kernel_size: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub min_contour_area: i64,
    pub dilation_iterations: i64,
    pub erosion_iterations: i64,
}

impl UpdatedConfig {
    pub fn weight_sum(&self) -> f64 {
        self.ssim.weight + self.mse.weight + self.histogram.weight
    }
}
