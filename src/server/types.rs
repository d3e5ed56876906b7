use crate::training::UpdatedConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrainingResponse {
    pub status: &'static str,
    pub message: String,
    pub updated_config: UpdatedConfig,
    pub training_metrics: TrainingMetrics,
}

#[derive(Debug, Serialize)]
pub struct TrainingMetrics {
    pub fault_regions_analyzed: usize,
    pub baseline_image_size: u64,
    pub maintenance_image_size: u64,
    pub training_duration_ms: i64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: &'static str,
    pub endpoints: Endpoints,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    #[serde(rename = "/update-config")]
    pub update_config: &'static str,
    #[serde(rename = "/detect-anomalies")]
    pub detect_anomalies: &'static str,
    #[serde(rename = "/health")]
    pub health: &'static str,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            update_config: "POST - Train classification model and update config",
            detect_anomalies: "POST - Detect anomalies (not implemented in mock)",
            health: "GET - Health check",
        }
    }
}
