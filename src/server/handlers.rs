use super::{
    error::ApiError,
    types::{Endpoints, HealthResponse, ServiceInfo, TrainingMetrics, TrainingResponse},
};
use crate::training::{self, AnomalyResults, ModelConfig, NoiseSource, RandNoise};
use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const TRAINING_STEPS: [&str; 6] = [
    "Loading baseline image",
    "Loading maintenance image",
    "Analyzing fault regions",
    "Training classification model",
    "Optimizing configuration parameters",
    "Generating updated configuration",
];

pub type NoiseFactory = Arc<dyn Fn() -> Box<dyn NoiseSource> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    /// Called once per training request.
    pub noise: NoiseFactory,
}

impl AppState {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: Arc::from(service_name.into()),
            noise: Arc::new(|| Box::new(RandNoise::from_entropy()) as Box<dyn NoiseSource>),
        }
    }

    pub fn with_noise<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn NoiseSource> + Send + Sync + 'static,
    {
        self.noise = Arc::new(factory);
        self
    }
}

#[derive(Debug)]
struct UploadedPart {
    file_name: Option<String>,
    data: Bytes,
}

impl UploadedPart {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn parse_json(&self) -> Result<Value, String> {
        let text = std::str::from_utf8(&self.data).map_err(|e| e.to_string())?;
        serde_json::from_str(text).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Default)]
struct TrainingUpload {
    baseline_image: Option<UploadedPart>,
    maintenance_image: Option<UploadedPart>,
    config: Option<UploadedPart>,
    anomaly_results: Option<UploadedPart>,
}

struct CompleteUpload {
    baseline_image: UploadedPart,
    maintenance_image: UploadedPart,
    config: UploadedPart,
    anomaly_results: UploadedPart,
}

impl TrainingUpload {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut upload = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_owned);

            let Some(slot) = upload.slot(&name) else {
                debug!("Ignoring unexpected part: {}", name);
                continue;
            };
            if slot.is_some() {
                debug!("Ignoring repeated part: {}", name);
                continue;
            }

            let data = field.bytes().await?;
            *slot = Some(UploadedPart { file_name, data });
        }

        Ok(upload)
    }

    fn slot(&mut self, name: &str) -> Option<&mut Option<UploadedPart>> {
        match name {
            "baseline_image" => Some(&mut self.baseline_image),
            "maintenance_image" => Some(&mut self.maintenance_image),
            "config" => Some(&mut self.config),
            "anomaly_results" => Some(&mut self.anomaly_results),
            _ => None,
        }
    }

    fn parts(&self) -> [(&'static str, Option<&UploadedPart>); 4] {
        [
            ("baseline_image", self.baseline_image.as_ref()),
            ("maintenance_image", self.maintenance_image.as_ref()),
            ("config", self.config.as_ref()),
            ("anomaly_results", self.anomaly_results.as_ref()),
        ]
    }

    fn missing(&self) -> Vec<&'static str> {
        self.parts()
            .into_iter()
            .filter(|(_, part)| part.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    fn log_received(&self) {
        for (name, part) in self.parts() {
            match part {
                Some(part) => info!(
                    "Received {}: {} ({} bytes)",
                    name,
                    part.file_name.as_deref().unwrap_or("<no filename>"),
                    part.size()
                ),
                None => info!("Received {}: NOT FOUND", name),
            }
        }
    }

    fn into_complete(self) -> Result<CompleteUpload, ApiError> {
        match self {
            Self {
                baseline_image: Some(baseline_image),
                maintenance_image: Some(maintenance_image),
                config: Some(config),
                anomaly_results: Some(anomaly_results),
            } => Ok(CompleteUpload {
                baseline_image,
                maintenance_image,
                config,
                anomaly_results,
            }),
            incomplete => Err(ApiError::MissingParts(incomplete.missing())),
        }
    }
}

pub async fn update_config(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TrainingResponse>, ApiError> {
    info!("Training request received");

    // A body that is not multipart at all carries none of the parts.
    let upload = match multipart {
        Ok(multipart) => TrainingUpload::read(multipart).await?,
        Err(rejection) => {
            debug!("Request is not a multipart upload: {}", rejection);
            TrainingUpload::default()
        }
    };
    upload.log_received();
    let upload = upload.into_complete()?;

    let config_doc = upload.config.parse_json().map_err(ApiError::MalformedConfig)?;
    info!("Current configuration:\n{:#}", config_doc);

    let anomaly_doc = upload
        .anomaly_results
        .parse_json()
        .map_err(ApiError::MalformedAnomalyResults)?;
    let anomalies = AnomalyResults::from_json(&anomaly_doc);
    info!("Fault regions detected: {}", anomalies.fault_count);

    for (i, step) in TRAINING_STEPS.iter().enumerate() {
        info!("Simulating training step {}: {}", i + 1, step);
    }

    let mut noise = (state.noise)();
    let updated_config = training::train(&ModelConfig::from_json(&config_doc), noise.as_mut());
    let training_duration_ms = training::sample_duration_ms(noise.as_mut());

    if let Ok(rendered) = serde_json::to_string_pretty(&updated_config) {
        info!("Updated configuration:\n{}", rendered);
    }

    Ok(Json(TrainingResponse {
        status: "success",
        message: format!(
            "Model trained successfully. Analyzed {} fault regions and optimized configuration parameters.",
            anomalies.fault_count
        ),
        updated_config,
        training_metrics: TrainingMetrics {
            fault_regions_analyzed: anomalies.fault_count,
            baseline_image_size: upload.baseline_image.size(),
            maintenance_image_size: upload.maintenance_image.size(),
            training_duration_ms,
        },
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.service_name.to_string(),
        version: VERSION,
    })
}

pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: state.service_name.to_string(),
        version: VERSION,
        endpoints: Endpoints::default(),
        status: "running",
    })
}
