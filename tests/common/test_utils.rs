use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use mock_training_server::{
    config::ServerConfig,
    server::{self, AppState},
    training::NoiseSource,
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

pub const BOUNDARY: &str = "mock-training-boundary";
pub const SERVICE_NAME: &str = "Mock Classification Training Server";

/// Build a router backed by the given noise source
pub fn create_test_app<N>(noise: fn() -> N) -> Router
where
    N: NoiseSource + 'static,
{
    create_test_app_with_config(&ServerConfig::default(), noise)
}

pub fn create_test_app_with_config<N>(config: &ServerConfig, noise: fn() -> N) -> Router
where
    N: NoiseSource + 'static,
{
    let state = AppState::new(SERVICE_NAME).with_noise(move || Box::new(noise()));
    server::router(config, state)
}

/// Incrementally assembled `multipart/form-data` body
#[derive(Debug, Default)]
pub struct MultipartBody {
    buffer: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buffer.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buffer.extend_from_slice(data);
        self.buffer.extend_from_slice(b"\r\n");
        self
    }

    pub fn json(self, name: &str, body: &str) -> Self {
        let file_name = format!("{name}.json");
        self.file(name, &file_name, "application/json", body.as_bytes())
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buffer
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buffer
    }
}

/// A complete upload with the given config and anomaly results documents
pub fn training_upload(config: &str, anomaly_results: &str) -> MultipartBody {
    MultipartBody::new()
        .file("baseline_image", "baseline.png", "image/png", &[0u8; 128])
        .file("maintenance_image", "maintenance.png", "image/png", &[1u8; 256])
        .json("config", config)
        .json("anomaly_results", anomaly_results)
}

pub fn update_config_request(body: MultipartBody) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/update-config")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body.finish()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and decode the JSON response body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
