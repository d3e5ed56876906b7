mod error;
pub mod handlers;
pub mod types;

pub use error::ApiError;
pub use handlers::{AppState, NoiseFactory};

use crate::{
    Result,
    config::{Config, CorsConfig, ServerConfig},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub fn router(config: &ServerConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/update-config", post(handlers::update_config))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn run(config: Config) -> Result<()> {
    let state = AppState::new(config.server.service_name.clone());
    let app = router(&config.server, state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting {} on {}", config.server.service_name, addr);
    info!("Available endpoints: POST /update-config, GET /health, GET /");
    warn!(
        "Port {} is shared with the real training API; stop it before running this mock",
        config.server.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
