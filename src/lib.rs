pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod storage;
pub mod transcription;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{AppError, Result};

use transcription::{MockTranscriber, Transcriber};

pub struct AppState {
    pub config: Config,
    pub transcriber: Arc<dyn Transcriber>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            config,
            transcriber,
            started_at: Instant::now(),
        }
    }

    /// State backed by the mock transcriber, configured from `config`.
    pub fn with_mock(config: Config) -> Self {
        let delay = Duration::from_millis(config.mock_delay_ms);
        Self::new(config, Arc::new(MockTranscriber::new(delay)))
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o.trim()) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}: {}", o, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/transcribe", post(handlers::transcribe::transcribe))
        .layer(DefaultBodyLimit::max(state.config.max_request_body_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
