pub mod transcribe;

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::HealthResponse;
use crate::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config.app_title.clone(),
        version: state.config.app_version.clone(),
        debug: state.config.debug,
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
