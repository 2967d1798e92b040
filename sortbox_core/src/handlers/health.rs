//! Liveness endpoint

use axum::{extract::State, response::IntoResponse, Json};

use crate::{models::ApiResponse, AppState};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "storage_root": state.file_manager.storage_path().display().to_string(),
    })))
}
