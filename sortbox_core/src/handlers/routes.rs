//! Route table

use axum::{
    routing::{get, post},
    Router,
};

use super::{files, health};
use crate::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(files::index))
        .route("/upload", post(files::upload_file))
        .route("/download/*filename", get(files::download_file))
        .route("/api/files", get(files::list_files))
        .route("/health", get(health::handle_health))
}
