//! Core library for sortbox: a small web file manager that files uploads into
//! typed folders by extension, lists them newest first and serves them back.

pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod templates;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use files::{Category, FileManager, FileManagerConfig};
pub use handlers::routes::create_routes;
pub use templates::PageRenderer;

use axum::{extract::DefaultBodyLimit, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub file_manager: FileManager,
    pub renderer: PageRenderer,
}

impl AppState {
    pub fn new(file_manager: FileManager) -> Result<Self> {
        Ok(Self {
            app_name: "Sortbox".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            file_manager,
            renderer: PageRenderer::new()?,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .merge(create_routes())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()));

    middleware::logging::with_request_tracing(router).with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
