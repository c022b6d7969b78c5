//! API route definitions

use crate::catalog::CatalogCache;
use crate::runtime::{ModelEnricher, RuntimeClient};
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub enricher: Arc<ModelEnricher>,
    pub runtime: Arc<RuntimeClient>,
    pub catalog: Arc<CatalogCache>,
    pub catalog_page_limit: usize,
}

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status
        .route("/health", get(handlers::health))
        // Installed-model management
        .route("/models", get(handlers::list_models))
        .route("/models", post(handlers::pull_model))
        .route("/models/{name}", delete(handlers::delete_model))
        // Public catalog (cached)
        .route("/available-models", get(handlers::available_models))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
