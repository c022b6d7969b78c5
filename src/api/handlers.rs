//! API request handlers

use super::models::{HealthResponse, ModelRequest};
use super::routes::AppState;
use crate::catalog::CatalogEntry;
use crate::error::BridgeError;
use crate::runtime::{OperationOutcome, TagsResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// GET /health - Bridge health check
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
        }),
    )
}

/// GET /models - List installed models enriched with catalog metadata
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<TagsResponse>, BridgeError> {
    let listing = state.enricher.list_installed().await?;
    Ok(Json(listing))
}

/// POST /models - Ask the runtime to pull a model
///
/// Always answers 200; success and failure are distinguished by the
/// outcome's `status` field.
pub async fn pull_model(
    State(state): State<AppState>,
    Json(req): Json<ModelRequest>,
) -> Json<OperationOutcome> {
    Json(state.runtime.pull(&req.name).await)
}

/// DELETE /models/{name} - Remove an installed model
pub async fn delete_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<OperationOutcome> {
    Json(state.runtime.delete(&name).await)
}

/// GET /available-models - Cached view of the public catalog
pub async fn available_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogEntry>>, BridgeError> {
    let entries = state.catalog.get(state.catalog_page_limit).await?;
    Ok(Json(entries))
}
