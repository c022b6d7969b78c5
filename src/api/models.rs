//! API request and response models

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Body naming the model a pull operation targets
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelRequest {
    pub name: String,
}
