//! Error types for upstream calls and API responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures reaching the model runtime or the public library site
///
/// Read paths (tag listing, catalog scrape) surface these directly; write
/// paths (pull, delete) fold them into an
/// [`OperationOutcome`](crate::runtime::OperationOutcome) instead.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Transport failure or undecodable response body
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("upstream {url} returned {status}: {body}")]
    UpstreamStatus {
        url: String,
        status: StatusCode,
        body: String,
    },
}

/// Consume a response, requiring a success status
///
/// On a non-success status the body text is captured into the error; a body
/// that cannot be read degrades to an empty string.
pub async fn require_success(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, BridgeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(BridgeError::UpstreamStatus {
        url: url.to_string(),
        status,
        body,
    })
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Upstream request failed");

        let body = Json(ErrorResponse {
            error: self.to_string(),
            timestamp: chrono::Utc::now(),
        });

        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_status_and_body() {
        let err = BridgeError::UpstreamStatus {
            url: "http://runtime/api/pull".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
        assert!(message.contains("http://runtime/api/pull"));
    }
}
