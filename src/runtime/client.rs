//! HTTP client for the Ollama-compatible runtime API

use serde::{Deserialize, Serialize};

use super::InstalledModel;
use crate::error::{BridgeError, require_success};

#[derive(Debug, Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct TagsBody {
    #[serde(default)]
    models: Vec<InstalledModel>,
}

/// Outcome of a pull or delete operation
///
/// Write operations never raise to the HTTP layer; failures are folded into
/// the `error` variant so callers always receive a well-formed response
/// distinguishing success from failure by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationOutcome {
    Success { response_text: String, model: String },
    Deleted { model: String },
    Error { message: String, model: String },
}

/// Client for the upstream model runtime
#[derive(Clone)]
pub struct RuntimeClient {
    http: reqwest::Client,
    base_url: String,
}

impl RuntimeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// List installed models via the tag-listing endpoint
    ///
    /// Read path: transport failure, a non-success status, or an
    /// undecodable body all propagate as a hard error.
    pub async fn list_tags(&self) -> Result<Vec<InstalledModel>, BridgeError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| BridgeError::Upstream {
                url: url.clone(),
                source,
            })?;
        let response = require_success(response, &url).await?;
        let body: TagsBody = response
            .json()
            .await
            .map_err(|source| BridgeError::Upstream { url, source })?;

        Ok(body.models)
    }

    /// Submit a pull request for `name`; one attempt, no retries
    pub async fn pull(&self, name: &str) -> OperationOutcome {
        match self.try_pull(name).await {
            Ok(response_text) => OperationOutcome::Success {
                response_text,
                model: name.to_string(),
            },
            Err(err) => {
                tracing::error!(model = name, error = %err, "Pull failed");
                OperationOutcome::Error {
                    message: err.to_string(),
                    model: name.to_string(),
                }
            }
        }
    }

    async fn try_pull(&self, name: &str) -> Result<String, BridgeError> {
        let url = format!("{}/api/pull", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&NameBody { name })
            .send()
            .await
            .map_err(|source| BridgeError::Upstream {
                url: url.clone(),
                source,
            })?;
        let response = require_success(response, &url).await?;
        response
            .text()
            .await
            .map_err(|source| BridgeError::Upstream { url, source })
    }

    /// Remove an installed model; one attempt, no retries
    pub async fn delete(&self, name: &str) -> OperationOutcome {
        match self.try_delete(name).await {
            Ok(()) => OperationOutcome::Deleted {
                model: name.to_string(),
            },
            Err(err) => {
                tracing::error!(model = name, error = %err, "Delete failed");
                OperationOutcome::Error {
                    message: err.to_string(),
                    model: name.to_string(),
                }
            }
        }
    }

    async fn try_delete(&self, name: &str) -> Result<(), BridgeError> {
        let url = format!("{}/api/delete", self.base_url);
        let response = self
            .http
            .delete(&url)
            .json(&NameBody { name })
            .send()
            .await
            .map_err(|source| BridgeError::Upstream {
                url: url.clone(),
                source,
            })?;
        require_success(response, &url).await?;

        Ok(())
    }
}
