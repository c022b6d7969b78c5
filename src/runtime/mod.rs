//! Local model runtime: upstream client and catalog enrichment

pub mod client;
pub mod enrich;

use serde::{Deserialize, Serialize};

pub use client::{OperationOutcome, RuntimeClient};
pub use enrich::{ModelEnricher, TagsResponse, enrich_models};

/// One model reported by the runtime's tag listing
///
/// Runtime-native fields other than `name` pass through untouched in
/// `runtime`. The optional fields are filled from a matching catalog entry
/// during enrichment and omitted from JSON otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledModel {
    /// Runtime identifier, possibly in `base:tag` form
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suitable_for_target: Option<bool>,

    /// Everything else the runtime reported (size, digest, modified_at, ...)
    #[serde(flatten)]
    pub runtime: serde_json::Map<String, serde_json::Value>,
}

impl InstalledModel {
    /// Bare record carrying only the runtime-reported name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            public_url: None,
            param_size: None,
            suitable_for_target: None,
            runtime: serde_json::Map::new(),
        }
    }
}
