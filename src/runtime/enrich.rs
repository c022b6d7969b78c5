//! Catalog enrichment of the installed-model listing

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{InstalledModel, RuntimeClient};
use crate::catalog::{CatalogEntry, CatalogSource};
use crate::error::BridgeError;

/// Installed-model listing as served to callers
#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub models: Vec<InstalledModel>,
}

/// Joins the runtime's installed listing with freshly scraped catalog metadata
pub struct ModelEnricher {
    runtime: RuntimeClient,
    catalog: Arc<dyn CatalogSource>,
    scrape_limit: usize,
}

impl ModelEnricher {
    pub fn new(runtime: RuntimeClient, catalog: Arc<dyn CatalogSource>, scrape_limit: usize) -> Self {
        Self {
            runtime,
            catalog,
            scrape_limit,
        }
    }

    /// List installed models, each augmented with public catalog metadata
    ///
    /// Issues two upstream calls: the runtime tag listing and an uncached
    /// library scrape. Either one failing fails the whole call; there is no
    /// fallback to an unenriched listing.
    pub async fn list_installed(&self) -> Result<TagsResponse, BridgeError> {
        let mut models = self.runtime.list_tags().await?;
        let catalog = self.catalog.scrape(self.scrape_limit).await?;
        enrich_models(&mut models, &catalog);

        Ok(TagsResponse { models })
    }
}

/// Copy catalog metadata onto installed models matched by base name
///
/// The base name is the portion of the runtime identifier before the first
/// `:`, compared against lower-cased catalog names. Unmatched models are
/// left untouched.
pub fn enrich_models(models: &mut [InstalledModel], catalog: &[CatalogEntry]) {
    let lookup: HashMap<String, &CatalogEntry> = catalog
        .iter()
        .map(|entry| (entry.name.to_lowercase(), entry))
        .collect();

    for model in models {
        let base = model.name.split(':').next().unwrap_or_default().to_lowercase();
        if let Some(entry) = lookup.get(&base) {
            model.title = Some(entry.title.clone());
            model.description = Some(entry.description.clone());
            model.public_url = Some(entry.url.clone());
            model.param_size = Some(entry.param_size.clone());
            model.suitable_for_target = Some(entry.suitable_for_target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            title: format!("{name} title"),
            description: format!("{name} description"),
            param_size: "8B".to_string(),
            suitable_for_target: false,
            url: format!("https://ollama.com/library/{name}"),
        }
    }

    #[test]
    fn test_tagged_model_matched_by_base_name() {
        let mut models = vec![InstalledModel::named("llama3:8b")];
        let catalog = vec![catalog_entry("llama3")];

        enrich_models(&mut models, &catalog);

        let model = &models[0];
        assert_eq!(model.name, "llama3:8b");
        assert_eq!(model.title.as_deref(), Some("llama3 title"));
        assert_eq!(model.description.as_deref(), Some("llama3 description"));
        assert_eq!(
            model.public_url.as_deref(),
            Some("https://ollama.com/library/llama3")
        );
        assert_eq!(model.param_size.as_deref(), Some("8B"));
        assert_eq!(model.suitable_for_target, Some(false));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let mut models = vec![InstalledModel::named("Llama3:latest")];
        let catalog = vec![catalog_entry("llama3")];

        enrich_models(&mut models, &catalog);
        assert!(models[0].title.is_some());
    }

    #[test]
    fn test_untagged_name_matches_whole_identifier() {
        let mut models = vec![InstalledModel::named("mistral")];
        let catalog = vec![catalog_entry("mistral")];

        enrich_models(&mut models, &catalog);
        assert!(models[0].title.is_some());
    }

    #[test]
    fn test_unmatched_model_left_untouched() {
        let mut model = InstalledModel::named("homegrown:latest");
        model
            .runtime
            .insert("size".to_string(), serde_json::json!(42));
        let mut models = vec![model];

        enrich_models(&mut models, &[catalog_entry("llama3")]);

        let model = &models[0];
        assert!(model.title.is_none());
        assert!(model.public_url.is_none());
        assert_eq!(model.runtime["size"], 42);
    }

    #[test]
    fn test_empty_catalog_changes_nothing() {
        let mut models = vec![InstalledModel::named("llama3:8b")];
        enrich_models(&mut models, &[]);
        assert!(models[0].title.is_none());
    }
}
