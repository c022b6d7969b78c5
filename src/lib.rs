//! Ollama Bridge - REST proxy for a local model runtime
//!
//! A lightweight Rust service that fronts an Ollama-compatible inference
//! runtime: it lists installed models enriched with metadata scraped from
//! the public model library, proxies pull/delete operations, and serves a
//! time-bounded cached view of the public catalog.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod runtime;

pub use catalog::{CatalogCache, CatalogEntry, CatalogSource, LibraryScraper, SizeClassifier};
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use runtime::{InstalledModel, ModelEnricher, OperationOutcome, RuntimeClient, TagsResponse};
