//! Public library page scraping
//!
//! Parses the library's HTML listing into structured [`CatalogEntry`]
//! records. Entries are anchors linking under `/library/`:
//! ```text
//! <a href="/library/llama3">
//!   <h2>Llama 3</h2>
//!   <p>Meta Llama 3: The most capable openly available LLM to date. 8B</p>
//! </a>
//! ```
//! Missing or malformed substructure never fails a scrape; each field
//! degrades to a documented fallback instead.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::suitability::SizeClassifier;
use super::{CatalogEntry, CatalogSource};
use crate::error::{BridgeError, require_success};

/// Sentinel parameter size for entries whose size cannot be determined
pub const UNKNOWN_PARAM_SIZE: &str = "Unknown";

static LIBRARY_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="/library/"]"#).expect("static selector"));
static CARD_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("static selector"));
static CARD_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector"));
static PARAM_SIZE_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?) ?B").expect("static regex"));

/// Scrapes the public model library page into catalog entries
pub struct LibraryScraper {
    http: reqwest::Client,
    origin: String,
    known_sizes: HashMap<String, String>,
    classifier: SizeClassifier,
}

impl LibraryScraper {
    /// `origin` is the library's web origin (e.g. `https://ollama.com`);
    /// the listing page lives at `{origin}/library`. `known_sizes` maps
    /// lower-cased model-family names to parameter-size strings and takes
    /// precedence over sizes found in description text.
    pub fn new(
        http: reqwest::Client,
        origin: impl Into<String>,
        known_sizes: HashMap<String, String>,
        classifier: SizeClassifier,
    ) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        Self {
            http,
            origin,
            known_sizes,
            classifier,
        }
    }

    async fn fetch_page(&self) -> Result<String, BridgeError> {
        let url = format!("{}/library", self.origin);
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
        response
            .text()
            .await
            .map_err(|source| BridgeError::Upstream { url, source })
    }

    /// Parse a library page into at most `limit` entries
    ///
    /// Candidates are walked in document order. Duplicate names are skipped
    /// without counting toward the limit; the first occurrence wins.
    pub fn parse_page(&self, html: &str, limit: usize) -> Vec<CatalogEntry> {
        let document = Html::parse_document(html);
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for card in document.select(&LIBRARY_CARD) {
            if entries.len() >= limit {
                break;
            }

            let Some(href) = card.value().attr("href") else {
                continue;
            };
            let name = match href.rsplit('/').next() {
                Some(segment) if !segment.is_empty() => segment.to_string(),
                _ => continue,
            };
            if !seen.insert(name.clone()) {
                continue;
            }

            let title = card
                .select(&CARD_TITLE)
                .next()
                .map(element_text)
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| name.clone());
            let description = card
                .select(&CARD_DESCRIPTION)
                .next()
                .map(element_text)
                .unwrap_or_default();

            let param_size = self.resolve_param_size(&name, &description);
            let suitable_for_target = self.classifier.is_suitable(&param_size);

            entries.push(CatalogEntry {
                url: format!("{}{}", self.origin, href),
                name,
                title,
                description,
                param_size,
                suitable_for_target,
            });
        }

        entries
    }

    /// Known-family table first, then the first `<number>B` match in the
    /// description, then the sentinel.
    fn resolve_param_size(&self, name: &str, description: &str) -> String {
        if let Some(size) = self.known_sizes.get(&name.to_lowercase()) {
            return size.clone();
        }

        match PARAM_SIZE_IN_TEXT.captures(description) {
            Some(caps) => format!("{}B", &caps[1]),
            None => UNKNOWN_PARAM_SIZE.to_string(),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[async_trait]
impl CatalogSource for LibraryScraper {
    async fn scrape(&self, limit: usize) -> Result<Vec<CatalogEntry>, BridgeError> {
        let html = self.fetch_page().await?;
        Ok(self.parse_page(&html, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scraper() -> LibraryScraper {
        let known_sizes = [("llama3", "8B"), ("mistral", "7B")]
            .into_iter()
            .map(|(name, size)| (name.to_string(), size.to_string()))
            .collect();
        LibraryScraper::new(
            reqwest::Client::new(),
            "https://ollama.com",
            known_sizes,
            SizeClassifier::new(7.0),
        )
    }

    #[test]
    fn test_parses_card_fields() {
        let html = r#"
            <a href="/library/llama3">
              <h2>Llama 3</h2>
              <p>The most capable openly available LLM to date.</p>
            </a>
        "#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.name, "llama3");
        assert_eq!(entry.title, "Llama 3");
        assert_eq!(
            entry.description,
            "The most capable openly available LLM to date."
        );
        assert_eq!(entry.param_size, "8B");
        assert!(!entry.suitable_for_target);
        assert_eq!(entry.url, "https://ollama.com/library/llama3");
    }

    #[test]
    fn test_duplicate_names_keep_first_occurrence() {
        let html = r#"
            <a href="/library/llama3"><h2>First</h2><p>first copy</p></a>
            <a href="/library/llama3"><h2>Second</h2><p>second copy</p></a>
        "#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "First");
        assert_eq!(entries[0].description, "first copy");
    }

    #[test]
    fn test_limit_respected_in_document_order() {
        let html = r#"
            <a href="/library/a"><h2>A</h2></a>
            <a href="/library/b"><h2>B</h2></a>
            <a href="/library/c"><h2>C</h2></a>
            <a href="/library/d"><h2>D</h2></a>
            <a href="/library/e"><h2>E</h2></a>
        "#;

        let entries = test_scraper().parse_page(html, 2);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a");
        assert_eq!(entries[1].name, "b");
    }

    #[test]
    fn test_duplicates_do_not_count_toward_limit() {
        let html = r#"
            <a href="/library/a"><h2>A</h2></a>
            <a href="/library/a"><h2>A again</h2></a>
            <a href="/library/b"><h2>B</h2></a>
        "#;

        let entries = test_scraper().parse_page(html, 2);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "b");
    }

    #[test]
    fn test_size_from_description_when_not_in_table() {
        let html = r#"
            <a href="/library/newmodel">
              <h2>New Model</h2>
              <p>A research preview with 13.2B parameters.</p>
            </a>
        "#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries[0].param_size, "13.2B");
        assert!(!entries[0].suitable_for_target);
    }

    #[test]
    fn test_table_takes_precedence_over_description() {
        let html = r#"
            <a href="/library/mistral">
              <h2>Mistral</h2>
              <p>Available in 123B variants.</p>
            </a>
        "#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries[0].param_size, "7B");
        assert!(entries[0].suitable_for_target);
    }

    #[test]
    fn test_size_with_space_before_unit() {
        let html = r#"
            <a href="/library/spacey"><h2>Spacey</h2><p>Roughly 3 B of weights.</p></a>
        "#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries[0].param_size, "3B");
    }

    #[test]
    fn test_missing_title_falls_back_to_name() {
        let html = r#"<a href="/library/untitled"><p>No heading here.</p></a>"#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries[0].title, "untitled");
        assert_eq!(entries[0].description, "No heading here.");
    }

    #[test]
    fn test_missing_description_falls_back_to_empty() {
        let html = r#"<a href="/library/quiet"><h2>Quiet</h2></a>"#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries[0].description, "");
        assert_eq!(entries[0].param_size, UNKNOWN_PARAM_SIZE);
        assert!(!entries[0].suitable_for_target);
    }

    #[test]
    fn test_non_library_anchors_ignored() {
        let html = r#"
            <a href="/blog/post"><h2>Blog</h2></a>
            <a href="/library/real"><h2>Real</h2></a>
        "#;

        let entries = test_scraper().parse_page(html, 10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "real");
    }

    #[test]
    fn test_empty_page_yields_no_entries() {
        let entries = test_scraper().parse_page("<html><body></body></html>", 10);
        assert!(entries.is_empty());
    }
}
