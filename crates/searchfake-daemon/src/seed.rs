//! Seed files: documents loaded into the engine before the listener opens.
//!
//! A seed file is a YAML mapping from index name to a list of documents:
//!
//! ```yaml
//! products:
//!   - id: "1"
//!     score: 1.0
//!     source: { sku: "A-100", name: "kettle" }
//! ```
//!
//! Indices are created in file order. A key that names a bound alias
//! seeds the index the alias points to.

use std::path::Path;

use indexmap::IndexMap;
use searchfake_core::{Document, Engine};
use tracing::info;

use crate::error::DaemonError;

/// Documents to seed, keyed by index name.
pub type SeedSet = IndexMap<String, Vec<Document>>;

/// Read and parse a seed file.
pub fn load(path: &Path) -> Result<SeedSet, DaemonError> {
    let contents = std::fs::read_to_string(path).map_err(|e| DaemonError::Seed {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    parse(&contents)
}

/// Parse seed YAML. An empty document is an empty set.
pub fn parse(yaml: &str) -> Result<SeedSet, DaemonError> {
    if yaml.trim().is_empty() {
        return Ok(SeedSet::new());
    }
    serde_yml::from_str(yaml).map_err(|e| DaemonError::Seed {
        message: format!("failed to parse seed YAML: {e}"),
    })
}

/// Push every document into the engine. Returns the number of documents seeded.
pub async fn apply(engine: &Engine, seeds: SeedSet) -> usize {
    let mut seeded: usize = 0;
    for (index, documents) in seeds {
        let added = documents.len();
        engine.seed_documents(&index, documents).await;
        seeded = seeded.saturating_add(added);
    }
    info!(documents = seeded, "Seed data loaded");
    seeded
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
products:
  - id: "1"
    score: 1.5
    source: { sku: "A-100" }
  - id: "2"
    score: 0.5
    source: { sku: "A-200" }
empty: []
"#;

    #[test]
    fn parse_keeps_index_order() {
        let seeds = parse(SEED).unwrap_or_default();
        let names: Vec<&str> = seeds.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["products", "empty"]);
        assert_eq!(seeds.get("products").map(Vec::len), Some(2));
    }

    #[test]
    fn parse_empty_is_empty_set() {
        assert!(parse("  \n").is_ok_and(|s| s.is_empty()));
    }

    #[test]
    fn parse_rejects_missing_fields() {
        let result = parse("products:\n  - id: \"1\"\n");
        assert!(matches!(result, Err(DaemonError::Seed { .. })));
    }

    #[tokio::test]
    async fn apply_creates_indices_and_documents() {
        let engine = Engine::new();
        let seeded = apply(&engine, parse(SEED).unwrap_or_default()).await;

        assert_eq!(seeded, 2);
        assert_eq!(engine.index_names().await, vec!["products", "empty"]);
        assert_eq!(engine.document_count("products").await, Some(2));
        assert_eq!(engine.document_count("empty").await, Some(0));
    }

    #[tokio::test]
    async fn apply_through_alias_seeds_bound_index() {
        let engine = Engine::new();
        engine.create_index("catalog").await;
        engine.put_alias("catalog", "products").await;

        apply(&engine, parse(SEED).unwrap_or_default()).await;

        assert_eq!(engine.index_names().await, vec!["catalog", "empty"]);
        assert_eq!(engine.document_count("catalog").await, Some(2));
        assert_eq!(engine.alias_target("products").await.as_deref(), Some("catalog"));
    }
}
