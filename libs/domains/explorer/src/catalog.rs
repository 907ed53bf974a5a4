//! Endpoint and query-parameter catalogs.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::error::{ExplorerError, ExplorerResult};

/// Query-string fragments to try per base endpoint path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParamCatalog {
    variants: BTreeMap<String, Vec<String>>,
}

impl QueryParamCatalog {
    /// Empty catalog: no query variants are probed
    pub fn new() -> Self {
        Self::default()
    }

    /// Variants known to be accepted by the Matter API
    pub fn matter() -> Self {
        let mut catalog = Self::new();
        catalog.register("library_items/highlights_feed/", &["limit=10", "offset=0"]);
        catalog.register(
            "library_items/",
            &[
                "limit=10",
                "offset=0",
                "sort=recent",
                "sort=oldest",
                "status=active",
                "status=archived",
            ],
        );
        catalog.register("search/", &["q=test", "limit=10"]);
        catalog.register("tags/", &["limit=10", "offset=0"]);
        catalog.register("highlights/", &["limit=10", "offset=0", "sort=recent"]);
        catalog.register("collections/", &["limit=10", "offset=0"]);
        catalog.register("user/reading_history/", &["limit=10", "offset=0"]);
        catalog.register("feeds/home/", &["limit=10", "offset=0"]);
        catalog
    }

    pub fn register(&mut self, base_path: &str, fragments: &[&str]) {
        self.variants.insert(
            base_path.to_string(),
            fragments.iter().map(|f| f.to_string()).collect(),
        );
    }

    /// Fragments for `base_path`, in probing order
    pub fn variants(&self, base_path: &str) -> &[String] {
        self.variants
            .get(base_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Read the endpoint template catalog: a JSON array of path strings.
///
/// A missing, unreadable or empty catalog is an error; probing never starts
/// without one.
pub async fn load_endpoints(path: &Path) -> ExplorerResult<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ExplorerError::CatalogUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let endpoints: Vec<String> =
        serde_json::from_str(&content).map_err(|e| ExplorerError::CatalogUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if endpoints.is_empty() {
        return Err(ExplorerError::EmptyCatalog(path.to_path_buf()));
    }

    info!(path = %path.display(), count = endpoints.len(), "Loaded endpoint catalog");
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matter_catalog_variants() {
        let catalog = QueryParamCatalog::matter();
        assert_eq!(catalog.variants("tags/"), ["limit=10", "offset=0"]);
        assert_eq!(catalog.variants("library_items/").len(), 6);
        assert!(catalog.variants("unknown/").is_empty());
    }

    #[tokio::test]
    async fn test_load_endpoints_reads_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.json");
        std::fs::write(&path, r#"["tags/", "library_items/{id}/"]"#).unwrap();

        let endpoints = load_endpoints(&path).await.unwrap();
        assert_eq!(endpoints, vec!["tags/", "library_items/{id}/"]);
    }

    #[tokio::test]
    async fn test_load_endpoints_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_endpoints(&dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(ExplorerError::CatalogUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_load_endpoints_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.json");
        std::fs::write(&path, "[]").unwrap();

        let result = load_endpoints(&path).await;
        assert!(matches!(result, Err(ExplorerError::EmptyCatalog(_))));
    }

    #[tokio::test]
    async fn test_load_endpoints_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.json");
        std::fs::write(&path, r#"{"tags/": true}"#).unwrap();

        let result = load_endpoints(&path).await;
        assert!(matches!(result, Err(ExplorerError::CatalogUnavailable { .. })));
    }
}
