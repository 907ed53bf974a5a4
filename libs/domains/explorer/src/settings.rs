use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ExplorerError, ExplorerResult};
use crate::output::write_json;

/// Persisted authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Settings {
    /// The access token, required before any probing
    pub fn require_access_token(&self) -> ExplorerResult<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(ExplorerError::MissingAccessToken)
    }
}

/// Supplies and persists [`Settings`]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load saved settings; defaults when nothing usable is stored
    async fn load(&self) -> Settings;

    async fn save(&self, settings: &Settings) -> ExplorerResult<()>;
}

/// Settings kept as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn load(&self) -> Settings {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No saved settings");
                return Settings::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!(path = %self.path.display(), error = %e, "Ignoring unreadable settings");
            Settings::default()
        })
    }

    async fn save(&self, settings: &Settings) -> ExplorerResult<()> {
        write_json(&self.path, settings).await?;
        info!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_access_token() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.require_access_token(),
            Err(ExplorerError::MissingAccessToken)
        ));

        settings.access_token = Some(String::new());
        assert!(settings.require_access_token().is_err());

        settings.access_token = Some("abc".to_string());
        assert_eq!(settings.require_access_token().unwrap(), "abc");
    }

    #[test]
    fn test_settings_use_camel_case_keys() {
        let settings: Settings =
            serde_json::from_str(r#"{"accessToken": "a", "refreshToken": null}"#).unwrap();
        assert_eq!(settings.access_token.as_deref(), Some("a"));
        assert_eq!(settings.refresh_token, None);
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().await, Settings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("nested").join("settings.json"));
        let settings = Settings {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
        };

        store.save(&settings).await.unwrap();

        assert_eq!(store.load().await, settings);
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileSettingsStore::new(path);
        assert_eq!(store.load().await, Settings::default());
    }
}
