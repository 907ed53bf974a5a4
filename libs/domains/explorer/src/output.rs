//! JSON files written at the end of a run.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ExplorerResult;

/// Write `value` as pretty JSON, creating parent directories as needed.
/// Any existing file is replaced.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ExplorerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> ExplorerResult<T> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
