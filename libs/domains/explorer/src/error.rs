use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

/// Error type for explorer operations that must surface to the caller.
///
/// Per-request failures during a probe run never show up here; they are
/// recorded as failed [`crate::ProbeResult`]s instead.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("No access token found. Authenticate first with `api-explorer auth`")]
    MissingAccessToken,

    #[error("Failed to load endpoint catalog from {path}: {reason}")]
    CatalogUnavailable { path: PathBuf, reason: String },

    #[error("No endpoints found in {0}")]
    EmptyCatalog(PathBuf),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("QR login exchange timed out after {0} attempts")]
    AuthTimeout(u32),

    #[error("API returned {status} for {url}")]
    Api { status: u16, url: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;
