//! Explorer Domain
//!
//! Probes the Matter API endpoint by endpoint, records what answers, and
//! describes each JSON response with an inferred schema and a truncated
//! preview.
//!
//! # Architecture
//!
//! ```text
//! endpoint catalog
//!        │
//! ┌──────▼──────┐     ┌──────────────────┐
//! │  Resolver   │◄────│ IdentifierStore  │◄──┐
//! └──────┬──────┘     └──────────────────┘   │ extract_ids
//!        │                                   │
//! ┌──────▼──────┐     ┌──────────────────┐   │
//! │ ProbeEngine │────►│  RequestCache    │   │
//! └──────┬──────┘     └──────────────────┘   │
//!        │ HttpTransport                     │
//!        ├───────────────────────────────────┘
//!        │ infer_schema + truncate
//! ┌──────▼──────┐
//! │  ResultSet  │  → summarize → SuccessSummary
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_explorer::{ProbeEngine, QueryParamCatalog, ReqwestTransport, summarize};
//!
//! # async fn run() {
//! let engine = ProbeEngine::new(ReqwestTransport::new(), "https://api.getmatter.app/api/v11");
//! let templates = vec!["tags/".to_string(), "tags/{id}/".to_string()];
//! let results = engine.probe("token", &templates, &QueryParamCatalog::matter()).await;
//! let summary = summarize(&results);
//! # }
//! ```

pub mod auth;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod highlights;
pub mod ids;
pub mod models;
pub mod output;
pub mod probe;
pub mod resolver;
pub mod schema;
pub mod settings;
pub mod summary;
pub mod transport;
pub mod truncate;

// Re-export commonly used types
pub use auth::QrAuthenticator;
pub use cache::RequestCache;
pub use catalog::{QueryParamCatalog, load_endpoints};
pub use error::{ExplorerError, ExplorerResult};
pub use highlights::{HIGHLIGHTS_FEED_PATH, fetch_highlights};
pub use ids::{EntityKind, IdentifierStore, extract_ids};
pub use models::{EndpointRecord, HttpMethod, ProbeResult, ProbeStatus, ResultSet};
pub use output::{read_json, write_json};
pub use probe::{ProbeEngine, ProbeSession};
pub use resolver::resolve;
pub use schema::{SchemaShape, infer_schema};
pub use settings::{JsonFileSettingsStore, Settings, SettingsStore};
pub use summary::{SuccessSummary, summarize};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, TransportError, TransportResult,
};
pub use truncate::truncate;
