//! API Explorer Service
//!
//! Wires settings, catalogs and the probe engine together for each command.

use domain_explorer::{
    HIGHLIGHTS_FEED_PATH, HttpTransport, JsonFileSettingsStore, ProbeEngine, ProbeSession,
    QrAuthenticator, QueryParamCatalog, ResultSet, Settings, SettingsStore, SuccessSummary,
    fetch_highlights, load_endpoints, read_json, summarize, write_json,
};
use eyre::{Result, WrapErr};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::qr::render_session_qr;

/// Outcome of an exploration run
#[derive(Debug, Clone)]
pub struct ExploreReport {
    pub endpoints: usize,
    pub requests_sent: usize,
    pub cache_hits: usize,
    pub successful: Vec<SuccessSummary>,
    pub duration_ms: u64,
}

pub struct ApiExplorer<T: HttpTransport + Clone> {
    config: Config,
    transport: T,
    settings: JsonFileSettingsStore,
}

impl<T: HttpTransport + Clone> ApiExplorer<T> {
    pub fn new(config: Config, transport: T) -> Self {
        let settings = JsonFileSettingsStore::new(config.settings_file());
        Self {
            config,
            transport,
            settings,
        }
    }

    /// Run the QR login and persist the tokens
    pub async fn authenticate(&self) -> Result<Settings> {
        let authenticator = QrAuthenticator::new(self.transport.clone(), &self.config.api_host)
            .with_polling(self.config.auth_poll_attempts, self.config.auth_poll_interval);

        authenticator
            .authenticate(&self.settings, |session_token| {
                match render_session_qr(session_token) {
                    Ok(code) => {
                        println!("Scan this QR code with the Matter app:");
                        println!("{}", code);
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not render QR code, showing raw session token");
                        println!("Confirm this login in the Matter app with session token:");
                        println!("{}", session_token);
                    }
                }
            })
            .await
            .wrap_err("QR authentication failed")
    }

    /// Probe the endpoint catalog and write the results and summary files.
    ///
    /// Fails before any request when no access token is stored or the
    /// catalog is missing or empty.
    pub async fn explore(&self, endpoints_file: Option<&Path>) -> Result<ExploreReport> {
        let start = Instant::now();

        let settings = self.settings.load().await;
        let access_token = settings.require_access_token()?;

        let endpoints_file = endpoints_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.endpoints_file());
        let templates = load_endpoints(&endpoints_file).await?;

        info!(
            count = templates.len(),
            file = %endpoints_file.display(),
            "Testing API endpoints"
        );

        let engine = ProbeEngine::new(self.transport.clone(), &self.config.api_host);
        let mut session = ProbeSession::new();
        let results = engine
            .probe_with_session(
                &mut session,
                access_token,
                &templates,
                &QueryParamCatalog::matter(),
            )
            .await;

        let successful = self.write_outputs(&results).await?;

        Ok(ExploreReport {
            endpoints: results.len(),
            requests_sent: session.requests_sent(),
            cache_hits: session.cache().hits(),
            successful,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Recompute the summary file from a saved results file
    pub async fn summarize_saved(&self) -> Result<Vec<SuccessSummary>> {
        let results_file = self.config.results_file();
        let results: ResultSet = read_json(&results_file)
            .await
            .wrap_err_with(|| format!("Failed to read results from {}", results_file.display()))?;

        let summary = summarize(&results);
        write_json(&self.config.summary_file(), &summary).await?;
        Ok(summary)
    }

    /// Export every highlights feed entry, authenticating first when needed
    pub async fn export_highlights(&self) -> Result<usize> {
        let mut settings = self.settings.load().await;
        if settings.require_access_token().is_err() {
            warn!("No access token stored, starting authentication");
            settings = self.authenticate().await?;
        }
        let access_token = settings.require_access_token()?;

        let url = format!("{}/{}", self.config.api_host, HIGHLIGHTS_FEED_PATH);
        let entries = fetch_highlights(&self.transport, access_token, &url).await?;

        let path = self.config.highlights_file();
        write_json(&path, &entries).await?;
        info!(count = entries.len(), path = %path.display(), "Saved highlights");
        Ok(entries.len())
    }

    async fn write_outputs(&self, results: &ResultSet) -> Result<Vec<SuccessSummary>> {
        let results_file = self.config.results_file();
        write_json(&results_file, results)
            .await
            .wrap_err_with(|| format!("Failed to write {}", results_file.display()))?;
        info!(path = %results_file.display(), "API exploration complete, results saved");

        let summary = summarize(results);
        let summary_file = self.config.summary_file();
        write_json(&summary_file, &summary)
            .await
            .wrap_err_with(|| format!("Failed to write {}", summary_file.display()))?;
        info!(path = %summary_file.display(), "Summary of successful endpoints saved");

        Ok(summary)
    }
}
