//! Probe engine
//!
//! Walks the endpoint catalog strictly sequentially: every request completes
//! before the next one is issued. Plain templates are all probed before any
//! `{id}` template is resolved, so identifiers mined in the first phase are
//! available in the second.

use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::cache::RequestCache;
use crate::catalog::QueryParamCatalog;
use crate::ids::{IdentifierStore, extract_ids};
use crate::models::{HttpMethod, ProbeResult, ResultSet};
use crate::resolver::{base_path, order_templates, resolve};
use crate::transport::{ApiRequest, HttpTransport};

/// Mutable state of one probe run
#[derive(Debug, Default)]
pub struct ProbeSession {
    store: IdentifierStore,
    cache: RequestCache,
    requests_sent: usize,
}

impl ProbeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifiers(&self) -> &IdentifierStore {
        &self.store
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// Requests that actually reached the transport
    pub fn requests_sent(&self) -> usize {
        self.requests_sent
    }
}

pub struct ProbeEngine<T: HttpTransport> {
    transport: T,
    host: String,
}

impl<T: HttpTransport> ProbeEngine<T> {
    pub fn new(transport: T, host: impl Into<String>) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self { transport, host }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }

    /// Probe every template with a fresh session
    pub async fn probe(
        &self,
        access_token: &str,
        templates: &[String],
        query_params: &QueryParamCatalog,
    ) -> ResultSet {
        let mut session = ProbeSession::new();
        self.probe_with_session(&mut session, access_token, templates, query_params)
            .await
    }

    /// Probe every template, resolving and caching through `session`.
    ///
    /// Individual request failures are recorded in the returned set; this
    /// never fails as a whole.
    #[instrument(skip_all, fields(templates = templates.len()))]
    pub async fn probe_with_session(
        &self,
        session: &mut ProbeSession,
        access_token: &str,
        templates: &[String],
        query_params: &QueryParamCatalog,
    ) -> ResultSet {
        let mut results = ResultSet::new();

        for template in order_templates(templates) {
            let fragments = query_params.variants(base_path(&template));

            for path in resolve(&template, &session.store) {
                let url = self.url_for(&path);
                let record = results.begin(&path);

                for method in HttpMethod::ALL {
                    let result = self
                        .probe_endpoint(session, access_token, method, &path, &url)
                        .await;
                    record.record(method, result);
                }

                for fragment in fragments {
                    let param_path = format!("{}?{}", path, fragment);
                    let param_url = format!("{}?{}", url, fragment);
                    let result = self
                        .probe_endpoint(session, access_token, HttpMethod::Get, &param_path, &param_url)
                        .await;
                    record.record_param(fragment.as_str(), result);
                }
            }
        }

        info!(
            endpoints = results.len(),
            requests = session.requests_sent,
            cache_hits = session.cache.hits(),
            "Probe run complete"
        );
        results
    }

    /// Probe a single URL, answering from the session cache when possible.
    ///
    /// `path` is the resolved endpoint path used for identifier extraction.
    pub async fn probe_endpoint(
        &self,
        session: &mut ProbeSession,
        access_token: &str,
        method: HttpMethod,
        path: &str,
        url: &str,
    ) -> ProbeResult {
        if let Some(cached) = session.cache.get(method, url) {
            debug!(%method, url, "Using cached response");
            return cached;
        }

        info!(%method, url, "Testing endpoint");

        let request = match method {
            HttpMethod::Get => ApiRequest::get(url),
            HttpMethod::Post => ApiRequest::post(url, json!({})),
        }
        .bearer(access_token);

        session.requests_sent += 1;
        let result = match self.transport.send(request).await {
            Err(e) => {
                warn!(%method, url, error = %e, "Request failed");
                ProbeResult::error(e.to_string())
            }
            Ok(response) if !response.is_success() => {
                debug!(%method, url, status = response.status, "Endpoint returned non-success status");
                ProbeResult::http_failure(response.status, response.status_text)
            }
            Ok(response) => match response.json() {
                Ok(body) => {
                    extract_ids(path, &body, &mut session.store);
                    ProbeResult::success(response.status, response.status_text, &body)
                }
                Err(e) => {
                    warn!(%method, url, error = %e, "Response body is not valid JSON");
                    ProbeResult::error(format!("Invalid JSON response: {}", e))
                }
            },
        };

        session.cache.put(method, url, result.clone());
        result
    }
}
