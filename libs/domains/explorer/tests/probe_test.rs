//! Probe engine tests against a scripted in-memory transport
//!
//! These tests verify the run-level guarantees:
//! - identical (method, URL) pairs reach the transport once per run
//! - identifiers mined from plain endpoints feed `{id}` templates
//! - identifiers of one kind never satisfy another kind's placeholder
//! - failures are recorded, never raised

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use domain_explorer::*;
use serde_json::{Value, json};

const HOST: &str = "https://api.test/api/v11";

/// Answers from a fixed route table and records every call it receives
#[derive(Default)]
struct StubTransport {
    routes: HashMap<(HttpMethod, String), ApiResponse>,
    calls: Mutex<Vec<(HttpMethod, String)>>,
}

impl StubTransport {
    fn route(mut self, method: HttpMethod, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(
            (method, format!("{}/{}", HOST, path)),
            ApiResponse {
                status,
                status_text: if status < 300 { "OK" } else { "Error" }.to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, method: HttpMethod, path: &str) -> usize {
        let url = format!("{}/{}", HOST, path);
        self.calls()
            .iter()
            .filter(|(m, u)| *m == method && *u == url)
            .count()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((request.method, request.url.clone()));

        if request.url.contains("unreachable") {
            return Err(TransportError::Request("connection refused".to_string()));
        }

        Ok(self
            .routes
            .get(&(request.method, request.url))
            .cloned()
            .unwrap_or(ApiResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: r#"{"detail": "Not found."}"#.to_string(),
            }))
    }
}

fn templates(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[tokio::test]
async fn test_identical_requests_reach_transport_once() {
    let transport = StubTransport::default().route(HttpMethod::Get, "tags/", 200, json!([]));
    let engine = ProbeEngine::new(transport, HOST);
    let mut session = ProbeSession::new();

    let results = engine
        .probe_with_session(
            &mut session,
            "token",
            &templates(&["tags/", "tags/"]),
            &QueryParamCatalog::new(),
        )
        .await;

    let transport_calls = session.requests_sent();
    assert_eq!(transport_calls, 2, "one GET and one POST");
    assert_eq!(session.cache().hits(), 2);
    assert!(results.get("tags/").unwrap().get.as_ref().unwrap().success);
}

#[tokio::test]
async fn test_duplicate_template_counted_by_stub() {
    let transport = StubTransport::default().route(HttpMethod::Get, "collections/", 200, json!([]));
    let engine = ProbeEngine::new(transport, HOST);

    engine
        .probe(
            "token",
            &templates(&["collections/", "collections/"]),
            &QueryParamCatalog::new(),
        )
        .await;

    let transport = engine.transport();
    assert_eq!(transport.calls_to(HttpMethod::Get, "collections/"), 1);
    assert_eq!(transport.calls_to(HttpMethod::Post, "collections/"), 1);
}

#[tokio::test]
async fn test_tag_ids_do_not_fill_library_item_placeholder() {
    let transport = StubTransport::default()
        .route(HttpMethod::Get, "tags/", 200, json!([{ "id": "t1" }]))
        .route(
            HttpMethod::Get,
            "library_items/",
            200,
            json!({ "feed": [] }),
        );
    let engine = ProbeEngine::new(transport, HOST);
    let mut session = ProbeSession::new();

    let results = engine
        .probe_with_session(
            &mut session,
            "token",
            &templates(&["tags/", "library_items/{id}/"]),
            &QueryParamCatalog::new(),
        )
        .await;

    assert_eq!(session.identifiers().get(EntityKind::Tag), ["t1"]);
    assert!(results.contains("library_items/unknown-id/"));
    assert!(!results.contains("library_items/t1/"));
    assert!(!results.get("library_items/unknown-id/").unwrap().has_success());
}

#[tokio::test]
async fn test_identifiers_from_plain_templates_fill_placeholders() {
    let transport = StubTransport::default()
        .route(
            HttpMethod::Get,
            "library_items/",
            200,
            json!({
                "feed": [
                    { "id": "L1", "content": { "id": "C1" } },
                    { "id": "L2" }
                ]
            }),
        )
        .route(HttpMethod::Get, "library_items/L1/", 200, json!({ "id": "L1", "title": "x" }));
    let engine = ProbeEngine::new(transport, HOST);

    // Placeholder template listed first; ordering still probes the feed first
    let results = engine
        .probe(
            "token",
            &templates(&["library_items/{id}/", "library_items/"]),
            &QueryParamCatalog::new(),
        )
        .await;

    assert!(results.contains("library_items/L1/"));
    assert!(results.contains("library_items/C1/"));
    assert!(!results.contains("library_items/L2/"));
    assert!(!results.contains("library_items/unknown-id/"));

    let item = results.get("library_items/L1/").unwrap().get.as_ref().unwrap();
    assert_eq!(
        serde_json::to_value(item.data_schema.as_ref().unwrap()).unwrap(),
        json!({ "id": "string", "title": "string" })
    );
}

#[tokio::test]
async fn test_query_variants_are_recorded_under_with_params() {
    let transport = StubTransport::default()
        .route(HttpMethod::Get, "tags/", 200, json!([]))
        .route(HttpMethod::Get, "tags/?limit=10", 200, json!([{ "id": "t1" }]));
    let engine = ProbeEngine::new(transport, HOST);

    let results = engine
        .probe("token", &templates(&["tags/"]), &QueryParamCatalog::matter())
        .await;

    let record = results.get("tags/").unwrap();
    let params = record.with_params.as_ref().unwrap();
    assert_eq!(params.len(), 2);
    assert!(params["limit=10"].success);
    assert_eq!(params["offset=0"].status, ProbeStatus::Code(404));

    let transport = engine.transport();
    assert_eq!(transport.calls().len(), 4);
}

#[tokio::test]
async fn test_failures_are_recorded_and_run_continues() {
    let transport = StubTransport::default()
        .route(HttpMethod::Get, "search/", 200, json!({ "results": [] }));
    let engine = ProbeEngine::new(transport, HOST);

    let results = engine
        .probe(
            "token",
            &templates(&["unreachable/", "search/"]),
            &QueryParamCatalog::new(),
        )
        .await;

    let failed = results.get("unreachable/").unwrap();
    assert_eq!(failed.get.as_ref().unwrap().status, ProbeStatus::Error);
    assert_eq!(failed.post.as_ref().unwrap().status, ProbeStatus::Error);
    assert!(results.get("search/").unwrap().get.as_ref().unwrap().success);
}

#[tokio::test]
async fn test_summary_over_probe_results() {
    let transport = StubTransport::default()
        .route(HttpMethod::Get, "tags/", 200, json!([]))
        .route(HttpMethod::Post, "tags/", 201, json!({ "id": "new" }))
        .route(HttpMethod::Get, "search/?q=test", 200, json!({ "results": [] }));
    let engine = ProbeEngine::new(transport, HOST);

    let results = engine
        .probe(
            "token",
            &templates(&["tags/", "search/", "highlights/{id}/"]),
            &QueryParamCatalog::matter(),
        )
        .await;

    let summary = summarize(&results);

    assert_eq!(
        summary,
        vec![
            SuccessSummary {
                endpoint: "search/".to_string(),
                methods: vec![],
                params: vec!["q=test".to_string()],
            },
            SuccessSummary {
                endpoint: "tags/".to_string(),
                methods: vec!["GET".to_string(), "POST".to_string()],
                params: vec![],
            },
        ]
    );
}

