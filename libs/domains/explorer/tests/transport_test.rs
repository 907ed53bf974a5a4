//! Tests for the reqwest-backed transport against a local mock server

use domain_explorer::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_probe_sends_bearer_and_json_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v11/tags/"))
        .and(header("authorization", "Bearer secret"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "t1", "name": "rust" }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v11/tags/"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;

    let engine = ProbeEngine::new(ReqwestTransport::new(), format!("{}/api/v11", server.uri()));
    let results = engine
        .probe("secret", &["tags/".to_string(), "tags/".to_string()], &QueryParamCatalog::new())
        .await;

    let record = results.get("tags/").unwrap();
    let get = record.get.as_ref().unwrap();
    assert!(get.success);
    assert_eq!(get.status, ProbeStatus::Code(200));
    assert_eq!(get.status_text, "OK");
    assert_eq!(
        get.data_preview,
        Some(json!([{ "id": "t1", "name": "rust" }]))
    );

    let post = record.post.as_ref().unwrap();
    assert!(!post.success);
    assert_eq!(post.status, ProbeStatus::Code(405));
    assert_eq!(post.status_text, "Method Not Allowed");
}

#[tokio::test]
async fn test_query_fragment_is_appended_to_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/highlights/"))
        .and(query_param("sort", "recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "feed": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut catalog = QueryParamCatalog::new();
    catalog.register("highlights/", &["sort=recent"]);

    let engine = ProbeEngine::new(ReqwestTransport::new(), server.uri());
    let results = engine
        .probe("secret", &["highlights/".to_string()], &catalog)
        .await;

    let params = results.get("highlights/").unwrap().with_params.as_ref().unwrap();
    assert!(params["sort=recent"].success);
}

#[tokio::test]
async fn test_unreachable_host_is_error_result() {
    // Nothing listens on port 9 locally
    let engine = ProbeEngine::new(ReqwestTransport::new(), "http://127.0.0.1:9");
    let results = engine
        .probe("secret", &["tags/".to_string()], &QueryParamCatalog::new())
        .await;

    let get = results.get("tags/").unwrap().get.as_ref().unwrap();
    assert_eq!(get.status, ProbeStatus::Error);
    assert!(!get.status_text.is_empty());
}
