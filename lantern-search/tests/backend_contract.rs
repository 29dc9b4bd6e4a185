//! Contract tests for the search backend client against a mock HTTP
//! server.
//!
//! These exercise the full HTTP stack: request path and query parameters,
//! status handling, envelope decoding, and the error taxonomy. No live
//! backend is contacted.

use lantern_search::{
    admin, fetch_content, fetch_images, fetch_results, Engine, SearchConfig, SearchError,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
        use_cache: true,
        include_featured: true,
    }
}

fn text_body(query: &str, count: usize) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            json!({
                "id": format!("r{i}"),
                "title": format!("Result {i}"),
                "snippet": format!("Snippet {i}"),
                "url": format!("https://example.com/{i}"),
                "source": "google",
                "domain": "example.com",
                "position": i,
                "features": {}
            })
        })
        .collect();
    json!({
        "query": query,
        "results": results,
        "total_results": count,
        "execution_time": 1.5,
        "error": null
    })
}

#[tokio::test]
async fn search_sends_expected_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "rust ownership"))
        .and(query_param("search_engine", "google"))
        .and(query_param("num_results", "5"))
        .and(query_param("use_cache", "true"))
        .and(query_param("include_featured", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("rust ownership", 5)))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetch_results("rust ownership", Engine::Google, 5, &config_for(&server))
        .await
        .expect("search should succeed");

    assert_eq!(page.results.len(), 5);
    assert_eq!(page.total_results, 5);
    let positions: Vec<i32> = page.results.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn search_query_is_trimmed_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("rust", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetch_results("  rust  ", Engine::Google, 10, &config_for(&server))
        .await
        .expect("trimmed query should succeed");
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn search_engine_selection_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("search_engine", "bing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("q", 2)))
        .expect(1)
        .mount(&server)
        .await;

    fetch_results("q", Engine::Bing, 10, &config_for(&server))
        .await
        .expect("bing search should succeed");
}

#[tokio::test]
async fn search_non_2xx_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = fetch_results("q", Engine::Google, 10, &config_for(&server))
        .await
        .unwrap_err();
    match err {
        SearchError::Status { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("Service Unavailable"));
        }
        other => panic!("expected Status error, got {other}"),
    }
}

#[tokio::test]
async fn search_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = fetch_results("q", Engine::Google, 10, &config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Decode(_)));
}

#[tokio::test]
async fn search_backend_error_envelope_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "q",
            "results": [],
            "total_results": 0,
            "execution_time": 0.3,
            "error": "Failed to access search engine"
        })))
        .mount(&server)
        .await;

    let err = fetch_results("q", Engine::Google, 10, &config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Backend(_)));
    assert!(err.to_string().contains("Failed to access search engine"));
}

#[tokio::test]
async fn search_empty_results_is_a_valid_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("q", 0)))
        .mount(&server)
        .await;

    let page = fetch_results("q", Engine::Google, 10, &config_for(&server))
        .await
        .expect("empty page is not an error");
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn image_search_hits_image_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/image-search"))
        .and(query_param("query", "crab"))
        .and(query_param("search_engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "crab",
            "results": [{
                "id": "i1",
                "url": "https://img.example.com/1.jpg",
                "thumbnail_url": "https://img.example.com/1t.jpg",
                "title": "Ferris",
                "source_url": "https://rustacean.net",
                "source_domain": "rustacean.net",
                "width": 640,
                "height": 480,
                "alt_text": "Ferris",
                "position": 1
            }],
            "total_results": 1,
            "execution_time": 0.7,
            "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetch_images("crab", Engine::Google, 10, &config_for(&server))
        .await
        .expect("image search should succeed");
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].thumbnail_url, "https://img.example.com/1t.jpg");
}

#[tokio::test]
async fn content_fetch_decodes_rich_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/content"))
        .and(query_param("url", "https://example.com/article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://example.com/article",
            "content": {
                "url": "https://example.com/article",
                "title": "An Article",
                "content": "Body text here.",
                "html": "<p>Body text here.</p>",
                "meta_tags": {},
                "links": [],
                "images": [],
                "text_blocks": ["Body text here."]
            },
            "error": null,
            "execution_time": 1.1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetch_content("https://example.com/article", &config_for(&server))
        .await
        .expect("content fetch should succeed");
    assert_eq!(page.title, "An Article");
    assert_eq!(page.text, "Body text here.");
}

#[tokio::test]
async fn content_backend_scrape_failure_is_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://example.com/blocked",
            "content": null,
            "error": "Failed to scrape page: 403 Client Error",
            "execution_time": 0.5
        })))
        .mount(&server)
        .await;

    let err = fetch_content("https://example.com/blocked", &config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Backend(_)));
}

#[tokio::test]
async fn healthcheck_and_clear_cache_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/healthcheck"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "timestamp": 1723022000.0})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clear-cache"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "cleared_items": 3})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let health = admin::healthcheck(&config).await.expect("health should succeed");
    assert_eq!(health.status, "ok");

    let cleared = admin::clear_cache(&config).await.expect("clear should succeed");
    assert_eq!(cleared.cleared_items, 3);
}

#[tokio::test]
async fn repeated_identical_fetches_are_issued_freely() {
    // No client-side caching: two identical calls must hit the backend twice.
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("q", 1)))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    fetch_results("q", Engine::Google, 10, &config)
        .await
        .expect("first call");
    fetch_results("q", Engine::Google, 10, &config)
        .await
        .expect("second call");
}
