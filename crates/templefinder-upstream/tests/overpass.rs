//! Integration tests for `OverpassClient` using wiremock HTTP mocks.

use templefinder_core::{Coordinate, SearchRadius};
use templefinder_upstream::{OverpassClient, UpstreamError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OverpassClient {
    OverpassClient::new(base_url, "templefinder-test/0.1", Some(5))
        .expect("client construction should not fail")
}

const DELHI: Coordinate = Coordinate::NEW_DELHI;

#[tokio::test]
async fn search_temples_posts_query_and_normalizes() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "way",
                "id": 200,
                "center": { "lat": 28.62, "lon": 77.21 },
                "tags": { "amenity": "place_of_worship", "religion": "hindu", "name": "Far Mandir" }
            },
            {
                "type": "node",
                "id": 100,
                "lat": 28.6140,
                "lon": 77.2091,
                "tags": { "historic": "temple", "name:en": "Near Shrine" }
            },
            {
                "type": "relation",
                "id": 300,
                "tags": { "building": "temple" }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(header("content-type", "text/plain; charset=UTF-8"))
        .and(header("user-agent", "templefinder-test/0.1"))
        .and(body_string_contains("[out:json][timeout:25];"))
        .and(body_string_contains("(around:5000,28.6139,77.209)"))
        .and(body_string_contains("out center 100;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_temples(DELHI, SearchRadius::default())
        .await
        .expect("should search");

    assert_eq!(places.len(), 2, "relation without center should be dropped");
    assert_eq!(places[0].id, "node/100");
    assert_eq!(places[0].name, "Near Shrine");
    assert_eq!(places[1].id, "way/200");
    assert_eq!(places[1].name, "Far Mandir");
    assert!(places[0].distance_meters < places[1].distance_meters);
}

#[tokio::test]
async fn search_temples_sends_clamped_radius() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("(around:500,28.6139,77.209)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "elements": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_temples(DELHI, SearchRadius::from_km(0.1))
        .await
        .expect("should search");
    assert!(places.is_empty());
}

#[tokio::test]
async fn missing_elements_field_yields_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "remark": "ok" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_temples(DELHI, SearchRadius::default())
        .await
        .expect("should search");
    assert!(places.is_empty());
}

#[tokio::test]
async fn malformed_elements_are_skipped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "elements": [
            { "type": "node", "lat": 1.0, "lon": 1.0 },
            { "type": "node", "id": 9, "lat": 28.6139, "lon": 77.2090 }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_temples(DELHI, SearchRadius::default())
        .await
        .expect("should search");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, "node/9");
    assert_eq!(places[0].name, "Temple");
    assert!(places[0].distance_meters.abs() < 1e-6);
}

#[tokio::test]
async fn gateway_timeout_is_status_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_temples(DELHI, SearchRadius::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, UpstreamError::UnexpectedStatus { status: 504, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string("runtime error: timeout"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_temples(DELHI, SearchRadius::default())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let client = test_client(&format!("http://127.0.0.1:{port}"));
    let err = client
        .search_temples(DELHI, SearchRadius::default())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Http(_)), "got {err:?}");
    assert!(!err.is_status_failure());
}
