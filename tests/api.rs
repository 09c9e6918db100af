use std::net::SocketAddr;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use ipgeo::{AppState, Config, LookupConfig, geo::TestRecord};

fn record(value: Value) -> TestRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn app(lookup: LookupConfig, trust_forwarded_for: bool) -> Router {
    let config = Config {
        trust_forwarded_for,
        lookup,
        ..Config::default()
    };
    let state = AppState::new(&config).unwrap();
    let peer: SocketAddr = "203.0.113.7:4000".parse().unwrap();
    ipgeo::app(state, false).layer(MockConnectInfo(peer))
}

fn test_config() -> LookupConfig {
    let mut config = LookupConfig::with_provider("test");
    config.test_results.insert(
        "203.0.113.7".into(),
        record(json!({ "ip": "203.0.113.7", "city": "Peer" })),
    );
    config.test_results.insert(
        "192.30.253.113".into(),
        record(json!({ "ip": "192.30.253.113", "city": "Forwarded" })),
    );
    config
}

async fn get(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn looks_up_the_caller() {
    let (status, body) = get(app(test_config(), false), request("/api/lookup")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ip": "203.0.113.7", "city": "Peer" }));
}

#[tokio::test]
async fn forwarded_for_only_when_trusted() {
    let forwarded = || {
        Request::builder()
            .uri("/api/lookup")
            .header("x-forwarded-for", "192.30.253.113, 10.0.0.1")
            .body(Body::empty())
            .unwrap()
    };

    let (_, body) = get(app(test_config(), true), forwarded()).await;
    assert_eq!(body["city"], "Forwarded");

    let (_, body) = get(app(test_config(), false), forwarded()).await;
    assert_eq!(body["city"], "Peer");
}

#[tokio::test]
async fn looks_up_a_path_identifier() {
    let (status, body) = get(app(test_config(), false), request("/api/lookup/192.30.253.113")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Forwarded");

    let (status, body) = get(app(test_config(), false), request("/api/lookup/localhost")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ip": "127.0.0.1" }));
}

#[tokio::test]
async fn unknown_target_is_null() {
    let (status, body) = get(app(test_config(), false), request("/api/lookup/8.8.8.8")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn missing_provider_is_a_server_error() {
    let (status, body) = get(
        app(LookupConfig::default(), false),
        request("/api/lookup/8.8.8.8"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "configuration_error");
}

#[tokio::test]
async fn unknown_route() {
    let response = app(test_config(), false)
        .oneshot(request("/api/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
