//! Mock server API tests
//!
//! Drives the axum router directly with `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mockingjay_common::behaviour::BehaviourProfile;
use mockingjay_common::config::load_endpoints;
use mockingjay_server::monkey::Monkey;
use mockingjay_server::{api, AppState};
use serde_json::Value;
use tower::ServiceExt;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn build_app(monkey: Monkey) -> Router {
    let endpoints = load_endpoints(fixture("example.yaml")).expect("fixture should load");
    api::create_router(AppState::new(endpoints, monkey))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_it_serves_configured_endpoint() {
    let app = build_app(Monkey::default());

    let response = app.oneshot(get("/hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(body_string(response).await, r#"{"message": "hello, world"}"#);
}

#[tokio::test]
async fn test_it_matches_method_and_body() {
    let app = build_app(Monkey::default());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/card")
                .body(Body::from("Greetings"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Oh bugger");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/card")
                .body(Body::from("Salutations"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = build_app(Monkey::default());

    let response = app.oneshot(get("/nope?x=1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["request"]["uri"], "/nope?x=1");
    assert!(body["error"].as_str().unwrap().contains("GET /nope?x=1"));
}

#[tokio::test]
async fn test_it_lists_requests_it_has_received() {
    let app = build_app(Monkey::default());

    app.clone().oneshot(get("/hello")).await.unwrap();
    app.clone().oneshot(get("/missing")).await.unwrap();

    let response = app.oneshot(get("/requests")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let uris: Vec<&str> = requests
        .as_array()
        .unwrap()
        .iter()
        .map(|request| request["uri"].as_str().unwrap())
        .collect();
    assert_eq!(uris, vec!["/hello", "/missing"]);
}

#[tokio::test]
async fn test_a_new_endpoint_can_be_added() {
    let app = build_app(Monkey::default());

    let new_endpoint_json = r#"
    {
      "Name": "Test endpoint",
      "CDCDisabled": false,
      "Request": {
        "URI": "/new-endpoint",
        "Method": "GET",
        "Headers": null,
        "Body": ""
      },
      "Response": {
        "Code": 200,
        "Body": "{\"message\": \"hello, world\"}",
        "Headers": {
          "content-type": "text\/json"
        }
      }
    }
    "#;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mj-new-endpoint")
                .header("content-type", "application/json")
                .body(Body::from(new_endpoint_json))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(get("/new-endpoint")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"message": "hello, world"}"#);

    let response = app.oneshot(get("/mj-endpoints")).await.unwrap();
    let endpoints: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(endpoints.as_array().unwrap().len(), 5);
    assert_eq!(endpoints[4]["request"]["uri"], "/new-endpoint");
}

#[tokio::test]
async fn test_invalid_new_endpoint_is_rejected() {
    let app = build_app(Monkey::default());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mj-new-endpoint")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing_slash = r#"{"name":"x","request":{"uri":"x","method":"GET"},"response":{"code":200}}"#;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mj-new-endpoint")
                .body(Body::from(missing_slash))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("must start with '/'"));

    let response = app.oneshot(get("/mj-endpoints")).await.unwrap();
    let endpoints: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(endpoints.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_monkey_overrides_status_and_body() {
    let monkey = Monkey::new(vec![BehaviourProfile {
        frequency: 1.0,
        status: 503,
        body: "This is wrong :(".to_string(),
        ..Default::default()
    }]);
    let app = build_app(monkey);

    let response = app.oneshot(get("/hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_string(response).await, "This is wrong :(");
}

#[tokio::test]
async fn test_monkey_garbage_bytes_are_appended() {
    let monkey = Monkey::new(vec![BehaviourProfile {
        frequency: 1.0,
        garbage: 64,
        ..Default::default()
    }]);
    let app = build_app(monkey);

    let response = app
        .oneshot(Request::builder().method("DELETE").uri("/world").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    assert!(bytes.starts_with(b"hello, world"));
    assert_eq!(bytes.len(), "hello, world".len() + 64);
}

#[tokio::test]
async fn test_monkey_leaves_admin_routes_alone() {
    let monkey = Monkey::new(vec![BehaviourProfile {
        frequency: 1.0,
        status: 500,
        ..Default::default()
    }]);
    let app = build_app(monkey);

    let response = app.oneshot(get("/requests")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
