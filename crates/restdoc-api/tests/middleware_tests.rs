//! Router-level tests for the request validation middleware

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{middleware, Extension, Json, Router};
use http_body_util::BodyExt;
use restdoc_api::{
    validate_request, ApiConfig, Endpoint, ErrorBody, ValidatedRequest, ValidationState,
    INVALID_JSON, UNREADABLE_BODY,
};
use restdoc_validation::{
    Check, IntegerOptions, SchemaBuilder, StringOptions, StringTest, ValidatorConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn echo(Extension(validated): Extension<ValidatedRequest>) -> Json<Value> {
    Json(json!({
        "params": validated.params,
        "query": validated.query,
        "body": validated.body,
    }))
}

fn create_user() -> Endpoint {
    Endpoint::post("/users").body(
        SchemaBuilder::new()
            .add_string("name", StringOptions::new().required().min(3).max(10))
            .unwrap()
            .add_string(
                "email",
                StringOptions::new()
                    .test(StringTest::Email)
                    .check(Check::new("That email is already registered.", |v: Value| async move {
                        v.as_str() != Some("taken@example.com")
                    })),
            )
            .unwrap()
            .build(),
    )
}

fn get_user() -> Endpoint {
    Endpoint::get("/users/{id}")
        .params(
            SchemaBuilder::new()
                .add_integer("id", IntegerOptions::new().required().min(1.0))
                .unwrap()
                .build(),
        )
        .query(
            SchemaBuilder::new()
                .add_integer("page", IntegerOptions::new().min(1.0))
                .unwrap()
                .build(),
        )
}

fn app(config: &ApiConfig) -> Router {
    let create = create_user();
    let fetch = get_user();

    Router::new()
        .route(
            "/users",
            post(echo).route_layer(middleware::from_fn_with_state(
                ValidationState::from_endpoint(&create, config),
                validate_request,
            )),
        )
        .route(
            "/users/{id}",
            get(echo).route_layer(middleware::from_fn_with_state(
                ValidationState::from_endpoint(&fetch, config),
                validate_request,
            )),
        )
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_uri(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn assert_rejected(resp: Response, status: StatusCode, message: &str) {
    assert_eq!(resp.status(), status);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.status, status.as_u16());
    assert_eq!(body.message, message);
}

// ============================================================================
// Body Validation
// ============================================================================

#[tokio::test]
async fn test_valid_body_reaches_handler() {
    let resp = app(&ApiConfig::default())
        .oneshot(post_json(r#"{ "name": "alice", "email": "alice@example.com" }"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: Value = body_json(resp).await;
    assert_eq!(echoed["body"]["name"], "alice");
}

#[tokio::test]
async fn test_missing_field_rejected() {
    let resp = app(&ApiConfig::default())
        .oneshot(post_json(r#"{ "email": "alice@example.com" }"#))
        .await
        .unwrap();

    assert_rejected(
        resp,
        StatusCode::BAD_REQUEST,
        "The field \"name\" has not been provided.",
    )
    .await;
}

#[tokio::test]
async fn test_short_name_rejected() {
    let resp = app(&ApiConfig::default())
        .oneshot(post_json(r#"{ "name": "ab" }"#))
        .await
        .unwrap();

    assert_rejected(
        resp,
        StatusCode::BAD_REQUEST,
        "The field \"name\" must be at least 3 characters.",
    )
    .await;
}

#[tokio::test]
async fn test_async_check_rejected() {
    let resp = app(&ApiConfig::default())
        .oneshot(post_json(r#"{ "name": "alice", "email": "taken@example.com" }"#))
        .await
        .unwrap();

    assert_rejected(resp, StatusCode::BAD_REQUEST, "That email is already registered.").await;
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let resp = app(&ApiConfig::default())
        .oneshot(post_json("{ not json"))
        .await
        .unwrap();

    assert_rejected(resp, StatusCode::BAD_REQUEST, INVALID_JSON).await;
}

#[tokio::test]
async fn test_empty_body_is_empty_object() {
    let resp = app(&ApiConfig::default())
        .oneshot(post_json(""))
        .await
        .unwrap();

    assert_rejected(
        resp,
        StatusCode::BAD_REQUEST,
        "The field \"name\" has not been provided.",
    )
    .await;
}

#[tokio::test]
async fn test_body_limit() {
    let config = ApiConfig::default().body_limit(16);
    let resp = app(&config)
        .oneshot(post_json(r#"{ "name": "alice", "email": "alice@example.com" }"#))
        .await
        .unwrap();

    assert_rejected(
        resp,
        StatusCode::PAYLOAD_TOO_LARGE,
        "The request body must not exceed 16 bytes.",
    )
    .await;
}

#[tokio::test]
async fn test_broken_body_stream_rejected() {
    let stream = futures::stream::once(async {
        Err::<bytes::Bytes, _>(std::io::Error::other("connection reset"))
    });
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from_stream(stream))
        .unwrap();

    let resp = app(&ApiConfig::default()).oneshot(request).await.unwrap();

    assert_rejected(resp, StatusCode::BAD_REQUEST, UNREADABLE_BODY).await;
}

#[tokio::test]
async fn test_strict_presence_config() {
    let config = ApiConfig::default().validator(ValidatorConfig::new().strict_presence());
    let resp = app(&config)
        .oneshot(post_json(r#"{ "name": "" }"#))
        .await
        .unwrap();

    // An empty string is provided under strict presence, so the length check runs
    assert_rejected(
        resp,
        StatusCode::BAD_REQUEST,
        "The field \"name\" must be at least 3 characters.",
    )
    .await;
}

// ============================================================================
// Path & Query Validation
// ============================================================================

#[tokio::test]
async fn test_path_param_coerced() {
    let resp = app(&ApiConfig::default())
        .oneshot(get_uri("/users/7?page=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: Value = body_json(resp).await;
    assert_eq!(echoed["params"], json!({ "id": 7 }));
    assert_eq!(echoed["query"], json!({ "page": 2 }));
    assert_eq!(echoed["body"], Value::Null);
}

#[tokio::test]
async fn test_path_param_type_rejected() {
    let resp = app(&ApiConfig::default())
        .oneshot(get_uri("/users/abc"))
        .await
        .unwrap();

    assert_rejected(
        resp,
        StatusCode::BAD_REQUEST,
        "The field \"id\" must be of type integer.",
    )
    .await;
}

#[tokio::test]
async fn test_params_checked_before_query() {
    let resp = app(&ApiConfig::default())
        .oneshot(get_uri("/users/-1?page=-5"))
        .await
        .unwrap();

    assert_rejected(resp, StatusCode::BAD_REQUEST, "The field \"id\" must be at least 1.").await;

    let resp = app(&ApiConfig::default())
        .oneshot(get_uri("/users/1?page=-5"))
        .await
        .unwrap();

    assert_rejected(
        resp,
        StatusCode::BAD_REQUEST,
        "The field \"page\" must be at least 1.",
    )
    .await;
}

#[tokio::test]
async fn test_undecodable_path_param_rejected() {
    let resp = app(&ApiConfig::default())
        .oneshot(get_uri("/users/%FF"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.status, 400);
    assert!(!body.message.is_empty());
}
