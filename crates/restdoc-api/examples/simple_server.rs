//! Simple Server Example
//!
//! Serves a small users API with request validation and generated docs.
//!
//! Run with:
//! ```bash
//! cargo run -p restdoc-api --example simple_server
//! curl -X POST localhost:3000/users -H 'content-type: application/json' -d '{"name":"ab"}'
//! curl localhost:3000/docs.yaml
//! ```

use axum::extract::State;
use axum::routing::{get, post};
use axum::{middleware, Extension, Json, Router};
use restdoc_api::{
    init_tracing, validate_request, ApiConfig, ApiDocument, ApiResult, Endpoint, HttpStatus,
    ResponseDoc, ValidatedRequest, ValidationState,
};
use restdoc_validation::{
    ArrayOptions, IntegerOptions, Schema, SchemaType, StringOptions, StringTest,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn endpoints() -> anyhow::Result<(Endpoint, Endpoint)> {
    let user = user_schema()?;

    let create = Endpoint::post("/users")
        .summary("Create a user")
        .tag("users")
        .body(user.clone())
        .response(ResponseDoc::new(HttpStatus::OK, "The created user").schema(user))
        .response(ResponseDoc::status(HttpStatus::BAD_REQUEST));

    let fetch = Endpoint::get("/users/{id}")
        .summary("Fetch a user")
        .tag("users")
        .params(Schema::from_definition(&json!({
            "id": { "type": "integer", "required": true, "min": 1 }
        }))?)
        .response(ResponseDoc::status(HttpStatus::OK))
        .response(ResponseDoc::status(HttpStatus::NOT_FOUND));

    Ok((create, fetch))
}

fn user_schema() -> anyhow::Result<Schema> {
    Ok(Schema::builder()
        .add_string("name", StringOptions::new().required().min(3).max(10))?
        .add_string("email", StringOptions::new().required().test(StringTest::Email))?
        .add_integer("age", IntegerOptions::new().min(0.0))?
        .add_array(
            "roles",
            ArrayOptions::new().items(SchemaType::String, [json!("admin"), json!("member")]),
        )?
        .build())
}

async fn create_user(Extension(request): Extension<ValidatedRequest>) -> Json<Value> {
    Json(request.body)
}

async fn fetch_user(Extension(request): Extension<ValidatedRequest>) -> Json<Value> {
    Json(json!({ "id": request.params["id"], "name": "alice" }))
}

async fn docs_json(State(docs): State<Arc<ApiDocument>>) -> ApiResult<String> {
    Ok(docs.to_json()?)
}

async fn docs_yaml(State(docs): State<Arc<ApiDocument>>) -> ApiResult<String> {
    Ok(docs.to_yaml()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::default();
    init_tracing(&config.log);

    let (create, fetch) = endpoints()?;
    let docs = ApiDocument::new("Users API", "1.0.0")
        .description("Example service")
        .endpoint(&create)
        .endpoint(&fetch);

    let app = Router::new()
        .route(
            "/users",
            post(create_user).route_layer(middleware::from_fn_with_state(
                ValidationState::from_endpoint(&create, &config),
                validate_request,
            )),
        )
        .route(
            "/users/{id}",
            get(fetch_user).route_layer(middleware::from_fn_with_state(
                ValidationState::from_endpoint(&fetch, &config),
                validate_request,
            )),
        )
        .route("/docs", get(docs_json))
        .route("/docs.yaml", get(docs_yaml))
        .with_state(Arc::new(docs));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
