//! Request validation for HTTP APIs
//!
//! A [`RequestValidator`] is built once from an [`Endpoint`] and reused for
//! every request to it. Path parameters are validated first, then the query
//! string, then the JSON body; the first failure is returned.
//!
//! Path and query values always arrive as text. Before validation they are
//! coerced to numbers or booleans when the schema declares that type and the
//! text parses, so `?page=2` satisfies an integer field.
//!
//! [`validate_request`] wires this into axum as a middleware:
//!
//! ```rust,no_run
//! use axum::{middleware, routing::post, Router};
//! use restdoc_api::{validate_request, ApiConfig, Endpoint, ValidationState};
//!
//! let endpoint = Endpoint::post("/users");
//! let state = ValidationState::from_endpoint(&endpoint, &ApiConfig::default());
//!
//! let app: Router = Router::new()
//!     .route("/users", post(|| async { "created" }))
//!     .route_layer(middleware::from_fn_with_state(state, validate_request));
//! ```

use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ApiResult, UNREADABLE_BODY};
use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::RequestPartsExt;
use bytes::Bytes;
use http_body_util::LengthLimitError;
use restdoc_validation::{Schema, SchemaType, ValidationOutcome, Validator, ValidatorConfig};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// HTTP-Specific Types
// ============================================================================

/// Part of a request a schema applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Path parameter (e.g., /users/{id})
    Path,
    /// Query parameter (e.g., ?page=1)
    Query,
    /// JSON request body
    Body,
}

impl ParamLocation {
    /// Get string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

/// Request data after coercion and validation
///
/// Inserted into the request extensions by [`validate_request`], so handlers
/// can take it as `Extension<ValidatedRequest>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub params: Value,
    pub query: Value,
    /// Parsed body, `Null` when the endpoint declares no body schema
    pub body: Value,
}

// ============================================================================
// Request Validator
// ============================================================================

/// Request validator (pre-compiled from an endpoint definition)
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    validator: Validator,
    params: Option<Schema>,
    query: Option<Schema>,
    body: Option<Schema>,
}

impl RequestValidator {
    /// Create a validator with no schemas
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            validator: Validator::new(config),
            ..Default::default()
        }
    }

    /// Build a validator from an endpoint's schemas
    pub fn from_endpoint(endpoint: &Endpoint, config: ValidatorConfig) -> Self {
        Self {
            validator: Validator::new(config),
            params: endpoint.params_schema().cloned(),
            query: endpoint.query_schema().cloned(),
            body: endpoint.body_schema().cloned(),
        }
    }

    /// Whether a JSON body is validated
    pub fn expects_body(&self) -> bool {
        self.body.is_some()
    }

    /// Validate a request
    ///
    /// `body` is only consulted when a body schema is declared.
    pub async fn validate(
        &self,
        params: &HashMap<String, String>,
        query: &HashMap<String, String>,
        body: &Value,
    ) -> ApiResult<ValidatedRequest> {
        let params = coerce_params(params, self.params.as_ref());
        self.check(ParamLocation::Path, &params, self.params.as_ref())
            .await?;

        let query = coerce_params(query, self.query.as_ref());
        self.check(ParamLocation::Query, &query, self.query.as_ref())
            .await?;

        let body = match &self.body {
            Some(_) => body.clone(),
            None => Value::Null,
        };
        self.check(ParamLocation::Body, &body, self.body.as_ref())
            .await?;

        Ok(ValidatedRequest {
            params,
            query,
            body,
        })
    }

    async fn check(
        &self,
        location: ParamLocation,
        data: &Value,
        schema: Option<&Schema>,
    ) -> ApiResult<()> {
        let Some(schema) = schema else {
            return Ok(());
        };
        match self.validator.validate(data, schema).await {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(message) => {
                debug!(location = location.as_str(), %message, "request data rejected");
                Err(ApiError::Validation(message))
            }
        }
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Turn raw string parameters into a JSON object, typed by the schema
fn coerce_params(raw: &HashMap<String, String>, schema: Option<&Schema>) -> Value {
    let object: Map<String, Value> = raw
        .iter()
        .map(|(name, text)| {
            let declared = schema
                .and_then(|s| s.get(name))
                .map(|node| node.schema_type());
            (name.clone(), coerce(text, declared))
        })
        .collect();
    Value::Object(object)
}

fn coerce(text: &str, declared: Option<SchemaType>) -> Value {
    let coerced = match declared {
        Some(SchemaType::Number | SchemaType::Integer) => parse_number(text),
        Some(SchemaType::Boolean) => text.parse::<bool>().ok().map(Value::Bool),
        _ => None,
    };
    coerced.unwrap_or_else(|| Value::String(text.to_string()))
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::from(n));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Parse a buffered body; an empty body is an empty object
fn parse_body(bytes: &Bytes) -> ApiResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|_| ApiError::InvalidJson)
}

async fn check_request(
    validator: &RequestValidator,
    params: &HashMap<String, String>,
    query: &HashMap<String, String>,
    bytes: &Bytes,
) -> ApiResult<ValidatedRequest> {
    let body = if validator.expects_body() {
        parse_body(bytes)?
    } else {
        Value::Null
    };
    validator.validate(params, query, &body).await
}

// ============================================================================
// Middleware
// ============================================================================

/// Shared state for [`validate_request`]
#[derive(Debug, Clone)]
pub struct ValidationState {
    validator: Arc<RequestValidator>,
    body_limit: usize,
}

impl ValidationState {
    pub fn new(validator: RequestValidator, body_limit: usize) -> Self {
        Self {
            validator: Arc::new(validator),
            body_limit,
        }
    }

    /// Build state for an endpoint using the API configuration
    pub fn from_endpoint(endpoint: &Endpoint, config: &ApiConfig) -> Self {
        Self::new(
            RequestValidator::from_endpoint(endpoint, config.validator),
            config.body_limit,
        )
    }
}

/// Middleware validating requests against an endpoint definition
///
/// Install with `route_layer` so path parameters are available. On failure
/// the request never reaches the handler and the response carries
/// `{ "status": ..., "message": ... }`: 400 for validation failures and
/// unreadable path, query or body, 413 when the body exceeds the limit.
pub async fn validate_request(
    State(state): State<ValidationState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    match screen(&state, &mut parts, body).await {
        Ok((validated, bytes)) => {
            let mut request = Request::from_parts(parts, Body::from(bytes));
            request.extensions_mut().insert(validated);
            next.run(request).await
        }
        Err(err) => {
            info!(
                method = %parts.method,
                path = %parts.uri.path(),
                error = %err,
                "request rejected"
            );
            err.into_response()
        }
    }
}

/// Extract, buffer and validate one request
async fn screen(
    state: &ValidationState,
    parts: &mut Parts,
    body: Body,
) -> ApiResult<(ValidatedRequest, Bytes)> {
    let params = parts
        .extract::<Option<Path<HashMap<String, String>>>>()
        .await
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?
        .map(|Path(params)| params)
        .unwrap_or_default();
    let Query(query) = parts
        .extract::<Query<HashMap<String, String>>>()
        .await
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let bytes = axum::body::to_bytes(body, state.body_limit)
        .await
        .map_err(|err| body_error(&err, state.body_limit))?;

    let validated = check_request(&state.validator, &params, &query, &bytes).await?;
    Ok((validated, bytes))
}

/// Only a tripped length limit is a 413; any other read failure is a 400
fn body_error(err: &axum::Error, limit: usize) -> ApiError {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(cause) = source {
        if cause.is::<LengthLimitError>() {
            return ApiError::PayloadTooLarge(limit);
        }
        source = cause.source();
    }
    debug!(error = %err, "request body could not be read");
    ApiError::BadRequest(UNREADABLE_BODY.to_string())
}
