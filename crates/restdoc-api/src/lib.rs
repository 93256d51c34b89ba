//! Restdoc API
//!
//! Declarative endpoint definitions for axum services. One [`Endpoint`]
//! drives both request validation and generated documentation:
//!
//! - [`RequestValidator`] / [`validate_request`]: validate path params,
//!   query and JSON body before the handler runs
//! - [`ApiDocument`]: JSON/YAML documentation built from the same schemas
//! - [`ApiError`]: `{ "status", "message" }` error responses
//! - [`init_tracing`]: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::post, Router};
//! use restdoc_api::{validate_request, ApiConfig, ApiDocument, Endpoint, ValidationState};
//! use restdoc_validation::{SchemaBuilder, StringOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ApiConfig::default();
//! let create_user = Endpoint::post("/users").body(
//!     SchemaBuilder::new()
//!         .add_string("name", StringOptions::new().required().min(3).max(10))?
//!         .build(),
//! );
//!
//! let app: Router = Router::new()
//!     .route("/users", post(|| async { "created" }))
//!     .route_layer(middleware::from_fn_with_state(
//!         ValidationState::from_endpoint(&create_user, &config),
//!         validate_request,
//!     ));
//!
//! let docs = ApiDocument::new("Users", "1.0.0").endpoint(&create_user);
//! println!("{}", docs.to_yaml()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod docs;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{ApiConfig, DEFAULT_BODY_LIMIT};
pub use docs::{ApiDocument, EndpointDoc, ResponseEntry};
pub use endpoint::{Endpoint, ResponseDoc};
pub use error::{ApiError, ApiResult, ErrorBody, INVALID_JSON, UNREADABLE_BODY};
pub use logging::{init_tracing, LogConfig};
pub use validation::{
    validate_request, ParamLocation, RequestValidator, ValidatedRequest, ValidationState,
};

// Re-export the shared HTTP types used in endpoint definitions
pub use restdoc_common::{HttpMethod, HttpStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
