//! Endpoint definitions
//!
//! An [`Endpoint`] ties a method and path to the schemas its requests must
//! satisfy and the responses it documents. The same definition drives the
//! request validator and the generated documentation.
//!
//! ```rust
//! use restdoc_api::{Endpoint, ResponseDoc};
//! use restdoc_common::HttpStatus;
//! use restdoc_validation::{SchemaBuilder, StringOptions};
//!
//! let body = SchemaBuilder::new()
//!     .add_string("name", StringOptions::new().required().min(3))?
//!     .build();
//!
//! let endpoint = Endpoint::post("/users")
//!     .summary("Create a user")
//!     .tag("users")
//!     .body(body)
//!     .response(ResponseDoc::new(HttpStatus::CREATED, "User created"));
//!
//! assert_eq!(endpoint.path(), "/users");
//! # Ok::<(), restdoc_validation::SchemaError>(())
//! ```

use restdoc_common::{HttpMethod, HttpStatus};
use restdoc_validation::Schema;

// ============================================================================
// Responses
// ============================================================================

/// A documented response
#[derive(Debug, Clone)]
pub struct ResponseDoc {
    pub status: HttpStatus,
    pub description: String,
    pub schema: Option<Schema>,
}

impl ResponseDoc {
    pub fn new(status: HttpStatus, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            schema: None,
        }
    }

    /// Response described only by its status reason phrase
    pub fn status(status: HttpStatus) -> Self {
        Self::new(status, status.reason())
    }

    /// Attach the response body schema
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

// ============================================================================
// Endpoint
// ============================================================================

/// Declarative description of one API endpoint
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: HttpMethod,
    path: String,
    summary: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    params: Option<Schema>,
    query: Option<Schema>,
    body: Option<Schema>,
    responses: Vec<ResponseDoc>,
}

macro_rules! method_constructor {
    ($($fn_name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `", stringify!($method), "` endpoint")]
            pub fn $fn_name(path: impl Into<String>) -> Self {
                Self::new(HttpMethod::$method, path)
            }
        )*
    };
}

impl Endpoint {
    /// Create an endpoint. Path parameters use `{name}` segments.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            params: None,
            query: None,
            body: None,
            responses: Vec::new(),
        }
    }

    method_constructor! {
        get => Get,
        post => Post,
        put => Put,
        patch => Patch,
        delete => Delete,
    }

    /// Set a one-line summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set a longer description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a grouping tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Schema for path parameters
    pub fn params(mut self, schema: Schema) -> Self {
        self.params = Some(schema);
        self
    }

    /// Schema for query parameters
    pub fn query(mut self, schema: Schema) -> Self {
        self.query = Some(schema);
        self
    }

    /// Schema for the JSON body
    pub fn body(mut self, schema: Schema) -> Self {
        self.body = Some(schema);
        self
    }

    /// Document a response
    pub fn response(mut self, response: ResponseDoc) -> Self {
        self.responses.push(response);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn params_schema(&self) -> Option<&Schema> {
        self.params.as_ref()
    }

    pub fn query_schema(&self) -> Option<&Schema> {
        self.query.as_ref()
    }

    pub fn body_schema(&self) -> Option<&Schema> {
        self.body.as_ref()
    }

    pub fn responses(&self) -> &[ResponseDoc] {
        &self.responses
    }

    /// Names of the `{name}` segments in the path, in order
    pub fn path_params(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }
}
