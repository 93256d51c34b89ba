//! Common vocabulary for restdoc
//!
//! HTTP method and status types shared by endpoint definitions, the request
//! validation middleware and the documentation export.

pub mod http;

pub use http::{HttpMethod, HttpStatus, ParseMethodError};
