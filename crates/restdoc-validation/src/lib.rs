//! Restdoc Validation
//!
//! Schema validation engine for restdoc.
//!
//! A schema is an ordered mapping of field names to typed nodes. Incoming
//! data is checked against it and the result is either valid or a single
//! human-readable message naming the first failure, in the form
//! `The field "<name>" <requirement>.`
//!
//! # Features
//!
//! - Fluent [`SchemaBuilder`] with construction-time checks
//! - JSON object-literal definitions via [`Schema::from_definition`]
//! - Async user checks ([`Check`]), run in order or concurrently
//! - Built-in format primitives (email, username, URL, cron, ...)
//! - Documentation export via [`Schema::export`]
//!
//! # Example
//!
//! ```rust
//! use restdoc_validation::{validate, SchemaBuilder, StringOptions, ValidationOutcome};
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new()
//!     .add_string("name", StringOptions::new().required().min(3).max(10))?
//!     .build();
//!
//! let outcome = futures::executor::block_on(validate(&json!({ "name": "ab" }), &schema));
//! assert_eq!(
//!     outcome,
//!     ValidationOutcome::Invalid("The field \"name\" must be at least 3 characters.".into())
//! );
//! # Ok::<(), restdoc_validation::SchemaError>(())
//! ```

// Public modules
pub mod builder;
pub mod checks;
pub mod config;
pub mod cron;
pub mod definition;
pub mod errors;
pub mod export;
pub mod formats;
pub mod schema;
pub mod validators;

// Re-export commonly used types
pub use builder::{
    ArrayOptions, BooleanOptions, ImageOptions, IntegerOptions, NumberOptions, ObjectOptions,
    SchemaBuilder, StringOptions,
};
pub use checks::{BoxedPredicate, Check, FnPredicate, Predicate, SyncPredicate};
pub use config::{CheckMode, PresenceStrategy, ValidatorConfig};
pub use errors::{SchemaError, SchemaResult, ValidationOutcome};
pub use export::{ExportedCheck, ExportedKind, ExportedNode, ExportedSchema};
pub use schema::{
    ArrayConstraints, ArrayItems, Field, NodeKind, NumericConstraints, ObjectConstraints, Schema,
    SchemaNode, SchemaType, StringConstraints, StringTest,
};
pub use validators::{validate, Validator, NOT_AN_OBJECT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
