//! Core validation engine
//!
//! Validation runs in three passes over the schema, in declaration order:
//!
//! 1. **Required pass** - the first required field that is not provided fails.
//! 2. **Type pass** - the first key present in the data whose JSON kind does
//!    not fit its declared type fails, whatever the presence strategy.
//! 3. **Detail pass** - per field: options, numeric bounds, string length and
//!    tests, user checks, then structural checks (boolean, nested object,
//!    array items, image URL).
//!
//! The first failure stops all work and becomes the outcome. A failure inside
//! a nested object surfaces unchanged at the top level.

use crate::config::{CheckMode, ValidatorConfig};
use crate::errors::ValidationOutcome;
use crate::formats;
use crate::schema::{
    is_integral, ArrayConstraints, NodeKind, NumericConstraints, Schema, SchemaNode,
    StringConstraints,
};
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Message reported when the validated data is not a JSON object
pub const NOT_AN_OBJECT: &str = "The data must be an object.";

type FieldResult = Result<(), String>;

// ============================================================================
// Public API
// ============================================================================

/// Validate data against a schema with the default configuration
///
/// # Example
///
/// ```
/// use restdoc_validation::{validate, SchemaBuilder, StringOptions, ValidationOutcome};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let schema = SchemaBuilder::new()
///     .add_string("name", StringOptions::new().required().min(3).max(10))
///     .unwrap()
///     .build();
///
/// assert!(validate(&json!({ "name": "alice" }), &schema).await.is_valid());
/// assert_eq!(
///     validate(&json!({}), &schema).await,
///     ValidationOutcome::Invalid("The field \"name\" has not been provided.".to_string())
/// );
/// # });
/// ```
pub async fn validate(data: &Value, schema: &Schema) -> ValidationOutcome {
    Validator::default().validate(data, schema).await
}

/// Schema validator
///
/// Holds only configuration; it keeps no state between calls and can be
/// shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate data against a schema
    pub async fn validate(&self, data: &Value, schema: &Schema) -> ValidationOutcome {
        let outcome = self.validate_schema(data, schema).await;
        if let ValidationOutcome::Invalid(message) = &outcome {
            debug!(%message, "validation failed");
        }
        outcome
    }

    fn validate_schema<'a>(
        &'a self,
        data: &'a Value,
        schema: &'a Schema,
    ) -> BoxFuture<'a, ValidationOutcome> {
        async move {
            let Some(object) = data.as_object() else {
                return ValidationOutcome::invalid(NOT_AN_OBJECT);
            };

            if let Err(message) = self.required_pass(object, schema) {
                return ValidationOutcome::Invalid(message);
            }
            if let Err(message) = self.type_pass(object, schema) {
                return ValidationOutcome::Invalid(message);
            }

            for (name, node) in schema.iter() {
                let Some(value) = self.provided(object, name) else {
                    continue;
                };
                if let Err(message) = self.validate_field(name, node, value).await {
                    return ValidationOutcome::Invalid(message);
                }
            }

            ValidationOutcome::Valid
        }
        .boxed()
    }

    /// Value of a field if it counts as provided
    fn provided<'v>(&self, object: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
        let value = object.get(name);
        if self.config.presence.is_provided(value) {
            value
        } else {
            None
        }
    }

    // ========================================================================
    // Passes
    // ========================================================================

    fn required_pass(&self, object: &Map<String, Value>, schema: &Schema) -> FieldResult {
        match schema
            .required_fields()
            .find(|name| self.provided(object, name).is_none())
        {
            Some(name) => Err(failure(name, "has not been provided")),
            None => Ok(()),
        }
    }

    /// Every key present in the data is type-checked, falsy values included
    fn type_pass(&self, object: &Map<String, Value>, schema: &Schema) -> FieldResult {
        for (name, node) in schema.iter() {
            if let Some(value) = object.get(name) {
                if !node.schema_type().accepts(value) {
                    return Err(type_failure(name, node));
                }
            }
        }
        Ok(())
    }

    async fn validate_field(&self, name: &str, node: &SchemaNode, value: &Value) -> FieldResult {
        check_scalar(name, node, value)?;
        self.run_checks(node, value).await?;
        self.check_structure(name, node, value).await
    }

    // ========================================================================
    // User Checks
    // ========================================================================

    async fn run_checks(&self, node: &SchemaNode, value: &Value) -> FieldResult {
        match self.config.checks {
            CheckMode::Sequential => {
                for check in &node.checks {
                    if !check.run(value).await {
                        return Err(check.response().to_string());
                    }
                }
                Ok(())
            }
            CheckMode::Concurrent => {
                let results = future::join_all(node.checks.iter().map(|check| check.run(value))).await;
                match node.checks.iter().zip(results).find(|(_, passed)| !passed) {
                    Some((check, _)) => Err(check.response().to_string()),
                    None => Ok(()),
                }
            }
        }
    }

    // ========================================================================
    // Structural Checks
    // ========================================================================

    async fn check_structure(&self, name: &str, node: &SchemaNode, value: &Value) -> FieldResult {
        match &node.kind {
            NodeKind::Boolean if !value.is_boolean() => Err(type_failure(name, node)),
            NodeKind::Object(constraints) => {
                if !value.is_object() {
                    return Err(type_failure(name, node));
                }
                if let Some(properties) = &constraints.properties {
                    trace!(field = %name, "validating nested object");
                    return self.validate_schema(value, properties).await.into_result();
                }
                Ok(())
            }
            NodeKind::Array(constraints) => check_array(name, node, constraints, value),
            NodeKind::Image => match value.as_str() {
                None => Err(type_failure(name, node)),
                Some(s) if !formats::validate_image(s) => {
                    Err(failure(name, "must be a valid image URL"))
                }
                Some(_) => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Scalar Checks
// ============================================================================

/// Options, numeric bounds and string checks
fn check_scalar(name: &str, node: &SchemaNode, value: &Value) -> FieldResult {
    match &node.kind {
        NodeKind::String(constraints) => check_string(name, node, constraints, value),
        NodeKind::Number(constraints) => check_number(name, constraints, value),
        NodeKind::Integer(constraints) => {
            check_number(name, constraints, value)?;
            if !is_integral(value) {
                return Err(failure(name, "must be an integer"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_string(
    name: &str,
    node: &SchemaNode,
    constraints: &StringConstraints,
    value: &Value,
) -> FieldResult {
    let Some(s) = value.as_str() else {
        return Err(type_failure(name, node));
    };

    if let Some(options) = &constraints.options {
        if !options.iter().any(|option| option == s) {
            return Err(failure(name, "is not a valid option"));
        }
    }

    let length = s.chars().count();
    if let Some(min) = constraints.min {
        if length < min {
            return Err(failure(name, &format!("must be at least {} characters", min)));
        }
    }
    if let Some(max) = constraints.max {
        if length > max {
            return Err(failure(name, &format!("must be at most {} characters", max)));
        }
    }

    if let Some(test) = constraints.test {
        if !test.check(s) {
            return Err(failure(name, test.requirement()));
        }
    }

    Ok(())
}

fn check_number(name: &str, constraints: &NumericConstraints, value: &Value) -> FieldResult {
    // The type pass guarantees a number here
    let Some(n) = value.as_f64() else {
        return Ok(());
    };

    match (constraints.min, constraints.max) {
        (Some(min), Some(max)) if n < min || n > max => Err(failure(
            name,
            &format!("must be between {} and {}", min, max),
        )),
        (Some(min), _) if n < min => Err(failure(name, &format!("must be at least {}", min))),
        (_, Some(max)) if n > max => Err(failure(name, &format!("must be at most {}", max))),
        _ => Ok(()),
    }
}

fn check_array(
    name: &str,
    node: &SchemaNode,
    constraints: &ArrayConstraints,
    value: &Value,
) -> FieldResult {
    let Some(elements) = value.as_array() else {
        return Err(type_failure(name, node));
    };

    let count = elements.len();
    match (constraints.min, constraints.max) {
        (Some(min), Some(max)) if count < min || count > max => {
            return Err(failure(
                name,
                &format!("must contain between {} and {} items", min, max),
            ))
        }
        (Some(min), _) if count < min => {
            return Err(failure(name, &format!("must contain at least {} items", min)))
        }
        (_, Some(max)) if count > max => {
            return Err(failure(name, &format!("must contain at most {} items", max)))
        }
        _ => {}
    }

    if let Some(items) = &constraints.items {
        if !elements.iter().all(|element| items.admits(element)) {
            return Err(failure(name, "contains an invalid item"));
        }
    }

    Ok(())
}

// ============================================================================
// Messages
// ============================================================================

fn failure(name: &str, requirement: &str) -> String {
    format!("The field \"{}\" {}.", name, requirement)
}

fn type_failure(name: &str, node: &SchemaNode) -> String {
    failure(name, &format!("must be of type {}", node.schema_type()))
}
