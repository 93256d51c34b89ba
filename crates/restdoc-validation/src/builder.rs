//! Fluent schema construction
//!
//! Each `add_*` method takes a field name and an options value and checks
//! both eagerly, so a misconfigured schema fails at startup instead of at
//! request time.
//!
//! ```
//! use restdoc_validation::builder::{IntegerOptions, SchemaBuilder, StringOptions};
//! use restdoc_validation::StringTest;
//!
//! let schema = SchemaBuilder::new()
//!     .add_string("email", StringOptions::new().required().test(StringTest::Email))?
//!     .add_integer("age", IntegerOptions::new().min(0.0).max(150.0))?
//!     .build();
//!
//! assert_eq!(schema.len(), 2);
//! # Ok::<(), restdoc_validation::SchemaError>(())
//! ```

use crate::checks::Check;
use crate::errors::{SchemaError, SchemaResult};
use crate::schema::{
    ArrayConstraints, ArrayItems, NodeKind, NumericConstraints, ObjectConstraints, Schema,
    SchemaNode, SchemaType, StringConstraints, StringTest,
};
use serde_json::Value;

// ============================================================================
// Options
// ============================================================================

/// Setters shared by every options type
macro_rules! common_options {
    ($options:ident) => {
        impl $options {
            /// Create options for an optional field
            pub fn new() -> Self {
                Self::default()
            }

            /// Mark the field as required
            pub fn required(mut self) -> Self {
                self.common.required = true;
                self
            }

            /// Set the documentation description
            pub fn description(mut self, description: impl Into<String>) -> Self {
                self.common.description = Some(description.into());
                self
            }

            /// Append a user check
            pub fn check(mut self, check: Check) -> Self {
                self.common.checks.push(check);
                self
            }
        }
    };
}

#[derive(Debug, Clone, Default)]
struct CommonOptions {
    required: bool,
    description: Option<String>,
    checks: Vec<Check>,
}

impl CommonOptions {
    fn into_node(self, kind: NodeKind) -> SchemaNode {
        SchemaNode {
            kind,
            required: self.required,
            description: self.description,
            checks: self.checks,
        }
    }
}

/// Options for `add_string`
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    common: CommonOptions,
    constraints: StringConstraints,
}

common_options!(StringOptions);

impl StringOptions {
    /// Minimum length in characters
    pub fn min(mut self, min: usize) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Maximum length in characters
    pub fn max(mut self, max: usize) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Closed set of allowed values
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Built-in format test
    pub fn test(mut self, test: StringTest) -> Self {
        self.constraints.test = Some(test);
        self
    }
}

/// Options for `add_number`
#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    common: CommonOptions,
    constraints: NumericConstraints,
}

common_options!(NumberOptions);

/// Options for `add_integer`
#[derive(Debug, Clone, Default)]
pub struct IntegerOptions {
    common: CommonOptions,
    constraints: NumericConstraints,
}

common_options!(IntegerOptions);

macro_rules! numeric_bounds {
    ($options:ident) => {
        impl $options {
            /// Inclusive lower bound
            pub fn min(mut self, min: f64) -> Self {
                self.constraints.min = Some(min);
                self
            }

            /// Inclusive upper bound
            pub fn max(mut self, max: f64) -> Self {
                self.constraints.max = Some(max);
                self
            }
        }
    };
}

numeric_bounds!(NumberOptions);
numeric_bounds!(IntegerOptions);

/// Options for `add_boolean`
#[derive(Debug, Clone, Default)]
pub struct BooleanOptions {
    common: CommonOptions,
}

common_options!(BooleanOptions);

/// Options for `add_object`
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    common: CommonOptions,
    constraints: ObjectConstraints,
}

common_options!(ObjectOptions);

impl ObjectOptions {
    /// Nested schema the value is validated against
    pub fn properties(mut self, properties: Schema) -> Self {
        self.constraints.properties = Some(properties);
        self
    }

    /// Name of a shared structure, rendered as `{Name}` in exports
    pub fn structure(mut self, name: impl Into<String>) -> Self {
        self.constraints.structure = Some(name.into());
        self
    }
}

/// Options for `add_array`
#[derive(Debug, Clone, Default)]
pub struct ArrayOptions {
    common: CommonOptions,
    constraints: ArrayConstraints,
}

common_options!(ArrayOptions);

impl ArrayOptions {
    /// Element type and the closed set of allowed element values
    pub fn items<I>(mut self, item_type: SchemaType, allowed: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.constraints.items = Some(ArrayItems {
            item_type,
            allowed: allowed.into_iter().collect(),
        });
        self
    }

    /// Minimum element count
    pub fn min(mut self, min: usize) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Maximum element count
    pub fn max(mut self, max: usize) -> Self {
        self.constraints.max = Some(max);
        self
    }
}

/// Options for `add_image`
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    common: CommonOptions,
}

common_options!(ImageOptions);

// ============================================================================
// Schema Builder
// ============================================================================

/// Builder assembling a [`Schema`] field by field
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string field
    pub fn add_string(self, name: impl Into<String>, options: StringOptions) -> SchemaResult<Self> {
        let name = name.into();
        check_string_constraints(&name, &options.constraints)?;
        self.push(name, options.common.into_node(NodeKind::String(options.constraints)))
    }

    /// Add a number field
    pub fn add_number(self, name: impl Into<String>, options: NumberOptions) -> SchemaResult<Self> {
        let name = name.into();
        check_numeric_constraints(&name, &options.constraints)?;
        self.push(name, options.common.into_node(NodeKind::Number(options.constraints)))
    }

    /// Add an integer field
    pub fn add_integer(self, name: impl Into<String>, options: IntegerOptions) -> SchemaResult<Self> {
        let name = name.into();
        check_numeric_constraints(&name, &options.constraints)?;
        self.push(name, options.common.into_node(NodeKind::Integer(options.constraints)))
    }

    /// Add a boolean field
    pub fn add_boolean(self, name: impl Into<String>, options: BooleanOptions) -> SchemaResult<Self> {
        self.push(name.into(), options.common.into_node(NodeKind::Boolean))
    }

    /// Add an object field, optionally with nested properties
    pub fn add_object(self, name: impl Into<String>, options: ObjectOptions) -> SchemaResult<Self> {
        let name = name.into();
        if let Some(structure) = &options.constraints.structure {
            if structure.trim().is_empty() {
                return Err(SchemaError::definition(&name, "structure name must not be empty"));
            }
        }
        self.push(name, options.common.into_node(NodeKind::Object(options.constraints)))
    }

    /// Add an array field
    pub fn add_array(self, name: impl Into<String>, options: ArrayOptions) -> SchemaResult<Self> {
        let name = name.into();
        check_array_constraints(&name, &options.constraints)?;
        self.push(name, options.common.into_node(NodeKind::Array(options.constraints)))
    }

    /// Add an image field (an absolute URL string)
    pub fn add_image(self, name: impl Into<String>, options: ImageOptions) -> SchemaResult<Self> {
        self.push(name.into(), options.common.into_node(NodeKind::Image))
    }

    /// Finish building
    pub fn build(self) -> Schema {
        self.schema
    }

    fn push(mut self, name: String, node: SchemaNode) -> SchemaResult<Self> {
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if self.schema.contains(&name) {
            return Err(SchemaError::DuplicateField(name));
        }
        self.schema.push(name, node);
        Ok(self)
    }
}

// ============================================================================
// Constraint Checks
// ============================================================================

fn check_string_constraints(name: &str, constraints: &StringConstraints) -> SchemaResult<()> {
    if let (Some(min), Some(max)) = (constraints.min, constraints.max) {
        if min > max {
            return Err(SchemaError::bounds(
                name,
                format!("min {} is greater than max {}", min, max),
            ));
        }
    }
    if let Some(options) = &constraints.options {
        if options.is_empty() {
            return Err(SchemaError::EmptyOptions(name.to_string()));
        }
    }
    Ok(())
}

fn check_numeric_constraints(name: &str, constraints: &NumericConstraints) -> SchemaResult<()> {
    for bound in [constraints.min, constraints.max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(SchemaError::bounds(name, format!("{} is not a finite number", bound)));
        }
    }
    if let (Some(min), Some(max)) = (constraints.min, constraints.max) {
        if min > max {
            return Err(SchemaError::bounds(
                name,
                format!("min {} is greater than max {}", min, max),
            ));
        }
    }
    Ok(())
}

fn check_array_constraints(name: &str, constraints: &ArrayConstraints) -> SchemaResult<()> {
    if let (Some(min), Some(max)) = (constraints.min, constraints.max) {
        if min > max {
            return Err(SchemaError::bounds(
                name,
                format!("min {} is greater than max {}", min, max),
            ));
        }
    }
    if let Some(items) = &constraints.items {
        if items.allowed.is_empty() {
            return Err(SchemaError::EmptyItemEnum(name.to_string()));
        }
        if let Some(value) = items.allowed.iter().find(|v| !items.item_type.admits(v)) {
            return Err(SchemaError::ItemTypeMismatch {
                field: name.to_string(),
                expected: items.item_type.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let schema = SchemaBuilder::new()
            .add_string("b", StringOptions::new())
            .unwrap()
            .add_boolean("a", BooleanOptions::new().required())
            .unwrap()
            .add_image("c", ImageOptions::new().description("Avatar"))
            .unwrap()
            .build();

        let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert!(schema.get("a").unwrap().required);
        assert_eq!(schema.get("c").unwrap().description.as_deref(), Some("Avatar"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = SchemaBuilder::new()
            .add_string("name", StringOptions::new())
            .unwrap()
            .add_number("name", NumberOptions::new());

        assert_eq!(result.unwrap_err(), SchemaError::DuplicateField("name".to_string()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = SchemaBuilder::new().add_boolean("  ", BooleanOptions::new());
        assert_eq!(result.unwrap_err(), SchemaError::EmptyName);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = SchemaBuilder::new().add_string("s", StringOptions::new().min(5).max(2));
        assert!(matches!(result, Err(SchemaError::InvalidBounds { .. })));

        let result = SchemaBuilder::new().add_number("n", NumberOptions::new().min(1.0).max(0.5));
        assert!(matches!(result, Err(SchemaError::InvalidBounds { .. })));

        let result = SchemaBuilder::new().add_integer("i", IntegerOptions::new().max(f64::NAN));
        assert!(matches!(result, Err(SchemaError::InvalidBounds { .. })));

        let result = SchemaBuilder::new().add_array("a", ArrayOptions::new().min(3).max(1));
        assert!(matches!(result, Err(SchemaError::InvalidBounds { .. })));
    }

    #[test]
    fn test_equal_bounds_allowed() {
        let result = SchemaBuilder::new().add_number("n", NumberOptions::new().min(2.0).max(2.0));
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_options_rejected() {
        let result =
            SchemaBuilder::new().add_string("s", StringOptions::new().options(Vec::<String>::new()));
        assert_eq!(result.unwrap_err(), SchemaError::EmptyOptions("s".to_string()));
    }

    #[test]
    fn test_array_items_validated() {
        let result = SchemaBuilder::new()
            .add_array("tags", ArrayOptions::new().items(SchemaType::String, Vec::new()));
        assert_eq!(result.unwrap_err(), SchemaError::EmptyItemEnum("tags".to_string()));

        let result = SchemaBuilder::new().add_array(
            "tags",
            ArrayOptions::new().items(SchemaType::String, vec![json!("a"), json!(1)]),
        );
        assert!(matches!(result, Err(SchemaError::ItemTypeMismatch { .. })));
    }

    #[test]
    fn test_checks_attached_in_order() {
        let schema = SchemaBuilder::new()
            .add_string(
                "name",
                StringOptions::new()
                    .check(Check::sync("first", |_: &Value| true))
                    .check(Check::sync("second", |_: &Value| true)),
            )
            .unwrap()
            .build();

        let responses: Vec<&str> = schema
            .get("name")
            .unwrap()
            .checks
            .iter()
            .map(Check::response)
            .collect();
        assert_eq!(responses, vec!["first", "second"]);
    }
}
