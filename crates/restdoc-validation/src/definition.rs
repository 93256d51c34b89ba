//! JSON schema definitions
//!
//! Schemas can be declared as JSON object literals, the same shape the
//! builder options describe:
//!
//! ```json
//! {
//!   "name":  { "type": "string", "required": true, "min": 3, "max": 10 },
//!   "email": { "type": "string", "test": "email" },
//!   "tags":  { "type": "array", "items": { "type": "string", "enum": ["a", "b"] } }
//! }
//! ```
//!
//! Every field goes through [`SchemaBuilder`], so definitions get the same
//! construction-time checks as hand-built schemas. User checks cannot be
//! expressed in JSON.

use crate::builder::{
    ArrayOptions, BooleanOptions, ImageOptions, IntegerOptions, NumberOptions, ObjectOptions,
    SchemaBuilder, StringOptions,
};
use crate::errors::{SchemaError, SchemaResult};
use crate::schema::{ArrayItems, Schema, SchemaType, StringTest};
use serde_json::{Map, Value};

const COMMON_KEYS: &[&str] = &["type", "required", "description"];

impl Schema {
    /// Build a schema from a JSON object literal definition
    pub fn from_definition(definition: &Value) -> SchemaResult<Schema> {
        parse_schema(definition, "")
    }
}

fn parse_schema(definition: &Value, path: &str) -> SchemaResult<Schema> {
    let fields = definition
        .as_object()
        .ok_or_else(|| SchemaError::definition(path, "schema definition must be an object"))?;

    let mut builder = SchemaBuilder::new();
    for (name, field) in fields {
        let field_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", path, name)
        };
        builder = parse_field(builder, name, field, &field_path)?;
    }
    Ok(builder.build())
}

fn parse_field(
    builder: SchemaBuilder,
    name: &str,
    field: &Value,
    path: &str,
) -> SchemaResult<SchemaBuilder> {
    let def = field
        .as_object()
        .ok_or_else(|| SchemaError::definition(path, "field definition must be an object"))?;
    let schema_type: SchemaType = def
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::definition(path, "missing \"type\""))?
        .parse()?;
    let required = optional_bool(def, "required", path)?.unwrap_or(false);
    let description = optional_str(def, "description", path)?;

    macro_rules! common {
        ($options:expr) => {{
            let mut options = $options;
            if required {
                options = options.required();
            }
            if let Some(description) = description {
                options = options.description(description);
            }
            options
        }};
    }

    match schema_type {
        SchemaType::String => {
            reject_unknown_keys(def, &["min", "max", "options", "test"], path)?;
            let mut options = common!(StringOptions::new());
            if let Some(min) = optional_count(def, "min", path)? {
                options = options.min(min);
            }
            if let Some(max) = optional_count(def, "max", path)? {
                options = options.max(max);
            }
            if let Some(values) = def.get("options") {
                options = options.options(string_list(values, path)?);
            }
            if let Some(test) = optional_str(def, "test", path)? {
                options = options.test(test.parse::<StringTest>()?);
            }
            builder.add_string(name, options)
        }
        SchemaType::Number | SchemaType::Integer => {
            reject_unknown_keys(def, &["min", "max"], path)?;
            let min = optional_number(def, "min", path)?;
            let max = optional_number(def, "max", path)?;
            if schema_type == SchemaType::Number {
                let mut options = common!(NumberOptions::new());
                if let Some(min) = min {
                    options = options.min(min);
                }
                if let Some(max) = max {
                    options = options.max(max);
                }
                builder.add_number(name, options)
            } else {
                let mut options = common!(IntegerOptions::new());
                if let Some(min) = min {
                    options = options.min(min);
                }
                if let Some(max) = max {
                    options = options.max(max);
                }
                builder.add_integer(name, options)
            }
        }
        SchemaType::Boolean => {
            reject_unknown_keys(def, &[], path)?;
            builder.add_boolean(name, common!(BooleanOptions::new()))
        }
        SchemaType::Object => {
            reject_unknown_keys(def, &["properties", "structure"], path)?;
            let mut options = common!(ObjectOptions::new());
            if let Some(properties) = def.get("properties") {
                options = options.properties(parse_schema(properties, path)?);
            }
            if let Some(structure) = optional_str(def, "structure", path)? {
                options = options.structure(structure);
            }
            builder.add_object(name, options)
        }
        SchemaType::Array => {
            reject_unknown_keys(def, &["items", "min", "max"], path)?;
            let mut options = common!(ArrayOptions::new());
            if let Some(items) = def.get("items") {
                let items: ArrayItems = serde_json::from_value(items.clone())
                    .map_err(|e| SchemaError::definition(path, format!("invalid items: {}", e)))?;
                options = options.items(items.item_type, items.allowed);
            }
            if let Some(min) = optional_count(def, "min", path)? {
                options = options.min(min);
            }
            if let Some(max) = optional_count(def, "max", path)? {
                options = options.max(max);
            }
            builder.add_array(name, options)
        }
        SchemaType::Image => {
            reject_unknown_keys(def, &[], path)?;
            builder.add_image(name, common!(ImageOptions::new()))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn reject_unknown_keys(def: &Map<String, Value>, allowed: &[&str], path: &str) -> SchemaResult<()> {
    match def
        .keys()
        .find(|key| !COMMON_KEYS.contains(&key.as_str()) && !allowed.contains(&key.as_str()))
    {
        Some(key) => Err(SchemaError::definition(path, format!("unsupported key \"{}\"", key))),
        None => Ok(()),
    }
}

fn optional_bool(def: &Map<String, Value>, key: &str, path: &str) -> SchemaResult<Option<bool>> {
    def.get(key)
        .map(|v| {
            v.as_bool()
                .ok_or_else(|| SchemaError::definition(path, format!("\"{}\" must be a boolean", key)))
        })
        .transpose()
}

fn optional_str(def: &Map<String, Value>, key: &str, path: &str) -> SchemaResult<Option<String>> {
    def.get(key)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::definition(path, format!("\"{}\" must be a string", key)))
        })
        .transpose()
}

fn optional_number(def: &Map<String, Value>, key: &str, path: &str) -> SchemaResult<Option<f64>> {
    def.get(key)
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| SchemaError::definition(path, format!("\"{}\" must be a number", key)))
        })
        .transpose()
}

fn optional_count(def: &Map<String, Value>, key: &str, path: &str) -> SchemaResult<Option<usize>> {
    def.get(key)
        .map(|v| {
            v.as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    SchemaError::definition(path, format!("\"{}\" must be a non-negative integer", key))
                })
        })
        .transpose()
}

fn string_list(values: &Value, path: &str) -> SchemaResult<Vec<String>> {
    values
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| SchemaError::definition(path, "\"options\" must be a list of strings"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NodeKind;
    use serde_json::json;

    #[test]
    fn test_parse_full_definition() {
        let schema = Schema::from_definition(&json!({
            "name": { "type": "string", "required": true, "min": 3, "max": 10 },
            "age": { "type": "integer", "min": 0 },
            "score": { "type": "number", "max": 1.5 },
            "active": { "type": "boolean" },
            "avatar": { "type": "image", "description": "Profile picture" },
            "tags": { "type": "array", "items": { "type": "string", "enum": ["a", "b"] }, "max": 2 },
            "address": {
                "type": "object",
                "structure": "Address",
                "properties": { "city": { "type": "string", "required": true } }
            }
        }))
        .unwrap();

        let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "age", "score", "active", "avatar", "tags", "address"]);
        assert!(schema.get("name").unwrap().required);

        match &schema.get("address").unwrap().kind {
            NodeKind::Object(c) => {
                assert_eq!(c.structure.as_deref(), Some("Address"));
                assert!(c.properties.as_ref().unwrap().contains("city"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_test_rejected() {
        let result = Schema::from_definition(&json!({
            "zip": { "type": "string", "test": "zipCode" }
        }));
        assert_eq!(result.unwrap_err(), SchemaError::UnknownTest("zipCode".to_string()));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Schema::from_definition(&json!({ "x": { "type": "date" } }));
        assert_eq!(result.unwrap_err(), SchemaError::UnknownType("date".to_string()));
    }

    #[test]
    fn test_unsupported_key_rejected() {
        let result = Schema::from_definition(&json!({
            "flag": { "type": "boolean", "min": 1 }
        }));
        assert!(matches!(result, Err(SchemaError::InvalidDefinition { .. })));
    }

    #[test]
    fn test_nested_error_path() {
        let result = Schema::from_definition(&json!({
            "user": {
                "type": "object",
                "properties": { "age": { "type": "integer", "min": "zero" } }
            }
        }));
        match result {
            Err(SchemaError::InvalidDefinition { path, .. }) => assert_eq!(path, "user.age"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_builder_checks_apply() {
        let result = Schema::from_definition(&json!({
            "name": { "type": "string", "min": 5, "max": 1 }
        }));
        assert!(matches!(result, Err(SchemaError::InvalidBounds { .. })));

        let result = Schema::from_definition(&json!("not an object"));
        assert!(matches!(result, Err(SchemaError::InvalidDefinition { .. })));
    }
}
