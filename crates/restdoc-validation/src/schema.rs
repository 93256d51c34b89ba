//! Schema model
//!
//! A [`Schema`] is an ordered set of uniquely named fields, each described by
//! a [`SchemaNode`]. Object nodes nest further schemas to any depth. Schemas
//! are assembled by [`SchemaBuilder`](crate::builder::SchemaBuilder) and are
//! immutable afterwards, so one schema can be shared by any number of
//! concurrent validations.

use crate::checks::Check;
use crate::errors::SchemaError;
use crate::formats;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Schema Types
// ============================================================================

/// Type tag of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Image,
}

impl SchemaType {
    /// Name used in messages, exports and definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Image => "image",
        }
    }

    /// Whether the JSON kind of `value` fits this type
    ///
    /// This is the coarse check of the type pass: integers accept any number
    /// (integrality is checked separately) and images accept any string.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Image => value.is_string(),
            Self::Number | Self::Integer => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }

    /// Whether `value` is a complete member of this type
    ///
    /// Stricter than [`accepts`](Self::accepts): integers must be whole and
    /// images must be valid URLs. Used for array items.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::Integer => is_integral(value),
            Self::Image => value.as_str().map_or(false, formats::validate_image),
            other => other.accepts(value),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "image" => Ok(Self::Image),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }
}

/// Whether a JSON value is a whole number
pub fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().map_or(false, |f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

// ============================================================================
// String Tests
// ============================================================================

/// Named built-in string tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringTest {
    Email,
    Username,
    PasswordStrength,
    PhoneNumber,
    IpAddress,
    Url,
}

impl StringTest {
    /// Name used in exports and definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
            Self::PasswordStrength => "passwordStrength",
            Self::PhoneNumber => "phoneNumber",
            Self::IpAddress => "ipAddress",
            Self::Url => "url",
        }
    }

    /// Run the matching primitive
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Email => formats::validate_email(value),
            Self::Username => formats::validate_username(value),
            Self::PasswordStrength => formats::validate_password_strength(value),
            Self::PhoneNumber => formats::validate_phone_number(value),
            Self::IpAddress => formats::validate_ip_address(value),
            Self::Url => formats::validate_url(value),
        }
    }

    /// Tail of the failure message (`The field "x" <requirement>.`)
    pub(crate) fn requirement(&self) -> &'static str {
        match self {
            Self::Email => "must be a valid email address",
            Self::Username => "must be a valid username",
            Self::PasswordStrength => "must be a strong password",
            Self::PhoneNumber => "must be a valid phone number",
            Self::IpAddress => "must be a valid IP address",
            Self::Url => "must be a valid URL",
        }
    }
}

impl fmt::Display for StringTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringTest {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "username" => Ok(Self::Username),
            "passwordStrength" => Ok(Self::PasswordStrength),
            "phoneNumber" => Ok(Self::PhoneNumber),
            "ipAddress" => Ok(Self::IpAddress),
            "url" => Ok(Self::Url),
            other => Err(SchemaError::UnknownTest(other.to_string())),
        }
    }
}

// ============================================================================
// Constraints
// ============================================================================

/// Constraints for string nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringConstraints {
    /// Minimum length in characters (inclusive)
    pub min: Option<usize>,
    /// Maximum length in characters (inclusive)
    pub max: Option<usize>,
    /// Closed set of allowed values
    pub options: Option<Vec<String>>,
    /// Named built-in test
    pub test: Option<StringTest>,
}

/// Constraints for number and integer nodes (inclusive bounds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Constraints for object nodes
#[derive(Debug, Clone, Default)]
pub struct ObjectConstraints {
    /// Nested field mapping
    pub properties: Option<Schema>,
    /// Name of the shared structure this object follows, for documentation
    pub structure: Option<String>,
}

/// Element description for array nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayItems {
    /// Type every element must have
    #[serde(rename = "type")]
    pub item_type: SchemaType,
    /// Closed set of allowed element values
    #[serde(rename = "enum")]
    pub allowed: Vec<Value>,
}

impl ArrayItems {
    /// Whether an element has the item type and belongs to the value set
    pub fn admits(&self, element: &Value) -> bool {
        self.item_type.admits(element) && self.allowed.contains(element)
    }
}

/// Constraints for array nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayConstraints {
    pub items: Option<ArrayItems>,
    /// Minimum element count (inclusive)
    pub min: Option<usize>,
    /// Maximum element count (inclusive)
    pub max: Option<usize>,
}

// ============================================================================
// Schema Node
// ============================================================================

/// Per-type part of a schema node
#[derive(Debug, Clone)]
pub enum NodeKind {
    String(StringConstraints),
    Number(NumericConstraints),
    Integer(NumericConstraints),
    Boolean,
    Object(ObjectConstraints),
    Array(ArrayConstraints),
    Image,
}

impl NodeKind {
    /// Type tag of this kind
    pub fn schema_type(&self) -> SchemaType {
        match self {
            Self::String(_) => SchemaType::String,
            Self::Number(_) => SchemaType::Number,
            Self::Integer(_) => SchemaType::Integer,
            Self::Boolean => SchemaType::Boolean,
            Self::Object(_) => SchemaType::Object,
            Self::Array(_) => SchemaType::Array,
            Self::Image => SchemaType::Image,
        }
    }
}

/// A single field description
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// Type and type-specific constraints
    pub kind: NodeKind,
    /// Whether the field must be provided
    pub required: bool,
    /// Human-readable description for documentation
    pub description: Option<String>,
    /// User checks, run in declaration order
    pub checks: Vec<Check>,
}

impl SchemaNode {
    /// Create an optional node without description or checks
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            required: false,
            description: None,
            checks: Vec::new(),
        }
    }

    /// Type tag of this node
    pub fn schema_type(&self) -> SchemaType {
        self.kind.schema_type()
    }
}

// ============================================================================
// Schema
// ============================================================================

/// A named field of a schema
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub node: SchemaNode,
}

/// Ordered mapping from unique field names to nodes
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a schema
    pub fn builder() -> crate::builder::SchemaBuilder {
        crate::builder::SchemaBuilder::new()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterate over `(name, node)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|f| (f.name.as_str(), &f.node))
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.node)
    }

    /// Check if a field is defined
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.node.required)
            .map(|f| f.name.as_str())
    }

    /// Append a field; uniqueness is enforced by the builder
    pub(crate) fn push(&mut self, name: String, node: SchemaNode) {
        self.fields.push(Field { name, node });
    }
}
