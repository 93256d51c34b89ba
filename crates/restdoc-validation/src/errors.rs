//! Error and outcome types
//!
//! Two families live here. [`SchemaError`] is raised while a schema is being
//! built and is fatal at startup. [`ValidationOutcome`] is what validating
//! request data produces; a failed validation is an expected result, not an
//! error, and carries a single human-readable message.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Construction Errors
// ============================================================================

/// Builder misuse detected while assembling a schema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A field was added without a name
    #[error("schema fields must have a non-empty name")]
    EmptyName,

    /// The same name was added twice at one schema level
    #[error("field \"{0}\" is already defined in this schema")]
    DuplicateField(String),

    /// Bounds are inverted, negative or not finite
    #[error("field \"{field}\" has invalid bounds: {reason}")]
    InvalidBounds { field: String, reason: String },

    /// An `options` list was given but is empty
    #[error("field \"{0}\" declares an empty options list")]
    EmptyOptions(String),

    /// Array items declare an empty closed value set
    #[error("field \"{0}\" declares array items with an empty enum")]
    EmptyItemEnum(String),

    /// An array item enum value does not have the declared item type
    #[error("field \"{field}\" declares item type {expected} but enum value {value} is not of that type")]
    ItemTypeMismatch {
        field: String,
        expected: String,
        value: String,
    },

    /// A string test name that no built-in primitive answers to
    #[error("unknown string test \"{0}\"")]
    UnknownTest(String),

    /// A type name that is not part of the schema vocabulary
    #[error("unknown schema type \"{0}\"")]
    UnknownType(String),

    /// A JSON schema definition is malformed
    #[error("invalid schema definition at \"{path}\": {reason}")]
    InvalidDefinition { path: String, reason: String },
}

impl SchemaError {
    pub(crate) fn bounds(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBounds {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn definition(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

// ============================================================================
// Validation Outcome
// ============================================================================

/// Result of validating data against a schema
///
/// The first failure encountered wins; nested failures are reported with the
/// nested field's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every check passed
    Valid,
    /// The first failing check's message
    Invalid(String),
}

impl ValidationOutcome {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }

    /// Convert to Result - Ok if valid, Err with the message otherwise
    pub fn into_result(self) -> Result<(), String> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(message) => Err(message),
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid(message) => f.write_str(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(ValidationOutcome::Valid.is_valid());
        assert_eq!(ValidationOutcome::Valid.message(), None);

        let invalid = ValidationOutcome::invalid("nope");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.message(), Some("nope"));
        assert_eq!(invalid.into_result(), Err("nope".to_string()));
    }

    #[test]
    fn test_schema_error_display() {
        assert_eq!(
            SchemaError::DuplicateField("email".to_string()).to_string(),
            "field \"email\" is already defined in this schema"
        );
        assert_eq!(
            SchemaError::bounds("age", "min 10 is greater than max 5").to_string(),
            "field \"age\" has invalid bounds: min 10 is greater than max 5"
        );
        assert_eq!(
            SchemaError::UnknownTest("zip".to_string()).to_string(),
            "unknown string test \"zip\""
        );
    }
}
