//! Serializable schema description for documentation tooling
//!
//! [`Schema::export`] turns a schema into plain data: every field keeps its
//! type, bounds, options and nested schema, while user checks are reduced to
//! their failure messages. The result serializes to JSON (or any serde
//! format) and deserializes back to an equal value.

use crate::schema::{ArrayItems, NodeKind, Schema, SchemaNode, StringTest};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Exported Schema
// ============================================================================

/// Exported schema: field names to exported nodes, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportedSchema {
    fields: Vec<(String, ExportedNode)>,
}

impl ExportedSchema {
    /// Look up an exported field
    pub fn get(&self, name: &str) -> Option<&ExportedNode> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, node)| node)
    }

    /// Iterate over `(name, node)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportedNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a pretty-printed JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ExportedSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, node) in &self.fields {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExportedSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = ExportedSchema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to exported schema nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, node)) = access.next_entry::<String, ExportedNode>()? {
                    fields.push((name, node));
                }
                Ok(ExportedSchema { fields })
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

// ============================================================================
// Exported Node
// ============================================================================

/// Exported description of a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedNode {
    #[serde(flatten)]
    pub kind: ExportedKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ExportedCheck>,
}

/// Type-specific part of an exported node, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportedKind {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        test: Option<StringTest>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Object {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        properties: Option<ExportedSchema>,
        /// Structure reference rendered as `{Name}`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        structure: Option<String>,
    },
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        items: Option<ArrayItems>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    Image,
}

/// A user check, reduced to the message it reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedCheck {
    pub response: String,
}

// ============================================================================
// Conversion
// ============================================================================

impl Schema {
    /// Export this schema for documentation
    pub fn export(&self) -> ExportedSchema {
        ExportedSchema {
            fields: self
                .iter()
                .map(|(name, node)| (name.to_string(), export_node(node)))
                .collect(),
        }
    }
}

fn export_node(node: &SchemaNode) -> ExportedNode {
    let kind = match &node.kind {
        NodeKind::String(c) => ExportedKind::String {
            min: c.min,
            max: c.max,
            options: c.options.clone(),
            test: c.test,
        },
        NodeKind::Number(c) => ExportedKind::Number {
            min: c.min,
            max: c.max,
        },
        NodeKind::Integer(c) => ExportedKind::Integer {
            min: c.min,
            max: c.max,
        },
        NodeKind::Boolean => ExportedKind::Boolean,
        NodeKind::Object(c) => ExportedKind::Object {
            properties: c.properties.as_ref().map(Schema::export),
            structure: c.structure.as_ref().map(|name| format!("{{{}}}", name)),
        },
        NodeKind::Array(c) => ExportedKind::Array {
            items: c.items.clone(),
            min: c.min,
            max: c.max,
        },
        NodeKind::Image => ExportedKind::Image,
    };

    ExportedNode {
        kind,
        required: node.required,
        description: node.description.clone(),
        checks: node
            .checks
            .iter()
            .map(|check| ExportedCheck {
                response: check.response().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ArrayOptions, ObjectOptions, SchemaBuilder, StringOptions};
    use crate::checks::Check;
    use crate::schema::SchemaType;
    use serde_json::{json, Value};

    #[test]
    fn test_export_string_field() {
        let schema = SchemaBuilder::new()
            .add_string(
                "email",
                StringOptions::new()
                    .required()
                    .description("Contact address")
                    .test(StringTest::Email)
                    .check(Check::sync("Email already registered.", |_: &Value| true)),
            )
            .unwrap()
            .build();

        let exported = serde_json::to_value(schema.export()).unwrap();
        assert_eq!(
            exported,
            json!({
                "email": {
                    "type": "string",
                    "test": "email",
                    "required": true,
                    "description": "Contact address",
                    "checks": [{ "response": "Email already registered." }]
                }
            })
        );
    }

    #[test]
    fn test_export_structure_reference() {
        let address = SchemaBuilder::new()
            .add_string("city", StringOptions::new().required())
            .unwrap()
            .build();
        let schema = SchemaBuilder::new()
            .add_object("address", ObjectOptions::new().properties(address).structure("Address"))
            .unwrap()
            .build();

        let exported = schema.export();
        match &exported.get("address").unwrap().kind {
            ExportedKind::Object {
                properties,
                structure,
            } => {
                assert_eq!(structure.as_deref(), Some("{Address}"));
                assert!(properties.as_ref().unwrap().get("city").unwrap().required);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_export_preserves_order() {
        let schema = SchemaBuilder::new()
            .add_string("zeta", StringOptions::new())
            .unwrap()
            .add_array(
                "alpha",
                ArrayOptions::new().items(SchemaType::Integer, vec![json!(1), json!(2)]),
            )
            .unwrap()
            .build();

        let json = schema.export().to_json().unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());

        let back: ExportedSchema = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = back.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
