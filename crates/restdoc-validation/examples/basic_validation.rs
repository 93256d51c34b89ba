//! Basic Validation Example
//!
//! Builds a signup schema, validates a few payloads and prints the exported
//! documentation.
//!
//! Run with:
//! ```bash
//! cargo run -p restdoc-validation --example basic_validation
//! ```

use restdoc_validation::{
    validate, ArrayOptions, Check, IntegerOptions, ObjectOptions, Schema, SchemaBuilder,
    SchemaType, StringOptions, StringTest, ValidationOutcome,
};
use serde_json::{json, Value};

fn signup_schema() -> anyhow::Result<Schema> {
    let address = SchemaBuilder::new()
        .add_string("city", StringOptions::new().required())?
        .add_string("zip", StringOptions::new().min(5).max(5))?
        .build();

    let schema = SchemaBuilder::new()
        .add_string(
            "username",
            StringOptions::new()
                .required()
                .test(StringTest::Username)
                .check(Check::sync("The username \"admin\" is reserved.", |v: &Value| {
                    v.as_str() != Some("admin")
                })),
        )?
        .add_string("email", StringOptions::new().required().test(StringTest::Email))?
        .add_integer("age", IntegerOptions::new().min(13.0).max(130.0))?
        .add_array(
            "plans",
            ArrayOptions::new().items(SchemaType::String, [json!("free"), json!("pro")]),
        )?
        .add_object(
            "address",
            ObjectOptions::new().structure("Address").properties(address),
        )?
        .build();

    Ok(schema)
}

fn outcome_str(outcome: &ValidationOutcome) -> String {
    match outcome {
        ValidationOutcome::Valid => "✓ valid".to_string(),
        ValidationOutcome::Invalid(message) => format!("✗ {}", message),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Basic Validation Example");
    println!("========================\n");

    let schema = signup_schema()?;

    let payloads = [
        json!({ "username": "alice", "email": "alice@example.com", "age": 30 }),
        json!({ "username": "alice" }),
        json!({ "username": "admin", "email": "root@example.com" }),
        json!({ "username": "bob", "email": "bob@example.com", "age": 7 }),
        json!({ "username": "bob", "email": "bob@example.com", "plans": ["enterprise"] }),
        json!({ "username": "bob", "email": "bob@example.com", "address": { "zip": "123" } }),
    ];

    for payload in &payloads {
        println!("  {}", payload);
        println!("    {}", outcome_str(&validate(payload, &schema).await));
    }

    println!("\nExported schema:");
    println!("{}", schema.export().to_json()?);

    Ok(())
}
