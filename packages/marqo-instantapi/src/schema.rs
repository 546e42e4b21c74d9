//! Response-shape and flat-schema validation.
//!
//! A schema is the same JSON object that is sent to the extraction
//! service as the desired response structure: field names mapped to
//! human-readable description strings. Two checks live here:
//!
//! - [`validate_flat`] gates indexing: Marqo only accepts flat documents,
//!   so every schema value must be a string.
//! - [`matches_schema`] gates per-document ingestion: the extracted
//!   record must have exactly the container shape the schema asked for.

use serde_json::Value;

use crate::error::{AdapterError, Result};

/// Check that a schema is indexable: a JSON object whose values are all
/// strings. Nested objects or arrays would produce nested documents,
/// which the index engine rejects.
pub fn validate_flat(schema: &Value) -> Result<()> {
    let fields = schema.as_object().ok_or_else(|| AdapterError::NonFlatSchema {
        field: "<root>".to_string(),
    })?;

    for (field, value) in fields {
        if !value.is_string() {
            return Err(AdapterError::NonFlatSchema {
                field: field.clone(),
            });
        }
    }

    Ok(())
}

/// Recursively compare the container shape of a response against a schema.
///
/// - Object schema nodes require an object response with exactly the same
///   key set, matching recursively.
/// - Array schema nodes require an array response of identical length,
///   matching pairwise.
/// - Scalar schema nodes (the description strings) accept any response
///   value. The descriptions are hints to the extractor, not type
///   constraints, so value types are deliberately unchecked.
pub fn matches_schema(schema: &Value, response: &Value) -> bool {
    match schema {
        Value::Object(schema_fields) => match response {
            Value::Object(response_fields) => {
                schema_fields.len() == response_fields.len()
                    && schema_fields.iter().all(|(key, schema_value)| {
                        response_fields
                            .get(key)
                            .is_some_and(|response_value| matches_schema(schema_value, response_value))
                    })
            }
            _ => false,
        },
        Value::Array(schema_items) => match response {
            Value::Array(response_items) => {
                schema_items.len() == response_items.len()
                    && schema_items
                        .iter()
                        .zip(response_items)
                        .all(|(schema_item, response_item)| matches_schema(schema_item, response_item))
            }
            _ => false,
        },
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_schema() -> Value {
        json!({
            "response": {
                "name": "<the name of the user>",
                "email": "<the email address of the user>",
            }
        })
    }

    fn flat_schema() -> Value {
        json!({
            "name": "<the name of the user>",
            "email": "<the email address of the user>",
        })
    }

    #[test]
    fn test_matching_response() {
        let response = json!({"response": {"name": "John Doe", "email": "john.doe@email.com"}});
        assert!(matches_schema(&nested_schema(), &response));
    }

    #[test]
    fn test_missing_nesting_fails() {
        let response = json!({"name": "John Doe", "email": "john.doe@email.com"});
        assert!(!matches_schema(&nested_schema(), &response));
    }

    #[test]
    fn test_missing_key_fails() {
        let response = json!({"response": {"name": "John Doe"}});
        assert!(!matches_schema(&nested_schema(), &response));
    }

    #[test]
    fn test_extra_key_fails() {
        let response = json!({
            "response": {"name": "John Doe", "email": "john.doe@email.com", "age": 30}
        });
        assert!(!matches_schema(&nested_schema(), &response));
    }

    #[test]
    fn test_extra_nesting_under_scalar_leaf_accepted() {
        // Leaf descriptions do not constrain value types, so a nested value
        // where the schema has a description string still matches. The index
        // engine will reject it later if the document is not flat.
        let response = json!({
            "response": {
                "name": "John Doe",
                "email": {"domain": "email.com", "username": "john.doe"},
            }
        });
        assert!(matches_schema(&nested_schema(), &response));
    }

    #[test]
    fn test_array_lengths_must_match() {
        let schema = json!({"tags": ["<a tag>", "<a tag>"]});
        assert!(matches_schema(&schema, &json!({"tags": ["a", "b"]})));
        assert!(!matches_schema(&schema, &json!({"tags": ["a"]})));
        assert!(!matches_schema(&schema, &json!({"tags": "a, b"})));
    }

    #[test]
    fn test_empty_containers() {
        assert!(matches_schema(&json!({}), &json!({})));
        assert!(!matches_schema(&json!({}), &json!({"extra": 1})));
        assert!(matches_schema(&json!([]), &json!([])));
        assert!(!matches_schema(&json!([]), &json!(["extra"])));
    }

    #[test]
    fn test_validate_flat_accepts_flat_schema() {
        assert!(validate_flat(&flat_schema()).is_ok());
    }

    #[test]
    fn test_validate_flat_rejects_nested_schema() {
        let err = validate_flat(&nested_schema()).unwrap_err();
        match err {
            AdapterError::NonFlatSchema { field } => assert_eq!(field, "response"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_flat_rejects_non_object_root() {
        assert!(validate_flat(&json!(["not", "an", "object"])).is_err());
    }
}
