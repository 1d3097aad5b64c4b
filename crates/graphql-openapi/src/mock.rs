//! Deterministic example values for documentation.
//!
//! Objects are mocked one level deep only: object-typed fields of an object mock to `null`.

use serde_json::{Map, Value, json};

use crate::classify::is_scalar_like;
use crate::type_ref::TypeRef;

/// The example value for a type, chosen by its declared name.
///
/// Only a bare built-in scalar has a literal: wrapped types such as `String!` or `[Int]`,
/// non-scalar types and other scalars (including `ID`) mock to `null`.
pub fn mock_scalar(ty: &TypeRef) -> Value {
    match ty {
        TypeRef::Scalar(name) => match name.as_str() {
            "String" => json!("Sample string"),
            "Int" => json!(123),
            "Float" => json!(123.45),
            "Boolean" => json!(true),
            _ => Value::Null,
        },
        _ => Value::Null,
    }
}

/// The example response payload for a root field
pub fn mock_response(return_type: &TypeRef, field_name: &str) -> Value {
    if is_scalar_like(return_type) {
        return json!({ "data": { field_name: mock_scalar(return_type) } });
    }

    match return_type.nullable() {
        TypeRef::Object(fields) => {
            let data: Map<String, Value> = fields
                .iter()
                .map(|field| (field.name.clone(), mock_scalar(&field.ty)))
                .collect();
            json!({ "data": data })
        }
        _ => json!({ "data": { field_name: {} } }),
    }
}
