//! Maps GraphQL type references onto OpenAPI primitive type names

use std::fmt;

use serde::Serialize;

use crate::type_ref::TypeRef;

/// The primitive OpenAPI type of a GraphQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Unknown,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Array => "array",
            PrimitiveKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a type by its leaf, after stripping non-null wrappers.
///
/// Lists classify as [`PrimitiveKind::Array`] without describing their items.
pub fn classify(ty: &TypeRef) -> PrimitiveKind {
    match ty {
        TypeRef::NonNull(inner) => classify(inner),
        TypeRef::List(_) => PrimitiveKind::Array,
        TypeRef::Scalar(name) => match name.as_str() {
            "String" | "ID" => PrimitiveKind::String,
            "Int" => PrimitiveKind::Integer,
            "Float" => PrimitiveKind::Number,
            "Boolean" => PrimitiveKind::Boolean,
            _ => PrimitiveKind::Unknown,
        },
        TypeRef::Object(_) | TypeRef::Other => PrimitiveKind::Unknown,
    }
}

/// Whether the type is a scalar once every non-null and list wrapper is removed
pub fn is_scalar_like(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Scalar(_) => true,
        TypeRef::NonNull(inner) | TypeRef::List(inner) => is_scalar_like(inner),
        TypeRef::Object(_) | TypeRef::Other => false,
    }
}
