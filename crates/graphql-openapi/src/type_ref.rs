//! Adapts the type references of an [`apollo_compiler`] schema into a small, closed sum type.
//!
//! All branching on the shape of a GraphQL type happens here, once. The classifier and the
//! mock generator only ever pattern match on [`TypeRef`].

use apollo_compiler::Schema;
use apollo_compiler::ast::Type;
use apollo_compiler::schema::ExtendedType;
use tracing::debug;

const BUILT_IN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// A GraphQL output type reference, with wrappers preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A built-in or custom scalar, by name
    Scalar(String),

    /// A non-null wrapper around another type
    NonNull(Box<TypeRef>),

    /// A list wrapper around another type
    List(Box<TypeRef>),

    /// An object type with its fields, one level deep
    Object(Vec<FieldRef>),

    /// Anything else: enums, interfaces, unions, input objects or unknown names
    Other,
}

/// A field of an object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub name: String,
    pub ty: TypeRef,
}

impl TypeRef {
    /// Adapt a GraphQL type from the schema.
    ///
    /// Object types are expanded into their fields, but object types referenced by those
    /// fields are not expanded further, so self-referential schemas terminate.
    pub fn from_ast(ty: &Type, schema: &Schema) -> Self {
        Self::adapt(ty, schema, true)
    }

    /// Strip all non-null wrappers
    pub fn nullable(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) => inner.nullable(),
            other => other,
        }
    }

    fn adapt(ty: &Type, schema: &Schema, expand_objects: bool) -> Self {
        match ty {
            Type::Named(name) => Self::named(name.as_str(), schema, expand_objects),
            Type::NonNullNamed(name) => TypeRef::NonNull(Box::new(Self::named(
                name.as_str(),
                schema,
                expand_objects,
            ))),
            Type::List(inner) => {
                TypeRef::List(Box::new(Self::adapt(inner, schema, expand_objects)))
            }
            Type::NonNullList(inner) => TypeRef::NonNull(Box::new(TypeRef::List(Box::new(
                Self::adapt(inner, schema, expand_objects),
            )))),
        }
    }

    fn named(name: &str, schema: &Schema, expand_objects: bool) -> Self {
        match schema.types.get(name) {
            Some(ExtendedType::Scalar(_)) => TypeRef::Scalar(name.to_string()),
            Some(ExtendedType::Object(object)) if expand_objects => TypeRef::Object(
                object
                    .fields
                    .iter()
                    .map(|(field_name, field)| FieldRef {
                        name: field_name.to_string(),
                        ty: Self::adapt(&field.ty, schema, false),
                    })
                    .collect(),
            ),
            Some(ExtendedType::Object(_)) => TypeRef::Object(Vec::new()),
            Some(_) => TypeRef::Other,
            None if BUILT_IN_SCALARS.contains(&name) => TypeRef::Scalar(name.to_string()),
            None => {
                debug!(name, "Type not found in schema");
                TypeRef::Other
            }
        }
    }
}
