//! Assembles the OpenAPI document from the synthesized examples.
//!
//! Every root field becomes a `POST /<field>` operation whose response references a
//! `<field>Response` component schema.

use apollo_compiler::collections::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::classify::{PrimitiveKind, classify};
use crate::examples::ExampleEntry;
use crate::options::Options;
use crate::type_ref::TypeRef;

const RESPONSE_DESCRIPTION: &str = "Successful GraphQL response";

/// An OpenAPI 3.x document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    pub paths: Map<String, Value>,
    pub components: Components,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Components {
    pub schemas: Map<String, Value>,
}

/// Assemble the document, one path per example, in example order
pub fn assemble(examples: &IndexMap<String, ExampleEntry>, options: &Options) -> OpenApiDocument {
    let mut paths = Map::new();
    let mut schemas = Map::new();
    let mut tags: Vec<Tag> = Vec::new();

    for (field_name, entry) in examples {
        let component_name = format!("{field_name}Response");
        schemas.insert(component_name.clone(), response_schema(field_name, entry));

        let mut operation = json!({
            "summary": entry.summary,
            "description": format!("Example for {field_name}"),
            "requestBody": {
                "description": options.summary,
                "required": true,
                "content": {
                    "application/json": {
                        "schema": request_schema(entry),
                    }
                }
            },
            "responses": {
                "200": {
                    "description": RESPONSE_DESCRIPTION,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{component_name}") }
                        }
                    }
                }
            }
        });

        if let Some(tag) = options.route_map.get(field_name) {
            if let Some(operation) = operation.as_object_mut() {
                operation.insert("tags".to_string(), json!([tag.name]));
            }
            if !tags.iter().any(|existing| existing.name == tag.name) {
                tags.push(Tag {
                    name: tag.name.clone(),
                    description: tag.description.clone(),
                });
            }
        }

        paths.insert(format!("/{field_name}"), json!({ "post": operation }));
    }

    OpenApiDocument {
        openapi: options.openapi.clone(),
        info: Info {
            title: options.title.clone(),
            version: options.version.clone(),
            description: Some(options.description.clone()),
        },
        servers: vec![Server {
            url: options.server_url.clone(),
        }],
        tags,
        paths,
        components: Components { schemas },
    }
}

/// The request body schema. `variables` and `operationName` only appear when the
/// example uses them.
fn request_schema(entry: &ExampleEntry) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "query".to_string(),
        json!({
            "type": "string",
            "description": "GraphQL Query or Mutation",
            "example": entry.value.query,
        }),
    );

    if !entry.value.variables.is_empty() {
        properties.insert(
            "variables".to_string(),
            json!({
                "type": "object",
                "additionalProperties": true,
                "description": "Variables for the query or mutation",
                "example": entry.value.variables,
            }),
        );
    }

    if let Some(operation_name) = &entry.value.operation_name {
        properties.insert(
            "operationName".to_string(),
            json!({
                "type": "string",
                "example": operation_name,
            }),
        );
    }

    json!({
        "type": "object",
        "required": ["query"],
        "properties": properties,
    })
}

/// The response component. Property types come from the declared GraphQL types rather
/// than from the mocked values, which are often `null`.
fn response_schema(field_name: &str, entry: &ExampleEntry) -> Value {
    let data_properties: Map<String, Value> = entry
        .response
        .get("data")
        .and_then(Value::as_object)
        .map(|data| {
            data.keys()
                .map(|key| {
                    let kind = declared_kind(field_name, &entry.return_type, key);
                    (key.clone(), json!({ "type": kind }))
                })
                .collect()
        })
        .unwrap_or_default();

    json!({
        "type": "object",
        "properties": {
            "data": {
                "type": "object",
                "properties": data_properties,
            }
        },
        "example": entry.response,
    })
}

fn declared_kind(field_name: &str, return_type: &TypeRef, key: &str) -> PrimitiveKind {
    match return_type.nullable() {
        TypeRef::Object(fields) => fields
            .iter()
            .find(|field| field.name == key)
            .map(|field| classify(&field.ty))
            .unwrap_or(PrimitiveKind::Unknown),
        _ if key == field_name => classify(return_type),
        _ => PrimitiveKind::Unknown,
    }
}
