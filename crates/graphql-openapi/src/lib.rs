//! Library for describing a GraphQL API as an OpenAPI document.
//!
//! Every field of the Query and Mutation root types is exposed as its own `POST` path with
//! a worked example: a GraphQL document selecting the field, the variables it takes, and a
//! mocked response. This lets REST-oriented tooling (API gateways, documentation viewers,
//! tool-calling agents) consume a GraphQL endpoint one operation at a time.
//!
//! Generation happens in four steps:
//!
//! * Type references are adapted once into a closed [`TypeRef`](type_ref::TypeRef)
//! * The [classifier](classify) maps a type onto an OpenAPI primitive type name
//! * The [synthesizer](examples) builds an example request and a [mocked](mock) response
//!   for each root field
//! * The [assembler](document) turns the examples into the final document
//!
//! The output only depends on the schema and the [`Options`], so the same inputs always
//! produce the same document.

use apollo_compiler::Schema;
use tracing::info;

pub mod classify;
pub mod document;
pub mod error;
pub mod examples;
pub mod mock;
mod options;
pub mod type_ref;

pub use document::{OpenApiDocument, assemble};
pub use error::GenerationError;
pub use examples::{ExampleEntry, OperationKind, Synthesizer, build_examples};
pub use options::{Options, RouteTag};

/// Generate the OpenAPI document for a schema
pub fn generate(schema: &Schema, options: &Options) -> Result<OpenApiDocument, GenerationError> {
    let examples = Synthesizer::new(schema, &options.example_values)
        .kinds(&options.operations)
        .include_operation_name(options.include_operation_name)
        .build()?;

    let document = assemble(&examples, options);
    info!(
        paths = document.paths.len(),
        title = %document.info.title,
        "Generated OpenAPI document"
    );

    Ok(document)
}

/// Parse and validate a schema from SDL, then generate its OpenAPI document
pub fn generate_from_sdl(
    sdl: &str,
    path: &str,
    options: &Options,
) -> Result<OpenApiDocument, GenerationError> {
    let schema = Schema::parse_and_validate(sdl, path)
        .map_err(|e| GenerationError::GraphQLSchema(Box::new(e)))?;
    generate(&schema, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_SCHEMA: &str = include_str!("testdata/schema.graphql");

    #[test]
    fn it_is_deterministic() {
        let options = Options {
            example_values: [("term".to_string(), json!("rust"))].into(),
            ..Default::default()
        };

        let first = generate_from_sdl(TEST_SCHEMA, "schema.graphql", &options).unwrap();
        let second = generate_from_sdl(TEST_SCHEMA, "schema.graphql", &options).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn it_exposes_one_path_per_root_field() {
        let document = generate_from_sdl(TEST_SCHEMA, "schema.graphql", &Options::default())
            .unwrap();

        assert_eq!(
            document.paths.keys().collect::<Vec<_>>(),
            vec![
                "/hello",
                "/count",
                "/ratio",
                "/enabled",
                "/id",
                "/tags",
                "/post",
                "/posts",
                "/status",
                "/search",
                "/now",
                "/updateMessage",
                "/createPost",
            ]
        );
        assert_eq!(document.components.schemas.len(), document.paths.len());
        assert!(document.components.schemas.contains_key("createPostResponse"));
    }

    #[test]
    fn it_only_describes_requested_operation_kinds() {
        let options = Options {
            operations: vec![OperationKind::Query],
            ..Default::default()
        };
        let document = generate_from_sdl(TEST_SCHEMA, "schema.graphql", &options).unwrap();

        assert!(!document.paths.contains_key("/updateMessage"));
        assert_eq!(
            document.paths["/hello"]["post"]["summary"],
            json!("Example Query")
        );
    }

    #[test]
    fn it_reports_invalid_sdl() {
        let result = generate_from_sdl("type Query {", "schema.graphql", &Options::default());

        assert!(matches!(result, Err(GenerationError::GraphQLSchema(_))));
    }
}
