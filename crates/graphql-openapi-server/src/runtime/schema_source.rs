use std::path::PathBuf;

use apollo_compiler::Schema;
use apollo_compiler::validation::Valid;
use graphql_openapi::{OpenApiDocument, Options};
use graphql_openapi_server::errors::ServerError;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

/// Source for the GraphQL schema to describe
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SchemaSource {
    /// Path to a GraphQL SDL file
    pub path: Option<PathBuf>,
}

impl SchemaSource {
    /// Read and validate the schema
    pub fn load(&self) -> Result<Valid<Schema>, ServerError> {
        let path = self.path.as_ref().ok_or(ServerError::NoSchema)?;
        debug!(path = %path.display(), "Loading schema");

        let sdl = std::fs::read_to_string(path)?;
        Schema::parse_and_validate(sdl, path).map_err(|e| ServerError::GraphQLSchema(Box::new(e)))
    }

    /// Load the schema and generate its OpenAPI document
    pub fn document(&self, options: &Options) -> Result<OpenApiDocument, ServerError> {
        let schema = self.load()?;
        Ok(graphql_openapi::generate(&schema, options)?)
    }
}
