use apollo_compiler::Schema;
use apollo_compiler::validation::WithErrors;
use graphql_openapi::GenerationError;

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Could not parse GraphQL schema: {0}")]
    GraphQLSchema(Box<WithErrors<Schema>>),

    #[error("Failed to generate OpenAPI document: {0}")]
    Generation(#[from] GenerationError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CORS configuration: {0}")]
    Cors(String),

    #[error("No valid schema was supplied")]
    NoSchema,
}
