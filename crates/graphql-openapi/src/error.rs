use apollo_compiler::Schema;
use apollo_compiler::validation::WithErrors;

/// An error that aborts document generation
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid GraphQL schema: {0}")]
    InvalidSchema(String),

    #[error("Unknown operation kind: {0}")]
    UnknownOperationKind(String),

    #[error("Could not parse GraphQL schema: {0}")]
    GraphQLSchema(Box<WithErrors<Schema>>),
}
