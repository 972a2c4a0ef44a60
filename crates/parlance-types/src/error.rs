use thiserror::Error;

use crate::document::DocumentError;
use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in parlance-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Umbrella error for session orchestration.
///
/// `SessionOrchestrator::get_response` converts every variant into a user-facing
/// error string; this type only crosses the boundary for operations that
/// propagate, such as chat creation and deletion.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
