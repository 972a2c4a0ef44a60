//! DocumentRepository trait definition.

use parlance_types::document::{Document, DocumentId, FileType};
use parlance_types::error::RepositoryError;

/// Repository trait for stored documents.
///
/// Implementations live in parlance-infra (e.g., `SqliteDocumentRepository`).
pub trait DocumentRepository: Send + Sync {
    /// Store a document's extracted text and return its id.
    fn save_document(
        &self,
        filename: &str,
        content: &str,
        file_type: FileType,
        embedding_path: Option<&str>,
    ) -> impl std::future::Future<Output = Result<DocumentId, RepositoryError>> + Send;

    /// Fetch a document by id. `NotFound` if missing.
    fn get_document(
        &self,
        document_id: DocumentId,
    ) -> impl std::future::Future<Output = Result<Document, RepositoryError>> + Send;
}
