//! DocumentContextProvider trait definition.
//!
//! Text extraction and vector search live outside this system; the core
//! only consumes their results as grounding text for a chat turn.

use std::path::Path;

use parlance_types::document::{DocumentError, FileType};

/// Result of processing an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// Full extracted text.
    pub text: String,
    /// Handle to an externally-managed vector index, when one was built.
    pub index_path: Option<String>,
}

/// Trait for the external document processing subsystem.
///
/// An unsupported file type is `DocumentError::UnsupportedFormat`, never a
/// silent empty result.
pub trait DocumentContextProvider: Send + Sync {
    /// Extract text from a file and optionally build a query index for it.
    fn process(
        &self,
        path: &Path,
        file_type: FileType,
    ) -> impl std::future::Future<Output = Result<ProcessedDocument, DocumentError>> + Send;

    /// Query a previously built index for passages relevant to `query`,
    /// ranked most relevant first.
    fn query(
        &self,
        index_path: &str,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, DocumentError>> + Send;
}
