//! SQLite document repository implementation.
//!
//! Implements `DocumentRepository` from `parlance-core` in the same shape as
//! the chat repository: raw queries, a private Row struct, reader for SELECTs,
//! writer for mutations.

use chrono::Utc;
use parlance_core::document::repository::DocumentRepository;
use parlance_types::document::{Document, DocumentId, FileType};
use parlance_types::error::RepositoryError;
use sqlx::Row;

use super::chat::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `DocumentRepository`.
pub struct SqliteDocumentRepository {
    pool: DatabasePool,
}

impl SqliteDocumentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Document.
struct DocumentRow {
    id: i64,
    filename: String,
    content: String,
    embedding_path: Option<String>,
    file_type: String,
    uploaded_at: String,
}

impl DocumentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            filename: row.try_get("filename")?,
            content: row.try_get("content")?,
            embedding_path: row.try_get("embedding_path")?,
            file_type: row.try_get("file_type")?,
            uploaded_at: row.try_get("uploaded_at")?,
        })
    }

    fn into_document(self) -> Result<Document, RepositoryError> {
        let file_type: FileType = self
            .file_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let uploaded_at = parse_datetime(&self.uploaded_at)?;

        Ok(Document {
            id: self.id,
            filename: self.filename,
            content: self.content,
            file_type,
            embedding_path: self.embedding_path,
            uploaded_at,
        })
    }
}

impl DocumentRepository for SqliteDocumentRepository {
    async fn save_document(
        &self,
        filename: &str,
        content: &str,
        file_type: FileType,
        embedding_path: Option<&str>,
    ) -> Result<DocumentId, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO documents (filename, content, embedding_path, file_type, uploaded_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(filename)
        .bind(content)
        .bind(embedding_path)
        .bind(file_type.to_string())
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn get_document(&self, document_id: DocumentId) -> Result<Document, RepositoryError> {
        let row = sqlx::query("SELECT * FROM documents WHERE id = ?")
            .bind(document_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let doc_row = DocumentRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                doc_row.into_document()
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}
