//! Document types for Parlance.
//!
//! A `Document` is an uploaded file whose extracted text can be folded
//! into a chat turn. Documents are stored independently of messages;
//! a message references a document by id and never owns it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Row id of a document (SQLite AUTOINCREMENT).
pub type DocumentId = i64;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Pdf => write!(f, "pdf"),
            FileType::Docx => write!(f, "docx"),
            FileType::Txt => write!(f, "txt"),
        }
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(FileType::Pdf),
            "docx" => Ok(FileType::Docx),
            "txt" => Ok(FileType::Txt),
            other => Err(format!("unsupported file type: '{other}'")),
        }
    }
}

/// A stored document with its extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    /// Full extracted text, stored at upload time.
    pub content: String,
    pub file_type: FileType,
    /// Path to an externally-managed vector index, when one was built.
    pub embedding_path: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Errors from document extraction and lookup.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported file type: '{0}'")]
    UnsupportedFormat(String),

    #[error("document not found")]
    NotFound,

    #[error("document provider error: {0}")]
    Provider(String),
}
