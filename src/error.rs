// src/error.rs
// Error taxonomy for the ingestion pipeline

use thiserror::Error;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors produced by the ingestion pipeline.
///
/// Only `MissingEnv` is allowed to terminate the process; everything else is
/// caught at file or chunk level by the callers and logged.
#[derive(Debug, Error)]
pub enum IngestError {
    // Configuration
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    // Extraction
    #[error("Could not extract text from {path}: {reason}")]
    TextExtraction { path: String, reason: String },

    #[error("Could not extract metadata: {0}")]
    MetadataExtraction(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    // Remote store
    #[error("Storage upload failed for {path}: {reason}")]
    StorageUpload { path: String, reason: String },

    #[error("Insert into {table} returned no rows")]
    InsertReturnedNothing { table: String },

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model response contained no {0}")]
    EmptyModelResponse(&'static str),

    // Transport & encoding
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
