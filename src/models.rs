// src/models.rs
// Persistence records for the documents and document_chunks tables

use serde::Serialize;
use serde_json::Value;

/// Category assigned to every ingested decision
pub const DOCUMENT_CATEGORY: &str = "regulation";

/// Tags for documents ingested from raw PDFs
pub const PDF_TAGS: [&str; 2] = ["putusan", "tpk"];

/// Tags for documents imported from pre-extracted metadata JSON
pub const JSON_TAGS: [&str; 2] = ["putusan", "pidana"];

/// One row of the documents table.
///
/// Carries the full structured-extraction result twice: as the nested
/// `metadata` object and as promoted scalar columns.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRow {
    pub title: Option<String>,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    pub file_path: String,
    pub file_url: String,
    pub metadata: Value,
    pub nomor_putusan: Option<String>,
    pub tanggal_putusan: Option<String>,
    pub pasal_disangkakan: Option<String>,
    pub hukuman_penjara: Option<String>,
    pub hukuman_denda: Option<String>,
    pub kronologis_singkat: Option<String>,
}

/// One row of the document_chunks table.
///
/// `embedding: None` marks a valid, permanently incomplete chunk; the
/// pipeline never retries it. `chunk_index` is zero-based and contiguous
/// per document in chunker order.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkRow {
    pub document_id: i64,
    pub content: String,
    pub embedding: Option<Vec<f32>>,
    pub chunk_index: usize,
}
