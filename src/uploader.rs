// src/uploader.rs
// Per-document orchestration: extract -> metadata -> storage -> rows

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::chunker::{self, chunk_text};
use crate::error::{IngestError, IngestResult};
use crate::extract;
use crate::llm::LlmProvider;
use crate::metadata::{self, DecisionMetadata};
use crate::models::{ChunkRow, DocumentRow, DOCUMENT_CATEGORY, JSON_TAGS, PDF_TAGS};
use crate::store::{DocumentStore, STORAGE_BUCKET};
use crate::truncate::{self, truncate_text};

/// What to do with a chunk whose embedding call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedFailurePolicy {
    /// Drop the chunk row entirely; the document keeps its remaining chunks.
    #[default]
    Skip,
    /// Persist the chunk with a null embedding at its original index.
    StoreNull,
}

/// Outcome of one successfully ingested file.
#[derive(Debug)]
pub struct UploadedDocument {
    pub document_id: i64,
    pub row: DocumentRow,
    pub file_url: String,
    pub chunks_inserted: usize,
    pub chunks_skipped: usize,
}

/// Orchestrates ingestion of a single document against injected
/// store and model collaborators.
pub struct DocumentUploader<'a> {
    store: &'a dyn DocumentStore,
    llm: &'a dyn LlmProvider,
    policy: EmbedFailurePolicy,
    chunk_size: usize,
    chunk_overlap: usize,
    embed_max_chars: usize,
}

impl<'a> DocumentUploader<'a> {
    pub fn new(store: &'a dyn DocumentStore, llm: &'a dyn LlmProvider) -> Self {
        let mut chunk_size = chunker::chunk_size_from_env();
        let mut chunk_overlap = chunker::chunk_overlap_from_env();
        if chunk_overlap >= chunk_size {
            warn!(
                chunk_size,
                chunk_overlap, "Invalid chunk geometry from environment; using defaults"
            );
            chunk_size = chunker::DEFAULT_CHUNK_SIZE;
            chunk_overlap = chunker::DEFAULT_CHUNK_OVERLAP;
        }

        Self {
            store,
            llm,
            policy: EmbedFailurePolicy::default(),
            chunk_size,
            chunk_overlap,
            embed_max_chars: truncate::embed_max_chars_from_env(),
        }
    }

    pub fn with_policy(mut self, policy: EmbedFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_chunking(mut self, size: usize, overlap: usize) -> Self {
        assert!(overlap < size, "chunk overlap must be smaller than chunk size");
        self.chunk_size = size;
        self.chunk_overlap = overlap;
        self
    }

    pub fn with_embed_limit(mut self, max_chars: usize) -> Self {
        self.embed_max_chars = max_chars;
        self
    }

    /// Ingest one PDF: extract text, then run the upload state machine.
    pub async fn ingest_pdf(&self, path: &Path) -> IngestResult<UploadedDocument> {
        let text = extract::extract_text(path)?;
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        self.ingest_extracted(&file_name, bytes, &text).await
    }

    /// Upload state machine for already-extracted text, terminal on the
    /// first hard failure. The document insert is the point of no return:
    /// after it, per-chunk problems degrade the document instead of
    /// aborting it.
    pub async fn ingest_extracted(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        text: &str,
    ) -> IngestResult<UploadedDocument> {
        let meta = metadata::extract_metadata(self.llm, text).await?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let storage_path = format!("documents/{timestamp}_{file_name}");
        self.store
            .upload_object(STORAGE_BUCKET, &storage_path, bytes)
            .await?;
        let file_url = self.store.public_url(STORAGE_BUCKET, &storage_path);

        // The nested metadata blob keeps the retrieval URL alongside the
        // extracted fields.
        let mut meta_value = serde_json::to_value(&meta)?;
        if let Value::Object(map) = &mut meta_value {
            map.insert("file_url".to_string(), Value::String(file_url.clone()));
        }

        let row = DocumentRow {
            title: Some(meta.title()),
            content: text.to_string(),
            category: DOCUMENT_CATEGORY.to_string(),
            tags: PDF_TAGS.iter().map(|t| t.to_string()).collect(),
            date_added: None,
            file_path: storage_path,
            file_url: file_url.clone(),
            metadata: meta_value,
            nomor_putusan: meta.nomor_putusan.clone(),
            tanggal_putusan: meta.tanggal_putusan.clone(),
            pasal_disangkakan: meta.pasal_disangkakan.clone(),
            hukuman_penjara: meta.hukuman_penjara.clone(),
            hukuman_denda: meta.hukuman_denda.clone(),
            kronologis_singkat: meta.kronologis_singkat.clone(),
        };

        let document_id = self.store.insert_document(&row).await?;
        info!(document_id, title = %meta.title(), "Inserted document row");

        let chunks = chunk_text(text, self.chunk_size, self.chunk_overlap);
        let total = chunks.len();
        let mut inserted = 0;
        let mut skipped = 0;
        for (index, content) in chunks.into_iter().enumerate() {
            if self.persist_chunk(document_id, index, content).await {
                inserted += 1;
            } else {
                skipped += 1;
            }
        }
        info!(document_id, inserted, skipped, total, "Chunk upload complete");

        Ok(UploadedDocument {
            document_id,
            row,
            file_url,
            chunks_inserted: inserted,
            chunks_skipped: skipped,
        })
    }

    /// Embed and insert one chunk; true when a row was persisted. Failures
    /// never abort the remaining chunks.
    async fn persist_chunk(&self, document_id: i64, index: usize, content: String) -> bool {
        let embedding = match self.llm.embed(&content).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(
                    chunk_index = index,
                    error = %e,
                    "Embedding failed; continuing with remaining chunks"
                );
                match self.policy {
                    EmbedFailurePolicy::Skip => return false,
                    EmbedFailurePolicy::StoreNull => None,
                }
            }
        };

        let row = ChunkRow {
            document_id,
            content,
            embedding,
            chunk_index: index,
        };
        match self.store.insert_chunk(&row).await {
            Ok(()) => true,
            Err(e) => {
                warn!(chunk_index = index, error = %e, "Chunk insert failed; chunk dropped");
                false
            }
        }
    }

    /// Ingest one pre-extracted metadata JSON file: no text extraction, no
    /// chat call. The full kronologis becomes the document content; its
    /// truncation becomes the single chunk at index 0.
    pub async fn ingest_json(&self, path: &Path) -> IngestResult<UploadedDocument> {
        let raw = fs::read_to_string(path)?;
        let meta: DecisionMetadata = serde_json::from_str(&raw)?;

        let full_kronologis = meta.kronologis_singkat.clone().unwrap_or_default();
        let truncated = truncate_text(&full_kronologis, self.embed_max_chars);

        let file_path = meta
            .extra
            .get("file_pdf")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let file_url = meta
            .extra
            .get("link_gdrive")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let row = DocumentRow {
            title: meta.nomor_putusan.clone(),
            content: full_kronologis,
            category: DOCUMENT_CATEGORY.to_string(),
            tags: JSON_TAGS.iter().map(|t| t.to_string()).collect(),
            date_added: Some(Utc::now().to_rfc3339()),
            file_path,
            file_url: file_url.clone(),
            metadata: serde_json::to_value(&meta)?,
            nomor_putusan: meta.nomor_putusan.clone(),
            tanggal_putusan: meta.tanggal_putusan.clone(),
            pasal_disangkakan: meta.pasal_disangkakan.clone(),
            hukuman_penjara: meta.hukuman_penjara.clone(),
            hukuman_denda: meta.hukuman_denda.clone(),
            kronologis_singkat: meta.kronologis_singkat.clone(),
        };

        let document_id = self.store.insert_document(&row).await?;
        info!(document_id, file = %path.display(), "Inserted document row");

        let mut inserted = 0;
        let mut skipped = 0;
        match self.llm.embed(&truncated).await {
            Ok(embedding) => {
                let chunk = ChunkRow {
                    document_id,
                    content: truncated,
                    embedding: Some(embedding),
                    chunk_index: 0,
                };
                match self.store.insert_chunk(&chunk).await {
                    Ok(()) => inserted = 1,
                    // An empty representation is a hard failure for the file,
                    // even though the document row is already committed. The
                    // document is left orphaned; intent of the original
                    // pipeline, kept as-is.
                    Err(e @ IngestError::InsertReturnedNothing { .. }) => return Err(e),
                    Err(e) => {
                        warn!(
                            file = %path.display(),
                            error = %e,
                            "Chunk insert failed; document kept without chunks"
                        );
                        skipped = 1;
                    }
                }
            }
            Err(e) => {
                warn!(
                    file = %path.display(),
                    error = %e,
                    "Embedding failed; document kept without chunks"
                );
                skipped = 1;
            }
        }

        Ok(UploadedDocument {
            document_id,
            row,
            file_url,
            chunks_inserted: inserted,
            chunks_skipped: skipped,
        })
    }
}
