// src/store.rs
// Remote document store abstraction + Supabase REST implementation

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{IngestError, IngestResult};
use crate::models::{ChunkRow, DocumentRow};

pub const DOCUMENTS_TABLE: &str = "documents";
pub const CHUNKS_TABLE: &str = "document_chunks";

/// Storage bucket holding the original decision PDFs
pub const STORAGE_BUCKET: &str = "documents";

/// Remote store trait - table inserts, binary-object upload, table wipes.
/// Implemented by `SupabaseClient` in production and by in-memory fakes in
/// the integration tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document row; returns the generated id all its chunks use.
    async fn insert_document(&self, row: &DocumentRow) -> IngestResult<i64>;

    /// Insert a chunk row. The owning document row must already exist.
    async fn insert_chunk(&self, row: &ChunkRow) -> IngestResult<()>;

    /// Upload a binary object into a storage bucket.
    async fn upload_object(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> IngestResult<()>;

    /// Public retrieval URL for an uploaded object. Pure URL construction.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Delete every row of a table.
    async fn delete_all(&self, table: &str) -> IngestResult<()>;
}

/// Supabase client using the PostgREST and Storage HTTP surfaces directly.
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    /// POST a row and return the representation the store echoes back.
    async fn insert_rows<T>(&self, table: &str, row: &T) -> IngestResult<Vec<Value>>
    where
        T: Serialize + Sync,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .auth(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DocumentStore for SupabaseClient {
    async fn insert_document(&self, row: &DocumentRow) -> IngestResult<i64> {
        let rows = self.insert_rows(DOCUMENTS_TABLE, row).await?;
        let id = rows
            .first()
            .and_then(|r| r.get("id"))
            .and_then(Value::as_i64)
            .ok_or_else(|| IngestError::InsertReturnedNothing {
                table: DOCUMENTS_TABLE.to_string(),
            })?;

        debug!(document_id = id, "Inserted document row");
        Ok(id)
    }

    async fn insert_chunk(&self, row: &ChunkRow) -> IngestResult<()> {
        let rows = self.insert_rows(CHUNKS_TABLE, row).await?;
        if rows.is_empty() {
            return Err(IngestError::InsertReturnedNothing {
                table: CHUNKS_TABLE.to_string(),
            });
        }

        debug!(
            document_id = row.document_id,
            chunk_index = row.chunk_index,
            "Inserted chunk row"
        );
        Ok(())
    }

    async fn upload_object(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> IngestResult<()> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let response = self
            .auth(self.client.post(&url))
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::StorageUpload {
                path: path.to_string(),
                reason: format!("status {status}: {body}"),
            });
        }

        info!(bucket, path, "Uploaded object to storage");
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
    }

    async fn delete_all(&self, table: &str) -> IngestResult<()> {
        // PostgREST refuses an unfiltered DELETE; id=not.is.null matches all
        // rows whatever the key type.
        let url = format!("{}/rest/v1/{}?id=not.is.null", self.base_url, table);
        let response = self.auth(self.client.delete(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Api { status, body });
        }

        info!(table, "Cleared table");
        Ok(())
    }
}
