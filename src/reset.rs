// src/reset.rs
use tracing::info;

use crate::error::IngestResult;
use crate::store::{DocumentStore, CHUNKS_TABLE, DOCUMENTS_TABLE};

/// Wipe both tables. Chunks go first so document_chunks.document_id never
/// dangles; the two deletes are not transactional.
pub async fn reset_tables(store: &dyn DocumentStore) -> IngestResult<()> {
    info!(table = CHUNKS_TABLE, "Clearing table");
    store.delete_all(CHUNKS_TABLE).await?;

    info!(table = DOCUMENTS_TABLE, "Clearing table");
    store.delete_all(DOCUMENTS_TABLE).await?;

    info!("Successfully cleared all tables");
    Ok(())
}
