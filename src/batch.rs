// src/batch.rs
// Folder drivers: one uploader invocation per file, batch never aborts

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::error::IngestResult;
use crate::uploader::DocumentUploader;

/// Aggregate result of one folder run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
}

/// Top-level files in `folder` with the given extension, case-insensitive,
/// in sorted order for deterministic batch runs.
fn files_with_extension(folder: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(extension))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Process every PDF in `folder`. One file's failure never stops the batch.
pub async fn process_pdf_folder(
    uploader: &DocumentUploader<'_>,
    folder: &Path,
) -> IngestResult<BatchSummary> {
    fs::create_dir_all(folder)?;

    let files = files_with_extension(folder, "pdf");
    info!(
        folder = %folder.display(),
        count = files.len(),
        "Found PDF files to process"
    );

    let mut summary = BatchSummary {
        succeeded: 0,
        total: files.len(),
    };
    for (i, path) in files.iter().enumerate() {
        info!(file = %path.display(), "Processing file {}/{}", i + 1, summary.total);
        match uploader.ingest_pdf(path).await {
            Ok(document) => {
                summary.succeeded += 1;
                info!(
                    file = %path.display(),
                    nomor_putusan = ?document.row.nomor_putusan,
                    tanggal_putusan = ?document.row.tanggal_putusan,
                    pasal_disangkakan = ?document.row.pasal_disangkakan,
                    hukuman_penjara = ?document.row.hukuman_penjara,
                    hukuman_denda = ?document.row.hukuman_denda,
                    chunks = document.chunks_inserted,
                    url = %document.file_url,
                    "Successfully uploaded document"
                );
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "Failed to upload document");
            }
        }
    }

    info!(
        succeeded = summary.succeeded,
        total = summary.total,
        "PDF batch complete"
    );
    Ok(summary)
}

/// Process every metadata JSON file in `folder`.
pub async fn process_json_folder(
    uploader: &DocumentUploader<'_>,
    folder: &Path,
) -> IngestResult<BatchSummary> {
    let files = files_with_extension(folder, "json");
    info!(
        folder = %folder.display(),
        count = files.len(),
        "Found JSON files to process"
    );

    let mut summary = BatchSummary {
        succeeded: 0,
        total: files.len(),
    };
    for (i, path) in files.iter().enumerate() {
        info!(file = %path.display(), "Processing file {}/{}", i + 1, summary.total);
        match uploader.ingest_json(path).await {
            Ok(document) => {
                summary.succeeded += 1;
                if document.chunks_skipped > 0 {
                    warn!(
                        file = %path.display(),
                        "Uploaded metadata without embedding"
                    );
                } else {
                    info!(
                        file = %path.display(),
                        document_id = document.document_id,
                        "Successfully uploaded metadata and embedding"
                    );
                }
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "Failed to upload metadata");
            }
        }
    }

    info!(
        succeeded = summary.succeeded,
        total = summary.total,
        "JSON batch complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_extension_match_is_case_insensitive_and_sorted() {
        let dir = tempfile::tempdir().expect("temp dir");
        for name in ["b.PDF", "a.pdf", "notes.txt", "c.pdf.bak"] {
            let mut file = File::create(dir.path().join(name)).expect("create");
            file.write_all(b"x").expect("write");
        }
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        File::create(dir.path().join("nested/d.pdf")).expect("create");

        let files = files_with_extension(dir.path(), "pdf");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }
}
