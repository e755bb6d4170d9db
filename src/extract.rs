// src/extract.rs
use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, IngestResult};

/// Extract plain text from a PDF file.
///
/// A corrupt or unreadable file, and a PDF that yields no text at all, are
/// both extraction failures; callers treat them as "skip this document".
pub fn extract_text(path: &Path) -> IngestResult<String> {
    let text = pdf_extract::extract_text(path).map_err(|e| IngestError::TextExtraction {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if text.trim().is_empty() {
        return Err(IngestError::TextExtraction {
            path: path.display().to_string(),
            reason: "no extractable text".to_string(),
        });
    }

    debug!(path = %path.display(), chars = text.len(), "Extracted PDF text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unreadable_file_is_extraction_failure() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"this is not a pdf").expect("write");

        match extract_text(file.path()) {
            Err(IngestError::TextExtraction { .. }) => {}
            other => panic!("Expected TextExtraction error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_file_is_extraction_failure() {
        let result = extract_text(Path::new("/nonexistent/decision.pdf"));
        assert!(matches!(result, Err(IngestError::TextExtraction { .. })));
    }
}
