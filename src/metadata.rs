// src/metadata.rs
// Structured metadata extraction from decision text via the chat model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::{IngestError, IngestResult};
use crate::llm::LlmProvider;

/// Number of leading characters of the document text sent to the model.
pub const METADATA_INPUT_CHARS: usize = 4000;

const SYSTEM_PROMPT: &str = r#"You are a legal document analyzer. Extract the following information from the text in a structured format.
You MUST return a valid JSON object with the following keys (use null if information is not found):

{
    "nomor_putusan": "string or null",
    "tanggal_putusan": "string or null",
    "pasal_disangkakan": "string or null",
    "hukuman_penjara": "string or null",
    "hukuman_denda": "string or null",
    "kronologis_singkat": "string or null"
}

Instructions:
1. nomor_putusan: Extract the complete decision number
2. tanggal_putusan: Extract the decision date in DD-MM-YYYY format
3. pasal_disangkakan: List all alleged criminal code articles
4. hukuman_penjara: Extract prison sentence duration
5. hukuman_denda: Extract fine amount in Rupiah
6. kronologis_singkat: Write a brief 2-3 sentence summary of the case

Return ONLY the JSON object, no additional text or explanation."#;

/// Structured extraction result for one decision.
///
/// Missing keys deserialize to `None`, so the record always carries all six
/// fields. Keys beyond the fixed six (e.g. `file_pdf` / `link_gdrive` from the
/// external extractor) pass through untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionMetadata {
    #[serde(default)]
    pub nomor_putusan: Option<String>,
    #[serde(default)]
    pub tanggal_putusan: Option<String>,
    #[serde(default)]
    pub pasal_disangkakan: Option<String>,
    #[serde(default)]
    pub hukuman_penjara: Option<String>,
    #[serde(default)]
    pub hukuman_denda: Option<String>,
    #[serde(default)]
    pub kronologis_singkat: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DecisionMetadata {
    /// Document title: the decision number, or a placeholder when absent.
    pub fn title(&self) -> String {
        self.nomor_putusan
            .clone()
            .unwrap_or_else(|| "Untitled Document".to_string())
    }
}

/// Ask the chat model for the six-field metadata record.
///
/// Best-effort structured extraction: the model output is trusted as-is
/// beyond key presence. Deterministic sampling (temperature 0); a response
/// that is not valid JSON is an extraction failure, logged and not retried.
pub async fn extract_metadata(
    llm: &dyn LlmProvider,
    text: &str,
) -> IngestResult<DecisionMetadata> {
    let excerpt: String = text.chars().take(METADATA_INPUT_CHARS).collect();
    let user_prompt = format!(
        "Please analyze this legal document and extract the required information.\n\
         Remember to return ONLY a valid JSON object with the specified keys.\n\n\
         Document text:\n{excerpt}"
    );

    debug!(excerpt_chars = excerpt.chars().count(), "Requesting metadata extraction");
    let raw = llm.chat_completion(SYSTEM_PROMPT, &user_prompt, 0.0).await?;

    match serde_json::from_str::<DecisionMetadata>(raw.trim()) {
        Ok(metadata) => {
            debug!(title = %metadata.title(), "Parsed decision metadata");
            Ok(metadata)
        }
        Err(e) => {
            error!(error = %e, response = %raw, "Model returned invalid metadata JSON");
            Err(IngestError::MetadataExtraction(e.to_string()))
        }
    }
}
