pub mod batch;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod metadata;
pub mod models;
pub mod reset;
pub mod store;
pub mod truncate;
pub mod uploader;

pub use error::{IngestError, IngestResult};
