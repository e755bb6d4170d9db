// src/main.rs
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use putusan_ingest::batch;
use putusan_ingest::config::Config;
use putusan_ingest::llm::OpenAiClient;
use putusan_ingest::reset;
use putusan_ingest::store::SupabaseClient;
use putusan_ingest::uploader::DocumentUploader;

/// Upload legal-decision documents to Supabase
#[derive(Parser, Debug)]
#[command(name = "putusan-ingest", version)]
struct Cli {
    /// Folder containing pre-extracted metadata JSON files to upload
    #[arg(long, value_name = "PATH")]
    json_folder: Option<PathBuf>,

    /// Folder containing PDF files to upload
    #[arg(long, value_name = "PATH")]
    folder: Option<PathBuf>,

    /// Delete all rows from the chunk table, then the document table
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if cli.json_folder.is_none() && cli.folder.is_none() && !cli.reset {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = SupabaseClient::new(&config.supabase_url, &config.supabase_service_key);
    let llm = OpenAiClient::new(&config.openai_api_key);

    if cli.reset {
        if let Err(e) = reset::reset_tables(&store).await {
            eprintln!("Reset failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    let uploader = DocumentUploader::new(&store, &llm);

    let result = if let Some(folder) = cli.json_folder.as_deref() {
        batch::process_json_folder(&uploader, folder).await
    } else if let Some(folder) = cli.folder.as_deref() {
        batch::process_pdf_folder(&uploader, folder).await
    } else {
        // --reset alone is a complete run
        return ExitCode::SUCCESS;
    };

    match result {
        Ok(summary) => {
            println!(
                "Processing complete. Successfully uploaded {}/{} files",
                summary.succeeded, summary.total
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Batch failed: {e}");
            ExitCode::FAILURE
        }
    }
}
