// src/config.rs
use std::env;

use crate::error::{IngestError, IngestResult};

/// Credentials and endpoints required before any processing starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub openai_api_key: String,
}

impl Config {
    /// Load configuration from the environment. A missing variable is a fatal
    /// startup error; nothing is processed without full credentials.
    pub fn from_env() -> IngestResult<Self> {
        Ok(Self {
            supabase_url: required("SUPABASE_URL")?,
            supabase_service_key: required("SUPABASE_SERVICE_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
        })
    }
}

fn required(name: &str) -> IngestResult<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(IngestError::MissingEnv(name.to_string())),
    }
}

/// Read a usize from the environment or fall back to a default.
pub fn usize_from_env(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-global environment is only touched once.
    #[test]
    fn test_from_env_round_trip() {
        env::set_var("SUPABASE_URL", "https://example.supabase.co");
        env::set_var("SUPABASE_SERVICE_KEY", "service-key");
        env::set_var("OPENAI_API_KEY", "sk-test");

        let config = Config::from_env().expect("all variables set");
        assert_eq!(config.supabase_url, "https://example.supabase.co");

        env::remove_var("OPENAI_API_KEY");
        match Config::from_env() {
            Err(IngestError::MissingEnv(name)) => assert_eq!(name, "OPENAI_API_KEY"),
            other => panic!("Expected MissingEnv, got {:?}", other.map(|_| ())),
        }

        env::remove_var("SUPABASE_URL");
        env::remove_var("SUPABASE_SERVICE_KEY");
    }

    #[test]
    fn test_usize_from_env_default_and_override() {
        assert_eq!(usize_from_env("PUTUSAN_TEST_UNSET_VALUE", 42), 42);

        env::set_var("PUTUSAN_TEST_SET_VALUE", "7");
        assert_eq!(usize_from_env("PUTUSAN_TEST_SET_VALUE", 42), 7);

        env::set_var("PUTUSAN_TEST_BAD_VALUE", "not-a-number");
        assert_eq!(usize_from_env("PUTUSAN_TEST_BAD_VALUE", 42), 42);
    }
}
