use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// What happens to uploaded files once a match request has finished with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRetention {
    /// Keep every upload in the upload directory (default).
    Retain,
    /// Remove both uploads after the request completes, successful or not.
    Delete,
}

impl FromStr for UploadRetention {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" | "keep" => Ok(UploadRetention::Retain),
            "delete" => Ok(UploadRetention::Delete),
            other => bail!("UPLOAD_RETENTION must be 'retain' or 'delete', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub upload_retention: UploadRetention,
    pub max_upload_bytes: usize,
    pub microsoft_app_id: Option<String>,
    pub microsoft_app_password: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 5000)?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            upload_retention: parse_env("UPLOAD_RETENTION", UploadRetention::Retain)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            microsoft_app_id: optional_env("MICROSOFT_APP_ID"),
            microsoft_app_password: optional_env("MICROSOFT_APP_PASSWORD"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
