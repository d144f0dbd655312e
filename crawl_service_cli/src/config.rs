//! Resolves the scrape service credentials.
//!
//! Each key is looked up in the secrets file first and in the process
//! environment second. `.env` files are loaded by the binaries before this
//! runs, so they count as environment.

use std::path::{Path, PathBuf};

use config::{Config, File};
use url::Url;

use crate::error::ConfigError;
use crate::firecrawl::DEFAULT_API_URL;

pub const API_KEY_VAR: &str = "FIRECRAWL_API_KEY";
pub const API_URL_VAR: &str = "FIRECRAWL_API_URL";
pub const SECRETS_FILE_VAR: &str = "CRAWLER_SECRETS_FILE";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_url: Url,
    pub secrets_file: PathBuf,
}

impl Settings {
    /// Resolve against the real environment.
    pub fn load(secrets_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve(secrets_file, |key| std::env::var(key).ok())
    }

    pub fn resolve<F>(secrets_file: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets_file = secrets_file
            .or_else(|| env(SECRETS_FILE_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_FILE));
        let secrets = read_secrets(&secrets_file);

        let lookup = |key: &str| {
            secrets
                .as_ref()
                .and_then(|s| secret_value(s, key))
                .or_else(|| env(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = lookup(API_KEY_VAR).ok_or_else(|| ConfigError::MissingApiKey {
            secrets_file: secrets_file.display().to_string(),
        })?;

        let raw_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidApiUrl {
            value: raw_url.clone(),
            source,
        })?;

        Ok(Self {
            api_key,
            api_url,
            secrets_file,
        })
    }
}

/// A missing or unreadable secrets file is not an error; the environment is
/// consulted instead.
fn read_secrets(path: &Path) -> Option<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no secrets file");
        return None;
    }

    match Config::builder()
        .add_source(File::from(path).required(false))
        .build()
    {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable secrets file");
            None
        }
    }
}

fn secret_value(cfg: &Config, key: &str) -> Option<String> {
    cfg.get_string(key)
        .or_else(|_| cfg.get_string(&key.to_ascii_lowercase()))
        .ok()
}
