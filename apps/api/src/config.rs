use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_SECRETS_PATH: &str = ".secrets/secrets.toml";

/// Application configuration loaded from environment variables and the secrets file.
///
/// Nothing here is required: a missing Gemini credential is reported per request,
/// so the service starts without one and accepts a key entered for the session.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_model: String,
    pub secrets_path: PathBuf,
    /// Credential from the secrets store, falling back to `GEMINI_API_KEY`.
    pub gemini_api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let secrets_path = std::env::var("SECRETS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH));

        let gemini_api_key = first_present([
            load_secret_key(&secrets_path),
            std::env::var(API_KEY_VAR).ok(),
        ]);

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            secrets_path,
            gemini_api_key,
        })
    }

    /// Resolves the credential for one call: secrets store, then environment,
    /// then the key the user entered for this session.
    pub fn resolve_api_key(&self, session_key: Option<&str>) -> Option<String> {
        first_present([
            self.gemini_api_key.clone(),
            session_key.map(str::to_string),
        ])
    }

    pub fn has_configured_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

/// Reads `GEMINI_API_KEY` from a TOML secrets file.
/// A missing file is normal; a malformed one is logged and ignored.
fn load_secret_key(path: &Path) -> Option<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return None,
    };

    match toml::from_str::<SecretsFile>(&raw) {
        Ok(secrets) => {
            if secrets.gemini_api_key.is_some() {
                info!("Gemini credential loaded from {}", path.display());
            }
            secrets.gemini_api_key
        }
        Err(e) => {
            warn!("Ignoring malformed secrets file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with the given configured credential and no secrets file.
    pub fn for_tests(key: Option<&str>) -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
            gemini_api_key: key.map(str::to_string),
        }
    }
}

/// Returns the first candidate that is present and not blank.
fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
