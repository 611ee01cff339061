//! Runtime configuration from environment variables.
//!
//! Variables may also come from a `.env` file in the working directory,
//! loaded with `dotenvy` before anything is read.

use std::collections::HashMap;
use std::time::Duration;

use crate::changes::Language;

/// Backend URL used when `COEDIT_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Model used when `COEDIT_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the backend service.
    pub backend_url: String,
    /// Model id sent with generation requests until another is selected.
    pub model_id: String,
    /// Language sent with generation requests when no file is open.
    pub language: Language,
    /// Write generated code to the open file immediately.
    pub auto_apply: bool,
    /// Per-request timeout for backend calls.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            model_id: DEFAULT_MODEL.to_string(),
            language: Language::TypeScript,
            auto_apply: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, String> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(format!("Failed to load .env: {e}"));
            }
        }
        Self::from_vars(&std::env::vars().collect())
    }

    /// Builds a config from an explicit variable map.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(url) = vars.get("COEDIT_BACKEND_URL") {
            config.backend_url = url.clone();
        }
        if let Some(model) = vars.get("COEDIT_MODEL") {
            config.model_id = model.clone();
        }
        if let Some(language) = vars.get("COEDIT_LANGUAGE") {
            config.language = language.parse()?;
        }
        if let Some(flag) = vars.get("COEDIT_AUTO_APPLY") {
            config.auto_apply = parse_bool(flag)
                .ok_or_else(|| format!("COEDIT_AUTO_APPLY must be true or false, got {flag:?}"))?;
        }
        if let Some(secs) = vars.get("COEDIT_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| format!("COEDIT_TIMEOUT_SECS must be a number of seconds: {e}"))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
