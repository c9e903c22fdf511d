//! Runtime settings — read from the environment (and `.env`) at startup.
//!
//! Extra restricted terms live in a plain-text file:
//!   Linux:   ~/.config/safeguard-editor/keywords.txt
//!   macOS:   ~/Library/Application Support/safeguard-editor/keywords.txt
//!   Windows: %APPDATA%/safeguard-editor/keywords.txt
//! or wherever `SAFEGUARD_KEYWORDS` points.

use std::path::PathBuf;
use std::time::Duration;

use crate::llm::prompts::DEFAULT_MODEL;
use crate::safety::catalog::{self, Catalog};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read keyword file {}: {source}", path.display())]
    KeywordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Settings for the generative rewrite collaborator.
#[derive(Debug, Clone)]
pub struct RewriteSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Everything the front end needs, resolved once.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub rewrite: RewriteSettings,
    pub keywords_path: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("[CONFIG] Loaded {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("[CONFIG] Ignoring unreadable .env: {}", e),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));

        let timeout = match non_empty("SAFEGUARD_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidValue {
                    name: "SAFEGUARD_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let keywords_path = non_empty("SAFEGUARD_KEYWORDS")
            .map(PathBuf::from)
            .or_else(|| Some(default_keywords_path()).filter(|p| p.exists()));

        Ok(Self {
            rewrite: RewriteSettings {
                api_key,
                model: non_empty("SAFEGUARD_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base: non_empty("SAFEGUARD_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout,
            },
            keywords_path,
        })
    }

    /// The catalog to match against: built-in terms, plus the keyword file
    /// when one is configured.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.keywords_path {
            Some(path) => {
                let extra = catalog::load_keyword_file(path)?;
                Ok(Catalog::with_extra(extra))
            }
            None => Ok(Catalog::builtin().clone()),
        }
    }
}

/// Base directory for user configuration.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("safeguard-editor")
}

/// Default location of the extra keyword file.
pub fn default_keywords_path() -> PathBuf {
    config_dir().join("keywords.txt")
}
