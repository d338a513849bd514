//! Runtime configuration, resolved from the process environment.
//!
//! Key resolution order: `GEMINI_API_KEY` → `GOOGLE_API_KEY`. A missing key
//! is fatal at startup; nothing in this crate works without model access.

use std::path::PathBuf;

use crate::error::{BetscopeError, Result};

/// Model used when `BETSCOPE_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// Gemini API key.
    pub api_key: String,
    /// Model id passed to `generateContent`.
    pub model: String,
    /// Directory holding the persistent response cache.
    pub cache_dir: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// Errors with [`BetscopeError::Config`] when no API key is present.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                BetscopeError::Config(
                    "no API key found; set GEMINI_API_KEY (or GOOGLE_API_KEY)".to_string(),
                )
            })?;

        let model = std::env::var("BETSCOPE_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            model,
            cache_dir: default_cache_dir(),
        })
    }
}

/// `~/.betscope/cache`, falling back to a relative path when `$HOME` is unset.
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".betscope")
        .join("cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = Config {
            api_key: "super-secret".into(),
            model: DEFAULT_MODEL.into(),
            cache_dir: PathBuf::from("/tmp"),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn default_cache_dir_ends_with_expected_components() {
        let dir = default_cache_dir();
        assert!(dir.ends_with(".betscope/cache"));
    }
}
