//! The external model boundary.
//!
//! One operation: prompt string in, raw text plus optional grounding
//! citations out. Everything downstream treats the reply as untrusted input;
//! empty text is "no data", not an error.

pub mod gemini;

use async_trait::async_trait;

use crate::error::{BetscopeError, Result};

pub use gemini::GeminiProvider;

/// Per-call options.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Ground the reply in live web search results. Costs quota; the games
    /// feed deliberately leaves it off.
    pub enable_web_search: bool,
}

impl GenerateOptions {
    pub fn with_web_search() -> Self {
        Self {
            enable_web_search: true,
        }
    }
}

/// One web page the model consulted while grounding its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// A model reply: generated text plus any grounding citations.
#[derive(Debug, Clone, Default)]
pub struct GenerateReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// A hosted LLM that can answer a single free-form prompt.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Issue one generation request. A transport-level failure (network
    /// error, non-2xx status) is an `Err`; a well-formed reply with useless
    /// content is an `Ok` the decoder deals with.
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> Result<GenerateReply>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

/// Map an HTTP error status to a transport error with a readable prefix.
pub(crate) fn provider_error(status: u16, message: &str) -> BetscopeError {
    let prefix = match status {
        401 | 403 => "authentication rejected",
        429 => "rate limited",
        500..=599 => "provider unavailable",
        _ => "request failed",
    };
    BetscopeError::transport_status(status, format!("{prefix}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_classifies_statuses() {
        assert!(provider_error(401, "bad key").to_string().contains("authentication rejected"));
        assert!(provider_error(429, "slow down").to_string().contains("rate limited"));
        assert!(provider_error(503, "oops").to_string().contains("provider unavailable"));
        assert!(provider_error(418, "teapot").to_string().contains("request failed"));
    }

    #[test]
    fn options_default_to_no_web_search() {
        assert!(!GenerateOptions::default().enable_web_search);
        assert!(GenerateOptions::with_web_search().enable_web_search);
    }
}
