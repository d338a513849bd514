//! Native Gemini provider speaking the `generateContent` REST API directly.
//!
//! Grounded generation: when web search is enabled, the request carries the
//! `googleSearch` tool and the response may include grounding metadata, which
//! is surfaced as [`Citation`]s.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use async_trait::async_trait;

use crate::error::{BetscopeError, Result};

use super::{provider_error, Citation, GenerateOptions, GenerateReply, LlmProvider};

/// Gemini v1beta REST API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Native Gemini provider authenticated with an API key.
pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Build the `generateContent` request body for a single user prompt.
    fn build_request_body(&self, prompt: &str, options: &GenerateOptions) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });
        if options.enable_web_search {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }
        body
    }

    /// Extract final answer text from a Gemini API response.
    ///
    /// Thinking models return parts tagged `"thought": true`; those are
    /// intermediate reasoning and are skipped. An absent or empty candidate
    /// list yields an empty string — "no data", not an error.
    fn extract_text(response: &Value) -> String {
        let Some(parts) = response["candidates"][0]["content"]["parts"].as_array() else {
            return String::new();
        };
        parts
            .iter()
            .filter(|p| !p["thought"].as_bool().unwrap_or(false))
            .filter_map(|p| p["text"].as_str())
            .collect()
    }

    /// Extract grounding citations (`groundingMetadata.groundingChunks`).
    ///
    /// Missing metadata is normal — grounding only appears on web-search
    /// requests, and not always even then.
    fn extract_citations(response: &Value) -> Vec<Citation> {
        let Some(chunks) =
            response["candidates"][0]["groundingMetadata"]["groundingChunks"].as_array()
        else {
            return Vec::new();
        };
        chunks
            .iter()
            .filter_map(|chunk| {
                let uri = chunk["web"]["uri"].as_str()?;
                Some(Citation {
                    uri: uri.to_string(),
                    title: chunk["web"]["title"].as_str().unwrap_or_default().to_string(),
                })
            })
            .collect()
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str, options: GenerateOptions) -> Result<GenerateReply> {
        let body = self.build_request_body(prompt, &options);

        debug!(
            model = %self.model,
            web_search = options.enable_web_search,
            "Gemini generateContent request"
        );

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| BetscopeError::transport(format!("Gemini request failed: {e}")))?;

        if response.status().is_success() {
            let json: Value = response.json().await.map_err(|e| {
                BetscopeError::transport(format!("failed to read Gemini response body: {e}"))
            })?;
            return Ok(GenerateReply {
                text: Self::extract_text(&json),
                citations: Self::extract_citations(&json),
            });
        }

        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();

        // Prefer the structured error.message from the Gemini error body.
        let message = serde_json::from_str::<Value>(&error_text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or(error_text);

        Err(provider_error(status, &message))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Part one. " },
                        { "text": "Part two." }
                    ]
                }
            }]
        });
        assert_eq!(GeminiProvider::extract_text(&response), "Part one. Part two.");
    }

    #[test]
    fn extract_text_skips_thought_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "Final answer here" }
                    ]
                }
            }]
        });
        assert_eq!(GeminiProvider::extract_text(&response), "Final answer here");
    }

    #[test]
    fn extract_text_empty_on_missing_candidates() {
        assert_eq!(GeminiProvider::extract_text(&json!({})), "");
    }

    #[test]
    fn extract_citations_reads_grounding_chunks() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "ok" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://draftkings.com/a", "title": "DK" } },
                        { "web": { "uri": "https://fanduel.com/b" } },
                        { "retrievedContext": { "uri": "ignored" } }
                    ]
                }
            }]
        });
        let citations = GeminiProvider::extract_citations(&response);
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].uri, "https://draftkings.com/a");
        assert_eq!(citations[0].title, "DK");
        assert_eq!(citations[1].title, "");
    }

    #[test]
    fn extract_citations_empty_without_grounding_metadata() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        });
        assert!(GeminiProvider::extract_citations(&response).is_empty());
    }

    #[test]
    fn request_body_carries_google_search_tool_only_when_enabled() {
        let provider = GeminiProvider::new("key", "gemini-2.5-flash");
        let plain = provider.build_request_body("hi", &GenerateOptions::default());
        assert!(plain.get("tools").is_none());

        let grounded = provider.build_request_body("hi", &GenerateOptions::with_web_search());
        assert!(grounded["tools"][0]["googleSearch"].is_object());
        assert_eq!(grounded["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(grounded["contents"][0]["role"], "user");
    }

    #[test]
    fn api_url_format() {
        let provider = GeminiProvider::new("key", "gemini-2.5-flash");
        let url = provider.api_url();
        assert!(url.contains("generativelanguage.googleapis.com"));
        assert!(url.ends_with("models/gemini-2.5-flash:generateContent"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let provider = GeminiProvider::new("secret-key", "gemini-2.5-flash");
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("secret-key"));
    }
}
