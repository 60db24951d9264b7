//! Gemini `generateContent` client

use ragassist_core::error::{RagError, Result};
use serde_json::{json, Value};

use super::{runtime_error, transport_error};
use crate::http::{block_on, error_detail, merge_options};
use crate::invoke::{ChatResponse, InvokeOptions, PromptArgument, ProviderOptions};
use crate::ports::ChatModel;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER: &str = "Google";

pub struct GeminiChat {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    options: ProviderOptions,
    client: reqwest::Client,
}

impl GeminiChat {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        options: ProviderOptions,
    ) -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
            options,
            client: reqwest::Client::new(),
        }
    }

    /// Request body; options go into `generationConfig` (e.g. `maxOutputTokens`)
    pub fn request_body(&self, prompt: &str, options: &InvokeOptions) -> Value {
        let mut generation_config = json!({ "temperature": self.temperature });
        merge_options(&mut generation_config, &self.options, options);

        json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": generation_config,
        })
    }

    async fn send(&self, body: &Value) -> Result<ChatResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RagError::Invocation {
                provider: PROVIDER.to_string(),
                message: format!("API returned {}: {}", status, error_detail(&text)),
            });
        }

        let payload: Value = response.json().await.map_err(|e| RagError::Invocation {
            provider: PROVIDER.to_string(),
            message: format!("failed to parse response: {}", e),
        })?;

        parse_generate_content(&self.model, payload)
    }
}

/// Join the text parts of the first candidate
pub fn parse_generate_content(model: &str, payload: Value) -> Result<ChatResponse> {
    let parts = payload["candidates"][0]["content"]["parts"].as_array().ok_or_else(|| {
        let reason = payload["promptFeedback"]["blockReason"].as_str().unwrap_or("no candidates returned");
        RagError::Invocation { provider: PROVIDER.to_string(), message: reason.to_string() }
    })?;

    let content: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    let model = payload["modelVersion"].as_str().unwrap_or(model).to_string();

    Ok(ChatResponse::new(content, model).with_metadata(payload))
}

impl ChatModel for GeminiChat {
    fn invoke(&self, prompt: PromptArgument<'_>, options: &InvokeOptions) -> Result<ChatResponse> {
        let text = match prompt {
            PromptArgument::Positional(text) => text,
            PromptArgument::Named { name: "input", value } => value,
            other => {
                return Err(RagError::ArgumentMismatch {
                    provider: PROVIDER.to_string(),
                    received: other.convention(),
                    reason: "expects the prompt positionally or as 'input'".to_string(),
                })
            }
        };

        tracing::debug!(provider = PROVIDER, model = %self.model, "sending generateContent");

        let body = self.request_body(text, options);
        block_on(self.send(&body)).map_err(|e| runtime_error(PROVIDER, e))?
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_generation_config() {
        let chat = GeminiChat::new("key", "gemini-2.5-flash", 0.2, ProviderOptions::new());
        let options = json!({"maxOutputTokens": 100}).as_object().cloned().unwrap();
        let body = chat.request_body("hello", &options);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 100);
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_parse_joins_parts() {
        let payload = json!({
            "candidates": [{"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}}]
        });
        let response = parse_generate_content("gemini-2.5-flash", payload).unwrap();
        assert_eq!(response.content, "Hello, world");
        assert_eq!(response.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let payload = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = parse_generate_content("gemini-2.5-flash", payload).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}
