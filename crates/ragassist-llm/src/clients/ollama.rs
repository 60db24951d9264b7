//! Ollama `/api/chat` client
//!
//! Only accepts the prompt as the named `input` argument, so calls through the
//! adapter always take the fallback path.

use ragassist_core::error::{RagError, Result};
use serde_json::{json, Value};

use super::runtime_error;
use crate::http::{block_on, error_detail, merge_options};
use crate::invoke::{ChatResponse, InvokeOptions, PromptArgument, ProviderOptions};
use crate::ports::ChatModel;

const PROVIDER: &str = "Ollama";

pub struct OllamaChat {
    base_url: String,
    model: String,
    temperature: f32,
    options: ProviderOptions,
    client: reqwest::Client,
}

impl OllamaChat {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        options: ProviderOptions,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
            options,
            client: reqwest::Client::new(),
        }
    }

    /// Request body; options go into Ollama's `options` object (e.g. `num_ctx`)
    pub fn request_body(&self, prompt: &str, options: &InvokeOptions) -> Value {
        let mut model_options = json!({ "temperature": self.temperature });
        merge_options(&mut model_options, &self.options, options);

        json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
            "options": model_options,
        })
    }

    async fn send(&self, body: &Value) -> Result<ChatResponse> {
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| RagError::Invocation {
                provider: PROVIDER.to_string(),
                message: format!(
                    "request failed: {}. Ensure Ollama is running at {} and run 'ollama pull {}'",
                    e, self.base_url, self.model
                ),
            })?;

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

        parse_chat(&self.model, payload)
    }
}

pub fn parse_chat(model: &str, payload: Value) -> Result<ChatResponse> {
    let content = payload["message"]["content"]
        .as_str()
        .ok_or_else(|| RagError::Invocation {
            provider: PROVIDER.to_string(),
            message: "response contained no message content".to_string(),
        })?
        .to_string();

    let model = payload["model"].as_str().unwrap_or(model).to_string();
    Ok(ChatResponse::new(content, model).with_metadata(payload))
}

impl ChatModel for OllamaChat {
    fn invoke(&self, prompt: PromptArgument<'_>, options: &InvokeOptions) -> Result<ChatResponse> {
        let text = match prompt {
            PromptArgument::Named { name: "input", value } => value,
            other => {
                return Err(RagError::ArgumentMismatch {
                    provider: PROVIDER.to_string(),
                    received: other.convention(),
                    reason: "expects the prompt as the named argument 'input'".to_string(),
                })
            }
        };

        tracing::debug!(provider = PROVIDER, model = %self.model, "sending chat request");

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

    fn chat() -> OllamaChat {
        // Port 9 is discard; tests below never reach the network
        OllamaChat::new("http://127.0.0.1:9", "llama3", 0.0, ProviderOptions::new())
    }

    #[test]
    fn test_positional_is_rejected_before_io() {
        let err = chat().invoke(PromptArgument::Positional("hi"), &InvokeOptions::new()).unwrap_err();
        assert!(err.is_argument_mismatch());
    }

    #[test]
    fn test_request_body() {
        let options = json!({"num_ctx": 4096}).as_object().cloned().unwrap();
        let body = chat().request_body("hi", &options);

        assert_eq!(body["model"], "llama3");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_ctx"], 4096);
        assert_eq!(body["options"]["temperature"], 0.0);
    }

    #[test]
    fn test_parse_chat() {
        let payload = json!({"model": "llama3", "message": {"role": "assistant", "content": "Hi"}, "done": true});
        assert_eq!(parse_chat("llama3", payload).unwrap().content, "Hi");
    }
}
