//! Client for OpenAI-style `/chat/completions` endpoints (OpenAI, Groq)

use ragassist_core::error::{RagError, Result};
use serde_json::{json, Value};

use super::{runtime_error, transport_error};
use crate::http::{block_on, error_detail, merge_options};
use crate::invoke::{ChatResponse, InvokeOptions, PromptArgument, ProviderOptions};
use crate::ports::ChatModel;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat completions client
///
/// Takes the prompt positionally. The named `input` form is also accepted.
pub struct OpenAiCompatibleChat {
    provider: String,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    options: ProviderOptions,
    client: reqwest::Client,
}

impl OpenAiCompatibleChat {
    pub fn new(
        provider: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        options: ProviderOptions,
    ) -> Self {
        Self {
            provider: provider.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
            options,
            client: reqwest::Client::new(),
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Request body for one user message
    pub fn request_body(&self, prompt: &str, options: &InvokeOptions) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
            "stream": false,
        });
        merge_options(&mut body, &self.options, options);
        body
    }

    fn accepted_prompt<'a>(&self, prompt: PromptArgument<'a>) -> Result<&'a str> {
        match prompt {
            PromptArgument::Positional(text) => Ok(text),
            PromptArgument::Named { name: "input", value } => Ok(value),
            other => Err(RagError::ArgumentMismatch {
                provider: self.provider.clone(),
                received: other.convention(),
                reason: "expects the prompt positionally or as 'input'".to_string(),
            }),
        }
    }

    async fn send(&self, body: &Value) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(&self.provider, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RagError::Invocation {
                provider: self.provider.clone(),
                message: format!("API returned {}: {}", status, error_detail(&text)),
            });
        }

        let payload: Value = response.json().await.map_err(|e| RagError::Invocation {
            provider: self.provider.clone(),
            message: format!("failed to parse response: {}", e),
        })?;

        parse_chat_completion(&self.provider, &self.model, payload)
    }
}

/// Extract `choices[0].message.content` from a chat completion payload
pub fn parse_chat_completion(provider: &str, model: &str, payload: Value) -> Result<ChatResponse> {
    let content = payload["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| RagError::Invocation {
            provider: provider.to_string(),
            message: "response contained no message content".to_string(),
        })?
        .to_string();

    let model = payload["model"].as_str().unwrap_or(model).to_string();
    Ok(ChatResponse::new(content, model).with_metadata(payload))
}

impl ChatModel for OpenAiCompatibleChat {
    fn invoke(&self, prompt: PromptArgument<'_>, options: &InvokeOptions) -> Result<ChatResponse> {
        let text = self.accepted_prompt(prompt)?;
        let body = self.request_body(text, options);

        tracing::debug!(provider = %self.provider, model = %self.model, "sending chat completion");

        block_on(self.send(&body)).map_err(|e| runtime_error(&self.provider, e))?
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        &self.provider
    }
}
