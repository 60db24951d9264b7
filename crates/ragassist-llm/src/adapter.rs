//! Uniform calling contract over native chat clients
//!
//! Callers always hand over the prompt as a plain string. The adapter first tries
//! the positional convention and, only when the client rejects that shape, retries
//! once with the prompt as the named `input` argument.

use ragassist_core::error::Result;

use crate::invoke::{ChatResponse, InvokeOptions, PromptArgument};
use crate::ports::ChatModel;

pub struct LlmClientAdapter {
    client: Box<dyn ChatModel>,
}

impl LlmClientAdapter {
    pub fn new(client: Box<dyn ChatModel>) -> Self {
        Self { client }
    }

    /// Send `prompt` to the wrapped client
    ///
    /// Errors other than an argument mismatch propagate unchanged, and the result of
    /// the fallback call is returned as is.
    pub fn invoke(&self, prompt: &str, options: &InvokeOptions) -> Result<ChatResponse> {
        match self.client.invoke(PromptArgument::Positional(prompt), options) {
            Err(err) if err.is_argument_mismatch() => {
                tracing::debug!(
                    provider = %self.client.provider(),
                    "positional call rejected ({}), retrying with named input",
                    err
                );
                self.client.invoke(PromptArgument::input(prompt), options)
            }
            result => result,
        }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    pub fn provider(&self) -> &str {
        self.client.provider()
    }
}

impl std::fmt::Debug for LlmClientAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClientAdapter")
            .field("provider", &self.client.provider())
            .field("model", &self.client.model_name())
            .finish()
    }
}
