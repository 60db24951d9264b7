//! Error types for the RAG assistant

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    // Caller errors
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse configuration file {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Embedding errors
    #[error("Embedding failed: {reason}. Try: {remediation}")]
    Embedding { reason: String, remediation: String },

    #[error("Embedding dimension mismatch: collection uses {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    // Store errors
    #[error("Document '{id}' already exists in collection '{collection}'")]
    DuplicateDocument { id: String, collection: String },

    #[error("Vector store error: {0}")]
    Store(String),

    // Provider errors
    #[error("Provider '{name}' not supported. Available providers: {}", available.join(", "))]
    UnsupportedProvider { name: String, available: Vec<String> },

    #[error("{provider} API key is missing. Set the {variable} environment variable")]
    MissingCredential { provider: String, variable: String },

    #[error("{provider} client does not accept a {received} prompt argument: {reason}")]
    ArgumentMismatch {
        provider: String,
        received: String,
        reason: String,
    },

    #[error("{provider} invocation failed: {message}")]
    Invocation { provider: String, message: String },

    // Document errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported file type: {extension}. Supported types: {}", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("Failed to extract {format} document: {reason}")]
    DocumentExtraction { format: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RagError {
    /// True for malformed or missing configuration values
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RagError::ConfigMissing { .. }
                | RagError::ConfigInvalid { .. }
                | RagError::ConfigNotFound { .. }
                | RagError::ConfigParse { .. }
        )
    }

    /// True when a native client rejected the shape of the prompt argument
    pub fn is_argument_mismatch(&self) -> bool {
        matches!(self, RagError::ArgumentMismatch { .. })
    }
}

impl From<serde_json::Error> for RagError {
    fn from(err: serde_json::Error) -> Self {
        RagError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_provider_lists_alternatives() {
        let err = RagError::UnsupportedProvider {
            name: "nonexistent".to_string(),
            available: vec!["openai".to_string(), "groq".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Provider 'nonexistent' not supported. Available providers: openai, groq"
        );
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = RagError::MissingCredential {
            provider: "Groq".to_string(),
            variable: "GROQ_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_error_classification() {
        assert!(RagError::ConfigMissing { key: "template".into() }.is_config_error());
        assert!(!RagError::Store("boom".into()).is_config_error());

        let mismatch = RagError::ArgumentMismatch {
            provider: "Ollama".into(),
            received: "positional".into(),
            reason: "expects input".into(),
        };
        assert!(mismatch.is_argument_mismatch());
        assert!(!RagError::Invocation { provider: "OpenAI".into(), message: "503".into() }
            .is_argument_mismatch());
    }
}
