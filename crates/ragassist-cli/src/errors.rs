use console::style;
use ragassist_core::error::RagError;
use std::fmt;

use crate::output::OutputWriter;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Report an error to the user without ending the process
pub fn report(error: &anyhow::Error, output: &OutputWriter) {
    tracing::debug!("{:?}", error);
    if output.is_json() {
        output.error(format!("{:#}", error));
    } else {
        from_anyhow(error).display();
    }
}

/// Convert anyhow::Error to CliError with suggestions for known failures
pub fn from_anyhow(error: &anyhow::Error) -> CliError {
    let message = format!("{:#}", error);

    let Some(rag_error) = error.chain().find_map(|e| e.downcast_ref::<RagError>()) else {
        return CliError::new(message);
    };

    let cli_error = CliError::new(error.to_string());
    let cli_error = if error.chain().count() > 1 {
        cli_error.with_context(format!("Error: {}", rag_error))
    } else {
        cli_error
    };

    match rag_error {
        RagError::MissingCredential { variable, .. } => cli_error
            .with_suggestion(format!("Add {}=<your key> to your .env file", variable))
            .with_suggestion(format!("Or export {} in your shell", variable))
            .with_help("Run: rag-assistant providers"),
        RagError::UnsupportedProvider { available, .. } => cli_error
            .with_suggestion(format!("Use one of: {}", available.join(", ")))
            .with_help("Run: rag-assistant providers"),
        RagError::Embedding { remediation, .. } => cli_error
            .with_suggestion(remediation.clone())
            .with_suggestion("Check if Ollama is running: ollama list")
            .with_suggestion("Or use a different embedder: --embedder ollama:other-model"),
        RagError::DimensionMismatch { .. } => cli_error
            .with_suggestion("The collection was built with a different embedding model")
            .with_suggestion("Re-ingest with the current model: rag-assistant ingest --reset")
            .with_help("Run: rag-assistant ingest --help"),
        RagError::ConfigNotFound { .. } | RagError::ConfigParse { .. } => cli_error
            .with_suggestion("Check the path passed with --config or --prompt-config")
            .with_suggestion("Check the YAML for syntax errors"),
        RagError::ConfigMissing { key } | RagError::ConfigInvalid { key, .. } => {
            cli_error.with_suggestion(format!("Fix '{}' in your configuration files", key))
        }
        RagError::FileNotFound { .. } => cli_error
            .with_suggestion("Check the file path and try again")
            .with_suggestion("Use absolute path or path relative to current directory"),
        RagError::UnsupportedFormat { supported, .. } => {
            cli_error.with_suggestion(format!("Supported types: {}", supported.join(", ")))
        }
        RagError::Invocation { .. } => cli_error
            .with_suggestion("Check your network connection and API key")
            .with_suggestion("Or switch provider with 'llm' in chat or --provider"),
        _ => cli_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_missing_credential_suggestions() {
        let err: anyhow::Result<()> = Err(RagError::MissingCredential {
            provider: "Groq".to_string(),
            variable: "GROQ_API_KEY".to_string(),
        }
        .into());
        let err = err.context("Failed to create LLM").unwrap_err();

        let cli_error = from_anyhow(&err);
        assert_eq!(cli_error.message, "Failed to create LLM");
        assert!(cli_error.context.unwrap().contains("GROQ_API_KEY"));
        assert!(cli_error.suggestions[0].contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_plain_error_has_no_suggestions() {
        let err = anyhow::anyhow!("something odd");
        let cli_error = from_anyhow(&err);
        assert_eq!(cli_error.message, "something odd");
        assert!(cli_error.suggestions.is_empty());
    }
}
