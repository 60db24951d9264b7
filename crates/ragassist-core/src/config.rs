use crate::error::{RagError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a YAML configuration file as a raw mapping
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<serde_yaml::Mapping> {
    let content = read_config_file(path.as_ref())?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| RagError::ConfigParse {
            path: path.as_ref().to_path_buf(),
            reason: e.to_string(),
        })?;

    match value {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        // An empty file parses to null
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        other => Err(RagError::ConfigParse {
            path: path.as_ref().to_path_buf(),
            reason: format!("expected a mapping at the top level, found {}", yaml_kind(&other)),
        }),
    }
}

/// Load a `.env` file into the process environment, returning whether it existed
pub fn load_env_file<P: AsRef<Path>>(path: P) -> bool {
    match dotenvy::from_path_override(path.as_ref()) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.as_ref().display());
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", path.as_ref().display(), e);
            false
        }
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(RagError::ConfigNotFound { path: path.to_path_buf() });
    }
    fs::read_to_string(path).map_err(|e| RagError::ConfigParse {
        path: path.to_path_buf(),
        reason: format!("Failed to read file: {}", e),
    })
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// Application configuration loaded from `config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vectordb: VectorDbConfig,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
    pub llm: LlmConfig,
    pub default_llm_models: BTreeMap<String, String>,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load the typed application configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_config_file(path.as_ref())?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| RagError::ConfigParse {
            path: path.as_ref().to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Default model configured for a provider, if any
    pub fn default_model_for(&self, provider: &str) -> Option<&str> {
        self.default_llm_models.get(&provider.to_lowercase()).map(String::as_str)
    }
}

/// Retrieval parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorDbConfig {
    /// Maximum cosine distance for a document to count as relevant
    pub threshold: f32,

    /// Number of candidates requested from the store
    pub n_results: usize,

    /// Collection queried and populated by ingestion
    pub collection: String,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            n_results: 5,
            collection: "publications".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedder spec in `provider:model` form
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "ollama:nomic-embed-text".to_string(),
            dimensions: 768,
            batch_size: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub default_provider: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self { default_provider: "groq".to_string(), temperature: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Markdown and other documents to ingest
    pub data_dir: PathBuf,

    /// Raw JSON sources for Markdown conversion
    pub source_data_dir: PathBuf,

    /// On-disk vector store
    pub vector_db_dir: PathBuf,

    /// Log files and other outputs
    pub outputs_dir: PathBuf,

    pub env_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            source_data_dir: PathBuf::from("data/source"),
            vector_db_dir: PathBuf::from("outputs/vector_db"),
            outputs_dir: PathBuf::from("outputs"),
            env_file: PathBuf::from(".env"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub console_level: String,
    pub file_level: String,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: "info".to_string(),
            file_level: "debug".to_string(),
            file_name: "rag_assistant.log".to_string(),
        }
    }
}

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Runtime settings layered from defaults, config file, environment and CLI
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub threshold: ConfigValue<f32>,
    pub top_k: ConfigValue<usize>,
    pub collection: ConfigValue<String>,
    pub provider: ConfigValue<String>,
    pub embedder: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self::seeded(&AppConfig::default(), ConfigSource::Default)
    }

    fn seeded(app: &AppConfig, source: ConfigSource) -> Self {
        Self {
            threshold: ConfigValue::new(app.vectordb.threshold, source),
            top_k: ConfigValue::new(app.vectordb.n_results, source),
            collection: ConfigValue::new(app.vectordb.collection.clone(), source),
            provider: ConfigValue::new(app.llm.default_provider.clone(), source),
            embedder: ConfigValue::new(app.embedding.model.clone(), source),
        }
    }

    /// Load configuration from a YAML file; only keys present in the file are layered
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let mapping = load_config(path)?;

        if let Some(value) = lookup(&mapping, "vectordb", "threshold") {
            let threshold = value.as_f64().ok_or_else(|| invalid_key(path, "vectordb.threshold"))?;
            self.threshold.update(threshold as f32, ConfigSource::File);
        }

        if let Some(value) = lookup(&mapping, "vectordb", "n_results") {
            let top_k = value.as_u64().ok_or_else(|| invalid_key(path, "vectordb.n_results"))?;
            self.top_k.update(top_k as usize, ConfigSource::File);
        }

        if let Some(value) = lookup(&mapping, "vectordb", "collection") {
            let collection =
                value.as_str().ok_or_else(|| invalid_key(path, "vectordb.collection"))?;
            self.collection.update(collection.to_string(), ConfigSource::File);
        }

        if let Some(value) = lookup(&mapping, "llm", "default_provider") {
            let provider =
                value.as_str().ok_or_else(|| invalid_key(path, "llm.default_provider"))?;
            self.provider.update(provider.to_lowercase(), ConfigSource::File);
        }

        if let Some(value) = lookup(&mapping, "embedding", "model") {
            let embedder = value.as_str().ok_or_else(|| invalid_key(path, "embedding.model"))?;
            self.embedder.update(embedder.to_string(), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // RAGASSIST_THRESHOLD
        if let Ok(threshold_str) = env::var("RAGASSIST_THRESHOLD") {
            match threshold_str.parse::<f32>() {
                Ok(threshold) if threshold.is_finite() => {
                    self.threshold.update(threshold, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid RAGASSIST_THRESHOLD value '{}': expected a number",
                    threshold_str
                ),
            }
        }

        // RAGASSIST_TOP_K
        if let Ok(top_k_str) = env::var("RAGASSIST_TOP_K") {
            match top_k_str.parse::<usize>() {
                Ok(top_k) if top_k > 0 => self.top_k.update(top_k, ConfigSource::Environment),
                _ => tracing::warn!(
                    "Invalid RAGASSIST_TOP_K value '{}': expected a positive integer",
                    top_k_str
                ),
            }
        }

        // RAGASSIST_COLLECTION
        if let Ok(collection) = env::var("RAGASSIST_COLLECTION") {
            self.collection.update(collection, ConfigSource::Environment);
        }

        // RAGASSIST_PROVIDER
        if let Ok(provider) = env::var("RAGASSIST_PROVIDER") {
            self.provider.update(provider.to_lowercase(), ConfigSource::Environment);
        }

        // RAGASSIST_EMBEDDER
        if let Ok(embedder) = env::var("RAGASSIST_EMBEDDER") {
            self.embedder.update(embedder, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(threshold) = overrides.threshold {
            self.threshold.update(threshold, ConfigSource::Cli);
        }

        if let Some(top_k) = overrides.top_k {
            self.top_k.update(top_k, ConfigSource::Cli);
        }

        if let Some(collection) = overrides.collection {
            self.collection.update(collection, ConfigSource::Cli);
        }

        if let Some(provider) = overrides.provider {
            self.provider.update(provider.to_lowercase(), ConfigSource::Cli);
        }

        if let Some(embedder) = overrides.embedder {
            self.embedder.update(embedder, ConfigSource::Cli);
        }
    }

    /// Reject values the retrieval pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.top_k.value == 0 {
            return Err(RagError::ConfigInvalid {
                key: "top_k".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.threshold.value.is_finite() {
            return Err(RagError::ConfigInvalid {
                key: "threshold".to_string(),
                reason: format!("must be a finite number, got {}", self.threshold.value),
            });
        }
        if self.collection.value.trim().is_empty() {
            return Err(RagError::ConfigInvalid {
                key: "collection".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "threshold".to_string(),
            (self.threshold.value.to_string(), self.threshold.source),
        );
        map.insert("top_k".to_string(), (self.top_k.value.to_string(), self.top_k.source));
        map.insert(
            "collection".to_string(),
            (self.collection.value.clone(), self.collection.source),
        );
        map.insert("provider".to_string(), (self.provider.value.clone(), self.provider.source));
        map.insert("embedder".to_string(), (self.embedder.value.clone(), self.embedder.source));

        map
    }
}

fn lookup<'a>(
    mapping: &'a serde_yaml::Mapping,
    section: &str,
    key: &str,
) -> Option<&'a serde_yaml::Value> {
    mapping.get(section)?.as_mapping()?.get(key)
}

fn invalid_key(path: &Path, key: &str) -> RagError {
    RagError::ConfigParse {
        path: path.to_path_buf(),
        reason: format!("unexpected value type for '{}'", key),
    }
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub threshold: Option<f32>,
    pub top_k: Option<usize>,
    pub collection: Option<String>,
    pub provider: Option<String>,
    pub embedder: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.threshold.value, 0.3);
        assert_eq!(config.top_k.value, 5);
        assert_eq!(config.collection.value, "publications");
        assert_eq!(config.provider.value, "groq");
        assert_eq!(config.embedder.value, "ollama:nomic-embed-text");
        assert_eq!(config.top_k.source, ConfigSource::Default);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_app_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
vectordb:
  threshold: 0.45
  n_results: 3
default_llm_models:
  groq: llama-3.3-70b-versatile
"#
        )
        .unwrap();

        let app = AppConfig::load(file.path()).unwrap();
        assert_eq!(app.vectordb.threshold, 0.45);
        assert_eq!(app.vectordb.n_results, 3);
        // Unspecified keys keep their defaults
        assert_eq!(app.vectordb.collection, "publications");
        assert_eq!(app.chunking.chunk_size, 1000);
        assert_eq!(app.default_model_for("GROQ"), Some("llama-3.3-70b-versatile"));
        assert_eq!(app.default_model_for("openai"), None);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, RagError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_config_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "vectordb: [unclosed").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, RagError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_config_rejects_scalar_root() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "just a string").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, RagError::ConfigParse { .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            threshold: Some(0.5),
            provider: Some("OpenAI".to_string()),
            ..Default::default()
        });

        assert_eq!(config.threshold.value, 0.5);
        assert_eq!(config.threshold.source, ConfigSource::Cli);
        assert_eq!(config.provider.value, "openai");
        assert_eq!(config.top_k.source, ConfigSource::Default);
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = LayeredConfig::with_defaults();
        config.update_from_cli(CliConfigOverrides { top_k: Some(0), ..Default::default() });

        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_inspection_map() {
        let map = LayeredConfig::with_defaults().to_inspection_map();

        let (top_k, source) = &map["top_k"];
        assert_eq!(top_k, "5");
        assert_eq!(*source, ConfigSource::Default);
        assert!(map.contains_key("embedder"));
    }
}
