//! Integration tests for layered configuration
//!
//! Precedence: CLI arguments > Environment variables > Config file > Defaults

use ragassist_core::config::{AppConfig, CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_VARS: [&str; 5] = [
    "RAGASSIST_THRESHOLD",
    "RAGASSIST_TOP_K",
    "RAGASSIST_COLLECTION",
    "RAGASSIST_PROVIDER",
    "RAGASSIST_EMBEDDER",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
vectordb:
  threshold: 0.5
  n_results: 8
  collection: papers
llm:
  default_provider: OpenAI
embedding:
  model: ollama:custom-model
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.threshold.value, 0.5);
    assert_eq!(config.threshold.source, ConfigSource::File);
    assert_eq!(config.top_k.value, 8);
    assert_eq!(config.collection.value, "papers");
    assert_eq!(config.provider.value, "openai");
    assert_eq!(config.embedder.value, "ollama:custom-model");
    assert_eq!(config.embedder.source, ConfigSource::File);
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
vectordb:
  n_results: 3
# Only override n_results, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.top_k.value, 3);
    assert_eq!(config.top_k.source, ConfigSource::File);
    // These should still be defaults
    assert_eq!(config.threshold.value, 0.3);
    assert_eq!(config.threshold.source, ConfigSource::Default);
    assert_eq!(config.provider.source, ConfigSource::Default);
}

#[test]
fn test_wrong_value_type_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "vectordb:\n  n_results: many").unwrap();

    let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("RAGASSIST_THRESHOLD", "0.75");
    env::set_var("RAGASSIST_PROVIDER", "Google");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "vectordb:\n  threshold: 0.5\nllm:\n  default_provider: openai").unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.threshold.value, 0.75);
    assert_eq!(config.threshold.source, ConfigSource::Environment);
    assert_eq!(config.provider.value, "google");
    assert_eq!(config.provider.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("RAGASSIST_TOP_K", "0");
    env::set_var("RAGASSIST_THRESHOLD", "not-a-number");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.top_k.value, 5);
    assert_eq!(config.top_k.source, ConfigSource::Default);
    assert_eq!(config.threshold.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_full_configuration_workflow() {
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        r#"
vectordb:
  threshold: 0.4
  collection: file-collection
embedding:
  model: ollama:file-model
"#,
    )
    .unwrap();

    env::set_var("RAGASSIST_COLLECTION", "env-collection");
    env::set_var("RAGASSIST_EMBEDDER", "openai:text-embedding-3-small");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(&config_path)
        .unwrap()
        .load_from_env();

    assert_eq!(config.threshold.value, 0.4); // From file
    assert_eq!(config.collection.value, "env-collection"); // From env
    assert_eq!(config.embedder.value, "openai:text-embedding-3-small"); // From env

    config.update_from_cli(CliConfigOverrides {
        threshold: Some(0.2),
        collection: Some("cli-collection".to_string()),
        ..Default::default()
    });

    assert_eq!(config.threshold.value, 0.2);
    assert_eq!(config.threshold.source, ConfigSource::Cli);
    assert_eq!(config.collection.value, "cli-collection");
    assert_eq!(config.embedder.source, ConfigSource::Environment);
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let non_existent = temp_dir.path().join("does_not_exist.yaml");

    assert!(LayeredConfig::with_defaults().load_from_file(&non_existent).is_err());
    assert!(AppConfig::load(&non_existent).is_err());
}

#[test]
fn test_shipped_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/config.yaml");
    let app = AppConfig::load(path).unwrap();

    assert_eq!(app.vectordb.collection, "publications");
    assert_eq!(app.llm.default_provider, "groq");
    assert!(app.default_model_for("groq").is_some());
}
