//! Integration tests for output formatting
//!
//! These run the built binary in a scratch directory and check its JSON output.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rag-assistant"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("RAGASSIST_THRESHOLD")
        .env_remove("RAGASSIST_TOP_K")
        .env_remove("RAGASSIST_COLLECTION")
        .env_remove("RAGASSIST_PROVIDER")
        .env_remove("RAGASSIST_EMBEDDER")
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_providers_json() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["providers", "--json"]);
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(parsed["status"], "success");

    let names: Vec<&str> = parsed["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["openai", "ollama", "google", "groq"]);

    let ollama = &parsed["data"][1];
    assert_eq!(ollama["default_model"], "llama3");
    assert_eq!(ollama["credential_variable"], "-");
}

#[test]
fn test_collections_json_on_empty_store() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["collections", "--json"]);
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(parsed["data"], serde_json::json!([]));
    assert!(dir.path().join("outputs").join("vector_db").is_dir());
}

#[test]
fn test_config_sources() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config").join("config.yaml"),
        "vectordb:\n  threshold: 0.25\n  collection: papers\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_rag-assistant"))
        .current_dir(dir.path())
        .args(["config", "--json", "--top-k", "7"])
        .env("RAGASSIST_PROVIDER", "OpenAI")
        .env_remove("RAGASSIST_THRESHOLD")
        .env_remove("RAGASSIST_TOP_K")
        .env_remove("RAGASSIST_COLLECTION")
        .env_remove("RAGASSIST_EMBEDDER")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    let rows = parsed["data"].as_array().unwrap();
    let row = |key: &str| rows.iter().find(|r| r["key"] == key).unwrap().clone();

    assert_eq!(row("threshold")["source"], "File");
    assert_eq!(row("collection")["value"], "papers");
    assert_eq!(row("provider")["value"], "openai");
    assert_eq!(row("provider")["source"], "Environment");
    assert_eq!(row("top_k")["value"], "7");
    assert_eq!(row("top_k")["source"], "Cli");
    assert_eq!(row("embedder")["source"], "Default");
}

#[test]
fn test_unknown_provider_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["--provider", "nonexistent", "ask", "what?", "--json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nonexistent"));
    assert!(stderr.contains("openai, ollama, google, groq"));
}

#[test]
fn test_convert_json() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("pubs.json");
    std::fs::write(&source, r#"[{"id": "abc", "title": "First"}, {"title": "Second"}]"#).unwrap();

    let output = run(
        dir.path(),
        &["convert", "--input", "pubs.json", "--entries", "5", "--output", "md", "--json"],
    );
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(parsed["data"]["files"].as_array().unwrap().len(), 2);
    assert!(dir.path().join("md").join("abc.md").exists());
    assert!(dir.path().join("md").join("publication_2.md").exists());
}
