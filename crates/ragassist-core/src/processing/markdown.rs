//! Conversion of a JSON publication dump into one Markdown file per entry

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{RagError, Result};

/// Entries converted when the caller does not ask for a specific count
pub const DEFAULT_NUM_ENTRIES: usize = 5;

const SECTION_BREAK: &str = "\n\n---\n\n";

/// Convert the first `num_entries` publications of a JSON array into Markdown files
///
/// Files are named after each entry's `id`, falling back to `publication_{n}.md`
/// (1-based). The output directory is created when missing. Returns the written paths
/// in entry order.
pub fn json_to_markdown(
    json_path: &Path,
    output_dir: &Path,
    num_entries: usize,
) -> Result<Vec<PathBuf>> {
    if !json_path.exists() {
        return Err(RagError::FileNotFound { path: json_path.to_path_buf() });
    }

    let content = fs::read_to_string(json_path)?;
    let data: Value = serde_json::from_str(&content).map_err(|e| RagError::DocumentExtraction {
        format: "JSON".to_string(),
        reason: format!("Failed to parse {}: {}", json_path.display(), e),
    })?;

    let entries = data.as_array().ok_or_else(|| RagError::DocumentExtraction {
        format: "JSON".to_string(),
        reason: format!("{} does not contain an array of publications", json_path.display()),
    })?;

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (i, entry) in entries.iter().take(num_entries).enumerate() {
        let fallback = format!("publication_{}", i + 1);
        let path = create_markdown_from_entry(entry, output_dir, &fallback)?;
        tracing::info!("Created markdown file: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Write a single publication entry; `fallback_stem` is used when it has no `id`
pub fn create_markdown_from_entry(
    entry: &Value,
    output_dir: &Path,
    fallback_stem: &str,
) -> Result<PathBuf> {
    let stem = entry
        .get("id")
        .and_then(scalar_text)
        .map(|id| id.replace(['/', '\\'], "_"))
        .unwrap_or_else(|| fallback_stem.to_string());

    let path = output_dir.join(format!("{}.md", stem));
    fs::write(&path, render_entry(entry))?;
    Ok(path)
}

fn render_entry(entry: &Value) -> String {
    let sections = [
        format!("# Title\n\n{}", field_or(entry, "title", "No Title")),
        format!("**Authors:** {}", joined(entry, "authors")),
        format!("**Tags:** {}", joined(entry, "tags")),
        format!("**License:** {}", field_or(entry, "license", "No License")),
        format!("**Publication Date:** {}", field_or(entry, "publication_date", "No Date")),
        format!("**Link:** {}", field_or(entry, "link", "No Link")),
        field_or(entry, "publication_description", "No Description"),
    ];

    sections.join(SECTION_BREAK)
}

fn field_or(entry: &Value, key: &str, default: &str) -> String {
    entry.get(key).and_then(scalar_text).unwrap_or_else(|| default.to_string())
}

fn joined(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect::<Vec<_>>().join(", "))
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
