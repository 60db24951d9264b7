//! YAML and JSON readers
//!
//! Both produce `LoadedFile::Structured`. YAML is converted to a JSON value so the
//! rest of the pipeline only deals with one tree type.

use std::path::Path;

use crate::error::{RagError, Result};
use crate::formats::{read_utf8, FormatReader, LoadedFile};

pub struct YamlReader;

impl FormatReader for YamlReader {
    fn read(&self, path: &Path) -> Result<LoadedFile> {
        let content = read_utf8(path, self.format_name())?;

        let value: serde_json::Value =
            serde_yaml::from_str(&content).map_err(|e| RagError::DocumentExtraction {
                format: self.format_name().to_string(),
                reason: format!("Failed to parse YAML: {}", e),
            })?;

        Ok(LoadedFile::Structured(value))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn format_name(&self) -> &str {
        "YAML"
    }
}

pub struct JsonReader;

impl FormatReader for JsonReader {
    fn read(&self, path: &Path) -> Result<LoadedFile> {
        let content = read_utf8(path, self.format_name())?;

        let value = serde_json::from_str(&content).map_err(|e| RagError::DocumentExtraction {
            format: self.format_name().to_string(),
            reason: format!("Failed to parse JSON: {}", e),
        })?;

        Ok(LoadedFile::Structured(value))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn format_name(&self) -> &str {
        "JSON"
    }
}
