//! Prompt construction from a YAML prompt configuration
//!
//! A prompt configuration maps keys to a text or a list of texts. The `template` key
//! holds the prompt skeleton; every other key fills the `{key}` placeholder of the
//! same name, and the retrieval context fills `{input_data}`.

use std::collections::BTreeMap;
use std::path::Path;

use ragassist_core::config::load_config;
use ragassist_core::error::{RagError, Result};
use serde::{Deserialize, Serialize};

const TEMPLATE_KEY: &str = "template";
const INPUT_KEY: &str = "input_data";
const INPUT_PLACEHOLDER: &str = "{input_data}";

/// One entry of a prompt configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptValue {
    Text(String),
    List(Vec<String>),
}

impl PromptValue {
    /// Text substituted into the template; lists become one `- item` per line
    pub fn render(&self) -> String {
        match self {
            PromptValue::Text(text) => text.trim_end().to_string(),
            PromptValue::List(items) => items
                .iter()
                .map(|item| format!("- {}", item.trim()))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<&str> for PromptValue {
    fn from(text: &str) -> Self {
        PromptValue::Text(text.to_string())
    }
}

impl From<Vec<&str>> for PromptValue {
    fn from(items: Vec<&str>) -> Self {
        PromptValue::List(items.into_iter().map(String::from).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptConfig {
    entries: BTreeMap<String, PromptValue>,
}

impl PromptConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PromptValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&PromptValue> {
        self.entries.get(key)
    }

    pub fn template(&self) -> Option<&PromptValue> {
        self.get(TEMPLATE_KEY)
    }
}

/// Load the prompt configuration stored under `key` in a YAML file
pub fn load_prompt_config<P: AsRef<Path>>(path: P, key: &str) -> Result<PromptConfig> {
    let mut mapping = load_config(path)?;

    let value = mapping
        .remove(key)
        .ok_or_else(|| RagError::ConfigMissing { key: key.to_string() })?;

    serde_yaml::from_value(value).map_err(|e| RagError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("expected a mapping of texts or lists of texts: {}", e),
    })
}

/// Fill the template of `config` with its instructions and `input_data`
pub fn build_prompt(config: &PromptConfig, input_data: &str) -> Result<String> {
    let template = match config.template() {
        Some(PromptValue::Text(template)) => template,
        Some(PromptValue::List(_)) => {
            return Err(RagError::ConfigInvalid {
                key: TEMPLATE_KEY.to_string(),
                reason: "template must be a single text".to_string(),
            })
        }
        None => return Err(RagError::ConfigMissing { key: TEMPLATE_KEY.to_string() }),
    };

    if !template.contains(INPUT_PLACEHOLDER) {
        return Err(RagError::ConfigInvalid {
            key: TEMPLATE_KEY.to_string(),
            reason: format!("template has no {} placeholder", INPUT_PLACEHOLDER),
        });
    }

    // One pass over the template; substituted text is never scanned again
    Ok(substitute(template, |name| match name {
        INPUT_KEY => Some(input_data.to_string()),
        TEMPLATE_KEY => None,
        _ => config.get(name).map(PromptValue::render),
    }))
}

/// Replace each `{name}` the lookup knows; anything else is copied verbatim
fn substitute(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };

        let name = &after[..end];
        match (!name.contains('{')).then(|| lookup(name)).flatten() {
            Some(value) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Input section sent to the model: the retrieved texts followed by the question
pub fn build_rag_input(documents: &[String], query: &str) -> String {
    format!(
        "Relevant documents:\n\n{}\n\nUser's question:\n\n{}",
        render_list(documents),
        query
    )
}

/// Bracketed list with every item quoted, e.g. `['a', "it's"]`
fn render_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (0x7f..=0xa0).contains(&(c as u32)) => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_only() {
        let config = PromptConfig::new().with("template", "Answer using: {input_data}");
        assert_eq!(build_prompt(&config, "ctx1").unwrap(), "Answer using: ctx1");
    }

    #[test]
    fn test_instructions_are_substituted() {
        let config = PromptConfig::new()
            .with("role", "You are helpful.")
            .with("constraints", vec!["Be brief.", "Cite sources."])
            .with("template", "{role}\n{constraints}\n{input_data}");

        assert_eq!(
            build_prompt(&config, "ctx").unwrap(),
            "You are helpful.\n- Be brief.\n- Cite sources.\nctx"
        );
    }

    #[test]
    fn test_input_data_is_not_rescanned() {
        let config = PromptConfig::new()
            .with("role", "assistant")
            .with("template", "{input_data} {unknown}");

        assert_eq!(build_prompt(&config, "literal {role}").unwrap(), "literal {role} {unknown}");
    }

    #[test]
    fn test_instruction_text_is_not_rescanned() {
        let config = PromptConfig::new()
            .with("constraints", "Keep the {style_or_tone} and ignore {input_data}")
            .with("style_or_tone", "formal")
            .with("template", "{constraints} / {style_or_tone} / {input_data}");

        assert_eq!(
            build_prompt(&config, "ctx").unwrap(),
            "Keep the {style_or_tone} and ignore {input_data} / formal / ctx"
        );
    }

    #[test]
    fn test_substitute_edge_cases() {
        let lookup = |name: &str| (name == "a").then(|| "A".to_string());
        assert_eq!(substitute("{a}{b}{{a}} {a", lookup), "A{b}{A} {a");
        assert_eq!(substitute("no braces", lookup), "no braces");
        assert_eq!(substitute("}{a}{", lookup), "}A{");
    }

    #[test]
    fn test_missing_template() {
        let config = PromptConfig::new().with("role", "x");
        assert!(matches!(
            build_prompt(&config, "ctx").unwrap_err(),
            RagError::ConfigMissing { ref key } if key == "template"
        ));
    }

    #[test]
    fn test_template_without_placeholder() {
        let config = PromptConfig::new().with("template", "no slot here");
        assert!(matches!(build_prompt(&config, "ctx").unwrap_err(), RagError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_rag_input_layout() {
        let docs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            build_rag_input(&docs, "why?"),
            "Relevant documents:\n\n['a', 'b']\n\nUser's question:\n\nwhy?"
        );
        assert_eq!(
            build_rag_input(&[], "q"),
            "Relevant documents:\n\n[]\n\nUser's question:\n\nq"
        );
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quote("line\nbreak\\"), "'line\\nbreak\\\\'");
        assert_eq!(quote("bell\u{7}"), "'bell\\x07'");
    }

    #[test]
    fn test_load_prompt_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompt_config.yaml");
        fs::write(
            &path,
            "rag_assistant_prompt:\n  role: Helper\n  constraints:\n    - One\n  template: '{role} {input_data}'\n",
        )
        .unwrap();

        let config = load_prompt_config(&path, "rag_assistant_prompt").unwrap();
        assert_eq!(config.get("constraints"), Some(&PromptValue::List(vec!["One".into()])));
        assert_eq!(build_prompt(&config, "ctx").unwrap(), "Helper ctx");

        assert!(matches!(
            load_prompt_config(&path, "other").unwrap_err(),
            RagError::ConfigMissing { .. }
        ));
        assert!(matches!(
            load_prompt_config(dir.path().join("missing.yaml"), "x").unwrap_err(),
            RagError::ConfigNotFound { .. }
        ));
    }
}
