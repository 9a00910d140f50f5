//! Help text store keyed by command path.
//!
//! Help files are YAML mappings from a command path to its help entry. An
//! entry is either a nested mapping or a YAML string that is parsed on use,
//! so prose-only help and full entries can live side by side.

use crate::error::HelpError;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct HelpStore {
    entries: BTreeMap<String, Value>,
}

/// Help data after parsing, before it is applied to a help file.
#[derive(Debug, Clone)]
pub enum HelpData {
    /// Plain prose; replaces the long summary.
    Text(String),
    Entry(HelpEntry),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HelpEntry {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub short_summary: Option<String>,
    #[serde(default)]
    pub long_summary: Option<String>,
    #[serde(default)]
    pub examples: Option<Vec<ExampleEntry>>,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExampleEntry {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterEntry {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub short_summary: Option<String>,
    #[serde(default)]
    pub long_summary: Option<String>,
    #[serde(default)]
    pub populator_commands: Vec<String>,
}

impl HelpStore {
    /// Load every help file under `paths`; a path may be a file or a directory.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut store = HelpStore::default();
        for path in paths {
            for file in collect_help_files(path)? {
                store.load_file(&file)?;
            }
        }
        Ok(store)
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read help file {}", path.display()))?;
        let entries: BTreeMap<String, Value> = serde_yaml::from_str::<Option<_>>(&text)
            .with_context(|| format!("parse help file {}", path.display()))?
            .unwrap_or_default();
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded help file");
        for (key, value) in entries {
            self.insert(&key, value);
        }
        Ok(())
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        let key = key.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.entries.insert(key.clone(), value).is_some() {
            tracing::debug!(path = %key, "help entry overridden");
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parsed help data for `path`, if the store has any.
    pub fn data_for(&self, path: &str) -> Result<Option<HelpData>, HelpError> {
        match self.get(path) {
            Some(Value::String(text)) => parse_help_text(path, text),
            Some(value) => help_data_from_value(path, value.clone()),
            None => Ok(None),
        }
    }
}

fn collect_help_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(path).with_context(|| format!("read help dir {}", path.display()))?
    {
        let entry = entry?;
        let file = entry.path();
        let is_yaml = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);
        if file.is_file() && is_yaml {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse help text that may be YAML or prose.
///
/// Text that fails to parse as YAML is kept verbatim as prose.
pub fn parse_help_text(path: &str, text: &str) -> Result<Option<HelpData>, HelpError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match serde_yaml::from_str::<Value>(text) {
        Ok(value) => help_data_from_value(path, value),
        Err(err) => {
            tracing::debug!(path, error = %err, "help text is not YAML, using it as prose");
            Ok(Some(HelpData::Text(text.to_string())))
        }
    }
}

fn help_data_from_value(path: &str, value: Value) -> Result<Option<HelpData>, HelpError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(HelpData::Text(text))),
        value @ Value::Mapping(_) => serde_yaml::from_value::<HelpEntry>(value)
            .map(|entry| Some(HelpData::Entry(entry)))
            .map_err(|err| HelpError::authoring(path, err.to_string())),
        other => Err(HelpError::authoring(
            path,
            format!("expected a mapping or text, found {}", value_kind(&other)),
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prose_is_long_summary_text() {
        let data = parse_help_text("n1", "long description").unwrap();
        assert!(matches!(data, Some(HelpData::Text(text)) if text == "long description"));
    }

    #[test]
    fn invalid_yaml_falls_back_to_prose() {
        let text = "short-summary: [unterminated";
        let data = parse_help_text("n1", text).unwrap();
        assert!(matches!(data, Some(HelpData::Text(t)) if t == text));
    }

    #[test]
    fn empty_text_has_no_data() {
        assert!(parse_help_text("n1", "   \n").unwrap().is_none());
    }

    #[test]
    fn parses_full_entry() {
        let text = r#"
type: command
short-summary: create a thing
long-summary: |
    line1
    line2
parameters:
  - name: --foobar -fb
    type: string
    short-summary: one line partial sentence
    populator-commands:
      - az vm list
examples:
  - name: foo example
    text: example details
"#;
        let Some(HelpData::Entry(entry)) = parse_help_text("n1", text).unwrap() else {
            panic!("expected entry");
        };
        assert_eq!(entry.kind.as_deref(), Some("command"));
        assert_eq!(entry.long_summary.as_deref(), Some("line1\nline2\n"));
        assert_eq!(entry.parameters[0].name, "--foobar -fb");
        assert_eq!(entry.parameters[0].populator_commands, vec!["az vm list"]);
        assert_eq!(entry.examples.unwrap()[0].text, "example details");
    }

    #[test]
    fn example_without_text_is_an_authoring_error() {
        let text = "examples:\n  - name: missing text\n";
        let err = parse_help_text("vm create", text).unwrap_err();
        assert!(matches!(err, HelpError::Authoring { path, .. } if path == "vm create"));
    }

    #[test]
    fn list_is_an_authoring_error() {
        assert!(parse_help_text("vm", "- a\n- b\n").is_err());
    }

    #[test]
    fn loads_directory_in_name_order_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.yaml"),
            "vm: |\n  type: group\n  short-summary: first\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.yml"),
            "vm:\n  type: group\n  short-summary: second\nvm  create: prose help\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = HelpStore::load(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["vm", "vm create"]);
        let Some(HelpData::Entry(entry)) = store.data_for("vm").unwrap() else {
            panic!("expected entry");
        };
        assert_eq!(entry.short_summary.as_deref(), Some("second"));
        assert!(matches!(
            store.data_for("vm create").unwrap(),
            Some(HelpData::Text(text)) if text == "prose help"
        ));
    }
}
