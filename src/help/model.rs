use super::text::{normalize_text, split_description};
use crate::error::HelpError;
use crate::help_files::{ExampleEntry, HelpData, ParameterEntry};
use crate::status::StatusInfo;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpKind {
    Group,
    Command,
}

impl HelpKind {
    pub fn label(self) -> &'static str {
        match self {
            HelpKind::Group => "group",
            HelpKind::Command => "command",
        }
    }
}

/// Help for one group or command.
#[derive(Debug, Clone, Serialize)]
pub struct HelpFile {
    pub name: String,
    pub command: String,
    pub kind: HelpKind,
    /// Type label as declared by help text; reconciled against `kind`.
    #[serde(rename = "type")]
    pub type_label: String,
    short_summary: String,
    long_summary: String,
    pub examples: Vec<HelpExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecate_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HelpFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<HelpParameter>,
}

impl HelpFile {
    pub fn new(path: &str, kind: HelpKind) -> Self {
        Self {
            name: crate::table::leaf_name(path).to_string(),
            command: path.to_string(),
            kind,
            type_label: kind.label().to_string(),
            short_summary: String::new(),
            long_summary: String::new(),
            examples: Vec::new(),
            deprecate_info: None,
            preview_info: None,
            experimental_info: None,
            children: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn short_summary(&self) -> &str {
        &self.short_summary
    }

    pub fn long_summary(&self) -> &str {
        &self.long_summary
    }

    pub fn set_short_summary(&mut self, text: &str) {
        self.short_summary = normalize_text(text);
    }

    pub fn set_long_summary(&mut self, text: &str) {
        self.long_summary = normalize_text(text);
    }

    /// Apply the table description, then any help data on top of it.
    pub fn load(
        &mut self,
        description: Option<&str>,
        data: Option<HelpData>,
    ) -> Result<(), HelpError> {
        if let Some(description) = description {
            let (short, long) = split_description(description);
            self.set_short_summary(short);
            if let Some(long) = long {
                self.set_long_summary(&long);
            }
        }
        match data {
            Some(data) => self.load_from_data(data),
            None => Ok(()),
        }
    }

    fn load_from_data(&mut self, data: HelpData) -> Result<(), HelpError> {
        let entry = match data {
            HelpData::Text(text) => {
                self.set_long_summary(&text);
                return Ok(());
            }
            HelpData::Entry(entry) => entry,
        };

        if let Some(kind) = entry.kind {
            self.type_label = kind;
        }
        if let Some(short) = entry.short_summary.as_deref() {
            self.set_short_summary(short);
        }
        self.set_long_summary(entry.long_summary.as_deref().unwrap_or(""));
        if let Some(examples) = entry.examples {
            self.examples = examples.into_iter().map(HelpExample::from).collect();
        }

        for param in &mut self.parameters {
            if let Some(doc) = entry.parameters.iter().find(|doc| doc.name == param.name) {
                param.update_from_data(&self.command, doc)?;
            }
        }
        Ok(())
    }

    /// Make the type label agree with what the table says this path is.
    ///
    /// Returns the contradicting label when one was replaced.
    pub fn reconcile_type(&mut self) -> Option<String> {
        let expected = self.kind.label();
        if self.type_label == expected {
            return None;
        }
        let declared = std::mem::replace(&mut self.type_label, expected.to_string());
        tracing::info!(
            path = %self.command,
            declared = %declared,
            actual = expected,
            "help type label contradicts the command table"
        );
        Some(declared)
    }

    pub fn is_group(&self) -> bool {
        self.kind == HelpKind::Group
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HelpExample {
    pub name: String,
    pub text: String,
}

impl From<ExampleEntry> for HelpExample {
    fn from(entry: ExampleEntry) -> Self {
        Self {
            name: entry.name,
            text: entry.text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HelpParameter {
    /// Option strings sorted and joined by spaces, e.g. `--name -n`.
    pub name: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: String,
    short_summary: String,
    long_summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_sources: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecate_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_info: Option<StatusInfo>,
}

impl HelpParameter {
    pub fn new(name_source: &[&str], description: Option<&str>, required: bool) -> Self {
        let mut names: Vec<&str> = name_source.to_vec();
        names.sort_unstable();
        Self {
            name: names.join(" "),
            required,
            kind: "string".to_string(),
            short_summary: normalize_text(description.unwrap_or("")),
            long_summary: String::new(),
            value_sources: Vec::new(),
            choices: Vec::new(),
            default: None,
            group_name: None,
            deprecate_info: None,
            preview_info: None,
            experimental_info: None,
        }
    }

    pub fn short_summary(&self) -> &str {
        &self.short_summary
    }

    pub fn long_summary(&self) -> &str {
        &self.long_summary
    }

    pub fn update_from_data(&mut self, path: &str, doc: &ParameterEntry) -> Result<(), HelpError> {
        if self.name != doc.name {
            return Err(HelpError::authoring(
                path,
                format!("mismatched name {} vs. {}", self.name, doc.name),
            ));
        }
        if let Some(kind) = doc.kind.as_deref().filter(|kind| !kind.is_empty()) {
            self.kind = kind.to_string();
        }
        if let Some(short) = doc.short_summary.as_deref().filter(|s| !s.is_empty()) {
            self.short_summary = normalize_text(short);
        }
        if let Some(long) = doc.long_summary.as_deref().filter(|s| !s.is_empty()) {
            self.long_summary = normalize_text(long);
        }
        if !doc.populator_commands.is_empty() {
            self.value_sources = doc.populator_commands.clone();
        }
        Ok(())
    }

    /// Whether the parameter is listed at all.
    pub fn is_listed(&self) -> bool {
        self.deprecate_info
            .as_ref()
            .map(StatusInfo::show_in_help)
            .unwrap_or(true)
    }
}
