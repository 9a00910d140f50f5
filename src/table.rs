//! Declarative command table: the groups, commands, and arguments of a CLI.
//!
//! Help is built by walking this table the way an argument parser would be
//! introspected. Groups need not be declared: every proper prefix of a command
//! path is a group, and the empty path is the root group.

use crate::error::HelpError;
use crate::status::Markers;
use crate::util::de_version;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

mod argument;

pub use argument::{ArgumentDef, OptionName};

fn default_version() -> String {
    "0.0.0".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandTable {
    pub name: String,
    #[serde(default = "default_version", deserialize_with = "de_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub welcome_message: Option<String>,
    #[serde(default)]
    pub privacy_statement: Option<String>,
    #[serde(default)]
    pub global_arguments: Vec<ArgumentDef>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupDef>,
    #[serde(default)]
    pub commands: BTreeMap<String, CommandDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupDef {
    #[serde(default)]
    pub description: Option<String>,
    /// Inline help text, YAML or prose.
    #[serde(default)]
    pub help: Option<String>,
    #[serde(flatten)]
    pub markers: Markers,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandDef {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub arguments: Vec<ArgumentDef>,
    #[serde(flatten)]
    pub markers: Markers,
}

/// What a list of nouns names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Group(String),
    Command(String),
}

impl Target {
    pub fn path(&self) -> &str {
        match self {
            Target::Group(path) | Target::Command(path) => path,
        }
    }
}

/// Parent path of a space separated command path; the root's children have `""`.
pub fn parent_path(path: &str) -> &str {
    match path.rfind(' ') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Last token of a path, `""` for the root.
pub fn leaf_name(path: &str) -> &str {
    path.split_whitespace().last().unwrap_or("")
}

impl CommandTable {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read command table {}", path.display()))?;
        let table = Self::from_yaml_str(&text)
            .with_context(|| format!("parse command table {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            groups = table.groups.len(),
            commands = table.commands.len(),
            "loaded command table"
        );
        Ok(table)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let mut table: CommandTable = serde_yaml::from_str(text)?;
        table.commands = table
            .commands
            .into_iter()
            .map(|(path, def)| (normalize_path(&path), def))
            .collect();
        table.groups = table
            .groups
            .into_iter()
            .map(|(path, def)| (normalize_path(&path), def))
            .collect();
        Ok(table)
    }

    pub fn is_command(&self, path: &str) -> bool {
        self.commands.contains_key(path)
    }

    pub fn is_group(&self, path: &str) -> bool {
        path.is_empty() || self.group_paths().contains(path)
    }

    /// Declared groups plus every group implied by a command path.
    pub fn group_paths(&self) -> BTreeSet<String> {
        let mut groups: BTreeSet<String> = self.groups.keys().cloned().collect();
        for path in self.commands.keys().chain(self.groups.keys()) {
            let mut parent = parent_path(path);
            while !parent.is_empty() {
                groups.insert(parent.to_string());
                parent = parent_path(parent);
            }
        }
        groups
    }

    pub fn resolve(&self, nouns: &[String]) -> Result<Target, HelpError> {
        let path = normalize_path(&nouns.join(" "));
        if self.is_command(&path) {
            Ok(Target::Command(path))
        } else if self.is_group(&path) {
            Ok(Target::Group(path))
        } else {
            Err(HelpError::UnknownCommand(path))
        }
    }

    pub fn child_groups(&self, path: &str) -> Vec<String> {
        self.group_paths()
            .into_iter()
            .filter(|group| !group.is_empty() && parent_path(group) == path)
            .collect()
    }

    pub fn child_commands(&self, path: &str) -> Vec<String> {
        self.commands
            .keys()
            .filter(|command| parent_path(command) == path)
            .cloned()
            .collect()
    }

    pub fn markers(&self, path: &str) -> Option<&Markers> {
        self.commands
            .get(path)
            .map(|command| &command.markers)
            .or_else(|| self.groups.get(path).map(|group| &group.markers))
    }

    /// Description and inline help for a group or command path.
    pub fn help_source(&self, path: &str) -> (Option<&str>, Option<&str>) {
        if let Some(command) = self.commands.get(path) {
            return (command.description.as_deref(), command.help.as_deref());
        }
        if let Some(group) = self.groups.get(path) {
            return (group.description.as_deref(), group.help.as_deref());
        }
        if path.is_empty() {
            return (self.description.as_deref(), None);
        }
        (None, None)
    }
}

fn normalize_path(path: &str) -> String {
    path.split_whitespace().collect::<Vec<_>>().join(" ")
}
