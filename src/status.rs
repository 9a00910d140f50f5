//! Deprecation, preview, and experimental markers.
//!
//! Markers are declared on groups, commands, arguments, and individual option
//! aliases in the command table. A marker on a group also applies implicitly
//! to everything beneath it; implicit markers carry no tag and explain which
//! group they come from.

use crate::table::CommandTable;
use crate::util::{de_opt_version, version_text};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

mod version;

pub use version::reached;

const REFERENCE_LEVELS: &str = "Reference and support levels: https://aka.ms/CLI_refstatus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Deprecated,
    Preview,
    Experimental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Command,
    CommandGroup,
    Argument,
    PositionalArgument,
    Option,
}

impl ObjectType {
    fn is_argument_like(self) -> bool {
        matches!(
            self,
            ObjectType::Argument | ObjectType::PositionalArgument | ObjectType::Option
        )
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObjectType::Command => "command",
            ObjectType::CommandGroup => "command group",
            ObjectType::Argument => "argument",
            ObjectType::PositionalArgument => "positional argument",
            ObjectType::Option => "option",
        };
        f.write_str(label)
    }
}

/// `hide` accepts either a flag or the CLI version from which the item is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Hide {
    Flag(bool),
    Since(String),
}

impl<'de> Deserialize<'de> for Hide {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_yaml::Value::deserialize(deserializer)? {
            serde_yaml::Value::Null => Ok(Hide::Flag(false)),
            serde_yaml::Value::Bool(flag) => Ok(Hide::Flag(flag)),
            other => version_text(&other)
                .map(Hide::Since)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl Default for Hide {
    fn default() -> Self {
        Hide::Flag(false)
    }
}

/// Deprecation as declared in the command table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSpec {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub hide: Hide,
    #[serde(default, deserialize_with = "de_opt_version")]
    pub expiration: Option<String>,
}

/// Marker fields shared by groups, commands, and arguments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Markers {
    #[serde(default)]
    pub deprecate_info: Option<StatusSpec>,
    #[serde(default)]
    pub is_preview: bool,
    #[serde(default)]
    pub is_experimental: bool,
}

impl Markers {
    pub fn status(
        &self,
        kind: StatusKind,
        object_type: ObjectType,
        target: &str,
        cli_version: &str,
    ) -> Option<StatusInfo> {
        match kind {
            StatusKind::Deprecated => self
                .deprecate_info
                .as_ref()
                .map(|spec| StatusInfo::deprecated(spec, object_type, target, cli_version)),
            StatusKind::Preview if self.is_preview => Some(StatusInfo::flagged(
                StatusKind::Preview,
                object_type,
                target,
                cli_version,
            )),
            StatusKind::Experimental if self.is_experimental => Some(StatusInfo::flagged(
                StatusKind::Experimental,
                object_type,
                target,
                cli_version,
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    pub kind: StatusKind,
    pub object_type: ObjectType,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub hide: Hide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    pub implicit: bool,
    #[serde(skip)]
    cli_version: String,
}

impl StatusInfo {
    pub fn deprecated(
        spec: &StatusSpec,
        object_type: ObjectType,
        default_target: &str,
        cli_version: &str,
    ) -> Self {
        Self {
            kind: StatusKind::Deprecated,
            object_type,
            target: spec
                .target
                .clone()
                .unwrap_or_else(|| default_target.to_string()),
            redirect: spec.redirect.clone(),
            hide: spec.hide.clone(),
            expiration: spec.expiration.clone(),
            implicit: false,
            cli_version: cli_version.to_string(),
        }
    }

    fn flagged(kind: StatusKind, object_type: ObjectType, target: &str, cli_version: &str) -> Self {
        Self {
            kind,
            object_type,
            target: target.to_string(),
            redirect: None,
            hide: Hide::default(),
            expiration: None,
            implicit: false,
            cli_version: cli_version.to_string(),
        }
    }

    /// Re-label an ancestor group's marker for a descendant item.
    fn into_implicit(self, object_type: ObjectType) -> Self {
        Self {
            object_type,
            implicit: true,
            ..self
        }
    }

    pub fn tag(&self) -> &'static str {
        if self.implicit {
            return "";
        }
        match self.kind {
            StatusKind::Deprecated => "[Deprecated]",
            StatusKind::Preview => "[Preview]",
            StatusKind::Experimental => "[Experimental]",
        }
    }

    pub fn message(&self) -> String {
        let argument_state = if self.object_type.is_argument_like() && !self.implicit {
            self.argument_state()
        } else {
            None
        };
        if let Some(state) = argument_state {
            return format!(
                "{} '{}' {state}",
                capitalize(&self.object_type.to_string()),
                self.target
            );
        }
        match self.kind {
            StatusKind::Deprecated => self.deprecation_message(),
            StatusKind::Preview => self.status_message("is in preview and under development"),
            StatusKind::Experimental => {
                self.status_message("is experimental and under development")
            }
        }
    }

    fn deprecation_message(&self) -> String {
        let mut removal = match &self.expiration {
            Some(expiration) => format!("in version '{expiration}'."),
            None => "in a future release.".to_string(),
        };
        if let Some(redirect) = &self.redirect {
            removal.push_str(&format!(" Use '{redirect}' instead."));
        }
        if self.implicit {
            format!(
                "This {} is implicitly deprecated because command group '{}' is deprecated and will be removed {}",
                self.object_type, self.target, removal
            )
        } else if self.object_type.is_argument_like() {
            format!(
                "{} '{}' has been deprecated and will be removed {}",
                capitalize(&self.object_type.to_string()),
                self.target,
                removal
            )
        } else {
            format!(
                "This {} has been deprecated and will be removed {}",
                self.object_type, removal
            )
        }
    }

    /// Preview and experimental wording for arguments, which differs from
    /// the command and group wording.
    fn argument_state(&self) -> Option<&'static str> {
        match self.kind {
            StatusKind::Deprecated => None,
            StatusKind::Preview => {
                Some("is in preview. It may be changed/removed in a future release.")
            }
            StatusKind::Experimental => Some(
                "is experimental and not covered by customer support. Please use with discretion.",
            ),
        }
    }

    fn status_message(&self, state: &str) -> String {
        if self.implicit {
            format!("Command group '{}' {state}. {REFERENCE_LEVELS}", self.target)
        } else {
            format!("This {} {state}. {REFERENCE_LEVELS}", self.object_type)
        }
    }

    pub fn hidden(&self) -> bool {
        match &self.hide {
            Hide::Flag(flag) => *flag,
            Hide::Since(version) => reached(version, &self.cli_version),
        }
    }

    pub fn expired(&self) -> bool {
        self.expiration
            .as_deref()
            .map(|expiration| reached(expiration, &self.cli_version))
            .unwrap_or(false)
    }

    pub fn show_in_help(&self) -> bool {
        match self.kind {
            StatusKind::Deprecated => !self.hidden() && !self.expired(),
            StatusKind::Preview | StatusKind::Experimental => true,
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve the marker of `kind` for a group or command path.
///
/// The nearest ancestor group carrying the marker wins over the item's own
/// marker, and is reported as implicit.
pub fn resolve(table: &CommandTable, path: &str, kind: StatusKind) -> Option<StatusInfo> {
    let object_type = if table.is_command(path) {
        ObjectType::Command
    } else {
        ObjectType::CommandGroup
    };
    let direct = table
        .markers(path)
        .and_then(|markers| markers.status(kind, object_type, path, &table.version));

    let mut comps: Vec<&str> = path.split_whitespace().collect();
    comps.pop();
    while !comps.is_empty() {
        let ancestor = comps.join(" ");
        let inherited = table.markers(&ancestor).and_then(|markers| {
            markers.status(kind, ObjectType::CommandGroup, &ancestor, &table.version)
        });
        if let Some(info) = inherited {
            return Some(info.into_implicit(object_type));
        }
        comps.pop();
    }
    direct
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CommandTable {
        CommandTable::from_yaml_str(
            r#"
name: az
version: 2.5.0
groups:
  legacy:
    deprecate_info:
      redirect: modern
  beta:
    is_preview: true
commands:
  legacy list: {}
  beta run: {}
  vm create:
    deprecate_info:
      redirect: vm new
      expiration: 3.0.0
  vm old:
    deprecate_info:
      hide: 2.0.0
"#,
        )
        .unwrap()
    }

    #[test]
    fn direct_deprecation_message_mentions_expiration_and_redirect() {
        let info = resolve(&table(), "vm create", StatusKind::Deprecated).unwrap();
        assert_eq!(info.tag(), "[Deprecated]");
        assert_eq!(
            info.message(),
            "This command has been deprecated and will be removed in version '3.0.0'. Use 'vm new' instead."
        );
        assert!(info.show_in_help());
    }

    #[test]
    fn hide_version_at_or_below_cli_version_hides() {
        let info = resolve(&table(), "vm old", StatusKind::Deprecated).unwrap();
        assert!(info.hidden());
        assert!(!info.show_in_help());
    }

    #[test]
    fn group_deprecation_is_implicit_for_children() {
        let info = resolve(&table(), "legacy list", StatusKind::Deprecated).unwrap();
        assert!(info.implicit);
        assert_eq!(info.tag(), "");
        assert_eq!(
            info.message(),
            "This command is implicitly deprecated because command group 'legacy' is deprecated and will be removed in a future release. Use 'modern' instead."
        );
    }

    #[test]
    fn group_preview_is_implicit_for_children() {
        let info = resolve(&table(), "beta run", StatusKind::Preview).unwrap();
        assert!(info.implicit);
        assert_eq!(
            info.message(),
            "Command group 'beta' is in preview and under development. Reference and support levels: https://aka.ms/CLI_refstatus"
        );
        let group = resolve(&table(), "beta", StatusKind::Preview).unwrap();
        assert_eq!(group.tag(), "[Preview]");
        assert_eq!(
            group.message(),
            "This command group is in preview and under development. Reference and support levels: https://aka.ms/CLI_refstatus"
        );
    }

    #[test]
    fn option_deprecation_names_the_option() {
        let spec = StatusSpec {
            redirect: Some("--name".to_string()),
            ..StatusSpec::default()
        };
        let info = StatusInfo::deprecated(&spec, ObjectType::Option, "--old-name", "1.0.0");
        assert_eq!(
            info.message(),
            "Option '--old-name' has been deprecated and will be removed in a future release. Use '--name' instead."
        );
    }

    #[test]
    fn expired_deprecation_is_not_shown() {
        let spec = StatusSpec {
            expiration: Some("1.0.0".to_string()),
            ..StatusSpec::default()
        };
        let info = StatusInfo::deprecated(&spec, ObjectType::Argument, "size", "1.2.0");
        assert!(info.expired());
        assert!(!info.show_in_help());
    }

    #[test]
    fn quoted_expiration_keeps_trailing_zero() {
        let table = CommandTable::from_yaml_str(
            r#"
name: az
version: '2.5'
commands:
  vm old:
    deprecate_info:
      expiration: '2.10'
"#,
        )
        .unwrap();
        let info = resolve(&table, "vm old", StatusKind::Deprecated).unwrap();
        assert_eq!(info.expiration.as_deref(), Some("2.10"));
        assert!(!info.expired());
        assert!(info.show_in_help());
        assert_eq!(
            info.message(),
            "This command has been deprecated and will be removed in version '2.10'."
        );
    }

    #[test]
    fn unquoted_dotted_versions_are_rejected() {
        for text in [
            "name: az\nversion: '2.5'\ncommands:\n  vm old:\n    deprecate_info:\n      expiration: 2.10\n",
            "name: az\nversion: '2.5'\ncommands:\n  vm old:\n    deprecate_info:\n      hide: 2.10\n",
            "name: az\nversion: 2.10\n",
        ] {
            let err = CommandTable::from_yaml_str(text).unwrap_err();
            assert!(format!("{err:#}").contains("must be quoted"), "{err:#}");
        }
    }

    #[test]
    fn argument_preview_and_experimental_wording() {
        let preview = Markers {
            is_preview: true,
            is_experimental: true,
            ..Markers::default()
        };
        let info = preview
            .status(StatusKind::Preview, ObjectType::Argument, "--name", "1.0.0")
            .unwrap();
        assert_eq!(
            info.message(),
            "Argument '--name' is in preview. It may be changed/removed in a future release."
        );
        let info = preview
            .status(
                StatusKind::Experimental,
                ObjectType::PositionalArgument,
                "<SRC>",
                "1.0.0",
            )
            .unwrap();
        assert_eq!(
            info.message(),
            "Positional argument '<SRC>' is experimental and not covered by customer support. Please use with discretion."
        );
        assert_eq!(info.tag(), "[Experimental]");
    }

    #[test]
    fn unmarked_path_resolves_to_nothing() {
        assert!(resolve(&table(), "vm create", StatusKind::Experimental).is_none());
    }
}
