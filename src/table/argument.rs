use crate::status::{Markers, StatusSpec};
use crate::util::{de_default_value, de_scalar_list};
use serde::Deserialize;

/// One argument of a command as declared in the table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgumentDef {
    pub dest: String,
    /// Option strings; an empty list declares a positional argument.
    #[serde(default)]
    pub options: Vec<OptionName>,
    #[serde(default)]
    pub metavar: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default, deserialize_with = "de_scalar_list")]
    pub choices: Vec<String>,
    #[serde(default, deserialize_with = "de_default_value")]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub arg_group: Option<String>,
    /// Hidden from help entirely.
    #[serde(default)]
    pub suppress: bool,
    #[serde(flatten)]
    pub markers: Markers,
}

impl ArgumentDef {
    pub fn is_positional(&self) -> bool {
        self.options.is_empty()
    }

    pub fn positional_name(&self) -> &str {
        self.metavar.as_deref().unwrap_or(&self.dest)
    }
}

/// An option string, optionally carrying its own deprecation (a renamed alias).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionName {
    Plain(String),
    Deprecated {
        name: String,
        deprecate_info: StatusSpec,
    },
}

impl OptionName {
    pub fn name(&self) -> &str {
        match self {
            OptionName::Plain(name) => name,
            OptionName::Deprecated { name, .. } => name,
        }
    }

    pub fn deprecation(&self) -> Option<&StatusSpec> {
        match self {
            OptionName::Plain(_) => None,
            OptionName::Deprecated { deprecate_info, .. } => Some(deprecate_info),
        }
    }
}
