//! Help file construction from the command table and the help store.
//!
//! A help file is built per invocation: markers are resolved from the table,
//! the description and help data are loaded on top, and the result is handed
//! to the renderer.

use crate::error::HelpError;
use crate::help_files::{parse_help_text, HelpData, HelpStore};
use crate::status::{self, ObjectType, StatusInfo, StatusKind};
use crate::table::{ArgumentDef, CommandTable, Target};

mod layout;
mod model;
mod registry;
mod render;
mod text;

pub use model::{HelpFile, HelpKind, HelpParameter};
pub use render::{CliHelp, DEFAULT_WIDTH};

use registry::{GLOBAL_ARGUMENTS, POSITIONAL_ARGUMENTS};

const HELP_OPTIONS: [&str; 2] = ["--help", "-h"];
const HELP_DESCRIPTION: &str = "Show this help message and exit.";

pub struct HelpBuilder<'a> {
    table: &'a CommandTable,
    store: &'a HelpStore,
}

impl<'a> HelpBuilder<'a> {
    pub fn new(table: &'a CommandTable, store: &'a HelpStore) -> Self {
        Self { table, store }
    }

    pub fn build(&self, target: &Target) -> Result<HelpFile, HelpError> {
        match target {
            Target::Group(path) => self.group(path),
            Target::Command(path) => self.command(path),
        }
    }

    /// Group help with one loaded child per immediate subgroup and command.
    ///
    /// Children are summaries: their own children and parameters are not
    /// expanded.
    pub fn group(&self, path: &str) -> Result<HelpFile, HelpError> {
        let mut file = self.base(path, HelpKind::Group);
        let child_paths = self
            .table
            .child_groups(path)
            .into_iter()
            .map(|child| (child, HelpKind::Group))
            .chain(
                self.table
                    .child_commands(path)
                    .into_iter()
                    .map(|child| (child, HelpKind::Command)),
            );
        for (child_path, kind) in child_paths {
            let mut child = self.base(&child_path, kind);
            self.load(&mut child)?;
            let hidden = child
                .deprecate_info
                .as_ref()
                .map(|info| !info.implicit && !info.show_in_help())
                .unwrap_or(false);
            if hidden {
                tracing::debug!(path = %child_path, "hiding deprecated child");
                continue;
            }
            file.children.push(child);
        }
        self.load(&mut file)?;
        Ok(file)
    }

    pub fn command(&self, path: &str) -> Result<HelpFile, HelpError> {
        let command = self
            .table
            .commands
            .get(path)
            .ok_or_else(|| HelpError::UnknownCommand(path.to_string()))?;
        let mut file = self.base(path, HelpKind::Command);
        for arg in command.arguments.iter().filter(|arg| !arg.suppress) {
            self.push_argument(&mut file.parameters, arg, None);
        }
        for arg in self.table.global_arguments.iter().filter(|arg| !arg.suppress) {
            self.push_argument(&mut file.parameters, arg, Some(GLOBAL_ARGUMENTS));
        }
        let mut help_param = HelpParameter::new(&HELP_OPTIONS, Some(HELP_DESCRIPTION), false);
        help_param.group_name = Some(GLOBAL_ARGUMENTS.to_string());
        file.parameters.push(help_param);

        self.load(&mut file)?;
        Ok(file)
    }

    fn base(&self, path: &str, kind: HelpKind) -> HelpFile {
        let mut file = HelpFile::new(path, kind);
        file.deprecate_info = status::resolve(self.table, path, StatusKind::Deprecated);
        file.preview_info = status::resolve(self.table, path, StatusKind::Preview);
        file.experimental_info = status::resolve(self.table, path, StatusKind::Experimental);
        file
    }

    /// Inline help from the table wins over the store entry.
    pub fn help_data(&self, path: &str) -> Result<Option<HelpData>, HelpError> {
        let (_, inline) = self.table.help_source(path);
        if let Some(text) = inline {
            if let Some(data) = parse_help_text(path, text)? {
                return Ok(Some(data));
            }
        }
        self.store.data_for(path)
    }

    fn load(&self, file: &mut HelpFile) -> Result<(), HelpError> {
        let (description, _) = self.table.help_source(&file.command);
        let data = self.help_data(&file.command)?;
        file.load(description, data)?;
        file.reconcile_type();
        Ok(())
    }

    fn push_argument(
        &self,
        parameters: &mut Vec<HelpParameter>,
        arg: &ArgumentDef,
        default_group: Option<&str>,
    ) {
        let version = self.table.version.as_str();
        let group_name = arg
            .arg_group
            .as_deref()
            .or(default_group)
            .map(str::to_string);
        let describe = |names: &[&str], required: bool| {
            let mut param = HelpParameter::new(names, arg.help.as_deref(), required);
            param.choices = arg.choices.clone();
            param.default = arg.default.clone();
            param.group_name = group_name.clone();
            param
        };

        if arg.is_positional() {
            let name = arg.positional_name();
            let mut param = describe(&[name], false);
            param.default = None;
            param.group_name = Some(POSITIONAL_ARGUMENTS.to_string());
            apply_markers(&mut param, arg, version);
            parameters.push(param);
            return;
        }

        let mut normal = Vec::new();
        let mut deprecated: Vec<(&str, StatusInfo)> = Vec::new();
        for option in &arg.options {
            match option.deprecation() {
                Some(spec) => {
                    let info =
                        StatusInfo::deprecated(spec, ObjectType::Option, option.name(), version);
                    if info.show_in_help() {
                        deprecated.push((option.name(), info));
                    }
                }
                None => normal.push(option.name()),
            }
        }

        if let Some((_, info)) = deprecated.first() {
            let names: Vec<&str> = deprecated.iter().map(|(name, _)| *name).collect();
            let mut param = describe(&names, arg.required);
            param.deprecate_info = Some(info.clone());
            parameters.push(param);
        }
        if normal.is_empty() {
            return;
        }
        let mut param = describe(&normal, arg.required);
        apply_markers(&mut param, arg, version);
        parameters.push(param);
    }
}

fn apply_markers(param: &mut HelpParameter, arg: &ArgumentDef, version: &str) {
    if let Some(spec) = &arg.markers.deprecate_info {
        let target = spec.target.as_deref().unwrap_or(&arg.dest);
        let object_type = if target.starts_with('-') {
            ObjectType::Option
        } else {
            ObjectType::Argument
        };
        param.deprecate_info = Some(StatusInfo::deprecated(spec, object_type, &arg.dest, version));
    }
    let (object_type, target) = marker_target(arg);
    param.preview_info = arg
        .markers
        .status(StatusKind::Preview, object_type, &target, version);
    param.experimental_info =
        arg.markers
            .status(StatusKind::Experimental, object_type, &target, version);
}

/// Name used in preview and experimental messages: the longest current
/// option string (last one on ties), or for positionals the metavar or
/// `<DEST>`.
fn marker_target(arg: &ArgumentDef) -> (ObjectType, String) {
    if arg.is_positional() {
        let target = arg
            .metavar
            .clone()
            .unwrap_or_else(|| format!("<{}>", arg.dest.to_uppercase()));
        return (ObjectType::PositionalArgument, target);
    }
    let current: Vec<&str> = arg
        .options
        .iter()
        .filter(|option| option.deprecation().is_none())
        .map(|option| option.name())
        .collect();
    let candidates = if current.is_empty() {
        arg.options.iter().map(|option| option.name()).collect()
    } else {
        current
    };
    let target = candidates
        .into_iter()
        .max_by_key(|name| name.chars().count())
        .unwrap_or(arg.dest.as_str());
    (ObjectType::Argument, target.to_string())
}
