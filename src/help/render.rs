//! Text rendering of built help files.

use super::layout::{
    hanging_indent, join_tags, max_line_len, print_indent, Row, FIRST_LINE_PREFIX, REQUIRED_TAG,
};
use super::model::{HelpFile, HelpParameter};
use super::registry::ArgumentGroupRegistry;
use crate::config::CliConfig;
use crate::output::HelpWriter;
use crate::status::StatusInfo;
use anyhow::Result;
use std::io::{self, Write};

pub const DEFAULT_WIDTH: usize = 100;
const POSSIBLE_VALUES_MARKER: &str = " Possible values include";

pub struct CliHelp {
    cli_name: String,
    width: usize,
    welcome_message: Option<String>,
    privacy_statement: Option<String>,
}

impl CliHelp {
    pub fn new(cli_name: &str, width: usize) -> Self {
        Self {
            cli_name: cli_name.to_string(),
            width,
            welcome_message: None,
            privacy_statement: None,
        }
    }

    pub fn with_welcome_message(mut self, message: Option<String>) -> Self {
        self.welcome_message = message;
        self
    }

    pub fn with_privacy_statement(mut self, statement: Option<String>) -> Self {
        self.privacy_statement = statement;
        self
    }

    pub fn print_detailed_help<W: Write>(
        &self,
        out: &mut HelpWriter<W>,
        file: &HelpFile,
    ) -> io::Result<()> {
        self.print_header(out, file)?;
        if file.is_group() {
            self.print_groups(out, file)?;
        } else {
            print_indent(out, "Arguments", 0, None, self.width)?;
            self.print_arguments(out, file)?;
        }
        if !file.examples.is_empty() {
            self.print_examples(out, file)?;
        }
        Ok(())
    }

    fn print_header<W: Write>(&self, out: &mut HelpWriter<W>, file: &HelpFile) -> io::Result<()> {
        print_indent(out, "", 0, None, self.width)?;
        let label = if file.is_group() { "Group" } else { "Command" };
        print_indent(out, label, 0, None, self.width)?;

        let mut line = self.cli_name.clone();
        if !file.command.is_empty() {
            line.push(' ');
            line.push_str(&file.command);
        }
        if !file.short_summary().is_empty() {
            line.push_str(FIRST_LINE_PREFIX);
            line.push_str(file.short_summary());
        }
        print_indent(out, &line, 1, None, self.width)?;

        let long = long_summary_lines(file.long_summary(), status_infos(file)).join("\n");
        print_indent(out, &long, 2, None, self.width)?;
        if !long.is_empty() {
            out.blank()?;
        }
        Ok(())
    }

    fn print_groups<W: Write>(&self, out: &mut HelpWriter<W>, file: &HelpFile) -> io::Result<()> {
        let (mut groups, mut commands): (Vec<&HelpFile>, Vec<&HelpFile>) =
            file.children.iter().partition(|child| child.is_group());
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        commands.sort_by(|a, b| a.name.cmp(&b.name));

        for (title, items) in [("Subgroups:", groups), ("Commands:", commands)] {
            if items.is_empty() {
                continue;
            }
            print_indent(out, title, 0, None, self.width)?;
            let rows: Vec<Row> = items
                .iter()
                .map(|child| {
                    Row::new(
                        &child.name,
                        tags(status_infos(child), false),
                        child.short_summary(),
                    )
                })
                .collect();
            self.print_rows(out, &rows)?;
            out.blank()?;
        }
        Ok(())
    }

    fn print_rows<W: Write>(&self, out: &mut HelpWriter<W>, rows: &[Row]) -> io::Result<()> {
        let max = max_line_len(rows);
        for row in rows {
            print_indent(
                out,
                &row.format(max),
                1,
                Some(hanging_indent(max, 1)),
                self.width,
            )?;
        }
        Ok(())
    }

    fn print_arguments<W: Write>(
        &self,
        out: &mut HelpWriter<W>,
        file: &HelpFile,
    ) -> io::Result<()> {
        if file.parameters.is_empty() {
            print_indent(out, "None", 1, None, self.width)?;
            return out.blank();
        }

        let registry = ArgumentGroupRegistry::new(
            file.parameters
                .iter()
                .filter_map(|param| param.group_name.as_deref()),
        );
        let mut params: Vec<&HelpParameter> = file
            .parameters
            .iter()
            .filter(|param| param.is_listed())
            .collect();
        params.sort_by_cached_key(|param| {
            (
                registry.group_priority(param.group_name.as_deref()),
                !param.required,
                param.name.clone(),
            )
        });

        let layouts: Vec<(Row, String)> = params
            .iter()
            .map(|param| {
                let row = Row::new(
                    &param.name,
                    tags(param_status_infos(param), param.required),
                    &short_summary(param),
                );
                let long = long_summary_lines(param.long_summary(), param_status_infos(param))
                    .join(" ");
                (row, long)
            })
            .collect();
        let rows: Vec<Row> = layouts.iter().map(|(row, _)| row.clone()).collect();
        let max = max_line_len(&rows);

        let mut last_group: Option<Option<&str>> = None;
        for (param, (row, long)) in params.iter().zip(&layouts) {
            let group = param.group_name.as_deref();
            if last_group != Some(group) {
                if let Some(name) = group.filter(|name| !name.is_empty()) {
                    out.blank()?;
                    out.line(name)?;
                }
                last_group = Some(group);
            }
            print_indent(
                out,
                &row.format(max),
                1,
                Some(hanging_indent(max, 1)),
                self.width,
            )?;
            if !long.is_empty() {
                print_indent(out, long, 2, None, self.width)?;
            }
        }
        print_indent(out, "", 0, None, self.width)
    }

    fn print_examples<W: Write>(
        &self,
        out: &mut HelpWriter<W>,
        file: &HelpFile,
    ) -> io::Result<()> {
        print_indent(out, "Examples", 0, None, self.width)?;
        for example in &file.examples {
            print_indent(out, &example.name, 1, None, self.width)?;
            print_indent(out, &example.text, 2, None, self.width)?;
            out.blank()?;
        }
        Ok(())
    }

    /// One `name : summary` line per help file, sorted by name.
    pub fn print_description_list<W: Write>(
        &self,
        out: &mut HelpWriter<W>,
        files: &[HelpFile],
    ) -> io::Result<()> {
        let mut files: Vec<&HelpFile> = files.iter().collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        let max = files
            .iter()
            .map(|file| file.name.chars().count())
            .max()
            .unwrap_or(0);
        for file in files {
            let padding = " ".repeat(max - file.name.chars().count());
            let mut line = format!("{}{}", file.name, padding);
            if !file.short_summary().is_empty() {
                line.push_str(FIRST_LINE_PREFIX);
                line.push_str(file.short_summary());
            }
            print_indent(out, &line, 1, Some(hanging_indent(max + 1, 1)), self.width)?;
        }
        Ok(())
    }

    /// Print the privacy statement on the first run only.
    pub fn show_privacy_statement<W: Write>(
        &self,
        out: &mut HelpWriter<W>,
        config: &mut CliConfig,
    ) -> Result<()> {
        if config.get_bool("core", "first_run", false)? {
            return Ok(());
        }
        if let Some(statement) = &self.privacy_statement {
            out.line(statement)?;
        }
        config.set_value("core", "first_run", "yes")?;
        Ok(())
    }

    pub fn show_welcome<W: Write>(
        &self,
        out: &mut HelpWriter<W>,
        config: &mut CliConfig,
        root: &HelpFile,
    ) -> Result<()> {
        self.show_privacy_statement(out, config)?;
        print_indent(
            out,
            self.welcome_message.as_deref().unwrap_or(""),
            0,
            None,
            self.width,
        )?;
        self.print_description_list(out, &root.children)?;
        Ok(())
    }
}

fn status_infos(file: &HelpFile) -> [Option<&StatusInfo>; 3] {
    [
        file.deprecate_info.as_ref(),
        file.preview_info.as_ref(),
        file.experimental_info.as_ref(),
    ]
}

fn param_status_infos(param: &HelpParameter) -> [Option<&StatusInfo>; 3] {
    [
        param.deprecate_info.as_ref(),
        param.preview_info.as_ref(),
        param.experimental_info.as_ref(),
    ]
}

fn tags(infos: [Option<&StatusInfo>; 3], required: bool) -> String {
    let mut tags: Vec<&str> = infos
        .iter()
        .map(|info| info.map(StatusInfo::tag).unwrap_or(""))
        .collect();
    tags.push(if required { REQUIRED_TAG } else { "" });
    join_tags(&tags)
}

fn long_summary_lines(long_summary: &str, infos: [Option<&StatusInfo>; 3]) -> Vec<String> {
    let mut lines = Vec::new();
    if !long_summary.is_empty() {
        lines.push(long_summary.to_string());
    }
    lines.extend(infos.iter().flatten().map(|info| info.message()));
    lines
}

fn short_summary(param: &HelpParameter) -> String {
    let summary = param.short_summary();
    let summary = match summary.find(POSSIBLE_VALUES_MARKER) {
        Some(idx) => &summary[..idx],
        None => summary,
    };
    format!("{summary}{}", choices_defaults_sources(param))
        .trim()
        .to_string()
}

fn choices_defaults_sources(param: &HelpParameter) -> String {
    let mut out = String::new();
    if !param.choices.is_empty() {
        let mut choices = param.choices.clone();
        choices.sort();
        out.push_str(&format!("  Allowed values: {}.", choices.join(", ")));
    }
    if let Some(default) = &param.default {
        out.push_str(&format!("  Default: {default}."));
    }
    if !param.value_sources.is_empty() {
        out.push_str(&format!("  Values from: {}.", param.value_sources.join(", ")));
    }
    out
}
