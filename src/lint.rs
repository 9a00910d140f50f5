//! Help authoring checks.
//!
//! Every group and command help is built the same way `show` builds it, so a
//! clean lint run means every help page loads.

use crate::error::HelpError;
use crate::help::{HelpBuilder, HelpFile};
use crate::help_files::{HelpData, HelpStore};
use crate::table::{CommandTable, Target};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LintFinding {
    pub path: String,
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
pub struct LintReport {
    pub findings: Vec<LintFinding>,
    pub errors: usize,
    pub warnings: usize,
}

impl LintReport {
    fn from_findings(findings: BTreeSet<LintFinding>) -> Self {
        let findings: Vec<LintFinding> = findings.into_iter().collect();
        let errors = findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count();
        Self {
            warnings: findings.len() - errors,
            errors,
            findings,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            let severity = match finding.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            out.push_str(&format!(
                "{severity}[{}] '{}': {}\n",
                finding.rule, finding.path, finding.message
            ));
        }
        out.push_str(&format!(
            "{} error(s), {} warning(s)\n",
            self.errors, self.warnings
        ));
        out
    }
}

struct Linter<'a> {
    table: &'a CommandTable,
    store: &'a HelpStore,
    builder: HelpBuilder<'a>,
    findings: BTreeSet<LintFinding>,
}

pub fn lint(table: &CommandTable, store: &HelpStore) -> LintReport {
    let mut linter = Linter {
        table,
        store,
        builder: HelpBuilder::new(table, store),
        findings: BTreeSet::new(),
    };
    linter.check_store_paths();
    let targets = table
        .group_paths()
        .into_iter()
        .chain(std::iter::once(String::new()))
        .map(Target::Group)
        .chain(table.commands.keys().cloned().map(Target::Command));
    for target in targets {
        linter.check_target(&target);
    }
    let report = LintReport::from_findings(linter.findings);
    tracing::info!(
        errors = report.errors,
        warnings = report.warnings,
        "lint finished"
    );
    report
}

impl Linter<'_> {
    fn push(&mut self, path: &str, rule: &'static str, severity: Severity, message: String) {
        self.findings.insert(LintFinding {
            path: path.to_string(),
            rule,
            severity,
            message,
        });
    }

    fn check_store_paths(&mut self) {
        let unknown: Vec<String> = self
            .store
            .paths()
            .filter(|path| !self.table.is_command(path) && !self.table.is_group(path))
            .map(str::to_string)
            .collect();
        for path in unknown {
            self.push(
                &path,
                "unknown-help-entry",
                Severity::Error,
                "help is documented for a path that is neither a command nor a group".to_string(),
            );
        }
    }

    fn check_target(&mut self, target: &Target) {
        let path = target.path();
        let file = match self.builder.build(target) {
            Ok(file) => file,
            Err(HelpError::Authoring { path: failed, reason }) => {
                self.push(&failed, "authoring-error", Severity::Error, reason);
                return;
            }
            Err(err) => {
                self.push(path, "authoring-error", Severity::Error, err.to_string());
                return;
            }
        };

        if !path.is_empty() && file.short_summary().is_empty() {
            self.push(
                path,
                "missing-short-summary",
                Severity::Warning,
                format!("{} has no short summary", file.kind.label()),
            );
        }
        if let Ok(Some(HelpData::Entry(entry))) = self.builder.help_data(path) {
            if let Some(declared) = entry.kind.as_deref() {
                if declared != file.kind.label() {
                    self.push(
                        path,
                        "type-mismatch",
                        Severity::Warning,
                        format!(
                            "help declares type '{declared}' but this is a {}",
                            file.kind.label()
                        ),
                    );
                }
            }
            if !file.is_group() {
                for doc in &entry.parameters {
                    if !file.parameters.iter().any(|param| param.name == doc.name) {
                        self.push(
                            path,
                            "unknown-parameter",
                            Severity::Error,
                            format!("parameter '{}' is not defined", doc.name),
                        );
                    }
                }
            }
        }
        self.check_examples(&file);
    }

    fn check_examples(&mut self, file: &HelpFile) {
        for example in &file.examples {
            for line in example_commands(&example.text) {
                self.check_example_line(&file.command, &line);
            }
        }
    }

    fn check_example_line(&mut self, path: &str, line: &str) {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(err) => {
                self.push(
                    path,
                    "unparseable-example",
                    Severity::Warning,
                    format!("cannot split '{line}': {err}"),
                );
                return;
            }
        };
        if words.first().map(String::as_str) != Some(self.table.name.as_str()) {
            return;
        }
        let nouns: Vec<&str> = words[1..]
            .iter()
            .map(String::as_str)
            .take_while(|word| !word.starts_with('-'))
            .collect();
        let known = (1..=nouns.len())
            .rev()
            .any(|len| self.table.is_command(&nouns[..len].join(" ")));
        if !known {
            self.push(
                path,
                "unknown-example-command",
                Severity::Warning,
                format!("example does not run a known command: {line}"),
            );
        }
    }
}

/// Logical lines of an example, with `\` continuations joined.
fn example_commands(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for raw in text.lines() {
        let trimmed = raw.trim();
        match trimmed.strip_suffix('\\') {
            Some(head) => {
                current.push_str(head);
                current.push(' ');
            }
            None => {
                current.push_str(trimmed);
                if !current.trim().is_empty() {
                    lines.push(current.trim().to_string());
                }
                current.clear();
            }
        }
    }
    if !current.trim().is_empty() {
        lines.push(current.trim().to_string());
    }
    lines
}
