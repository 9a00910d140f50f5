//! Domain errors surfaced while building and rendering help.
//!
//! Orchestration code works in `anyhow::Result`; these variants exist for the
//! failures callers need to tell apart (lint reports authoring errors per path
//! instead of aborting).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelpError {
    /// Help text for `path` is structurally wrong.
    #[error("help authoring error in '{path}': {reason}")]
    Authoring { path: String, reason: String },

    #[error("'{0}' is not a command or command group")]
    UnknownCommand(String),

    #[error("invalid value '{value}' for config option {section}.{option}")]
    InvalidConfigValue {
        section: String,
        option: String,
        value: String,
    },
}

impl HelpError {
    pub fn authoring(path: &str, reason: impl Into<String>) -> Self {
        HelpError::Authoring {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
