//! Persistent CLI configuration.
//!
//! Values live in `config.json` under the CLI config directory as sections of
//! string options. Environment variables named `{CLI}_{SECTION}_{OPTION}`
//! override the file.

use crate::error::HelpError;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const TRUE_VALUES: [&str; 4] = ["1", "yes", "true", "on"];
const FALSE_VALUES: [&str; 4] = ["0", "no", "false", "off"];

type Sections = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug)]
pub struct CliConfig {
    env_prefix: String,
    path: PathBuf,
    sections: Sections,
    env_overrides: BTreeMap<String, String>,
}

/// `~/.{cli}` when a home directory is known.
pub fn default_dir(cli_name: &str) -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(format!(".{cli_name}")))
}

impl CliConfig {
    pub fn load(cli_name: &str, dir: &Path) -> Result<Self> {
        let env_prefix = format!("{}_", env_segment(cli_name));
        let env_overrides = std::env::vars()
            .filter(|(key, _)| key.starts_with(&env_prefix))
            .collect();
        Self::load_with_env(&env_prefix, dir, env_overrides)
    }

    fn load_with_env(
        env_prefix: &str,
        dir: &Path,
        env_overrides: BTreeMap<String, String>,
    ) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let sections = if path.is_file() {
            let bytes =
                fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parse config {}", path.display()))?
        } else {
            Sections::new()
        };
        tracing::debug!(path = %path.display(), "loaded cli config");
        Ok(Self {
            env_prefix: env_prefix.to_string(),
            path,
            sections,
            env_overrides,
        })
    }

    fn env_key(&self, section: &str, option: &str) -> String {
        format!(
            "{}{}_{}",
            self.env_prefix,
            env_segment(section),
            env_segment(option)
        )
    }

    pub fn get(&self, section: &str, option: &str) -> Option<String> {
        if let Some(value) = self.env_overrides.get(&self.env_key(section, option)) {
            return Some(value.clone());
        }
        self.sections
            .get(section)
            .and_then(|options| options.get(option))
            .cloned()
    }

    pub fn get_bool(&self, section: &str, option: &str, fallback: bool) -> Result<bool, HelpError> {
        let Some(value) = self.get(section, option) else {
            return Ok(fallback);
        };
        let lower = value.trim().to_ascii_lowercase();
        if TRUE_VALUES.contains(&lower.as_str()) {
            Ok(true)
        } else if FALSE_VALUES.contains(&lower.as_str()) {
            Ok(false)
        } else {
            Err(invalid(section, option, value))
        }
    }

    pub fn get_usize(&self, section: &str, option: &str) -> Result<Option<usize>, HelpError> {
        self.get(section, option)
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(section, option, value))
            })
            .transpose()
    }

    /// Set a value and write the file right away.
    pub fn set_value(&mut self, section: &str, option: &str, value: &str) -> Result<()> {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.sections).context("serialize config")?;
        fs::write(&self.path, text.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

fn env_segment(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn invalid(section: &str, option: &str, value: String) -> HelpError {
    HelpError::InvalidConfigValue {
        section: section.to_string(),
        option: option.to_string(),
        value,
    }
}
