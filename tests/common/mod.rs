//! Shared test infrastructure for integration tests.

#![allow(dead_code)]

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test fixture metadata loaded from fixture.json.
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    pub table: String,
    #[serde(default)]
    pub help_dirs: Vec<String>,
}

/// A command table fixture plus a scratch config dir for `chelp`.
pub struct TestFixture {
    pub fixture_dir: PathBuf,
    pub config: FixtureConfig,
    pub config_dir: TempDir,
}

/// Captured result of one `chelp` run.
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

impl TestFixture {
    /// Load a fixture by name from tests/fixtures/{name}/.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let fixture_dir = manifest_dir().join("tests/fixtures").join(name);
        let config_path = fixture_dir.join("fixture.json");
        let config: FixtureConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to read {}: {}", config_path.display(), e)
            })?)?;
        Ok(Self {
            fixture_dir,
            config,
            config_dir: TempDir::new()?,
        })
    }

    pub fn table_path(&self) -> PathBuf {
        self.fixture_dir.join(&self.config.table)
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "--table".to_string(),
            self.table_path().display().to_string(),
        ];
        for dir in &self.config.help_dirs {
            args.push("--help-dir".to_string());
            args.push(self.fixture_dir.join(dir).display().to_string());
        }
        args
    }

    /// Run chelp against this fixture with a UTF-8 locale.
    pub fn run(&self, args: &[&str]) -> RunOutput {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> RunOutput {
        self.run_with_help(args, &[], envs)
    }

    /// Run with extra help paths appended after the fixture's own.
    pub fn run_with_help(&self, args: &[&str], help: &[&Path], envs: &[(&str, &str)]) -> RunOutput {
        let mut all_args = self.base_args();
        for path in help {
            all_args.push("--help-dir".to_string());
            all_args.push(path.display().to_string());
        }
        all_args.extend(args.iter().map(|arg| arg.to_string()));

        let mut command = Command::new(env!("CARGO_BIN_EXE_chelp"));
        command
            .args(&all_args)
            .env("LC_ALL", "C.UTF-8")
            .env("CHELP_CONFIG_DIR", self.config_dir.path())
            .env_remove("RUST_LOG");
        for (key, value) in envs {
            command.env(key, value);
        }
        let output = command.output().expect("run chelp");
        RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
