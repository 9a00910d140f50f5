//! CLI argument parsing for the help renderer.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "chelp",
    version,
    about = "Render command-line help from a command table and help files",
    after_help = "Examples:\n  chelp --table table.yaml show vm create\n  chelp --table table.yaml --help-dir help/ show vm --json\n  chelp --table table.yaml welcome\n  chelp --table table.yaml --help-dir help/ lint",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Command table describing groups, commands, and arguments
    #[arg(long, value_name = "FILE", global = true)]
    pub table: Option<PathBuf>,

    /// Help file or directory of help files (repeatable; later entries win)
    #[arg(long = "help-dir", value_name = "PATH", global = true)]
    pub help_dirs: Vec<PathBuf>,

    /// Wrap width; defaults to help.textwrap_width from config, then 100
    #[arg(long, value_name = "N", global = true)]
    pub width: Option<usize>,

    /// Directory holding config.json (defaults to ~/.<cli name>)
    #[arg(long, value_name = "DIR", env = "CHELP_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Show(ShowArgs),
    Welcome,
    Lint(LintArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Print help for a command or command group")]
pub struct ShowArgs {
    /// Emit the built help as JSON
    #[arg(long)]
    pub json: bool,

    /// Command path, e.g. `vm create`; empty for the root group
    #[arg(value_name = "NOUNS")]
    pub nouns: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Check every help page for authoring problems")]
pub struct LintArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
