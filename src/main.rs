use anyhow::{anyhow, Result};
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod help;
mod help_files;
mod lint;
mod output;
mod status;
mod table;
mod util;

use cli::{Command, LintArgs, RootArgs, ShowArgs};
use config::CliConfig;
use help::{CliHelp, HelpBuilder, DEFAULT_WIDTH};
use help_files::HelpStore;
use output::{HelpWriter, OutputEncoding};
use table::CommandTable;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let table_path = args
        .table
        .as_ref()
        .ok_or_else(|| anyhow!("--table is required"))?;
    let table = CommandTable::load(table_path)?;
    let store = HelpStore::load(&args.help_dirs)?;

    match &args.command {
        Command::Show(show) => cmd_show(&args, &table, &store, show),
        Command::Welcome => cmd_welcome(&args, &table, &store),
        Command::Lint(lint_args) => cmd_lint(&table, &store, lint_args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &RootArgs, table: &CommandTable) -> Result<CliConfig> {
    let dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => config::default_dir(&table.name)
            .ok_or_else(|| anyhow!("no home directory found; pass --config-dir"))?,
    };
    CliConfig::load(&table.name, &dir)
}

fn cli_help(args: &RootArgs, table: &CommandTable, config: &CliConfig) -> Result<CliHelp> {
    let width = match args.width {
        Some(width) => width,
        None => config
            .get_usize("help", "textwrap_width")?
            .unwrap_or(DEFAULT_WIDTH),
    };
    Ok(CliHelp::new(&table.name, width)
        .with_welcome_message(table.welcome_message.clone())
        .with_privacy_statement(table.privacy_statement.clone()))
}

fn stdout_writer() -> HelpWriter<io::StdoutLock<'static>> {
    HelpWriter::new(io::stdout().lock(), OutputEncoding::detect())
}

fn cmd_show(
    args: &RootArgs,
    table: &CommandTable,
    store: &HelpStore,
    show: &ShowArgs,
) -> Result<()> {
    let target = table.resolve(&show.nouns)?;
    tracing::debug!(path = %target.path(), "showing help");
    let file = HelpBuilder::new(table, store).build(&target)?;

    let mut out = stdout_writer();
    if show.json {
        out.line(&serde_json::to_string_pretty(&file)?)?;
    } else {
        let config = load_config(args, table)?;
        cli_help(args, table, &config)?.print_detailed_help(&mut out, &file)?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_welcome(args: &RootArgs, table: &CommandTable, store: &HelpStore) -> Result<()> {
    let root = HelpBuilder::new(table, store).group("")?;
    let mut config = load_config(args, table)?;
    let help = cli_help(args, table, &config)?;
    let mut out = stdout_writer();
    help.show_welcome(&mut out, &mut config, &root)?;
    out.flush()?;
    Ok(())
}

fn cmd_lint(table: &CommandTable, store: &HelpStore, args: &LintArgs) -> Result<()> {
    let report = lint::lint(table, store);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    if report.errors > 0 {
        return Err(anyhow!("{} help authoring error(s)", report.errors));
    }
    Ok(())
}
