//! taskvault CLI entry point.

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::process::ExitCode;
use taskvault::cli::args::{Cli, Commands};
use taskvault::cli::output::Output;
use taskvault::cli::{edit, init_logging, tasks};
use taskvault::config::Config;
use taskvault::error::{ExitCode as VaultExitCode, VaultError};
use taskvault::parser::parse_relative_date;
use taskvault::session::Session;
use taskvault::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<VaultExitCode, VaultError> {
    // Load config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Resolve vault path
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path, config)?;

    let today = resolve_today(cli.today.as_deref())?;
    let output = Output::new(cli.output_format(), cli.quiet);
    let mut session = Session::open(&vault, today)?;

    match &cli.command {
        Commands::List(args) => tasks::list(&mut session, &vault.root, args, &output)?,
        Commands::Board(args) => tasks::board(&mut session, &vault.root, args, &output)?,
        Commands::Toggle(args) => edit::toggle(&mut session, &vault, args, &output)?,
        Commands::Delete(args) => edit::delete(&mut session, &vault, args, &output)?,
        Commands::Edit(args) => edit::edit(&mut session, &vault, args, &output)?,
        Commands::Add(args) => edit::add(&mut session, &vault, args, &output)?,
    }

    Ok(VaultExitCode::Success)
}

fn resolve_today(value: Option<&str>) -> Result<NaiveDate, VaultError> {
    let now = Local::now().date_naive();
    match value {
        Some(value) => {
            parse_relative_date(value, now).ok_or_else(|| VaultError::InvalidDate(value.to_string()))
        }
        None => Ok(now),
    }
}
