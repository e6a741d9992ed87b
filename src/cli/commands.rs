//! Command dispatch

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{
    adjust_by_percentage, load_seed, parse_amount, parse_percentage, set_value, totals,
    ApplicationError, IoResultExt, Report, Update, Workbook,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{node_line, ToTermTree};
use crate::config::{global_config_path, DisplayConfig, Settings};
use crate::domain::{check_subtotals, require, require_parent, DomainError, Tree};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given (try --help)".to_string()));
    };
    // Completion must work even when the config file is broken
    if let Commands::Completion { shell } = command {
        return print_completion(*shell);
    }

    let settings = Settings::load()?;
    debug!(?settings, "settings loaded");
    dispatch(cli, command, &settings)
}

fn dispatch(cli: &Cli, command: &Commands, settings: &Settings) -> CliResult<()> {
    match command {
        Commands::Show { json } => cmd_show(&load_tree(cli, settings)?, settings, *json),
        Commands::Totals => cmd_totals(&load_tree(cli, settings)?, &settings.display),
        Commands::Find { id } => cmd_find(&load_tree(cli, settings)?, id, settings),
        Commands::Parent { id } => cmd_parent(&load_tree(cli, settings)?, id, settings),
        Commands::Set { id, value, json } => {
            let value = parse_amount(value)?;
            let tree = load_tree(cli, settings)?;
            let next = set_value(&tree, id, value)?;
            print_tree(&next, &settings.display, *json)
        }
        Commands::Adjust { id, percent, json } => {
            let percentage = parse_percentage(percent)?;
            let tree = load_tree(cli, settings)?;
            let next = adjust_by_percentage(&tree, id, percentage)?;
            print_tree(&next, &settings.display, *json)
        }
        Commands::Apply { file, json } => {
            cmd_apply(load_tree(cli, settings)?, file, &settings.display, *json)
        }
        Commands::Check { tolerance } => cmd_check(&load_tree(cli, settings)?, *tolerance),
        Commands::Config { command } => cmd_config(command, settings),
        Commands::Completion { shell } => print_completion(*shell),
    }
}

fn print_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn seed_path(cli: &Cli, settings: &Settings) -> CliResult<PathBuf> {
    cli.seed
        .clone()
        .or_else(|| settings.seed.clone())
        .ok_or_else(|| ApplicationError::MissingSeed.into())
}

fn load_tree(cli: &Cli, settings: &Settings) -> CliResult<Tree> {
    let path = seed_path(cli, settings)?;
    Ok(load_seed(&path)?)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Io {
        context: "serialize output".to_string(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;
    output::info(&text);
    Ok(())
}

fn print_tree(tree: &Tree, display: &DisplayConfig, json: bool) -> CliResult<()> {
    if json {
        return print_json(tree);
    }
    output::info(&tree.to_term_tree(display));
    Ok(())
}

#[instrument(skip_all)]
fn cmd_show(tree: &Tree, settings: &Settings, json: bool) -> CliResult<()> {
    if json {
        return print_json(&Report::build(tree));
    }
    print_tree(tree, &settings.display, false)
}

#[instrument(skip_all)]
fn cmd_totals(tree: &Tree, display: &DisplayConfig) -> CliResult<()> {
    let total = totals(tree);
    output::action("total", &output::amount(total.value, display.decimals));
    output::action("original", &output::amount(total.original_value, display.decimals));
    output::action("variance", &output::variance(total.variance, display.decimals));
    Ok(())
}

#[instrument(skip(tree, settings))]
fn cmd_find(tree: &Tree, id: &str, settings: &Settings) -> CliResult<()> {
    let node = require(tree.roots(), id)?;
    output::info(&node_line(node, &settings.display));
    Ok(())
}

#[instrument(skip(tree, settings))]
fn cmd_parent(tree: &Tree, id: &str, settings: &Settings) -> CliResult<()> {
    let parent = require_parent(tree.roots(), id)?;
    output::info(&node_line(parent, &settings.display));
    Ok(())
}

#[instrument(skip(tree, display))]
fn cmd_apply(tree: Tree, file: &Path, display: &DisplayConfig, json: bool) -> CliResult<()> {
    let (current, _) = run_batch(tree, file)?;
    print_tree(&current, display, json)
}

/// Applies the update file to `tree`, warning about and skipping updates that fail.
///
/// A malformed line rejects the whole file before anything is applied.
fn run_batch(tree: Tree, file: &Path) -> CliResult<(Tree, Vec<(Update, DomainError)>)> {
    let text = fs::read_to_string(file).with_path_context("read updates", file)?;
    let updates = Update::parse_batch(&text)?;

    let mut workbook = Workbook::new(tree);
    let skipped = workbook.apply_all(&updates);
    for (update, error) in &skipped {
        output::warning(&format!("skipped '{update}': {error}"));
    }
    debug!(applied = updates.len() - skipped.len(), skipped = skipped.len());

    Ok((workbook.into_current(), skipped))
}

#[instrument(skip(tree))]
fn cmd_check(tree: &Tree, tolerance: f64) -> CliResult<()> {
    let offenders = check_subtotals(tree.roots(), tolerance);
    if offenders.is_empty() {
        output::success("all subtotals consistent");
        return Ok(());
    }
    for id in &offenders {
        output::failure(id);
    }
    Err(CliError::Inconsistent(offenders.iter().join(", ")))
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
        ConfigCommands::Init => output::info(&Settings::template()),
    }
    Ok(())
}
