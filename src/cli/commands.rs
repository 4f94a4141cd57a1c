//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::TreeSession;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, repl};
use crate::config::{global_config_path, Settings};
use crate::domain::height_bound;
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { keys, delete, json }) => show(container, keys, delete, *json),
        Some(Commands::Trace { keys }) => trace(container, keys),
        Some(Commands::Check { keys }) => check(container, keys),
        Some(Commands::Repl) => run_repl(container),
        Some(Commands::Config { command }) => config(container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e)),
    }
}

/// Insert `keys` in order into a fresh session.
fn build(container: &ServiceContainer, keys: &[String]) -> CliResult<TreeSession> {
    let mut session = container.session();
    for key in keys {
        if !session.insert_input(key)? {
            output::warning(&format!("duplicate key {} ignored", key.trim()));
        }
    }
    Ok(session)
}

#[instrument(skip(container))]
fn show(container: &ServiceContainer, keys: &[String], delete: &[String], json: bool) -> CliResult<()> {
    let mut session = build(container, keys)?;
    for key in delete {
        if !session.delete_input(key)? {
            output::warning(&format!("key {} not in tree", key.trim()));
        }
    }
    debug!(len = session.tree().len(), height = session.tree().height(), "built tree");

    if json {
        output::info(&session.render_json()?);
    } else {
        print!("{}", session.render());
    }
    Ok(())
}

#[instrument(skip(container))]
fn trace(container: &ServiceContainer, keys: &[String]) -> CliResult<()> {
    let mut session = container.session();
    for key in keys {
        let inserted = session.insert_input(key)?;
        if inserted {
            output::header(&format!("insert {}", key.trim()));
            print!("{}", session.render());
        } else {
            output::header(&format!("insert {} (duplicate, unchanged)", key.trim()));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, keys: &[String]) -> CliResult<()> {
    let session = build(container, keys)?;
    let tree = session.tree();
    tree.validate()?;

    let bound = height_bound(tree.len());
    output::success(&format!("valid AVL tree with {} keys", tree.len()));
    output::detail(&format!("height {} (bound {:.2})", tree.height(), bound));
    match tree.root_value() {
        Some(root) => output::detail(&format!("root {root}")),
        None => output::detail(&"empty"),
    }
    if tree.height() as f64 > bound {
        output::failure(&"height exceeds the AVL bound");
    }
    Ok(())
}

fn run_repl(container: &ServiceContainer) -> CliResult<()> {
    let mut session = container.session();
    output::header(&"avlviz: type 'help' for commands");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout)
}

fn config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning(&"no home directory, global config unavailable"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
