//! Line-oriented interactive session.
//!
//! Stands in for the pointer-driven UI: `click` lines are routed through the
//! session's double-click detector exactly as mouse clicks would be.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::application::{ClickOutcome, TreeSession};
use crate::cli::error::{CliError, CliResult};

pub const PROMPT: &str = "avl> ";

pub const HELP: &str = "\
commands:
  insert|i <key>   insert a key
  delete|d <key>   delete a key
  click|c <key>    click a node (twice quickly to delete)
  find|f <key>     membership query
  show|s           draw the tree
  json             print the snapshot as JSON
  clear            start over with an empty tree
  help|h           this text
  quit|q           leave";

/// One parsed input line. Keys stay raw text so the session reports bad ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Insert(String),
    Delete(String),
    Click(String),
    Find(String),
    Show,
    Json,
    Clear,
    Help,
    Quit,
}

impl FromStr for ReplCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| CliError::InvalidArgs("empty command".to_string()))?;
        let args: Vec<&str> = words.collect();

        let key = |name: &str| -> CliResult<String> {
            match args.as_slice() {
                [key] => Ok(key.to_string()),
                [] => Err(CliError::InvalidArgs(format!("{name} needs a key"))),
                _ => Err(CliError::InvalidArgs(format!("{name} takes exactly one key"))),
            }
        };
        let bare = |cmd: ReplCommand| -> CliResult<ReplCommand> {
            if args.is_empty() {
                Ok(cmd)
            } else {
                Err(CliError::InvalidArgs(format!("{verb} takes no arguments")))
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "insert" | "i" => Ok(ReplCommand::Insert(key("insert")?)),
            "delete" | "d" => Ok(ReplCommand::Delete(key("delete")?)),
            "click" | "c" => Ok(ReplCommand::Click(key("click")?)),
            "find" | "f" => Ok(ReplCommand::Find(key("find")?)),
            "show" | "s" => bare(ReplCommand::Show),
            "json" => bare(ReplCommand::Json),
            "clear" => bare(ReplCommand::Clear),
            "help" | "h" | "?" => bare(ReplCommand::Help),
            "quit" | "q" | "exit" => bare(ReplCommand::Quit),
            other => Err(CliError::InvalidArgs(format!(
                "unknown command {other:?}, try 'help'"
            ))),
        }
    }
}

/// Read commands from `input` until EOF or `quit`, writing results to `out`.
///
/// Bad commands and bad keys are reported and the loop carries on; only
/// I/O failures end the session with an error.
pub fn run<R: BufRead, W: Write>(session: &mut TreeSession, input: R, out: &mut W) -> CliResult<()> {
    let write_err = |e: std::io::Error| CliError::io("write output", e);

    write!(out, "{PROMPT}").map_err(write_err)?;
    out.flush().map_err(write_err)?;

    for line in input.lines() {
        let line = line.map_err(|e| CliError::io("read input", e))?;
        if !line.trim().is_empty() {
            let keep_going = match line.parse::<ReplCommand>() {
                Ok(cmd) => {
                    debug!(?cmd, "repl command");
                    match execute(session, cmd, out) {
                        Ok(keep_going) => keep_going,
                        Err(e @ CliError::Io { .. }) => return Err(e),
                        Err(e) => {
                            writeln!(out, "error: {e}").map_err(write_err)?;
                            true
                        }
                    }
                }
                Err(e) => {
                    writeln!(out, "error: {e}").map_err(write_err)?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
        write!(out, "{PROMPT}").map_err(write_err)?;
        out.flush().map_err(write_err)?;
    }
    writeln!(out).map_err(write_err)?;
    Ok(())
}

/// Apply one command. Returns false when the session should end.
fn execute<W: Write>(session: &mut TreeSession, cmd: ReplCommand, out: &mut W) -> CliResult<bool> {
    let write_err = |e: std::io::Error| CliError::io("write output", e);

    match cmd {
        ReplCommand::Insert(key) => {
            if session.insert_input(&key)? {
                write!(out, "{}", session.render()).map_err(write_err)?;
            } else {
                writeln!(out, "{} already present", key.trim()).map_err(write_err)?;
            }
        }
        ReplCommand::Delete(key) => {
            if session.delete_input(&key)? {
                write!(out, "{}", session.render()).map_err(write_err)?;
            } else {
                writeln!(out, "{} not found", key.trim()).map_err(write_err)?;
            }
        }
        ReplCommand::Click(key) => match session.click_input(&key)? {
            ClickOutcome::Pending => {
                writeln!(out, "click {} again to delete it", key.trim()).map_err(write_err)?;
            }
            ClickOutcome::Deleted(value) => {
                writeln!(out, "deleted {value}").map_err(write_err)?;
                write!(out, "{}", session.render()).map_err(write_err)?;
            }
            ClickOutcome::Ignored => {
                writeln!(out, "no node {}", key.trim()).map_err(write_err)?;
            }
        },
        ReplCommand::Find(key) => {
            let value = crate::domain::parse_key(&key)?;
            let verdict = if session.tree().contains(value) {
                "found"
            } else {
                "not found"
            };
            writeln!(out, "{value} {verdict}").map_err(write_err)?;
        }
        ReplCommand::Show => {
            write!(out, "{}", session.render()).map_err(write_err)?;
        }
        ReplCommand::Json => {
            writeln!(out, "{}", session.render_json()?).map_err(write_err)?;
        }
        ReplCommand::Clear => {
            session.reset();
            writeln!(out, "cleared").map_err(write_err)?;
        }
        ReplCommand::Help => {
            writeln!(out, "{HELP}").map_err(write_err)?;
        }
        ReplCommand::Quit => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_aliases_when_parsing_then_map_to_same_command() {
        assert_eq!("i 5".parse::<ReplCommand>().unwrap(), ReplCommand::Insert("5".into()));
        assert_eq!("INSERT 5".parse::<ReplCommand>().unwrap(), ReplCommand::Insert("5".into()));
        assert_eq!("d -2".parse::<ReplCommand>().unwrap(), ReplCommand::Delete("-2".into()));
        assert_eq!("c 7".parse::<ReplCommand>().unwrap(), ReplCommand::Click("7".into()));
        assert_eq!("  show ".parse::<ReplCommand>().unwrap(), ReplCommand::Show);
        assert_eq!("q".parse::<ReplCommand>().unwrap(), ReplCommand::Quit);
    }

    #[test]
    fn given_wrong_arity_when_parsing_then_invalid_args() {
        assert!(matches!("insert".parse::<ReplCommand>(), Err(CliError::InvalidArgs(_))));
        assert!(matches!("insert 1 2".parse::<ReplCommand>(), Err(CliError::InvalidArgs(_))));
        assert!(matches!("show 1".parse::<ReplCommand>(), Err(CliError::InvalidArgs(_))));
        assert!(matches!("bogus".parse::<ReplCommand>(), Err(CliError::InvalidArgs(_))));
    }
}
