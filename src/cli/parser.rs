//! Turns one line of user input into a `Command`.
//!
//! The first word selects the command (case-insensitive). Everything after the
//! first run of whitespace is the argument, taken verbatim for `input` and as a
//! single trimmed word for the name-taking commands.

use crate::error::DecodexError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Input(String),
    Show,
    Select(String),
    Undo,
    Reset,
    Discard,
    Save(String),
    Run(String),
    Edit(String),
    Delete(String),
    Recipe,
    List(ListTarget),
    Help,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    All,
    Modules,
    Recipes,
}

pub fn parse_command(line: &str) -> Result<Command, DecodexError> {
    let line = line.trim_start();
    let (word, rest) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    };
    if word.is_empty() {
        return Err(DecodexError::Parse("empty command".to_string()));
    }

    let keyword = word.to_lowercase();
    let command = match keyword.as_str() {
        "input" => {
            if rest.is_empty() {
                return Err(missing_argument("input", "text"));
            }
            Command::Input(rest.to_string())
        }
        "select" => Command::Select(single_argument("select", "module", rest)?),
        "save" => Command::Save(single_argument("save", "name", rest)?),
        "run" => Command::Run(single_argument("run", "name", rest)?),
        "edit" => Command::Edit(single_argument("edit", "name", rest)?),
        "delete" => Command::Delete(single_argument("delete", "name", rest)?),
        "list" => match rest.trim().to_lowercase().as_str() {
            "" => Command::List(ListTarget::All),
            "modules" => Command::List(ListTarget::Modules),
            "recipes" => Command::List(ListTarget::Recipes),
            other => {
                return Err(DecodexError::Parse(format!(
                    "cannot list '{}': expected 'modules' or 'recipes'",
                    other
                )))
            }
        },
        "show" => no_argument(Command::Show, &keyword, rest)?,
        "undo" => no_argument(Command::Undo, &keyword, rest)?,
        "reset" => no_argument(Command::Reset, &keyword, rest)?,
        "discard" => no_argument(Command::Discard, &keyword, rest)?,
        "recipe" => no_argument(Command::Recipe, &keyword, rest)?,
        "help" => no_argument(Command::Help, &keyword, rest)?,
        "exit" | "quit" => no_argument(Command::Exit, &keyword, rest)?,
        _ => {
            return Err(DecodexError::Parse(format!(
                "unknown command '{}' (type 'help' for a list)",
                word
            )))
        }
    };
    Ok(command)
}

fn missing_argument(command: &str, what: &str) -> DecodexError {
    DecodexError::Parse(format!("'{}' expects a {}", command, what))
}

fn single_argument(command: &str, what: &str, rest: &str) -> Result<String, DecodexError> {
    let arg = rest.trim();
    if arg.is_empty() {
        return Err(missing_argument(command, what));
    }
    if arg.contains(char::is_whitespace) {
        return Err(DecodexError::Parse(format!(
            "'{}' expects a single {}, got '{}'",
            command, what, arg
        )));
    }
    Ok(arg.to_string())
}

fn no_argument(command: Command, keyword: &str, rest: &str) -> Result<Command, DecodexError> {
    if rest.trim().is_empty() {
        Ok(command)
    } else {
        Err(DecodexError::Parse(format!("'{}' takes no arguments", keyword)))
    }
}
