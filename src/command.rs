//! Parses the text typed after `:` into a session command.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// A command entered on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Write both tables to a Markdown file
    Export(PathBuf),

    /// Replace the tuning; the tokens are validated when the command runs
    Retune(Vec<String>),

    /// Replace the tuning with a named preset
    Load(String),

    /// Show the key reference
    Help,

    /// Leave the program
    Quit,
}

const EXPORT_USAGE: &str = "export <path>";
const RETUNE_USAGE: &str = "retune C2 D2 F2 G2 A2 C3 D3";
const LOAD_USAGE: &str = "load <preset>";

impl Command {
    /// Tokenize `line` on whitespace and match the leading verb.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut tokens = line.split_whitespace();
        let verb = match tokens.next() {
            Some(verb) => verb.to_lowercase(),
            None => return Ok(None),
        };
        let args: Vec<&str> = tokens.collect();

        let command = match verb.as_str() {
            "export" => match args.first() {
                Some(path) => Command::Export(PathBuf::from(*path)),
                None => return Err(Error::MissingArgument { usage: EXPORT_USAGE }),
            },
            "retune" => {
                if args.is_empty() {
                    return Err(Error::MissingArgument { usage: RETUNE_USAGE });
                }
                Command::Retune(args.iter().map(|s| s.to_string()).collect())
            }
            "load" => {
                if args.is_empty() {
                    return Err(Error::MissingArgument { usage: LOAD_USAGE });
                }
                Command::Load(args.join(" "))
            }
            "help" => Command::Help,
            "quit" | "q" => Command::Quit,
            _ => return Err(Error::UnknownCommand(verb)),
        };

        Ok(Some(command))
    }
}
