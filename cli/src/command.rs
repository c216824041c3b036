use std::str::FromStr;

use sweeper_core::{CellCount, Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Settings(Coord, Coord, CellCount),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Command {command:?} expects {expected} numbers")]
    WrongArity { command: String, expected: usize },
    #[error("Not a valid number: {0:?}")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
r <row> <col>            reveal a cell
f <row> <col>            flag or unflag a cell
n                        new game
s <rows> <cols> <mines>  change settings
h                        show this help
q                        quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let numbers = |expected: usize| -> Result<Vec<u16>, CommandError> {
            if args.len() != expected {
                return Err(CommandError::WrongArity {
                    command: name.to_string(),
                    expected,
                });
            }
            args.iter()
                .map(|arg| {
                    arg.parse::<u16>()
                        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
                })
                .collect()
        };
        let coord = |value: u16| -> Result<Coord, CommandError> {
            Coord::try_from(value).map_err(|_| CommandError::InvalidNumber(value.to_string()))
        };

        Ok(match name {
            "r" | "reveal" => {
                let n = numbers(2)?;
                Self::Reveal((coord(n[0])?, coord(n[1])?))
            }
            "f" | "flag" => {
                let n = numbers(2)?;
                Self::Flag((coord(n[0])?, coord(n[1])?))
            }
            "s" | "settings" => {
                let n = numbers(3)?;
                Self::Settings(coord(n[0])?, coord(n[1])?, n[2])
            }
            "n" | "new" => {
                numbers(0)?;
                Self::NewGame
            }
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        })
    }
}
