//! Parser for the whitespace-delimited command script.
//!
//! A script is a stream of tokens; line breaks carry no meaning. Each command
//! starts with a keyword followed by a fixed number of non-negative integers,
//! except `add-station`, whose second integer says how many vehicle ranges
//! follow. Keywords are accepted in English and in Italian.

use std::collections::VecDeque;
use std::io::BufRead;
use std::iter::FusedIterator;

use highway_lib::{Position, Range};
use thiserror::Error;

/// Upper bound on ranges pre-allocated for one `add-station`, whatever count
/// the script announces.
const MAX_PREALLOCATED_RANGES: usize = 1024;

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStation {
        position: Position,
        ranges: Vec<Range>,
    },
    RemoveStation { position: Position },
    AddVehicle { position: Position, range: Range },
    RemoveVehicle { position: Position, range: Range },
    PlanRoute { start: Position, goal: Position },
}

impl Command {
    /// Canonical keyword of the command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::AddStation { .. } => "add-station",
            Command::RemoveStation { .. } => "remove-station",
            Command::AddVehicle { .. } => "add-vehicle",
            Command::RemoveVehicle { .. } => "remove-vehicle",
            Command::PlanRoute { .. } => "plan-route",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    AddStation,
    RemoveStation,
    AddVehicle,
    RemoveVehicle,
    PlanRoute,
}

impl Keyword {
    fn parse(word: &str) -> Option<Self> {
        let keyword = match word {
            "add-station" | "aggiungi-stazione" => Keyword::AddStation,
            "remove-station" | "demolisci-stazione" => Keyword::RemoveStation,
            "add-vehicle" | "aggiungi-auto" => Keyword::AddVehicle,
            "remove-vehicle" | "rottama-auto" => Keyword::RemoveVehicle,
            "plan-route" | "pianifica-percorso" => Keyword::PlanRoute,
            _ => return None,
        };
        Some(keyword)
    }

    fn name(self) -> &'static str {
        match self {
            Keyword::AddStation => "add-station",
            Keyword::RemoveStation => "remove-station",
            Keyword::AddVehicle => "add-vehicle",
            Keyword::RemoveVehicle => "remove-vehicle",
            Keyword::PlanRoute => "plan-route",
        }
    }
}

/// Errors raised while reading a command script.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("expected a non-negative integer for {field} of `{command}`, found `{token}`")]
    InvalidInteger {
        command: &'static str,
        field: &'static str,
        token: String,
    },

    #[error("input ended inside `{command}` while reading {field}")]
    Truncated {
        command: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Streaming reader turning a script into [`Command`]s.
///
/// Input is consumed one line at a time, so arbitrarily long scripts are
/// processed without being loaded into memory. After the first error the
/// reader yields nothing more.
#[derive(Debug)]
pub struct CommandReader<R> {
    reader: R,
    pending: VecDeque<String>,
    failed: bool,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            failed: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<String>, ProtocolError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
    }

    fn integer(&mut self, keyword: Keyword, field: &'static str) -> Result<u64, ProtocolError> {
        let command = keyword.name();
        let token = self
            .next_token()?
            .ok_or(ProtocolError::Truncated { command, field })?;
        token
            .parse()
            .map_err(|_| ProtocolError::InvalidInteger {
                command,
                field,
                token,
            })
    }

    /// Read the next command, or `None` at the end of the script or once an
    /// earlier read has failed.
    pub fn read_command(&mut self) -> Result<Option<Command>, ProtocolError> {
        if self.failed {
            return Ok(None);
        }
        let command = self.parse_command();
        self.failed = command.is_err();
        command
    }

    fn parse_command(&mut self) -> Result<Option<Command>, ProtocolError> {
        let Some(word) = self.next_token()? else {
            return Ok(None);
        };
        let keyword = Keyword::parse(&word).ok_or(ProtocolError::UnknownCommand(word))?;

        let command = match keyword {
            Keyword::AddStation => {
                let position = self.integer(keyword, "position")?;
                let count = self.integer(keyword, "vehicle count")?;
                let preallocate = usize::try_from(count)
                    .unwrap_or(usize::MAX)
                    .min(MAX_PREALLOCATED_RANGES);
                let mut ranges = Vec::with_capacity(preallocate);
                for _ in 0..count {
                    ranges.push(self.integer(keyword, "vehicle range")?);
                }
                Command::AddStation { position, ranges }
            }
            Keyword::RemoveStation => Command::RemoveStation {
                position: self.integer(keyword, "position")?,
            },
            Keyword::AddVehicle => Command::AddVehicle {
                position: self.integer(keyword, "position")?,
                range: self.integer(keyword, "range")?,
            },
            Keyword::RemoveVehicle => Command::RemoveVehicle {
                position: self.integer(keyword, "position")?,
                range: self.integer(keyword, "range")?,
            },
            Keyword::PlanRoute => Command::PlanRoute {
                start: self.integer(keyword, "start")?,
                goal: self.integer(keyword, "goal")?,
            },
        };
        Ok(Some(command))
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<Command, ProtocolError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_command().transpose()
    }
}

impl<R: BufRead> FusedIterator for CommandReader<R> {}
