use std::io::{self, Write};

use clap::ValueEnum;
use highway_lib::{Position, Range};
use serde::Serialize;

/// Vocabulary used for text acknowledgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Dialect {
    #[default]
    English,
    Italian,
}

/// Shape of the acknowledgement stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One plain acknowledgement per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Outcome of one executed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    StationAdded {
        position: Position,
        added: bool,
    },
    StationRemoved {
        position: Position,
        removed: bool,
    },
    VehicleAdded {
        position: Position,
        range: Range,
        added: bool,
    },
    VehicleScrapped {
        position: Position,
        range: Range,
        scrapped: bool,
    },
    Route {
        start: Position,
        goal: Position,
        steps: Option<Vec<Position>>,
    },
}

impl Response {
    pub fn render_text(&self, dialect: Dialect) -> String {
        let (yes, no, outcome) = match (self, dialect) {
            (Response::StationAdded { added, .. }, Dialect::English)
            | (Response::VehicleAdded { added, .. }, Dialect::English) => {
                ("added", "not added", *added)
            }
            (Response::StationAdded { added, .. }, Dialect::Italian)
            | (Response::VehicleAdded { added, .. }, Dialect::Italian) => {
                ("aggiunta", "non aggiunta", *added)
            }
            (Response::StationRemoved { removed, .. }, Dialect::English) => {
                ("removed", "not removed", *removed)
            }
            (Response::StationRemoved { removed, .. }, Dialect::Italian) => {
                ("demolita", "non demolita", *removed)
            }
            (Response::VehicleScrapped { scrapped, .. }, Dialect::English) => {
                ("scrapped", "not scrapped", *scrapped)
            }
            (Response::VehicleScrapped { scrapped, .. }, Dialect::Italian) => {
                ("rottamata", "non rottamata", *scrapped)
            }
            (Response::Route { steps, .. }, _) => return render_route(steps.as_deref(), dialect),
        };
        let text = if outcome { yes } else { no };
        text.to_string()
    }
}

fn render_route(steps: Option<&[Position]>, dialect: Dialect) -> String {
    match steps {
        Some(steps) => steps
            .iter()
            .map(Position::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        None => match dialect {
            Dialect::English => "no route".to_string(),
            Dialect::Italian => "nessun percorso".to_string(),
        },
    }
}

/// Writes acknowledgements to an output stream, one per line.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    out: W,
    format: OutputFormat,
    dialect: Dialect,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(out: W, format: OutputFormat, dialect: Dialect) -> Self {
        Self {
            out,
            format,
            dialect,
        }
    }

    pub fn write(&mut self, response: &Response) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", response.render_text(self.dialect)),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, response)?;
                writeln!(self.out)
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
