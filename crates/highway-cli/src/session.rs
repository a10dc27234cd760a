use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use highway_lib::{Highway, HighwayConfig};
use tracing::{debug, info};

use crate::output::{Response, ResponseWriter};
use crate::protocol::{Command, CommandReader};

/// A running highway fed by script commands.
#[derive(Debug, Default)]
pub struct Session {
    highway: Highway,
}

impl Session {
    pub fn new(config: HighwayConfig) -> Self {
        Self {
            highway: Highway::new(config),
        }
    }

    pub fn highway(&self) -> &Highway {
        &self.highway
    }

    /// Apply one command and describe its outcome.
    pub fn execute(&mut self, command: Command) -> highway_lib::Result<Response> {
        let response = match command {
            Command::AddStation { position, ranges } => Response::StationAdded {
                position,
                added: self.highway.register_station_with_vehicles(position, ranges),
            },
            Command::RemoveStation { position } => Response::StationRemoved {
                position,
                removed: self.highway.remove_station(position),
            },
            Command::AddVehicle { position, range } => Response::VehicleAdded {
                position,
                range,
                added: self.highway.add_vehicle(position, range),
            },
            Command::RemoveVehicle { position, range } => Response::VehicleScrapped {
                position,
                range,
                scrapped: self.highway.remove_vehicle(position, range),
            },
            Command::PlanRoute { start, goal } => Response::Route {
                start,
                goal,
                steps: self
                    .highway
                    .plan_route(start, goal)?
                    .map(|plan| plan.steps),
            },
        };
        Ok(response)
    }

    /// Execute every command in `input`, writing one acknowledgement each.
    ///
    /// Stops at the first malformed command or failed query. Returns the
    /// number of commands executed.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        input: R,
        writer: &mut ResponseWriter<W>,
    ) -> Result<usize> {
        let mut executed = 0;
        for (index, command) in CommandReader::new(input).enumerate() {
            let number = index + 1;
            let command = command.with_context(|| format!("failed to read command {number}"))?;
            let keyword = command.keyword();
            debug!(number, keyword, "executing command");
            let response = self
                .execute(command)
                .with_context(|| format!("command {number} (`{keyword}`) failed"))?;
            writer
                .write(&response)
                .context("failed to write acknowledgement")?;
            executed = number;
        }
        writer.flush().context("failed to flush output")?;
        info!(executed, stations = self.highway.stations().len(), "script finished");
        Ok(executed)
    }
}
