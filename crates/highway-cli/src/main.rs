use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use highway_cli::logging::{init_logging, LoggingConfig};
use highway_cli::{Dialect, OutputFormat, ResponseWriter, Session};
use highway_lib::HighwayConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Highway station registry and route planner")]
struct Cli {
    /// JSON file overriding table and snapshot sizing.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Vocabulary for text acknowledgements.
    #[arg(long, value_enum, default_value_t = Dialect::English, global = true)]
    dialect: Dialect,

    /// Acknowledgement format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a command script and print one acknowledgement per command.
    Run {
        /// Script file to read. Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    match cli.command {
        Command::Run { input } => handle_run(
            cli.config.as_deref(),
            input.as_deref(),
            cli.format,
            cli.dialect,
        ),
    }
}

fn load_config(path: Option<&Path>) -> Result<HighwayConfig> {
    match path {
        Some(path) => HighwayConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(HighwayConfig::default()),
    }
}

fn handle_run(
    config: Option<&Path>,
    input: Option<&Path>,
    format: OutputFormat,
    dialect: Dialect,
) -> Result<()> {
    let mut session = Session::new(load_config(config)?);
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(BufWriter::new(stdout.lock()), format, dialect);

    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run_script(BufReader::new(file), &mut writer)?;
        }
        None => {
            session.run_script(io::stdin().lock(), &mut writer)?;
        }
    }
    Ok(())
}
