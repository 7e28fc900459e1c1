//! KLE Keycaps - keyboard-layout-editor layout decoder
//!
//! Command-line front end for inspecting decoded Raw layout documents.
//!
//! # Usage
//!
//! ```bash
//! # List every key with its resolved properties
//! kle-keycaps inspect layout.json
//!
//! # Metadata, LED settings and counts as JSON
//! kle-keycaps summary layout.json --json
//!
//! # Write a default config file
//! kle-keycaps config init
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kle_keycaps::cli::{CliResult, ConfigArgs, ExitCode, InspectArgs, SummaryArgs};
use kle_keycaps::config::Config;

/// KLE Keycaps - decode keyboard-layout-editor Raw layouts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every key of a layout
    Inspect(InspectArgs),
    /// Show layout metadata, LED settings and key counts
    Summary(SummaryArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Inspect(args) => args.execute(),
            Self::Summary(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    // Usage errors share exit code 1 with other invalid input; 2 is reserved for I/O
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::ValidationError
            } else {
                ExitCode::Success
            };
            std::process::exit(code.code());
        }
    };

    // Initialize tracing; logs go to stderr so JSON output stays clean
    let level = Config::load()
        .map(|config| config.logging.level.to_lowercase())
        .unwrap_or_else(|_| "info".to_string());
    let filter = if cli.verbose { "debug".to_string() } else { level };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }

    std::process::exit(ExitCode::Success.code());
}
