//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::{APP_BINARY_NAME, APP_NAME};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Write a configuration file with default values
    Init(ConfigInitArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a configuration file with default values
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: String,
    exists: bool,
    #[serde(flatten)]
    config: Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Init(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?;

        let output = ConfigOutput {
            path: path.display().to_string(),
            exists: path.exists(),
            config,
        };

        if self.json {
            print_json(&output)?;
        } else {
            output_human_readable(&output);
        }

        Ok(())
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        if Config::exists() && !self.force {
            return Err(CliError::validation(format!(
                "Configuration file already exists. Run `{APP_BINARY_NAME} config init --force` to overwrite it"
            )));
        }

        let path = Config::new()
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        tracing::info!("Wrote default configuration to {}", path.display());
        println!("Configuration written to {}", path.display());
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();

    let state = if output.exists { "" } else { " (not created, using defaults)" };
    println!("File: {}{state}", output.path);
    println!();

    println!("Parser:");
    let rotation = output.config.parser.rotation.to_possible_value();
    println!(
        "  Rotation: {}",
        rotation.as_ref().map_or("", clap::builder::PossibleValue::get_name)
    );
    println!(
        "  Relaxed Syntax: {}",
        output.config.parser.relaxed_syntax
    );
    println!();

    println!("Output:");
    println!("  JSON: {}", output.config.output.json);
    println!();

    println!("Logging:");
    println!("  Level: {}", output.config.logging.level);
}
