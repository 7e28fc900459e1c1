//! Shared plumbing for CLI commands: error type, exit codes and layout loading.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::models::Keyboard;
use crate::parser::{parse_kle_file_with, ParseError, ParseOptions, RotationMode};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: unparseable layout, invalid flag value, invalid config
    ValidationError = 1,
    /// File could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code handed to the OS.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying the exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Numeric exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.code.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        if err.is_content_error() {
            Self::validation(err.to_string())
        } else {
            Self::io(err.to_string())
        }
    }
}

/// Layout file plus the decoder flags shared by `inspect` and `summary`.
#[derive(Debug, Clone, Args)]
pub struct LayoutInput {
    /// Path to a keyboard-layout-editor Raw JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rotation handling; overrides the config file
    #[arg(long, value_name = "MODE", value_enum)]
    pub rotation: Option<RotationMode>,

    /// Only accept strict JSON, not the editor's Raw-pane syntax
    #[arg(long)]
    pub strict_json: bool,
}

impl LayoutInput {
    /// Resolves decoder options: config values first, then flags on top.
    #[must_use]
    pub fn parse_options(&self, config: &Config) -> ParseOptions {
        let mut options = config.parser;

        if let Some(mode) = self.rotation {
            options.rotation = mode;
        }
        if self.strict_json {
            options.relaxed_syntax = false;
        }

        options
    }

    /// Decodes the layout file with the resolved options.
    pub fn load(&self, config: &Config) -> CliResult<Keyboard> {
        let options = self.parse_options(config);
        tracing::debug!(
            "Decoding {} (rotation: {:?}, relaxed syntax: {})",
            self.file.display(),
            options.rotation,
            options.relaxed_syntax
        );

        let keyboard = parse_kle_file_with(&self.file, &options)?;
        tracing::info!(
            "Decoded {} keys from {}",
            keyboard.key_count(),
            display_name(&self.file)
        );

        Ok(keyboard)
    }
}

/// Loads the configuration, mapping failures to a validation error.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().to_string())
}
