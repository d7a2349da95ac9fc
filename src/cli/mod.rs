//! CLI module for the api1 compiler
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `check <path>...` - Compile and print a summary per group
//! - `dump <path>...` - Compile and emit the schema as JSON
//! - `routes <path>...` - Compile and print the route table
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::CompileConfig;
use crate::frontend::ast::PathStyle;
use crate::version::API1_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The api1 schema compiler
#[derive(Parser, Debug)]
#[command(name = "api1")]
#[command(version = API1_VERSION)]
#[command(about = "Compile api1 interface definitions into a validated, route-annotated schema", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Extension of source files searched for inside directories
    #[arg(long = "ext", value_name = "EXT", default_value = "api", global = true)]
    pub ext: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile and print a one-line summary per group
    Check {
        /// Source files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Compile and emit the schema as pretty JSON
    Dump {
        /// Source files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Placeholder style of route paths
        #[arg(long, value_enum, default_value_t = StyleArg::Colon)]
        style: StyleArg,
    },

    /// Compile and print the route table
    Routes {
        /// Source files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Placeholder style of route paths
        #[arg(long, value_enum, default_value_t = StyleArg::Colon)]
        style: StyleArg,
    },
}

/// Route path style as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    /// `/users/:id`
    Colon,
    /// `/users/{id}`
    Brace,
}

impl From<StyleArg> for PathStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Colon => PathStyle::Colon,
            StyleArg::Brace => PathStyle::Brace,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Initialize structured logging with env-based filter, defaulting to info (debug with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .try_init();
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = CompileConfig::new().with_source_extension(cli.ext);

    match cli.command {
        Command::Check { paths } => commands::check(&paths, &config),
        Command::Dump { paths, out, style } => {
            let config = config.with_path_style(style.into());
            commands::dump(&paths, out.as_deref(), &config)
        }
        Command::Routes { paths, style } => {
            let config = config.with_path_style(style.into());
            commands::routes(&paths, &config)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
