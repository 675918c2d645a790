//! CLI module for jltest
//!
//! ```text
//! jltest <SUBJECT> [ROOT] [--source-ext <EXT>] [-v]
//! ```
//!
//! ## Modules
//!
//! - `test_runner` - Suite orchestration and the console report
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod test_runner;

use std::env;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::{DEFAULT_SOURCE_EXTENSION, RunnerConfig};
use crate::subject::ProcessSubject;
use test_runner::{ConsoleReporter, run_suites};

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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Conformance test runner for language implementations
#[derive(Parser, Debug)]
#[command(name = "jltest")]
#[command(version = VERSION)]
#[command(about = "Run good/bad conformance suites against an interpreter or compiler", long_about = None)]
pub struct Cli {
    /// Executable under test, invoked as `SUBJECT <source>`
    #[arg(value_name = "SUBJECT")]
    pub subject: PathBuf,

    /// Directory containing the good/, extensions/ and bad/ suites (default: current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Extension of case source files
    #[arg(long = "source-ext", value_name = "EXT", default_value = DEFAULT_SOURCE_EXTENSION)]
    pub source_ext: String,

    /// Print expected and actual output of failing cases to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the runner configuration, resolving the default root.
    pub fn into_config(self) -> CliResult<RunnerConfig> {
        let root = match self.root {
            Some(root) => root,
            None => env::current_dir()
                .map_err(|e| CliError::failure(format!("Error: cannot determine current directory: {}", e)))?,
        };
        Ok(RunnerConfig::new(self.subject, root)
            .with_source_extension(self.source_ext)
            .with_verbose(self.verbose))
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    tracing::debug!(args = ?env::args().collect::<Vec<_>>(), "starting");

    let cli = Cli::parse();

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

/// Execute a parsed command line and return the exit code.
///
/// Verdicts never affect the exit code; only a failure to set up or to write the report does.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.into_config()?;
    tracing::info!(
        subject = %config.subject.display(),
        root = %config.root.display(),
        source_ext = %config.source_extension,
        "configured run"
    );

    let subject = ProcessSubject::new(config.subject.clone());
    let mut reporter = ConsoleReporter::new(io::stdout().lock(), io::stderr(), config.verbose);

    run_suites(&config, &subject, &mut reporter)
        .map_err(|e| CliError::failure(format!("Error writing report: {}", e)))?;

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================
