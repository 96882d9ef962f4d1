//! Conforma CLI - structural JSON Schema validation and skill linting
//!
//! This is the main entry point for the Conforma CLI application,
//! providing commands for validating JSON documents against schema
//! documents and for linting skill package directories.

mod cli;
mod config;
mod error;
mod handlers;
mod lint;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::LoggingConfig;
use output::OutputWriter;
use std::process;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli) {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            // Soft failures have already written their report; only hard
            // failures get the Error: line.
            if !e.is_reported() {
                eprintln!(
                    "{}",
                    error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
                );
            }
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = Config::load_with_file(cli.config.as_deref())?;

    // Create output writer
    let mut output = OutputWriter::new(
        cli.output,
        cli.use_color(),
        cli.quiet,
        cli.verbosity_level(),
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Lint(args) => handlers::handle_lint(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    // Create logging configuration from CLI args and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    // Initialize the logging system
    logging::init_logging(logging_config)
}
