//! Changegen CLI Binary
//!
//! Command-line interface for changeset-driven versioning and changelogs.

use changegen::cli::{command_name, is_mutation, map_error, Cli, Commands, RunContext};
use changegen::config::ConfigLoader;
use changegen::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{debug, error, info_span, Span};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let span = command_span(&cli.command);
    let _entered = span.enter();

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            debug!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Span wrapping one command invocation.
fn command_span(command: &Commands) -> Span {
    info_span!(
        "command",
        name = %command_name(command),
        is_mutation = is_mutation(command)
    )
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        // A log file without an explicit destination means "log to that file".
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    config
}
