//! rag-assistant CLI - Command-line interface
//!
//! Thin shell over the retrieval crates: configuration loading, logging setup,
//! command dispatch and the interactive chat loop.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod interactive;
mod logging;
mod output;
mod output_types;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use output::OutputWriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    let output = OutputWriter::new(cli.json);

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            errors::report(&err, &output);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output: &OutputWriter) -> Result<()> {
    let app = config_loader::load_app_config(&cli.config)?;
    logging::init(&app.logging, &app.paths);

    let ctx = config_loader::load_context(
        app,
        &cli.config,
        &cli.prompt_config,
        cli.overrides.into(),
    )?;

    commands::execute(cli.command, &ctx, output)
}
