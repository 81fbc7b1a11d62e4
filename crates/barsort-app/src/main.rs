// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barsort — reorder scanned PDFs by the barcode printed on each page.
//
// Entry point. Parses the command line, initialises logging, checks the
// external tools, and dispatches to the service layer.

mod cli;
mod services;

use std::process::ExitCode;

use barsort_core::error::Result;
use barsort_document::{PopplerRasterizer, ZbarDecoder};
use clap::Parser;

use cli::{Cli, Command};
use services::pipeline::SortPipeline;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.default_log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Barsort starting");

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Barsort failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Sort {
            input,
            output,
            options,
        } => {
            let config = options.resolve()?;
            let rasterizer = PopplerRasterizer::new(config.renderer_path.clone());
            let decoder = ZbarDecoder::new(config.decoder_path.clone());
            rasterizer.probe()?;
            decoder.probe()?;

            let summary = SortPipeline::new(config, rasterizer, decoder).run(&input, &output)?;
            println!("{}", summary);
        }
        Command::Delete {
            input,
            output,
            pages,
        } => {
            let outcome = services::edit::delete_pages(&input, &output, &pages)?;
            println!("{}", outcome);
        }
        Command::Merge { output, inputs } => {
            let outcome = services::edit::merge_documents(&output, &inputs)?;
            println!("{}", outcome);
        }
    }
    Ok(())
}
