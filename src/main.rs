// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simple_logger::SimpleLogger;

use riskscan::cli::Cli;
use riskscan::config::ConfigParameter;
use riskscan::handlers::AppState;
use riskscan::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.level_filter())
        .init()
        .context("Failed to initialise logger")?;

    let mut config = ConfigParameter::from_env();
    cli.apply(&mut config);

    info!(
        "{} {} starting, OCR engine: {}, fetch timeout: {}s",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.tesseract_cmd().display(),
        config.fetch_timeout()
    );

    let state = AppState::from_config(&config).context("Failed to build HTTP client")?;
    server::serve(&config, state).await?;

    Ok(())
}
