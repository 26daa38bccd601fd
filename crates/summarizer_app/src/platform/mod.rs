pub mod logging;

mod app;
mod commands;
mod effects;
mod ui;

use std::process::ExitCode;

use engine_logging::{engine_info, engine_warn, level_for_verbosity};

use crate::cli::Cli;
use crate::config::{load_config, save_config};

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = load_config(&cli.config);
    let mut config = loaded.config;
    config.apply_overrides(&cli);

    logging::initialize(
        config.log_destination,
        level_for_verbosity(cli.verbose),
        &config.log_file,
    );
    if let Some(warning) = loaded.warning {
        engine_warn!("{}", warning);
    }

    if cli.write_config {
        save_config(&cli.config, &config)?;
        println!("Wrote configuration to {}", cli.config.display());
        return Ok(ExitCode::SUCCESS);
    }

    engine_info!(
        "Summarization endpoint: {}{}",
        config.base_url,
        config.upload_path
    );
    match &cli.file {
        Some(path) => app::run_once(path, &cli, &config),
        None => app::run_interactive(&config),
    }
}
