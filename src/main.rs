use anyhow::{Context, Result};
use clap::Parser;

use git_semver::cli::{orchestration, Cli};
use git_semver::{config, logging, ui};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(cli.log_level)?;

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let root = std::env::current_dir().context("Failed to read current directory")?;

    if let Err(e) = orchestration::run(&cli, &config, &root) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
