//! rTutor library root.
//! Exposes the CLI parser, the high-level run() function, and the session
//! engine (validation, store, scheduler, notifications).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Check => cli::commands::check::handle(cli, cfg),
        Commands::Shell => cli::commands::shell::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Test mode never touches the user's config file.
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(seed) = &cli.seed {
        cfg.seed_file = Some(seed.clone());
    }
    if let Some(secs) = cli.tick_interval {
        cfg.tick_interval_secs = secs;
    }

    logging::init(&cfg.log_level);
    tracing::debug!(
        seed = ?cfg.seed_file,
        tick_interval_secs = cfg.tick_interval_secs,
        "configuration loaded"
    );

    dispatch(&cli, &cfg)
}
