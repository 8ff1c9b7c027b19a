pub mod check;
pub mod config;
pub mod init;
pub mod shell;

use std::path::Path;
use std::sync::Arc;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::clock::{Clock, ManualClock, SystemClock};
use crate::core::seed::SeedData;
use crate::core::service::TutoringService;
use crate::core::workspace::{SharedWorkspace, Workspace};
use crate::errors::AppResult;
use crate::utils::time::parse_datetime;

/// Builds the engine for one run: seed (if any), clock, policy and course.
pub fn open_service(cli: &Cli, cfg: &Config) -> AppResult<TutoringService> {
    let policy = cfg.policy()?;

    let workspace = match &cfg.seed_file {
        Some(path) => {
            let seed = SeedData::load(Path::new(path))?;
            seed.check(&policy)?;
            tracing::info!(path = %path, sessions = seed.sessions.len(), "seed loaded");
            seed.into_workspace()
        }
        None => Workspace::default(),
    };

    let clock: Arc<dyn Clock> = match &cli.now {
        Some(raw) => Arc::new(ManualClock::new(parse_datetime(raw)?)),
        None => Arc::new(SystemClock),
    };

    Ok(TutoringService::new(
        SharedWorkspace::new(workspace),
        clock,
        policy,
        cfg.course(),
    ))
}
