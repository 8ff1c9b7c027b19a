use std::io::{self, IsTerminal};
use std::time::Duration;

use crate::cli::commands::open_service;
use crate::cli::parser::Cli;
use crate::cli::shell;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `shell` command
///
/// Starts the background scheduler (unless the interval is 0) and reads shell
/// commands from stdin until `exit` or end of input.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let service = open_service(cli, cfg)?;

    let scheduler = if cfg.tick_interval_secs > 0 {
        Some(service.spawn_scheduler(Duration::from_secs(cfg.tick_interval_secs))?)
    } else {
        tracing::info!("background scheduler disabled");
        None
    };

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        info("rTutor shell. Type `help` for commands, `exit` to quit.");
    }

    let result = shell::run(&service, stdin.lock(), interactive);

    if let Some(handle) = scheduler {
        handle.shutdown();
    }
    result
}
