use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::seed::SeedData;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Handle the `check` command: parse the seed file and verify its sessions.
pub fn handle(_cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = cfg.seed_file.as_ref().ok_or_else(|| {
        AppError::Config("no seed file configured; pass --seed <FILE>".to_string())
    })?;

    let seed = SeedData::load(Path::new(path))?;
    seed.check(&cfg.policy()?)?;

    let mut by_state: BTreeMap<u8, (&str, usize)> = BTreeMap::new();
    for s in &seed.sessions {
        by_state.entry(s.state.rank()).or_insert((s.state.as_str(), 0)).1 += 1;
    }
    let notifications: usize = seed.notifications.values().map(Vec::len).sum();

    success(format!(
        "Seed OK: {} session(s), {} notification(s)",
        seed.sessions.len(),
        notifications
    ));
    for (label, count) in by_state.values() {
        println!("  {:<16} {}", label, count);
    }
    Ok(())
}
