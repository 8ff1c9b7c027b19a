use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates `~/.rtutor/rtutor.conf` with the default policy unless it already
/// exists. In test mode nothing is written.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let existed = Config::config_file().exists();
    let path = Config::init_all(cli.test)?;

    if cli.test {
        info(format!("Test mode: configuration not written ({})", path.display()));
    } else if existed {
        info(format!("Configuration already present: {}", path.display()));
    } else {
        success(format!("Config file: {}", path.display()));
    }
    Ok(())
}
