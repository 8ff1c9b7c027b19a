use clap::{Parser, Subcommand};

/// Command-line interface definition for rTutor
/// CLI application to schedule tutoring sessions
#[derive(Parser)]
#[command(
    name = "rtutor",
    version = env!("CARGO_PKG_VERSION"),
    about = "Schedule tutoring sessions: create, register, cancel, and let the scheduler run them",
    long_about = None
)]
pub struct Cli {
    /// Seed file with initial sessions and notifications (JSON or YAML)
    #[arg(global = true, long = "seed", value_name = "FILE")]
    pub seed: Option<String>,

    /// Pin the clock to a fixed time instead of the system time
    #[arg(global = true, long = "now", value_name = "YYYY-MM-DD HH:MM")]
    pub now: Option<String>,

    /// Seconds between scheduler ticks (0 disables the background scheduler)
    #[arg(global = true, long = "tick-interval", value_name = "SECS")]
    pub tick_interval: Option<u64>,

    /// Run in test mode (config file is neither read nor written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the default configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Load the seed file and check its sessions
    Check,

    /// Start the interactive shell (commands are read from stdin)
    Shell,
}
