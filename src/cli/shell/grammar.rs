use clap::{Parser, Subcommand};

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(
    name = "rtutor",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Act as a tutor or a student
    Login {
        #[arg(long, help = "tutor | student")]
        role: String,

        #[arg(long)]
        id: u32,

        #[arg(long)]
        name: String,
    },

    /// Show the acting identity
    Whoami,

    /// Create a session (tutor)
    Create {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "", help = "Date (YYYY-MM-DD)")]
        date: String,

        #[arg(long, default_value = "", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long, default_value = "", help = "End time (HH:MM)")]
        end: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long = "max", default_value = "", help = "Maximum number of students")]
        max_student: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a session (tutor); omitted fields keep their value
    Edit {
        id: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, help = "Date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long, help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long = "max", help = "Maximum number of students")]
        max_student: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Cancel a session (tutor)
    Cancel {
        id: u32,

        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Register for a session (student)
    Register { id: u32 },

    /// Write private notes on enrolled students (tutor)
    Annotate {
        id: u32,

        #[arg(long = "note", value_name = "STUDENT_ID=TEXT", required = true)]
        notes: Vec<String>,
    },

    /// Finish an evaluated session, optionally saving notes first (tutor)
    End {
        id: u32,

        #[arg(long = "note", value_name = "STUDENT_ID=TEXT")]
        notes: Vec<String>,
    },

    /// List sessions (default: the sessions you tutor or attend)
    List {
        #[arg(long, help = "Sessions open for registration")]
        open: bool,

        #[arg(long, requires = "open", help = "Filter by course id or tutor name")]
        search: Option<String>,

        #[arg(long, conflicts_with = "open", help = "Every session in the store")]
        all: bool,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Show one session in detail
    Show { id: u32 },

    /// Show notifications (default: your own)
    Notifications {
        #[arg(long)]
        user: Option<u32>,
    },

    /// Run one scheduler tick now
    Tick,

    /// Show or move the clock (moving needs --now at startup)
    Clock {
        #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
        advance: Option<i64>,

        #[arg(long, value_name = "YYYY-MM-DD HH:MM")]
        set: Option<String>,
    },

    /// Print the whole state as JSON (seed format)
    Dump,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}
