//! Command-line interface.

use clap::{Parser, ValueEnum};

use crate::types::Discipline;

/// How the built-in Inbox project is worked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InboxMode {
    /// Every inbox task at once (default)
    #[default]
    Parallel,
    /// One inbox task at a time, in order
    Serial,
    /// Leave the inbox untouched
    None,
}

impl InboxMode {
    pub fn discipline(self) -> Option<Discipline> {
        match self {
            InboxMode::Parallel => Some(Discipline::Parallel),
            InboxMode::Serial => Some(Discipline::Serial),
            InboxMode::None => None,
        }
    }
}

/// Keeps a single next-action label converged onto the currently actionable
/// tasks in a Todoist account
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Todoist API token (falls back to $TODOIST_API_TOKEN)
    #[arg(short = 'a', long)]
    pub api_token: Option<String>,

    /// Name of the tracking label
    #[arg(short, long, default_value = "next_action")]
    pub label: String,

    /// Delay in seconds between refresh cycles
    #[arg(short, long, default_value_t = 5)]
    pub delay: u64,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// How the Inbox project is processed
    #[arg(long, value_enum, default_value_t = InboxMode::Parallel)]
    pub inbox: InboxMode,

    /// Trailing character marking a parallel project or task
    #[arg(long, default_value_t = '.')]
    pub parallel_suffix: char,

    /// Trailing character marking a serial project or task
    #[arg(long, default_value_t = '_')]
    pub serial_suffix: char,

    /// Hide tasks due at least this many days out (0 disables)
    #[arg(long, default_value_t = 7)]
    pub hide_future: i64,

    /// Run one refresh cycle and exit
    #[arg(long)]
    pub onetime: bool,

    /// Do not cache sync state on disk
    #[arg(long)]
    pub nocache: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(long, default_value = "2")]
    pub log: String,
}
