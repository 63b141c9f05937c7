use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use counterview_core::{StaleResultPolicy, Surface};

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "counterview",
    about = "Send an article to the analyze service and list opposing viewpoints"
)]
pub struct Args {
    /// Config file (RON). Defaults to ./counterview.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analyze endpoint URL
    #[arg(long, global = true, env = "COUNTERVIEW_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (no timeout unless set)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Whether a new submission hides the previous result
    #[arg(long, global = true, value_enum)]
    pub stale_results: Option<StaleArg>,

    /// Also write each result as an HTML page to this path
    #[arg(long, global = true)]
    pub html: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze pasted article text (read from stdin when omitted)
    Text { text: Option<String> },
    /// Analyze the page at URL
    Tab { url: Option<String> },
    /// Interactive session reading input from stdin
    Session {
        #[arg(long, value_enum, default_value_t = SurfaceArg::Text)]
        surface: SurfaceArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SurfaceArg {
    Text,
    Tab,
}

impl From<SurfaceArg> for Surface {
    fn from(value: SurfaceArg) -> Self {
        match value {
            SurfaceArg::Text => Surface::TextForm,
            SurfaceArg::Tab => Surface::ActiveTab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StaleArg {
    Clear,
    Retain,
}

impl From<StaleArg> for StaleResultPolicy {
    fn from(value: StaleArg) -> Self {
        match value {
            StaleArg::Clear => StaleResultPolicy::Clear,
            StaleArg::Retain => StaleResultPolicy::Retain,
        }
    }
}

impl Command {
    pub fn surface(&self) -> Surface {
        match self {
            Command::Text { .. } => Surface::TextForm,
            Command::Tab { .. } => Surface::ActiveTab,
            Command::Session { surface } => (*surface).into(),
        }
    }
}
