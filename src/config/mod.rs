//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::toggle::SubmenuPolicy;
pub use defaults::{
    default_submenu_policy, DEFAULT_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH, MIN_SIDEBAR_WIDTH,
};

/// CLI options for the wordpanel TUI. Values are validated before anything is bound.
#[derive(Debug, Parser, Clone)]
#[command(about = "Wordpanel vocabulary manager", author, version)]
pub struct AppConfig {
    /// Word data file (.json, .yaml, or .yml); built-in sample data when omitted
    #[arg(long = "words", env = "WORDPANEL_WORDS", value_name = "PATH")]
    pub words_path: Option<PathBuf>,

    /// How submenu triggers interact in the sidebar
    #[arg(
        long = "submenu-policy",
        value_enum,
        default_value_t = default_submenu_policy()
    )]
    pub submenu_policy: SubmenuPolicy,

    /// Sidebar width in columns
    #[arg(long = "sidebar-width", default_value_t = DEFAULT_SIDEBAR_WIDTH)]
    pub sidebar_width: u16,

    /// Screen shown at startup
    #[arg(long = "start-screen", value_enum, default_value_t = StartScreen::Words)]
    pub start_screen: StartScreen,

    /// Load the word data, print a summary, and exit
    #[arg(long = "check-data", default_value_t = false)]
    pub check_data: bool,

    /// Write structured JSON events to the log file
    #[arg(long = "logs", env = "WORDPANEL_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "WORDPANEL_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Include typed translations and deck titles in logged events
    #[arg(
        long = "log-content",
        env = "WORDPANEL_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum StartScreen {
    #[default]
    Words,
    Decks,
}

impl AppConfig {
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
