//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskvault")]
#[command(author, version, about = "Tasks kept as checkboxes in daily Markdown notes", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Date treated as today (YYYY-MM-DD, today, tomorrow, +3d, -1w)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks in the scan window
    List(ListArgs),

    /// Show tasks grouped into overdue, today, upcoming and logbook
    Board(BoardArgs),

    /// Toggle a task between done and not done
    Toggle(LocatorArgs),

    /// Delete a task line
    Delete(LocatorArgs),

    /// Replace a task's description, keeping its tags and dates
    Edit(EditArgs),

    /// Add a task to a daily note
    Add(AddArgs),
}

// === Views ===

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only tasks whose description or tags contain TEXT (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Only tasks with this done state
    #[arg(long)]
    pub done: Option<bool>,
}

#[derive(Parser, Debug)]
pub struct BoardArgs {
    /// Only tasks whose description or tags contain TEXT (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,
}

// === Mutations ===

#[derive(Parser, Debug)]
pub struct LocatorArgs {
    /// Task locator as FILE:LINE (FILE may be relative to the vault or a date)
    pub task: String,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Task locator as FILE:LINE
    pub task: String,

    /// New description
    pub description: String,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Task text; tags and a 📅 YYYY-MM-DD marker are kept
    pub text: String,

    /// Due date when TEXT has no 📅 marker (defaults to today)
    #[arg(long)]
    pub due: Option<String>,
}
