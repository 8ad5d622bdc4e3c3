//! CLI interface for Fieldtrack.
//!
//! Each subcommand is non-interactive: arguments in, plain text out.
//! Results go to stdout; notices and progress go to stderr.
//!
//! - `fieldtrack record` replays a session script through the live recorder.
//! - `fieldtrack routes list|show` browses saved routes by position.
//! - `fieldtrack export|share` turns a saved route into a file or a link.
//! - `fieldtrack open` loads a shared link.

mod format;
mod record;
mod routes;
mod share;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::storage::Storage;

use record::RecordArgs;
use routes::{ExportFormat, RoutesCommand};

/// Fieldtrack: record, annotate, and share walking routes.
#[derive(Debug, Parser)]
#[command(name = "fieldtrack", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: record and share a walk
  1. fieldtrack record walk.jsonl --save "Canal loop"
     → prints distance, time, and capture notices
  2. fieldtrack routes list
  3. fieldtrack export 0 --format gpx --out canal.gpx
  4. fieldtrack share 0
     → prints a link; `fieldtrack open <link>` loads it anywhere

Session script (one cue per line):
  {"cue":"fix","lat":51.5,"lng":-0.12,"accuracy":8,"timestamp":"2024-05-01T09:00:00Z"}
  {"cue":"note","text":"Lock gates"}
  {"cue":"photo","file":"gates.jpg"}
  {"cue":"pause"}
  {"cue":"stop"}"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a route by replaying a session script.
    ///
    /// Fixes are filtered and accumulated live; notes and media are
    /// captured at the latest position. Ctrl-C stops the recording.
    Record(RecordArgs),

    /// Browse saved routes.
    Routes {
        #[command(subcommand)]
        command: RoutesCommand,
    },

    /// Export a saved route's events.
    ///
    /// Writes to `--out` (if given) or stdout.
    Export {
        /// Position in `routes list`.
        index: usize,

        #[arg(long, value_enum)]
        format: ExportFormat,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print a share link for a saved route.
    ///
    /// The link carries the events only, not the name, time, or distance.
    Share {
        /// Position in `routes list`.
        index: usize,
    },

    /// Load a shared link.
    ///
    /// Also accepts the bare `data` value of a link. Falls back to listing
    /// saved routes if the input carries no usable data.
    Open {
        link: String,
    },
}

/// Run the CLI, returning an error message on failure.
pub async fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Record(args) => record::cmd_record(config, storage, args).await,
        Command::Routes { command } => match command {
            RoutesCommand::List => routes::cmd_list(storage),
            RoutesCommand::Show { index } => routes::cmd_show(storage, index),
        },
        Command::Export { index, format, out } => {
            routes::cmd_export(storage, index, format, out.as_deref())
        }
        Command::Share { index } => share::cmd_share(config, storage, index),
        Command::Open { link } => share::cmd_open(storage, &link),
    }
}
