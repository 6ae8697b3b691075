//! CLI command definitions for the `nexchat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod sweep;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Community chat directory with liveness sweeping.
#[derive(Parser)]
#[command(name = "nexchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file (defaults to $NEXCHAT_CONFIG or ./nexchat.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Tracing filter derived from `-v`/`--quiet`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,nexchat=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,
    },

    /// List registered chats, newest first.
    #[command(alias = "ls")]
    List {
        /// Page number, starting at 1.
        #[arg(long, default_value = "1")]
        page: i64,

        /// Records per page (defaults to config).
        #[arg(long)]
        page_size: Option<i64>,
    },

    /// Register a chat server and print its secret key.
    Create {
        /// Display name.
        name: String,

        /// Base URL of the chat server.
        url: String,
    },

    /// Rename the chat owning a secret key.
    Rename {
        /// Secret key issued at creation.
        secret_key: String,

        /// New display name.
        name: String,
    },

    /// Delete the chat owning a secret key.
    #[command(alias = "rm")]
    Delete {
        /// Secret key issued at creation.
        secret_key: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Probe every chat now and delete the unreachable ones.
    Sweep,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Spinner shown while a command waits on I/O.
pub(crate) fn spinner(message: impl Into<String>, color: &str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template(&format!("{{spinner:.{color}}} {{msg}}"))?,
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}
