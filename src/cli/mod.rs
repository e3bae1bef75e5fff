//! Command-line interface for cafe-wifi.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::cmd_list_cafes;

/// Coffee & Wifi - a directory of laptop-friendly cafes
#[derive(Parser)]
#[command(name = "cafe-wifi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "daemon", alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// List all cafes ordered by name
    #[command(alias = "ls", alias = "l")]
    List {
        /// Only show cafes at this exact location
        #[arg(long)]
        location: Option<String>,
    },
}
