//! Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hanzi Sketch - send handwritten characters to a recognition server
#[derive(Parser, Debug)]
#[command(name = "hanzi-sketch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Recognition endpoint, overrides config and environment
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize a recorded signature with a single request
    Recognize {
        /// Signature file in native format
        input: PathBuf,
    },

    /// Replay a recorded signature stroke by stroke
    Replay {
        /// Signature file in native format
        input: PathBuf,

        /// Delay between strokes in milliseconds
        #[arg(long, default_value = "0")]
        pace_ms: u64,
    },

    /// Print the effective configuration
    Config,
}
