//! Command-line argument definitions for the Vista CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the model, the elements to show, the
//! output format and destination, the configuration file, and logging
//! verbosity.

use clap::Parser;

use vista::export::OutputFormat;

/// Command-line arguments for the Vista model viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input Vista model file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Element to show, by qualified id (repeatable)
    #[arg(short, long = "show", value_name = "ID")]
    pub show: Vec<String>,

    /// TOML file holding a `setVisibleElements` request
    #[arg(short, long, value_name = "FILE")]
    pub request: Option<String>,

    /// Output format (outline, toml); overrides the configuration
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
