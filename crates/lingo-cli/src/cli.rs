//! Command line arguments.

use clap::{Parser, Subcommand};
use lingo_config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lingo", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (YAML, TOML or JSON by extension)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the current locale for this run
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Keep `§` style codes in the printed output
    #[arg(long, global = true)]
    pub styled: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve a raw message: embedded keys, parameters, then markup
    Resolve {
        /// Raw message, e.g. "(greet.hello)"
        message: String,
        /// Positional parameters for `{0}`, `{1}`, ...
        args: Vec<String>,
    },
    /// Translate a single key strictly; missing keys are errors
    Translate {
        /// Dot-path translation key
        key: String,
        /// Positional parameters for `{0}`, `{1}`, ...
        args: Vec<String>,
    },
    /// List every key of the current locale with its template
    Keys,
    /// Compare all locale files against a reference locale
    Check {
        /// Reference locale; defaults to the current locale
        #[arg(short, long)]
        reference: Option<String>,
    },
}
