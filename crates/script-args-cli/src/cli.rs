//! CLI argument parsing using clap derive

use clap::Parser;
use std::path::PathBuf;

/// Resolve a script's arguments from a TOML schema and print them as JSON
///
/// Values come from the trailing arguments first, then from the environment
/// variables named in the schema, then from declared defaults.
///
/// Example:
///   script-args --schema args.toml -- --count 3 --points "1 2;3 4"
#[derive(Parser, Debug)]
#[command(name = "script-args")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the TOML argument schema
    #[arg(short, long, env = "SCRIPT_ARGS_SCHEMA")]
    pub schema: PathBuf,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Arguments for the script, given after `--`
    #[arg(last = true)]
    pub args: Vec<String>,
}
