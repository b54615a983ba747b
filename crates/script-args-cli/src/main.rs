//! script-args CLI
//!
//! Resolves a script's arguments from a TOML schema and prints the typed
//! values as JSON on stdout.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use script_args_core::{ResolvedValues, Schema};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    match run() {
        Ok(()) => {}
        // Let clap render usage for rejected script arguments
        Err(CliError::Core(script_args_core::Error::CommandLine(e))) => e.exit(),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    let schema = Schema::load(&cli.schema)?;
    let values = schema.resolve(&cli.args)?;
    println!("{}", render(&values, cli.compact)?);
    Ok(())
}

fn render(values: &ResolvedValues, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(values)?
    } else {
        serde_json::to_string_pretty(values)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_compact_json() {
        let schema = Schema::parse(
            "[n]\ntype = \"int\"\ncli_arg = \"--n\"\n\n[s]\ntype = \"str\"\ncli_arg = \"--s\"\n",
        )
        .unwrap();
        let values = schema.resolve(["--n", "4"]).unwrap();
        assert_eq!(render(&values, true).unwrap(), r#"{"n":4,"s":null}"#);
    }
}
