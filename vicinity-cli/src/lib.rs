//! Command-line interface for comparing neighborhoods from dataset files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod compare;
mod error;

pub use error::CliError;

use compare::CompareArgs;

pub(crate) const ARG_COMPARE_REQUEST: &str = "request";
pub(crate) const ARG_COMPARE_DATASET: &str = "dataset";
pub(crate) const ARG_COMPARE_CATALOGUE: &str = "catalogue";
pub(crate) const ARG_COMPARE_FETCH_TIMEOUT_MS: &str = "fetch-timeout-ms";
pub(crate) const ARG_COMPARE_MAX_CONCURRENT_FETCHES: &str = "max-concurrent-fetches";
pub(crate) const ENV_COMPARE_REQUEST: &str = "VICINITY_CMDS_COMPARE_REQUEST_PATH";
pub(crate) const ENV_COMPARE_DATASET: &str = "VICINITY_CMDS_COMPARE_DATASET";

/// Run the Vicinity CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError::ArgumentParsing`] for invalid arguments (and for help
/// or version requests), otherwise the errors of the dispatched command.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Compare(args) => compare::run_compare(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vicinity",
    about = "Compare neighborhoods and recommend the best fit",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare neighborhoods from a dataset and print the result as JSON.
    Compare(CompareArgs),
}

#[cfg(test)]
mod tests;
