//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vicinity_cli::CliError;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match vicinity_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => {
            // Help and version requests surface as clap errors too.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            match err.print() {
                Ok(()) => code,
                Err(_) => ExitCode::FAILURE,
            }
        }
        Err(err) => {
            // A closed stderr leaves nowhere to report to.
            let _ignored = report(&mut io::stderr().lock(), &err);
            ExitCode::FAILURE
        }
    }
}

fn report(out: &mut dyn Write, err: &CliError) -> io::Result<()> {
    let message = err.to_string();
    writeln!(out, "vicinity: {message}")?;
    let mut cause = err.source();
    while let Some(source) = cause {
        let detail = source.to_string();
        if !message.contains(&detail) {
            writeln!(out, "  caused by: {detail}")?;
        }
        cause = source.source();
    }
    Ok(())
}
