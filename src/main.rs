//! pycdas CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! disassembly, and exit with the resulting status.
//! For programmatic use, prefer the library API (`pycdas::api`).

use std::process::ExitCode;

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};

mod cli;

use cli::errors::AppError;

/// Map clap's parse failures onto the pycdas diagnostics.
fn usage_error(err: &clap::Error) -> String {
    let arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => String::new(),
    };

    match err.kind() {
        ErrorKind::UnknownArgument => AppError::UnrecognizedArgument { arg }.to_string(),
        ErrorKind::InvalidValue if arg.starts_with("-o") => AppError::MissingValue {
            option: "-o",
            what: "a filename",
        }
        .to_string(),
        ErrorKind::InvalidValue if arg.starts_with("-v") => AppError::MissingValue {
            option: "-v",
            what: "a version",
        }
        .to_string(),
        _ => err.to_string().trim_end().to_string(),
    }
}

fn main() -> ExitCode {
    if cli::args::help_requested(std::env::args_os().skip(1)) {
        return cli::runner::print_help();
    }

    match cli::CliArgs::try_parse() {
        Ok(args) => cli::run(args),
        Err(err) => {
            eprintln!("{}", usage_error(&err));
            ExitCode::FAILURE
        }
    }
}
