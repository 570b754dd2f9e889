use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::CommandFactory;
use tracing::{debug, info};

use pycdas::core::params::DisasmParams;
use pycdas::core::pipeline::{self, ModuleSource};
use pycdas::types::{RenderOptions, VersionPair, display_name};

use super::args::CliArgs;
use super::errors::AppError;

/// Check the arguments and lower them into library parameters, before anything is opened.
fn build_params(args: &CliArgs) -> Result<DisasmParams, AppError> {
    let mut options = RenderOptions::empty();
    if args.pycode_extra {
        options |= RenderOptions::PYCODE_VERBOSE;
    }
    if args.show_caches {
        options |= RenderOptions::SHOW_CACHES;
    }

    // The version string only matters for raw code objects.
    let version = match (args.marshalled, args.version.as_deref()) {
        (false, _) => None,
        (true, None) => return Err(AppError::RawWithoutVersion),
        (true, Some(text)) => Some(text.parse::<VersionPair>()?),
    };

    Ok(DisasmParams {
        marshalled: args.marshalled,
        version,
        options,
    })
}

fn open_sink(output: Option<&Path>) -> Result<Box<dyn Write>, AppError> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|_| AppError::OpenOutput {
                path: path.to_path_buf(),
            })?;
            debug!("Writing output to {:?}", path);
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn disassemble<W: Write>(
    input: &Path,
    sink: &mut W,
    params: &DisasmParams,
) -> Result<(), AppError> {
    let module = pipeline::load(ModuleSource::Path(input), params)
        .map_err(|e| AppError::from_pipeline(input.to_path_buf(), e))?;
    info!("Loaded {:?} as Python {}", input, module.version());

    let identifier = input.to_string_lossy();
    pipeline::emit(sink, &module, display_name(&identifier), params.options)
        .map_err(|e| AppError::from_pipeline(input.to_path_buf(), e))
}

fn execute(args: CliArgs) -> Result<(), AppError> {
    let input = args.input().cloned().ok_or(AppError::MissingInput)?;
    let params = build_params(&args)?;
    let mut sink = open_sink(args.output.as_deref())?;

    let result = disassemble(&input, &mut sink, &params);
    // Whatever reached the sink before a failure is kept.
    let flushed = sink.flush();
    result?;
    flushed?;
    Ok(())
}

/// Usage text goes to stderr; the output sink is never opened.
pub fn print_help() -> ExitCode {
    eprintln!("{}", CliArgs::command().render_help());
    ExitCode::SUCCESS
}

pub fn run(args: CliArgs) -> ExitCode {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    if args.help {
        return print_help();
    }

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
