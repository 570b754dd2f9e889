use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI. Each displays as the exact line
/// written to stderr.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No input file specified")]
    MissingInput,

    #[error("Option '{option}' requires {what}")]
    MissingValue {
        option: &'static str,
        what: &'static str,
    },

    #[error("Error: Unrecognized argument {arg}")]
    UnrecognizedArgument { arg: String },

    #[error("Opening raw code objects requires a version to be specified")]
    RawWithoutVersion,

    #[error("Error opening file '{}' for writing", path.display())]
    OpenOutput { path: PathBuf },

    #[error("Error disassembling {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("Could not load file {}", path.display())]
    Unrecognized { path: PathBuf },

    #[error("Error disassembling {}: {message}", path.display())]
    Disassemble { path: PathBuf, message: String },

    #[error(transparent)]
    Library(#[from] pycdas::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Attach the input path to a pipeline failure.
    pub fn from_pipeline(path: PathBuf, err: pycdas::Error) -> Self {
        match err {
            pycdas::Error::ModuleLoad { message } => AppError::Load { path, message },
            pycdas::Error::ModuleInvalid { .. } => AppError::Unrecognized { path },
            pycdas::Error::Render { message, .. } => AppError::Disassemble { path, message },
            other => AppError::Library(other),
        }
    }
}
