//! Crate-level error type and `Result` alias for the loading/rendering pipeline.
//! Each variant marks the stage that failed, so the native runner and the
//! embedding adapter can turn it into exactly one diagnostic line.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to parse version string (use the format x.y)")]
    InvalidVersionFormat { input: String },

    #[error("{0}")]
    Usage(String),

    /// The container loader rejected the input.
    #[error("{message}")]
    ModuleLoad { message: String },

    /// The loader returned without a module and without failing, e.g. unknown magic.
    #[error("{reason}")]
    ModuleInvalid { reason: String },

    /// The renderer failed part-way; whatever it wrote before stays in the sink.
    #[error("{message}")]
    Render { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn module_load<E: std::fmt::Display>(e: E) -> Self {
        Error::ModuleLoad {
            message: e.to_string(),
        }
    }
}
