//! Command Line Interface (CLI) layer for pycdas.
//!
//! This module defines argument parsing (`args`), the user-facing error
//! messages (`errors`), and the orchestration logic (`runner`) that opens the
//! output sink and drives the load/header/render pipeline.
//!
//! If you are embedding pycdas into another application, prefer the
//! high-level `pycdas::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
