//! High-level library API: disassemble a module from a path or an in-memory
//! buffer into any sink, plus the embedding entry point `decompile`, which never
//! fails and returns the whole result (diagnostics included) as one string.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::core::params::DisasmParams;
use crate::core::pipeline::{self, ModuleSource};
use crate::error::{Error, Result};
use crate::io::LoadedModule;
use crate::types::{RenderOptions, display_name};

#[cfg(feature = "ffi")]
pub mod ffi;

/// Load the module at `input` according to `params`
pub fn load_module(input: &Path, params: &DisasmParams) -> Result<LoadedModule> {
    pipeline::load(ModuleSource::Path(input), params)
}

/// Disassemble `input` into `out`, with the header naming the file's last path segment
pub fn disassemble_path<W: Write>(input: &Path, out: &mut W, params: &DisasmParams) -> Result<()> {
    let identifier = input.to_string_lossy();
    let name = display_name(&identifier);
    pipeline::run(out, ModuleSource::Path(input), name, params)
}

/// Disassemble `input` to a new file at `output`
pub fn disassemble_to_path(input: &Path, output: &Path, params: &DisasmParams) -> Result<()> {
    let mut out = BufWriter::new(File::create(output)?);
    let result = disassemble_path(input, &mut out, params);
    out.flush()?;
    result
}

/// Disassemble an in-memory image into a string. Fails on the first error;
/// use [`decompile`] to get partial text and diagnostics instead.
pub fn disassemble_buffer_to_string(
    filename: &str,
    buffer: &[u8],
    params: &DisasmParams,
) -> Result<String> {
    let mut out = Vec::new();
    pipeline::run(
        &mut out,
        ModuleSource::Buffer(buffer),
        display_name(filename),
        params,
    )?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Embedding entry point: disassemble a self-describing `.pyc` image held in memory.
///
/// Always returns text. Load failures produce a single diagnostic line; a render
/// failure appends one diagnostic line after whatever was rendered before it.
pub fn decompile(filename: &str, buffer: &[u8]) -> String {
    debug!(filename, len = buffer.len(), "embedded decompile");

    let module = match pipeline::load_self_describing(ModuleSource::Buffer(buffer)) {
        Ok(module) => module,
        Err(Error::ModuleInvalid { reason }) => {
            warn!(filename, %reason, "module not recognised");
            return format!("Could not load file {}\n", filename);
        }
        Err(e) => {
            warn!(filename, error = %e, "load failed");
            return format!("Error loading file {}: {}\n", filename, e);
        }
    };

    let mut out = Vec::new();
    if let Err(e) = pipeline::emit(
        &mut out,
        &module,
        display_name(filename),
        RenderOptions::empty(),
    ) {
        warn!(filename, error = %e, "render failed");
        out.extend_from_slice(format!("Error decompyling {}: {}\n", filename, e).as_bytes());
    }
    String::from_utf8_lossy(&out).into_owned()
}
