//! Staged pipeline: load the module, emit its header, render the root code object.
//!
//! Every stage returns the crate `Error` so the caller decides how each failure
//! is reported. Output goes straight into the caller's sink; nothing is buffered
//! here, so a render failure leaves the text produced so far in place.
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::core::params::DisasmParams;
use crate::error::{Error, Result};
use crate::io::{LoadOutcome, LoadedModule};
use crate::render;
use crate::types::{RenderOptions, VersionPair};

/// Where the module bytes come from
#[derive(Debug, Clone, Copy)]
pub enum ModuleSource<'a> {
    Path(&'a Path),
    Buffer(&'a [u8]),
}

fn into_module(outcome: LoadOutcome) -> Result<LoadedModule> {
    match outcome {
        LoadOutcome::Loaded(module) => {
            debug!(
                version = %module.version(),
                unicode = module.is_unicode(),
                "module loaded"
            );
            Ok(module)
        }
        LoadOutcome::Unrecognized { reason } => Err(Error::ModuleInvalid { reason }),
    }
}

/// Load a container whose header names its own dialect
pub fn load_self_describing(source: ModuleSource<'_>) -> Result<LoadedModule> {
    debug!("loading self-describing container");
    let outcome = match source {
        ModuleSource::Path(path) => LoadedModule::from_file(path),
        ModuleSource::Buffer(bytes) => LoadedModule::from_buffer(bytes),
    }
    .map_err(Error::module_load)?;
    into_module(outcome)
}

/// Load a bare marshalled code object as dialect `version`, without reading any header
pub fn load_raw(source: ModuleSource<'_>, version: VersionPair) -> Result<LoadedModule> {
    debug!(%version, "loading raw code object");
    let outcome = match source {
        ModuleSource::Path(path) => LoadedModule::from_marshalled_file(path, version),
        ModuleSource::Buffer(bytes) => LoadedModule::from_marshalled_buffer(bytes, version),
    }
    .map_err(Error::module_load)?;
    into_module(outcome)
}

/// Pick the loading mode from `params`. Raw mode without a version is a usage error.
pub fn load(source: ModuleSource<'_>, params: &DisasmParams) -> Result<LoadedModule> {
    match (params.marshalled, params.version) {
        (false, _) => load_self_describing(source),
        (true, Some(version)) => load_raw(source, version),
        (true, None) => Err(Error::Usage(
            "Opening raw code objects requires a version to be specified".to_string(),
        )),
    }
}

/// Banner line, e.g. `mod.pyc (Python 2.7 -U)`.
pub fn header_line(module: &LoadedModule, name: &str) -> String {
    let suffix = if module.major() < 3 && module.is_unicode() {
        " -U"
    } else {
        ""
    };
    format!(
        "{} (Python {}.{}{})",
        name,
        module.major(),
        module.minor(),
        suffix
    )
}

pub fn write_header<W: Write>(out: &mut W, module: &LoadedModule, name: &str) -> Result<()> {
    writeln!(out, "{}", header_line(module, name))?;
    Ok(())
}

/// Render the root code object at indentation 0
pub fn render_module<W: Write>(
    out: &mut W,
    module: &LoadedModule,
    options: RenderOptions,
    name: &str,
) -> Result<()> {
    info!(name, options = options.bits(), "rendering module");
    render::render_code(out, module.code(), module, 0, options).map_err(|e| Error::Render {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    debug!(name, "render complete");
    Ok(())
}

/// Header then render, for an already loaded module
pub fn emit<W: Write>(
    out: &mut W,
    module: &LoadedModule,
    name: &str,
    options: RenderOptions,
) -> Result<()> {
    write_header(out, module, name)?;
    render_module(out, module, options, name)
}

/// Load, header and render in one go
pub fn run<W: Write>(
    out: &mut W,
    source: ModuleSource<'_>,
    name: &str,
    params: &DisasmParams,
) -> Result<()> {
    let module = load(source, params)?;
    emit(out, &module, name, params.options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CodeObject;

    fn module(major: u32, minor: u32, unicode: bool) -> LoadedModule {
        LoadedModule::new(VersionPair::new(major, minor), unicode, CodeObject::default())
    }

    #[test]
    fn unicode_suffix_only_before_py3() {
        assert_eq!(header_line(&module(2, 7, true), "a.pyc"), "a.pyc (Python 2.7 -U)");
        assert_eq!(header_line(&module(2, 7, false), "a.pyc"), "a.pyc (Python 2.7)");
        assert_eq!(header_line(&module(3, 11, true), "a.pyc"), "a.pyc (Python 3.11)");
        assert_eq!(header_line(&module(1, 6, true), "a.pyc"), "a.pyc (Python 1.6 -U)");
    }

    #[test]
    fn raw_mode_needs_a_version() {
        let params = DisasmParams {
            marshalled: true,
            ..Default::default()
        };
        let err = load(ModuleSource::Buffer(b"c"), &params).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn unknown_magic_is_invalid_not_a_load_error() {
        let err = load_self_describing(ModuleSource::Buffer(b"\xde\xad\xbe\xefxxxx")).unwrap_err();
        assert!(matches!(err, Error::ModuleInvalid { .. }));
    }

    #[test]
    fn truncated_input_is_a_load_error() {
        let err = load_self_describing(ModuleSource::Buffer(b"\xa7\x0d")).unwrap_err();
        assert!(matches!(err, Error::ModuleLoad { .. }));
    }
}
