#![doc = r#"
pycdas: a disassembler for compiled Python modules.

This crate loads CPython `.pyc` containers (or raw marshalled code objects with
an explicit version), detects the bytecode dialect they were produced with, and
renders a structural dump plus disassembly of the top-level code object. It
powers the `pycdas` CLI and the `decompile` embedding entry point, and can be
used from your own Rust applications.

Disassemble a file to stdout
----------------------------
```rust,no_run
use std::path::Path;
use pycdas::{disassemble_path, DisasmParams, RenderOptions};

fn main() -> pycdas::Result<()> {
    let params = DisasmParams::default().with_options(RenderOptions::PYCODE_VERBOSE);
    let mut out = std::io::stdout().lock();
    disassemble_path(Path::new("__pycache__/mod.cpython-311.pyc"), &mut out, &params)
}
```

Raw code objects
----------------
```rust,no_run
use std::path::Path;
use pycdas::{disassemble_to_path, DisasmParams, VersionPair};

fn main() -> pycdas::Result<()> {
    let params = DisasmParams::marshalled(VersionPair::new(3, 11));
    disassemble_to_path(Path::new("code.bin"), Path::new("code.txt"), &params)
}
```

Embedding
---------
```rust
let text = pycdas::decompile("junk.pyc", b"not a pyc");
assert_eq!(text, "Could not load file junk.pyc\n");
```

Error handling
--------------
Fallible functions return `pycdas::Result<T>`; match on `pycdas::Error` to tell
a loader failure from an unrecognised module or a render failure.

```rust,no_run
use std::path::Path;
use pycdas::{load_module, DisasmParams, Error};

fn main() {
    match load_module(Path::new("mod.pyc"), &DisasmParams::default()) {
        Ok(module) => println!("Python {}", module.version()),
        Err(Error::ModuleInvalid { reason }) => eprintln!("not a module: {reason}"),
        Err(Error::ModuleLoad { message }) => eprintln!("load failed: {message}"),
        Err(other) => eprintln!("{other}"),
    }
}
```

Feature flags
-------------
- `ffi` (default): exports the C ABI `decompile` / `decompile_free` pair.

Useful modules
--------------
- [`api`]: high-level entry points.
- [`core`]: parameters and the staged load/header/render pipeline.
- [`io`]: container loader, marshal reader and object model.
- [`render`]: structural dump and disassembler.
- [`types`]: `VersionPair`, `RenderOptions` and display helpers.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod render;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::DisasmParams;
pub use error::{Error, Result};
pub use types::{RenderOptions, VersionPair, display_name};

// Loader
pub use io::{CodeObject, LoadError, LoadOutcome, LoadedModule, PyObject};

// High-level API re-exports
pub use api::{
    decompile, disassemble_buffer_to_string, disassemble_path, disassemble_to_path, load_module,
};
