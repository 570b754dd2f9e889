//! I/O layer for reading compiled Python modules.
//! Provides the `container` loader (header sniffing and raw mode), the
//! `marshal` object reader, and the decoded `object` model.
pub mod container;
pub use container::{LoadError, LoadOutcome, LoadedModule};

pub mod marshal;

pub mod object;
pub use object::{CodeObject, PyObject, PyString, StringKind};
