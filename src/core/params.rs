use serde::{Deserialize, Serialize};

use crate::types::{RenderOptions, VersionPair};

/// Disassembly parameters suitable for config files and presets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisasmParams {
    /// Treat the input as a raw marshalled code object instead of a `.pyc` container
    pub marshalled: bool,
    /// Dialect for raw mode; ignored for self-describing containers
    pub version: Option<VersionPair>,
    pub options: RenderOptions,
}

impl DisasmParams {
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Raw mode pinned to `version`
    pub fn marshalled(version: VersionPair) -> Self {
        Self {
            marshalled: true,
            version: Some(version),
            options: RenderOptions::empty(),
        }
    }
}
