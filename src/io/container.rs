use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::io::marshal::MarshalReader;
use crate::io::object::{CodeObject, PyObject};
use crate::types::VersionPair;

/// Errors raised while decoding a container or marshal stream
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },
    #[error("unsupported marshal type {:?} (0x{code:02X}) at offset {offset}", type_char(.code))]
    UnknownType { code: u8, offset: usize },
    #[error("invalid object reference {index} at offset {offset}")]
    BadReference { index: usize, offset: usize },
    #[error("invalid length {length} at offset {offset}")]
    BadLength { length: i32, offset: usize },
    #[error("expected a {field} field, found {found} at offset {offset}")]
    UnexpectedObject {
        field: &'static str,
        found: &'static str,
        offset: usize,
    },
    #[error("cannot remap unexpected code flags 0x{flags:08X}")]
    UnexpectedFlags { flags: u32 },
    #[error("object nesting too deep at offset {offset}")]
    TooDeep { offset: usize },
    #[error("top-level object is {found}, not a code object")]
    NotCodeObject { found: &'static str },
}

fn type_char(code: &u8) -> char {
    char::from(*code)
}

const fn magic(number: u32) -> u32 {
    number | (0x0A0D << 16)
}

/// Header magic for each dialect. 1.6–2.7 also have a `-U` variant at `magic + 1`.
const MAGIC_TABLE: &[(u32, VersionPair)] = &[
    (0x0099_9902, VersionPair::new(1, 0)),
    (0x0099_9903, VersionPair::new(1, 1)),
    (magic(11913), VersionPair::new(1, 3)),
    (magic(5892), VersionPair::new(1, 4)),
    (magic(20121), VersionPair::new(1, 5)),
    (magic(50428), VersionPair::new(1, 6)),
    (magic(50823), VersionPair::new(2, 0)),
    (magic(60202), VersionPair::new(2, 1)),
    (magic(60717), VersionPair::new(2, 2)),
    (magic(62011), VersionPair::new(2, 3)),
    (magic(62061), VersionPair::new(2, 4)),
    (magic(62131), VersionPair::new(2, 5)),
    (magic(62161), VersionPair::new(2, 6)),
    (magic(62211), VersionPair::new(2, 7)),
    (magic(3131), VersionPair::new(3, 0)),
    (magic(3151), VersionPair::new(3, 1)),
    (magic(3180), VersionPair::new(3, 2)),
    (magic(3230), VersionPair::new(3, 3)),
    (magic(3310), VersionPair::new(3, 4)),
    (magic(3350), VersionPair::new(3, 5)),
    (magic(3351), VersionPair::new(3, 5)),
    (magic(3379), VersionPair::new(3, 6)),
    (magic(3394), VersionPair::new(3, 7)),
    (magic(3413), VersionPair::new(3, 8)),
    (magic(3425), VersionPair::new(3, 9)),
    (magic(3439), VersionPair::new(3, 10)),
    (magic(3495), VersionPair::new(3, 11)),
    (magic(3531), VersionPair::new(3, 12)),
];

/// Maps a header magic to its dialect and whether it is the `-U` (unicode literals) variant.
pub fn version_for_magic(value: u32) -> Option<(VersionPair, bool)> {
    if let Some((_, v)) = MAGIC_TABLE.iter().find(|(m, _)| *m == value) {
        return Some((*v, false));
    }
    MAGIC_TABLE
        .iter()
        .find(|(m, v)| *m + 1 == value && v.at_least(1, 6) && v.below(3, 0))
        .map(|(_, v)| (*v, true))
}

/// Whether a dialect can be decoded. 1.2 shares 1.1's magic but is a valid request.
pub fn is_supported_version(version: VersionPair) -> bool {
    version == VersionPair::new(1, 2) || MAGIC_TABLE.iter().any(|(_, v)| *v == version)
}

/// A fully decoded container: dialect, string encoding, and the root code object.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModule {
    version: VersionPair,
    unicode: bool,
    code: CodeObject,
}

/// Result of a load that did not fail outright.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadedModule),
    /// The input was read but names no decodable dialect (bad magic, unsupported version).
    Unrecognized { reason: String },
}

impl LoadedModule {
    pub fn new(version: VersionPair, unicode: bool, code: CodeObject) -> Self {
        Self {
            version,
            unicode,
            code,
        }
    }

    /// Load a self-describing `.pyc` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LoadOutcome, LoadError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_buffer(&bytes)
    }

    /// Load a self-describing `.pyc` image held in memory
    pub fn from_buffer(bytes: &[u8]) -> Result<LoadOutcome, LoadError> {
        let mut reader = MarshalReader::new(bytes, VersionPair::new(0, 0));
        let value = reader.read_u32()?;

        let Some((version, unicode_variant)) = version_for_magic(value) else {
            warn!("Bad MAGIC 0x{:08X}", value);
            return Ok(LoadOutcome::Unrecognized {
                reason: format!("Bad MAGIC 0x{:08X}", value),
            });
        };
        debug!(%version, unicode = unicode_variant, "recognised container header");

        if version.at_least(3, 7) {
            let flags = reader.read_u32()?;
            // Bit 0 selects a source hash instead of mtime + size; both take 8 bytes.
            debug!(hash_based = flags & 0x1 != 0, "pyc header flags");
            reader.skip(8)?;
        } else if version.at_least(3, 3) {
            reader.skip(8)?;
        } else {
            reader.skip(4)?;
        }

        let unicode = unicode_variant || version.major >= 3;
        let mut reader = MarshalReader::at(bytes, reader.position(), version);
        let code = read_root_code(&mut reader)?;
        Ok(LoadOutcome::Loaded(Self::new(version, unicode, code)))
    }

    /// Load a raw marshalled code object file, with no header, as dialect `version`
    pub fn from_marshalled_file<P: AsRef<Path>>(
        path: P,
        version: VersionPair,
    ) -> Result<LoadOutcome, LoadError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_marshalled_buffer(&bytes, version)
    }

    /// Load a raw marshalled code object held in memory as dialect `version`
    pub fn from_marshalled_buffer(
        bytes: &[u8],
        version: VersionPair,
    ) -> Result<LoadOutcome, LoadError> {
        if !is_supported_version(version) {
            warn!(%version, "unsupported version for raw code object");
            return Ok(LoadOutcome::Unrecognized {
                reason: format!("Unsupported version {}", version),
            });
        }

        let mut reader = MarshalReader::new(bytes, version);
        let code = read_root_code(&mut reader)?;
        Ok(LoadOutcome::Loaded(Self::new(version, version.major >= 3, code)))
    }

    pub fn version(&self) -> VersionPair {
        self.version
    }

    pub fn major(&self) -> u32 {
        self.version.major
    }

    pub fn minor(&self) -> u32 {
        self.version.minor
    }

    /// Set for the `-U` builds of 1.6–2.7, and for every 3.x module.
    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    /// Whether plain (`s`) strings are text in this module's dialect.
    pub fn str_is_unicode(&self) -> bool {
        self.version.major >= 3 || self.unicode
    }

    pub fn code(&self) -> &CodeObject {
        &self.code
    }
}

fn read_root_code(reader: &mut MarshalReader<'_>) -> Result<CodeObject, LoadError> {
    let root = reader.read_object()?;
    match &*root {
        PyObject::Code(code) => Ok(CodeObject::clone(code)),
        other => Err(LoadError::NotCodeObject {
            found: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_magics() {
        assert_eq!(
            version_for_magic(u32::from_le_bytes([0xA7, 0x0D, 0x0D, 0x0A])),
            Some((VersionPair::new(3, 11), false))
        );
        assert_eq!(
            version_for_magic(u32::from_le_bytes([0x03, 0xF3, 0x0D, 0x0A])),
            Some((VersionPair::new(2, 7), false))
        );
        assert_eq!(
            version_for_magic(u32::from_le_bytes([0x04, 0xF3, 0x0D, 0x0A])),
            Some((VersionPair::new(2, 7), true))
        );
        assert_eq!(version_for_magic(magic(3352)), None);
        // 3.x has no `-U` variant.
        assert_eq!(version_for_magic(magic(3496)), None);
    }

    #[test]
    fn bad_magic_is_unrecognized_not_an_error() {
        let outcome = LoadedModule::from_buffer(b"\x00\x01\x02\x03garbage").unwrap();
        assert!(matches!(outcome, LoadOutcome::Unrecognized { .. }));
    }

    #[test]
    fn short_buffer_is_a_load_error() {
        assert!(matches!(
            LoadedModule::from_buffer(b"\x03\xF3"),
            Err(LoadError::UnexpectedEof { offset: 0 })
        ));
        // 2.7 magic with a truncated timestamp
        assert!(matches!(
            LoadedModule::from_buffer(b"\x03\xF3\x0D\x0A\x00\x00"),
            Err(LoadError::UnexpectedEof { offset: 4 })
        ));
    }

    #[test]
    fn root_must_be_code() {
        let mut bytes = vec![0xA7, 0x0D, 0x0D, 0x0A];
        bytes.extend_from_slice(&[0; 12]);
        bytes.push(b'N');
        assert!(matches!(
            LoadedModule::from_buffer(&bytes),
            Err(LoadError::NotCodeObject { found: "None" })
        ));
    }

    #[test]
    fn raw_mode_rejects_unknown_dialects() {
        let outcome = LoadedModule::from_marshalled_buffer(b"c", VersionPair::new(3, 13)).unwrap();
        match outcome {
            LoadOutcome::Unrecognized { reason } => assert_eq!(reason, "Unsupported version 3.13"),
            other => panic!("expected unrecognized, got {other:?}"),
        }
        assert!(is_supported_version(VersionPair::new(1, 2)));
        assert!(!is_supported_version(VersionPair::new(2, 8)));
    }
}
