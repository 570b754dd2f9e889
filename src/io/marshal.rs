//! Reader for CPython's `marshal` serialisation format.
//!
//! The object layout is stable across versions, but code objects change shape
//! between dialects, so the reader is always constructed for one `VersionPair`.
use std::rc::Rc;

use tracing::trace;

use crate::io::container::LoadError;
use crate::io::object::{CodeObject, PyLong, PyObject, PyString, StringKind};
use crate::types::VersionPair;

const FLAG_REF: u8 = 0x80;

/// Deepest object nesting accepted; rendering walks the same depth recursively.
pub const MAX_DEPTH: usize = 200;

const TYPE_NULL: u8 = b'0';
const TYPE_NONE: u8 = b'N';
const TYPE_FALSE: u8 = b'F';
const TYPE_TRUE: u8 = b'T';
const TYPE_STOPITER: u8 = b'S';
const TYPE_ELLIPSIS: u8 = b'.';
const TYPE_INT: u8 = b'i';
const TYPE_INT64: u8 = b'I';
const TYPE_FLOAT: u8 = b'f';
const TYPE_BINARY_FLOAT: u8 = b'g';
const TYPE_COMPLEX: u8 = b'x';
const TYPE_BINARY_COMPLEX: u8 = b'y';
const TYPE_LONG: u8 = b'l';
const TYPE_STRING: u8 = b's';
const TYPE_INTERNED: u8 = b't';
const TYPE_STRINGREF: u8 = b'R';
const TYPE_REF: u8 = b'r';
const TYPE_TUPLE: u8 = b'(';
const TYPE_SMALL_TUPLE: u8 = b')';
const TYPE_LIST: u8 = b'[';
const TYPE_DICT: u8 = b'{';
const TYPE_CODE: u8 = b'c';
const TYPE_CODE2: u8 = b'C';
const TYPE_UNICODE: u8 = b'u';
const TYPE_SET: u8 = b'<';
const TYPE_FROZENSET: u8 = b'>';
const TYPE_ASCII: u8 = b'a';
const TYPE_ASCII_INTERNED: u8 = b'A';
const TYPE_SHORT_ASCII: u8 = b'z';
const TYPE_SHORT_ASCII_INTERNED: u8 = b'Z';

pub struct MarshalReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    version: VersionPair,
    refs: Vec<Rc<PyObject>>,
    interned: Vec<Rc<PyObject>>,
    depth: usize,
}

impl<'a> MarshalReader<'a> {
    pub fn new(bytes: &'a [u8], version: VersionPair) -> Self {
        Self::at(bytes, 0, version)
    }

    /// Reader positioned at `pos`, e.g. just past a container header.
    pub fn at(bytes: &'a [u8], pos: usize, version: VersionPair) -> Self {
        Self {
            bytes,
            pos,
            version,
            refs: Vec::new(),
            interned: Vec::new(),
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_exact(&mut self, n: usize) -> Result<&'a [u8], LoadError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(LoadError::UnexpectedEof { offset: self.pos })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, LoadError> {
        Ok(self.read_exact(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, LoadError> {
        let b = self.read_exact(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, LoadError> {
        let b = self.read_exact(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, LoadError> {
        Ok(self.read_u32()? as i32)
    }

    fn read_i64(&mut self) -> Result<i64, LoadError> {
        let b = self.read_exact(8)?;
        Ok(i64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn read_f64(&mut self) -> Result<f64, LoadError> {
        Ok(f64::from_bits(self.read_i64()? as u64))
    }

    pub fn skip(&mut self, n: usize) -> Result<(), LoadError> {
        self.read_exact(n).map(|_| ())
    }

    fn read_len(&mut self) -> Result<usize, LoadError> {
        let offset = self.pos;
        let n = self.read_i32()?;
        usize::try_from(n).map_err(|_| LoadError::BadLength { length: n, offset })
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, LoadError> {
        Ok(self.read_exact(n)?.to_vec())
    }

    fn read_short_text(&mut self) -> Result<String, LoadError> {
        let n = self.read_u8()? as usize;
        Ok(String::from_utf8_lossy(self.read_exact(n)?).into_owned())
    }

    fn read_items(&mut self, n: usize) -> Result<Vec<Rc<PyObject>>, LoadError> {
        // Cap the preallocation; `n` comes straight from untrusted input.
        let mut items = Vec::with_capacity(n.min(1024));
        for _ in 0..n {
            items.push(self.read_object()?);
        }
        Ok(items)
    }

    /// Reads one object, resolving back-references.
    pub fn read_object(&mut self) -> Result<Rc<PyObject>, LoadError> {
        if self.depth >= MAX_DEPTH {
            return Err(LoadError::TooDeep { offset: self.pos });
        }
        self.depth += 1;
        let result = self.read_nested();
        self.depth -= 1;
        result
    }

    fn read_nested(&mut self) -> Result<Rc<PyObject>, LoadError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        let code = tag & !FLAG_REF;

        if code == TYPE_REF {
            let index = self.read_u32()? as usize;
            return self
                .refs
                .get(index)
                .cloned()
                .ok_or(LoadError::BadReference { index, offset });
        }

        let slot = if tag & FLAG_REF != 0 {
            self.refs.push(Rc::new(PyObject::Null));
            Some(self.refs.len() - 1)
        } else {
            None
        };

        let object = Rc::new(self.read_payload(code, offset)?);

        if let Some(slot) = slot {
            self.refs[slot] = Rc::clone(&object);
        }
        Ok(object)
    }

    fn read_payload(&mut self, code: u8, offset: usize) -> Result<PyObject, LoadError> {
        let object = match code {
            TYPE_NULL => PyObject::Null,
            TYPE_NONE => PyObject::None,
            TYPE_FALSE => PyObject::False,
            TYPE_TRUE => PyObject::True,
            TYPE_STOPITER => PyObject::StopIteration,
            TYPE_ELLIPSIS => PyObject::Ellipsis,
            TYPE_INT => PyObject::Int(self.read_i32()?),
            TYPE_INT64 => PyObject::Int64(self.read_i64()?),
            TYPE_LONG => {
                let size = self.read_i32()?;
                let n = size.unsigned_abs() as usize;
                let mut digits = Vec::with_capacity(n.min(1024));
                for _ in 0..n {
                    digits.push(self.read_u16()?);
                }
                PyObject::Long(PyLong {
                    negative: size < 0,
                    digits,
                })
            }
            TYPE_FLOAT => PyObject::Float(self.read_short_text()?),
            TYPE_BINARY_FLOAT => PyObject::BinaryFloat(self.read_f64()?),
            TYPE_COMPLEX => {
                let real = self.read_short_text()?;
                let imag = self.read_short_text()?;
                PyObject::Complex(real, imag)
            }
            TYPE_BINARY_COMPLEX => {
                let real = self.read_f64()?;
                let imag = self.read_f64()?;
                PyObject::BinaryComplex(real, imag)
            }
            TYPE_STRING => {
                let n = self.read_len()?;
                PyObject::String(PyString::new(StringKind::Bytes, self.read_bytes(n)?))
            }
            TYPE_INTERNED => {
                let n = self.read_len()?;
                let data = self.read_bytes(n)?;
                if self.version.major >= 3 {
                    PyObject::String(PyString::new(StringKind::Unicode, data))
                } else {
                    let object = PyObject::String(PyString::new(StringKind::Bytes, data));
                    self.interned.push(Rc::new(object.clone()));
                    object
                }
            }
            TYPE_STRINGREF => {
                let index = self.read_u32()? as usize;
                let object = self
                    .interned
                    .get(index)
                    .ok_or(LoadError::BadReference { index, offset })?;
                PyObject::clone(object)
            }
            TYPE_UNICODE | TYPE_ASCII | TYPE_ASCII_INTERNED => {
                let n = self.read_len()?;
                PyObject::String(PyString::new(StringKind::Unicode, self.read_bytes(n)?))
            }
            TYPE_SHORT_ASCII | TYPE_SHORT_ASCII_INTERNED => {
                let n = self.read_u8()? as usize;
                PyObject::String(PyString::new(StringKind::Unicode, self.read_bytes(n)?))
            }
            TYPE_TUPLE => {
                let n = self.read_len()?;
                PyObject::Tuple(self.read_items(n)?)
            }
            TYPE_SMALL_TUPLE => {
                let n = self.read_u8()? as usize;
                PyObject::Tuple(self.read_items(n)?)
            }
            TYPE_LIST => {
                let n = self.read_len()?;
                PyObject::List(self.read_items(n)?)
            }
            TYPE_SET => {
                let n = self.read_len()?;
                PyObject::Set(self.read_items(n)?)
            }
            TYPE_FROZENSET => {
                let n = self.read_len()?;
                PyObject::FrozenSet(self.read_items(n)?)
            }
            TYPE_DICT => {
                let mut entries = Vec::new();
                loop {
                    let key = self.read_object()?;
                    if *key == PyObject::Null {
                        break;
                    }
                    let value = self.read_object()?;
                    entries.push((key, value));
                }
                PyObject::Dict(entries)
            }
            TYPE_CODE | TYPE_CODE2 => PyObject::Code(Box::new(self.read_code()?)),
            other => return Err(LoadError::UnknownType { code: other, offset }),
        };
        Ok(object)
    }

    /// Reads a short (1.x–2.2) or long count field, depending on the dialect.
    fn read_count(&mut self) -> Result<u32, LoadError> {
        if self.version.below(2, 3) {
            Ok(u32::from(self.read_u16()?))
        } else {
            self.read_u32()
        }
    }

    fn read_string_field(&mut self, field: &'static str) -> Result<PyString, LoadError> {
        let offset = self.pos;
        let object = self.read_object()?;
        match &*object {
            PyObject::String(s) => Ok(s.clone()),
            other => Err(LoadError::UnexpectedObject {
                field,
                found: other.type_name(),
                offset,
            }),
        }
    }

    fn read_sequence_field(&mut self, field: &'static str) -> Result<Vec<Rc<PyObject>>, LoadError> {
        let offset = self.pos;
        let object = self.read_object()?;
        match &*object {
            PyObject::Tuple(items) | PyObject::List(items) => Ok(items.clone()),
            other => Err(LoadError::UnexpectedObject {
                field,
                found: other.type_name(),
                offset,
            }),
        }
    }

    fn read_code(&mut self) -> Result<CodeObject, LoadError> {
        let v = self.version;
        let mut code = CodeObject::default();

        if v.at_least(1, 3) {
            code.arg_count = self.read_count()?;
        }
        if v.at_least(3, 8) {
            code.pos_only_arg_count = self.read_u32()?;
        }
        if v.major >= 3 {
            code.kw_only_arg_count = self.read_u32()?;
        }
        if v.at_least(1, 3) && v.below(3, 11) {
            code.num_locals = self.read_count()?;
        }
        if v.at_least(1, 5) {
            code.stack_size = self.read_count()?;
        }
        if v.at_least(1, 3) {
            let flags = self.read_count()?;
            code.flags = if v.below(3, 8) {
                remap_legacy_flags(flags)?
            } else {
                flags
            };
        }

        code.code = self.read_string_field("code")?.data;
        code.consts = self.read_sequence_field("consts")?;
        code.names = self.read_sequence_field("names")?;

        if v.at_least(1, 3) {
            code.local_names = self.read_sequence_field("varnames")?;
        }
        if v.at_least(3, 11) {
            code.local_kinds = self.read_string_field("localspluskinds")?.data;
        }
        if v.at_least(2, 1) && v.below(3, 11) {
            code.free_vars = self.read_sequence_field("freevars")?;
            code.cell_vars = self.read_sequence_field("cellvars")?;
        }

        code.file_name = self.read_string_field("filename")?.text();
        code.name = self.read_string_field("name")?.text();
        if v.at_least(3, 11) {
            code.qual_name = self.read_string_field("qualname")?.text();
        }

        if v.at_least(1, 5) {
            code.first_line = self.read_count()?;
            code.line_table = self.read_string_field("linetable")?.data;
        }
        if v.at_least(3, 11) {
            code.exception_table = self.read_string_field("exceptiontable")?.data;
        }

        trace!(name = %code.name, bytes = code.code.len(), "decoded code object");
        Ok(code)
    }
}

/// Before 3.8 the `CO_FUTURE_*` bits sat four bits lower; shift them into place.
fn remap_legacy_flags(flags: u32) -> Result<u32, LoadError> {
    if flags & 0xF000_0000 != 0 {
        return Err(LoadError::UnexpectedFlags { flags });
    }
    Ok((flags & 0xFFFF) | ((flags & 0x0FFF_0000) << 4))
}
