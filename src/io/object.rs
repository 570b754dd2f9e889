use std::rc::Rc;

/// How a string object was stored, which decides its display prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StringKind {
    /// Byte string (`s`, and `t` before 3.x).
    Bytes,
    /// Text string (`u`, `t` on 3.x, and the 3.4+ ASCII forms).
    Unicode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PyString {
    pub kind: StringKind,
    pub data: Vec<u8>,
}

impl PyString {
    pub fn new(kind: StringKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Lossy text view, for names and file names.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Arbitrary-precision integer as stored by marshal: sign plus base-2**15 digits,
/// least significant first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PyLong {
    pub negative: bool,
    pub digits: Vec<u16>,
}

impl PyLong {
    /// Decimal representation.
    pub fn to_decimal(&self) -> String {
        // Repeated division of the base-2**15 magnitude by 10**4.
        let mut magnitude: Vec<u32> = self.digits.iter().rev().map(|&d| u32::from(d)).collect();
        let mut chunks: Vec<u32> = Vec::new();
        while magnitude.iter().any(|&d| d != 0) {
            let mut rem = 0u32;
            for d in magnitude.iter_mut() {
                let cur = (rem << 15) | *d;
                *d = cur / 10_000;
                rem = cur % 10_000;
            }
            chunks.push(rem);
            while magnitude.first() == Some(&0) {
                magnitude.remove(0);
            }
        }

        if chunks.is_empty() {
            return "0".to_string();
        }

        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        let mut iter = chunks.iter().rev();
        if let Some(first) = iter.next() {
            out.push_str(&first.to_string());
        }
        for chunk in iter {
            out.push_str(&format!("{:04}", chunk));
        }
        out
    }
}

/// A value decoded from a marshal stream.
#[derive(Clone, Debug, PartialEq)]
pub enum PyObject {
    Null,
    None,
    False,
    True,
    StopIteration,
    Ellipsis,
    Int(i32),
    Int64(i64),
    Long(PyLong),
    /// Float stored as its repr text.
    Float(String),
    BinaryFloat(f64),
    Complex(String, String),
    BinaryComplex(f64, f64),
    String(PyString),
    Tuple(Vec<Rc<PyObject>>),
    List(Vec<Rc<PyObject>>),
    Dict(Vec<(Rc<PyObject>, Rc<PyObject>)>),
    Set(Vec<Rc<PyObject>>),
    FrozenSet(Vec<Rc<PyObject>>),
    Code(Box<CodeObject>),
}

impl PyObject {
    pub fn as_string(&self) -> Option<&PyString> {
        match self {
            PyObject::String(s) => Some(s),
            _ => None,
        }
    }

    /// Items of a tuple or list.
    pub fn as_sequence(&self) -> Option<&[Rc<PyObject>]> {
        match self {
            PyObject::Tuple(items) | PyObject::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PyObject::Null => "NULL",
            PyObject::None => "None",
            PyObject::False | PyObject::True => "bool",
            PyObject::StopIteration => "StopIteration",
            PyObject::Ellipsis => "Ellipsis",
            PyObject::Int(_) | PyObject::Int64(_) | PyObject::Long(_) => "int",
            PyObject::Float(_) | PyObject::BinaryFloat(_) => "float",
            PyObject::Complex(..) | PyObject::BinaryComplex(..) => "complex",
            PyObject::String(_) => "str",
            PyObject::Tuple(_) => "tuple",
            PyObject::List(_) => "list",
            PyObject::Dict(_) => "dict",
            PyObject::Set(_) => "set",
            PyObject::FrozenSet(_) => "frozenset",
            PyObject::Code(_) => "code",
        }
    }
}

/// A code object. Fields that a dialect does not carry keep their defaults.
///
/// `flags` is always held in the 3.8+ bit layout; older values are remapped on load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeObject {
    pub arg_count: u32,
    pub pos_only_arg_count: u32,
    pub kw_only_arg_count: u32,
    pub num_locals: u32,
    pub stack_size: u32,
    pub flags: u32,
    pub code: Vec<u8>,
    pub consts: Vec<Rc<PyObject>>,
    pub names: Vec<Rc<PyObject>>,
    pub local_names: Vec<Rc<PyObject>>,
    pub local_kinds: Vec<u8>,
    pub free_vars: Vec<Rc<PyObject>>,
    pub cell_vars: Vec<Rc<PyObject>>,
    pub file_name: String,
    pub name: String,
    pub qual_name: String,
    pub first_line: u32,
    pub line_table: Vec<u8>,
    pub exception_table: Vec<u8>,
}
