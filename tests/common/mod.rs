//! Fixture builder: writes just enough of the marshal format to produce
//! small `.pyc` images and raw code objects for the integration tests.
#![allow(dead_code)]

pub enum Const {
    None,
    Int(i32),
    Str(&'static str),
    Code(Box<Code>),
}

pub struct Code {
    pub name: &'static str,
    pub file_name: &'static str,
    pub arg_count: u32,
    pub stack_size: u32,
    pub flags: u32,
    pub bytecode: Vec<u8>,
    pub consts: Vec<Const>,
    pub names: Vec<&'static str>,
    pub local_names: Vec<&'static str>,
}

impl Code {
    pub fn module(bytecode: Vec<u8>, consts: Vec<Const>) -> Self {
        Self {
            name: "<module>",
            file_name: "mod.py",
            arg_count: 0,
            stack_size: 1,
            flags: 0,
            bytecode,
            consts,
            names: Vec::new(),
            local_names: Vec::new(),
        }
    }
}

fn u32le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn bytes(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b's');
    u32le(out, data.len() as u32);
    out.extend_from_slice(data);
}

fn text(out: &mut Vec<u8>, s: &str, py3: bool) {
    if py3 {
        out.push(b'z');
        out.push(s.len() as u8);
        out.extend_from_slice(s.as_bytes());
    } else {
        bytes(out, s.as_bytes());
    }
}

fn text_tuple(out: &mut Vec<u8>, items: &[&str], py3: bool) {
    out.push(b'(');
    u32le(out, items.len() as u32);
    for item in items {
        text(out, item, py3);
    }
}

fn constant(out: &mut Vec<u8>, value: &Const, py3: bool) {
    match value {
        Const::None => out.push(b'N'),
        Const::Int(v) => {
            out.push(b'i');
            out.extend_from_slice(&v.to_le_bytes());
        }
        Const::Str(s) => text(out, s, py3),
        Const::Code(code) if py3 => code_311(out, code),
        Const::Code(code) => code_27(out, code),
    }
}

fn consts(out: &mut Vec<u8>, values: &[Const], py3: bool) {
    out.push(b'(');
    u32le(out, values.len() as u32);
    for value in values {
        constant(out, value, py3);
    }
}

/// Code object in the 3.11 layout.
pub fn code_311(out: &mut Vec<u8>, code: &Code) {
    out.push(b'c');
    u32le(out, code.arg_count);
    u32le(out, 0); // posonlyargcount
    u32le(out, 0); // kwonlyargcount
    u32le(out, code.stack_size);
    u32le(out, code.flags);
    bytes(out, &code.bytecode);
    consts(out, &code.consts, true);
    text_tuple(out, &code.names, true);
    text_tuple(out, &code.local_names, true);
    bytes(out, &vec![0x20; code.local_names.len()]);
    text(out, code.file_name, true);
    text(out, code.name, true);
    text(out, code.name, true);
    u32le(out, 1);
    bytes(out, b"");
    bytes(out, b"");
}

/// Code object in the 2.7 layout.
pub fn code_27(out: &mut Vec<u8>, code: &Code) {
    out.push(b'c');
    u32le(out, code.arg_count);
    u32le(out, code.local_names.len() as u32);
    u32le(out, code.stack_size);
    u32le(out, code.flags);
    bytes(out, &code.bytecode);
    consts(out, &code.consts, false);
    text_tuple(out, &code.names, false);
    text_tuple(out, &code.local_names, false);
    text_tuple(out, &[], false);
    text_tuple(out, &[], false);
    text(out, code.file_name, false);
    text(out, code.name, false);
    u32le(out, 1);
    bytes(out, b"");
}

/// Raw marshalled 3.11 code object, no header.
pub fn raw_311(code: &Code) -> Vec<u8> {
    let mut out = Vec::new();
    code_311(&mut out, code);
    out
}

/// Complete 3.11 `.pyc`: magic, flags word, 8 bytes of mtime/size, code.
pub fn pyc_311(code: &Code) -> Vec<u8> {
    let mut out = vec![0xA7, 0x0D, 0x0D, 0x0A];
    out.extend_from_slice(&[0; 12]);
    code_311(&mut out, code);
    out
}

/// Complete 2.7 `.pyc`; `unicode` selects the `-U` magic.
pub fn pyc_27(code: &Code, unicode: bool) -> Vec<u8> {
    let mut out = vec![if unicode { 0x04 } else { 0x03 }, 0xF3, 0x0D, 0x0A];
    out.extend_from_slice(&[0; 4]);
    code_27(&mut out, code);
    out
}

/// `RESUME 0; LOAD_CONST 0; RETURN_VALUE` with one inline CACHE unit.
pub fn simple_311() -> Code {
    Code::module(vec![151, 0, 100, 0, 0, 0, 83, 0], vec![Const::None])
}

/// `LOAD_CONST 0; RETURN_VALUE` in variable-length encoding.
pub fn simple_27() -> Code {
    Code::module(vec![100, 0, 0, 83], vec![Const::Str("hi")])
}

/// Same shape as `simple_311`, but `LOAD_CONST 5` points past the constants.
pub fn bad_const_311() -> Code {
    Code::module(vec![151, 0, 100, 5, 83, 0], vec![Const::None])
}

/// One disassembly line as the renderer lays it out, at `indent` levels.
pub fn op_line(indent: usize, offset: usize, name: &str, arg: Option<(u32, &str)>) -> String {
    let body = match arg {
        Some((arg, "")) => format!("{:<7} {:<30} {}", offset, name, arg),
        Some((arg, note)) => format!("{:<7} {:<30} {}: {}", offset, name, arg, note),
        None => format!("{:<7} {}", offset, name),
    };
    format!("{}{}\n", "    ".repeat(indent), body)
}
