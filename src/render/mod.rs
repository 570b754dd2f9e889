//! Text renderer for loaded modules: a structural dump of each code object
//! (names, constants, flags) followed by its disassembly.
//!
//! Everything is written straight to the caller's sink as it is produced. When
//! rendering fails part-way, the lines already written stay in the sink.
use std::io::{self, Write};
use std::rc::Rc;

use thiserror::Error;
use tracing::trace;

use crate::io::LoadedModule;
use crate::io::object::{CodeObject, PyObject, PyString, StringKind};
use crate::types::RenderOptions;

pub mod bytecode;
pub mod opcode;

/// Errors raised while rendering a code object
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("truncated instruction at offset {offset}")]
    TruncatedInstruction { offset: usize },
    #[error("{kind} index {index} out of range at offset {offset} ({len} available)")]
    OperandOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
        offset: usize,
    },
    #[error("truncated exception table at byte {offset}")]
    TruncatedExceptionTable { offset: usize },
}

const INDENT: &str = "    ";

pub(crate) fn write_line(out: &mut dyn Write, indent: usize, text: &str) -> io::Result<()> {
    for _ in 0..indent {
        out.write_all(INDENT.as_bytes())?;
    }
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")
}

/// Code flag names in the 3.8+ bit layout, lowest bit first.
const FLAG_NAMES: [&str; 32] = [
    "CO_OPTIMIZED",
    "CO_NEWLOCALS",
    "CO_VARARGS",
    "CO_VARKEYWORDS",
    "CO_NESTED",
    "CO_GENERATOR",
    "CO_NOFREE",
    "CO_COROUTINE",
    "CO_ITERABLE_COROUTINE",
    "CO_ASYNC_GENERATOR",
    "<0x400>",
    "<0x800>",
    "CO_GENERATOR_ALLOWED",
    "<0x2000>",
    "<0x4000>",
    "<0x8000>",
    "<0x10000>",
    "CO_FUTURE_DIVISION",
    "CO_FUTURE_ABSOLUTE_IMPORT",
    "CO_FUTURE_WITH_STATEMENT",
    "CO_FUTURE_PRINT_FUNCTION",
    "CO_FUTURE_UNICODE_LITERALS",
    "CO_FUTURE_BARRY_AS_BDFL",
    "CO_FUTURE_GENERATOR_STOP",
    "CO_FUTURE_ANNOTATIONS",
    "CO_NO_MONITORING_EVENTS",
    "<0x4000000>",
    "<0x8000000>",
    "<0x10000000>",
    "<0x20000000>",
    "<0x40000000>",
    "<0x80000000>",
];

fn flag_names(flags: u32) -> String {
    FLAG_NAMES
        .iter()
        .enumerate()
        .filter(|(bit, _)| flags & (1 << bit) != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Python-style quoted literal for a string constant, with the prefix its dialect needs.
pub fn string_repr(s: &PyString, module: &LoadedModule) -> String {
    let prefix = match (s.kind, module.str_is_unicode()) {
        (StringKind::Bytes, true) => "b",
        (StringKind::Unicode, false) => "u",
        _ => "",
    };
    let quote = if s.data.contains(&b'\'') && !s.data.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 3);
    out.push_str(prefix);
    out.push(quote);

    let escape = |c: char, out: &mut String| match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if (c as u32) < 0x20 || c as u32 == 0x7F => out.push_str(&format!("\\x{:02x}", c as u32)),
        c => out.push(c),
    };

    match s.kind {
        StringKind::Bytes => {
            for &b in &s.data {
                if b >= 0x80 {
                    out.push_str(&format!("\\x{:02x}", b));
                } else {
                    escape(char::from(b), &mut out);
                }
            }
        }
        StringKind::Unicode => {
            for c in String::from_utf8_lossy(&s.data).chars() {
                escape(c, &mut out);
            }
        }
    }

    out.push(quote);
    out
}

fn float_repr(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:?}", value)
    }
}

/// One-line representation used for disassembly operands.
pub fn short_repr(obj: &PyObject, module: &LoadedModule) -> String {
    match obj {
        PyObject::String(s) => string_repr(s, module),
        PyObject::Code(code) => format!("<CODE> {}", code.name),
        PyObject::Tuple(items) => {
            let parts: Vec<String> = items.iter().map(|i| short_repr(i, module)).collect();
            if parts.len() == 1 {
                format!("({},)", parts[0])
            } else {
                format!("({})", parts.join(", "))
            }
        }
        PyObject::List(_)
        | PyObject::Dict(_)
        | PyObject::Set(_)
        | PyObject::FrozenSet(_) => format!("<{}>", obj.type_name()),
        scalar => scalar_repr(scalar).unwrap_or_default(),
    }
}

fn scalar_repr(obj: &PyObject) -> Option<String> {
    Some(match obj {
        PyObject::Null => "<NULL>".to_string(),
        PyObject::None => "None".to_string(),
        PyObject::False => "False".to_string(),
        PyObject::True => "True".to_string(),
        PyObject::StopIteration => "StopIteration".to_string(),
        PyObject::Ellipsis => "...".to_string(),
        PyObject::Int(v) => v.to_string(),
        PyObject::Int64(v) => v.to_string(),
        PyObject::Long(v) => v.to_decimal(),
        PyObject::Float(text) => text.clone(),
        PyObject::BinaryFloat(v) => float_repr(*v),
        PyObject::Complex(re, im) => format!("({}+{}j)", re, im),
        PyObject::BinaryComplex(re, im) => format!("({}+{}j)", float_repr(*re), float_repr(*im)),
        _ => return None,
    })
}

fn write_block<'a>(
    out: &mut dyn Write,
    items: impl IntoIterator<Item = &'a PyObject>,
    open: &str,
    close: &str,
    module: &LoadedModule,
    indent: usize,
    options: RenderOptions,
) -> Result<(), RenderError> {
    write_line(out, indent, open)?;
    for item in items {
        output_object(out, item, module, indent + 1, options)?;
    }
    write_line(out, indent, close)?;
    Ok(())
}

/// Renders any object at `indent`; code objects expand into a full `[Code]` dump.
pub fn output_object(
    out: &mut dyn Write,
    obj: &PyObject,
    module: &LoadedModule,
    indent: usize,
    options: RenderOptions,
) -> Result<(), RenderError> {
    match obj {
        PyObject::Code(code) => render_code(out, code, module, indent, options),
        PyObject::String(s) => Ok(write_line(out, indent, &string_repr(s, module))?),
        PyObject::Tuple(items) => {
            write_block(out, items.iter().map(|i| &**i), "(", ")", module, indent, options)
        }
        PyObject::List(items) => {
            write_block(out, items.iter().map(|i| &**i), "[", "]", module, indent, options)
        }
        PyObject::Set(items) => {
            write_block(out, items.iter().map(|i| &**i), "{", "}", module, indent, options)
        }
        PyObject::FrozenSet(items) => write_block(
            out,
            items.iter().map(|i| &**i),
            "frozenset({",
            "})",
            module,
            indent,
            options,
        ),
        PyObject::Dict(entries) => write_block(
            out,
            entries.iter().flat_map(|(k, v)| [&**k, &**v]),
            "{",
            "}",
            module,
            indent,
            options,
        ),
        scalar => {
            let text = scalar_repr(scalar).unwrap_or_else(|| format!("<{}>", scalar.type_name()));
            Ok(write_line(out, indent, &text)?)
        }
    }
}

fn write_objects(
    out: &mut dyn Write,
    header: &str,
    items: &[Rc<PyObject>],
    module: &LoadedModule,
    indent: usize,
    options: RenderOptions,
) -> Result<(), RenderError> {
    write_line(out, indent, header)?;
    for item in items {
        output_object(out, item, module, indent + 1, options)?;
    }
    Ok(())
}

/// Renders one code object and, recursively, the code objects among its constants.
pub fn render_code(
    out: &mut dyn Write,
    code: &CodeObject,
    module: &LoadedModule,
    indent: usize,
    options: RenderOptions,
) -> Result<(), RenderError> {
    let v = module.version();
    let field = indent + 1;
    let verbose = options.contains(RenderOptions::PYCODE_VERBOSE);
    trace!(name = %code.name, indent, "rendering code object");

    write_line(out, indent, "[Code]")?;
    write_line(out, field, &format!("File Name: {}", code.file_name))?;
    write_line(out, field, &format!("Object Name: {}", code.name))?;
    if v.at_least(3, 11) {
        write_line(out, field, &format!("Qualified Name: {}", code.qual_name))?;
    }
    write_line(out, field, &format!("Arg Count: {}", code.arg_count))?;
    if v.at_least(3, 8) {
        write_line(out, field, &format!("Pos Only Arg Count: {}", code.pos_only_arg_count))?;
    }
    if v.major >= 3 {
        write_line(out, field, &format!("KW Only Arg Count: {}", code.kw_only_arg_count))?;
    }
    if v.below(3, 11) {
        write_line(out, field, &format!("Locals: {}", code.num_locals))?;
    }
    if v.at_least(1, 5) {
        write_line(out, field, &format!("Stack Size: {}", code.stack_size))?;
    }
    if v.at_least(1, 3) {
        // Show the value as it was stored, before the 3.8 remap.
        let stored = if v.below(3, 8) {
            (code.flags & 0xFFFF) | ((code.flags & 0xFFF0_0000) >> 4)
        } else {
            code.flags
        };
        let names = flag_names(code.flags);
        if names.is_empty() {
            write_line(out, field, &format!("Flags: 0x{:08X}", stored))?;
        } else {
            write_line(out, field, &format!("Flags: 0x{:08X} ({})", stored, names))?;
        }
    }

    write_objects(out, "[Names]", &code.names, module, field, options)?;

    if v.at_least(1, 3) {
        let header = if v.at_least(3, 11) {
            "[Locals+Names]"
        } else {
            "[Var Names]"
        };
        write_objects(out, header, &code.local_names, module, field, options)?;
    }

    if v.at_least(3, 11) && verbose {
        write_line(out, field, "[Locals+Kinds]")?;
        let kinds = PyString::new(StringKind::Bytes, code.local_kinds.clone());
        write_line(out, field + 1, &string_repr(&kinds, module))?;
    }

    if v.at_least(2, 1) && v.below(3, 11) {
        write_objects(out, "[Free Vars]", &code.free_vars, module, field, options)?;
        write_objects(out, "[Cell Vars]", &code.cell_vars, module, field, options)?;
    }

    write_objects(out, "[Constants]", &code.consts, module, field, options)?;

    write_line(out, field, "[Disassembly]")?;
    bytecode::disassemble(out, code, module, field + 1, options)?;

    if v.at_least(3, 11) {
        write_line(out, field, "[Exception Table]")?;
        bytecode::write_exception_table(out, &code.exception_table, field + 1)?;
    }

    if v.at_least(1, 5) && verbose {
        write_line(out, field, &format!("First Line: {}", code.first_line))?;
        write_line(out, field, "[Line Number Table]")?;
        let table = PyString::new(StringKind::Bytes, code.line_table.clone());
        write_line(out, field + 1, &string_repr(&table, module))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VersionPair;

    fn module(major: u32, minor: u32, unicode: bool) -> LoadedModule {
        LoadedModule::new(VersionPair::new(major, minor), unicode, CodeObject::default())
    }

    #[test]
    fn string_prefixes_follow_dialect() {
        let bytes = PyString::new(StringKind::Bytes, "hi");
        let text = PyString::new(StringKind::Unicode, "hi");

        let py2 = module(2, 7, false);
        assert_eq!(string_repr(&bytes, &py2), "'hi'");
        assert_eq!(string_repr(&text, &py2), "u'hi'");

        let py2u = module(2, 7, true);
        assert_eq!(string_repr(&bytes, &py2u), "b'hi'");
        assert_eq!(string_repr(&text, &py2u), "'hi'");

        let py3 = module(3, 11, true);
        assert_eq!(string_repr(&bytes, &py3), "b'hi'");
        assert_eq!(string_repr(&text, &py3), "'hi'");
    }

    #[test]
    fn string_escapes_and_quotes() {
        let py3 = module(3, 11, true);
        let s = PyString::new(StringKind::Unicode, "it's\n");
        assert_eq!(string_repr(&s, &py3), "\"it's\\n\"");
        let s = PyString::new(StringKind::Bytes, vec![b'a', 0x00, 0xff, b'\'', b'"']);
        assert_eq!(string_repr(&s, &py3), "b'a\\x00\\xff\\'\"'");
    }

    #[test]
    fn flag_names_are_joined() {
        assert_eq!(flag_names(0), "");
        assert_eq!(flag_names(0x3), "CO_OPTIMIZED | CO_NEWLOCALS");
        assert_eq!(flag_names(0x0010_0000), "CO_FUTURE_ABSOLUTE_IMPORT");
    }

    #[test]
    fn containers_render_as_blocks() {
        let py3 = module(3, 11, true);
        let tuple = PyObject::Tuple(vec![
            Rc::new(PyObject::Int(1)),
            Rc::new(PyObject::None),
        ]);
        let mut out = Vec::new();
        output_object(&mut out, &tuple, &py3, 1, RenderOptions::empty()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "    (\n        1\n        None\n    )\n"
        );
        assert_eq!(short_repr(&tuple, &py3), "(1, None)");
    }
}
