//! Instruction decoding for the `[Disassembly]` and `[Exception Table]` sections.
use std::io::Write;

use crate::io::object::{CodeObject, PyObject};
use crate::io::LoadedModule;
use crate::render::opcode::{CACHE, Dialect};
use crate::render::{RenderError, short_repr, write_line};
use crate::types::RenderOptions;

/// One decoded instruction. `arg` already includes any preceding `EXTENDED_ARG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub offset: usize,
    pub opcode: u8,
    pub arg: Option<u32>,
}

/// Decodes `code` in the given dialect. A trailing partial instruction is an error.
pub fn decode(code: &[u8], dialect: &Dialect) -> Result<Vec<Instruction>, RenderError> {
    let mut instructions = Vec::new();
    let mut pos = 0;
    let mut extended: u32 = 0;

    while pos < code.len() {
        let offset = pos;
        let opcode = code[pos];

        let raw = if dialect.wordcode {
            let byte = *code
                .get(pos + 1)
                .ok_or(RenderError::TruncatedInstruction { offset })?;
            pos += 2;
            u32::from(byte)
        } else if dialect.has_argument(opcode) {
            let lo = *code
                .get(pos + 1)
                .ok_or(RenderError::TruncatedInstruction { offset })?;
            let hi = *code
                .get(pos + 2)
                .ok_or(RenderError::TruncatedInstruction { offset })?;
            pos += 3;
            u32::from(u16::from_le_bytes([lo, hi]))
        } else {
            pos += 1;
            0
        };

        let arg = dialect
            .has_argument(opcode)
            .then_some(extended | raw);

        extended = match (dialect.is_extended_arg(opcode), arg) {
            (true, Some(value)) => value << if dialect.wordcode { 8 } else { 16 },
            _ => 0,
        };

        instructions.push(Instruction {
            offset,
            opcode,
            arg,
        });
    }

    Ok(instructions)
}

enum Operand {
    Const,
    Name,
    Local,
}

/// Which table an opcode's argument indexes, and how to shift it into an index.
fn operand_kind(name: &str, module: &LoadedModule) -> Option<(Operand, u32)> {
    let version = module.version();
    match name {
        "LOAD_CONST" | "RETURN_CONST" | "KW_NAMES" => Some((Operand::Const, 0)),
        "LOAD_GLOBAL" if version.at_least(3, 11) => Some((Operand::Name, 1)),
        "LOAD_ATTR" if version.at_least(3, 12) => Some((Operand::Name, 1)),
        "LOAD_SUPER_ATTR" => Some((Operand::Name, 2)),
        "LOAD_NAME" | "STORE_NAME" | "DELETE_NAME" | "LOAD_ATTR" | "STORE_ATTR"
        | "DELETE_ATTR" | "LOAD_GLOBAL" | "STORE_GLOBAL" | "DELETE_GLOBAL" | "IMPORT_NAME"
        | "IMPORT_FROM" | "LOAD_METHOD" | "LOAD_FROM_DICT_OR_GLOBALS" => {
            Some((Operand::Name, 0))
        }
        "LOAD_FAST" | "STORE_FAST" | "DELETE_FAST" | "LOAD_FAST_CHECK"
        | "LOAD_FAST_AND_CLEAR" => Some((Operand::Local, 0)),
        _ => None,
    }
}

fn annotate(
    instruction: &Instruction,
    name: &str,
    code: &CodeObject,
    module: &LoadedModule,
) -> Result<Option<String>, RenderError> {
    let (Some(arg), Some((kind, shift))) = (instruction.arg, operand_kind(name, module)) else {
        return Ok(None);
    };
    let index = (arg >> shift) as usize;

    let (table, label) = match kind {
        Operand::Const => (&code.consts, "constant"),
        Operand::Name => (&code.names, "name"),
        Operand::Local => (&code.local_names, "local"),
    };
    let object = table.get(index).ok_or(RenderError::OperandOutOfRange {
        kind: label,
        index,
        len: table.len(),
        offset: instruction.offset,
    })?;

    Ok(Some(match (kind, &**object) {
        (Operand::Const, obj) => short_repr(obj, module),
        (_, PyObject::String(s)) => s.text(),
        (_, obj) => short_repr(obj, module),
    }))
}

pub(crate) fn disassemble(
    out: &mut dyn Write,
    code: &CodeObject,
    module: &LoadedModule,
    indent: usize,
    options: RenderOptions,
) -> Result<(), RenderError> {
    let dialect = Dialect::for_version(module.version());
    let show_caches = options.contains(RenderOptions::SHOW_CACHES);

    // A truncated tail still gets the instructions before it written out first.
    let instructions = match decode(&code.code, &dialect) {
        Ok(all) => all,
        Err(err) => {
            let valid_len = match err {
                RenderError::TruncatedInstruction { offset } => offset,
                _ => 0,
            };
            for instruction in decode(&code.code[..valid_len], &dialect)? {
                write_instruction(out, &instruction, &dialect, code, module, indent, show_caches)?;
            }
            return Err(err);
        }
    };

    for instruction in &instructions {
        write_instruction(out, instruction, &dialect, code, module, indent, show_caches)?;
    }
    Ok(())
}

fn write_instruction(
    out: &mut dyn Write,
    instruction: &Instruction,
    dialect: &Dialect,
    code: &CodeObject,
    module: &LoadedModule,
    indent: usize,
    show_caches: bool,
) -> Result<(), RenderError> {
    if dialect.inline_caches && instruction.opcode == CACHE && !show_caches {
        return Ok(());
    }

    let name = match dialect.name(instruction.opcode) {
        Some(name) => name.to_string(),
        None => format!("<{}>", instruction.opcode),
    };

    let text = match instruction.arg {
        Some(arg) => match annotate(instruction, &name, code, module)? {
            Some(note) => format!("{:<7} {:<30} {}: {}", instruction.offset, name, arg, note),
            None => format!("{:<7} {:<30} {}", instruction.offset, name, arg),
        },
        None => format!("{:<7} {}", instruction.offset, name),
    };
    write_line(out, indent, &text)?;
    Ok(())
}

/// Writes the 3.11+ exception table: `start to end -> target [depth][ lasti]`.
pub(crate) fn write_exception_table(
    out: &mut dyn Write,
    table: &[u8],
    indent: usize,
) -> Result<(), RenderError> {
    let mut pos = 0;

    let varint = |pos: &mut usize| -> Result<u64, RenderError> {
        let mut byte = *table
            .get(*pos)
            .ok_or(RenderError::TruncatedExceptionTable { offset: *pos })?;
        *pos += 1;
        let mut value = u64::from(byte & 0x3F);
        while byte & 0x40 != 0 {
            byte = *table
                .get(*pos)
                .ok_or(RenderError::TruncatedExceptionTable { offset: *pos })?;
            *pos += 1;
            value = (value << 6) | u64::from(byte & 0x3F);
        }
        Ok(value)
    };

    while pos < table.len() {
        let start = varint(&mut pos)?.saturating_mul(2);
        let length = varint(&mut pos)?.saturating_mul(2);
        let target = varint(&mut pos)?.saturating_mul(2);
        let depth_lasti = varint(&mut pos)?;

        let text = format!(
            "{} to {} -> {} [{}]{}",
            start,
            start.saturating_add(length),
            target,
            depth_lasti >> 1,
            if depth_lasti & 1 != 0 { " lasti" } else { "" }
        );
        write_line(out, indent, &text)?;
    }
    Ok(())
}
