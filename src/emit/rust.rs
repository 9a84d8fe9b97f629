//! Rust source emitter.
//!
//! Produces a self-contained module: a type preamble, one `u8` constant and
//! one `Op` constant per instruction, and `Op::from_opcode`.

use std::fmt::{self, Write};

use super::TableEmitter;
use crate::definition::ValueType;
use crate::table::{OpMeta, OpcodeTable};

const BANNER: &str = "// GENERATED CODE - DO NOT EDIT\n\
                      // Generated by opgen from an opcode definition table.\n\n";

const PREAMBLE: &str = r#"#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

#[derive(Debug)]
pub struct Op {
    pub tr: Option<ValueType>,
    pub t1: Option<ValueType>,
    pub t2: Option<ValueType>,
    pub m: u8,
    pub code: u8,
    pub text: &'static str,
}

pub const ___: Option<ValueType> = None;
pub const I32: Option<ValueType> = Some(ValueType::I32);
pub const I64: Option<ValueType> = Some(ValueType::I64);
pub const F32: Option<ValueType> = Some(ValueType::F32);
pub const F64: Option<ValueType> = Some(ValueType::F64);

impl Op {
    pub fn is_unop(&self) -> bool {
        self.t1.is_some() && self.t2.is_none()
    }

    pub fn is_binop(&self) -> bool {
        self.t1.is_some() && self.t2.is_some()
    }
}

"#;

/// Column width for constant names, so the tables line up.
const NAME_WIDTH: usize = 24;

/// Emits the table as a Rust module.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustSourceEmitter;

impl RustSourceEmitter {
    pub fn new() -> Self {
        Self
    }

    fn emit_opcodes(&self, table: &OpcodeTable, out: &mut String) -> fmt::Result {
        for (ident, code) in table.opcode_constants() {
            writeln!(out, "pub const {ident:width$}: u8 = {code:#04x};", width = NAME_WIDTH)?;
        }
        out.push_str("\n\n");
        Ok(())
    }

    fn emit_metadata(&self, table: &OpcodeTable, out: &mut String) -> fmt::Result {
        for (ident, meta) in table.metadata_constants() {
            writeln!(
                out,
                "pub const {ident:width$}: Op = {};",
                op_literal(meta),
                width = NAME_WIDTH
            )?;
        }
        out.push('\n');
        Ok(())
    }

    fn emit_decoder(&self, table: &OpcodeTable, out: &mut String) -> fmt::Result {
        out.push_str("impl Op {\n");
        out.push_str("    pub fn from_opcode(opc: u8) -> Option<&'static Op> {\n");
        out.push_str("        match opc {\n");
        for entry in table.entries() {
            let arm = &entry.ident;
            writeln!(out, "            {arm:20} => Some(&{}),", entry.metadata_ident())?;
        }
        writeln!(out, "            {:20} => None,", "_")?;
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n");
        Ok(())
    }
}

impl TableEmitter for RustSourceEmitter {
    fn emit(&self, table: &OpcodeTable, out: &mut String) -> fmt::Result {
        out.push_str(BANNER);
        out.push_str(PREAMBLE);
        self.emit_opcodes(table, out)?;
        self.emit_metadata(table, out)?;
        self.emit_decoder(table, out)
    }
}

fn type_expr(ty: Option<ValueType>) -> &'static str {
    match ty {
        Some(ty) => ty.as_str(),
        None => "___",
    }
}

fn op_literal(meta: &OpMeta) -> String {
    format!(
        "Op {{ tr: {}, t1: {}, t2: {}, m: {}, code: {:#04x}, text: {:?} }}",
        type_expr(meta.tr),
        type_expr(meta.t1),
        type_expr(meta.t2),
        meta.m,
        meta.code,
        meta.text,
    )
}
