//! Opcode definition records and the reader that produces them.
//!
//! A definition table is plain text in which record lines look like
//!
//! ```text
//! WABT_OPCODE(I32, I32, I32, ___, 0, 0, 0x6a, I32Add, "i32.add")
//! ```
//!
//! Columns are, in order: result type, three operand types, memory flag,
//! prefix byte, opcode byte, an optional identifier column and the quoted
//! mnemonic. Every other line is ignored.

use std::fmt;

pub mod reader;

pub use reader::{parse_record, read_definitions, read_rows, DropReason, ParsedRow};

/// Runtime value types the downstream interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::I32 => "I32",
            ValueType::I64 => "I64",
            ValueType::F32 => "F32",
            ValueType::F64 => "F64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of a type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeToken {
    /// `___`: no value.
    Void,
    Value(ValueType),
    /// 128-bit vector type; rows producing it are filtered out.
    V128,
}

impl TypeToken {
    pub const VOID: &'static str = "___";

    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            Self::VOID => TypeToken::Void,
            "I32" => TypeToken::Value(ValueType::I32),
            "I64" => TypeToken::Value(ValueType::I64),
            "F32" => TypeToken::Value(ValueType::F32),
            "F64" => TypeToken::Value(ValueType::F64),
            "V128" => TypeToken::V128,
            _ => return None,
        })
    }
}

/// Prefix column. Only unprefixed opcodes end up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    None,
    Byte(u8),
}

impl Prefix {
    pub fn from_byte(byte: u8) -> Self {
        if byte == 0 {
            Prefix::None
        } else {
            Prefix::Byte(byte)
        }
    }
}

/// One retained row of the definition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    pub result: Option<ValueType>,
    pub operand1: Option<ValueType>,
    pub operand2: Option<ValueType>,
    pub operand3: Option<ValueType>,
    pub memory: u8,
    pub prefix: Prefix,
    pub code: u8,
    /// Identifier column of the nine-column layout, e.g. `I32Add`.
    pub name: Option<String>,
    /// Mnemonic exactly as written, without the surrounding quotes.
    pub text: String,
    /// 1-based line in the definition source.
    pub line: usize,
}
