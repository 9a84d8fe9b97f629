// This module holds the compiled form of an opcode definition table. OpcodeTable keeps the
// retained records in source order together with a 256-slot index from raw opcode byte to
// entry, so decoding a byte is a single array lookup that yields either the instruction's
// metadata or an explicit None. The compiler submodule builds the table in one pass while
// checking that every opcode byte and every derived constant name is unique; the ident
// submodule owns the mnemonic-to-identifier normalization shared with the emitter.

//! Compiled opcode tables.
//!
//! [`compile`] turns retained [`InstructionRecord`]s into an [`OpcodeTable`];
//! [`OpcodeTable::decode`] maps any byte to its [`OpMeta`].

use std::fmt;

use crate::definition::{InstructionRecord, ValueType};

pub mod compiler;
pub mod ident;

pub use compiler::compile;
pub use ident::{canonical_identifier, metadata_identifier};

/// Number of distinct single-byte opcodes.
pub const OPCODE_SPACE: usize = 256;

/// Instruction metadata as seen by a bytecode interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpMeta {
    pub tr: Option<ValueType>,
    pub t1: Option<ValueType>,
    pub t2: Option<ValueType>,
    pub m: u8,
    pub code: u8,
    pub text: String,
}

impl OpMeta {
    pub fn from_record(record: &InstructionRecord) -> Self {
        Self {
            tr: record.result,
            t1: record.operand1,
            t2: record.operand2,
            m: record.memory,
            code: record.code,
            text: record.text.clone(),
        }
    }

    pub fn is_unop(&self) -> bool {
        self.t1.is_some() && self.t2.is_none()
    }

    pub fn is_binop(&self) -> bool {
        self.t1.is_some() && self.t2.is_some()
    }
}

impl fmt::Display for OpMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x} {}", self.code, self.text)
    }
}

/// One compiled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Canonical identifier, used as the opcode constant name.
    pub ident: String,
    pub meta: OpMeta,
    pub record: InstructionRecord,
}

impl TableEntry {
    pub fn metadata_ident(&self) -> String {
        metadata_identifier(&self.ident)
    }
}

/// Opcode byte to instruction mapping.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    pub(crate) entries: Vec<TableEntry>,
    pub(crate) slots: [Option<usize>; OPCODE_SPACE],
}

impl OpcodeTable {
    pub(crate) fn empty() -> Self {
        Self {
            entries: Vec::new(),
            slots: [None; OPCODE_SPACE],
        }
    }

    /// Metadata for `byte`, or `None` when no retained record uses it.
    pub fn decode(&self, byte: u8) -> Option<&OpMeta> {
        match self.slots[usize::from(byte)] {
            Some(index) => Some(&self.entries[index].meta),
            None => None,
        }
    }

    pub fn entry(&self, byte: u8) -> Option<&TableEntry> {
        self.slots[usize::from(byte)].map(|index| &self.entries[index])
    }

    /// Entries in definition order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// `(identifier, code)` for each opcode constant.
    pub fn opcode_constants(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.ident.as_str(), entry.meta.code))
    }

    /// `(identifier_OP, metadata)` for each metadata constant.
    pub fn metadata_constants(&self) -> impl Iterator<Item = (String, &OpMeta)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.metadata_ident(), &entry.meta))
    }

    /// Bytes with no instruction assigned.
    pub fn unassigned(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&byte| self.slots[usize::from(byte)].is_none())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
