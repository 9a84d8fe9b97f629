//! Code emission for compiled opcode tables.
//!
//! The compiler knows nothing about output syntax; an emitter receives the
//! fully-resolved [`OpcodeTable`] and renders it.

use std::fmt;

use crate::core::GenResult;
use crate::table::OpcodeTable;

pub mod rust;

pub use rust::RustSourceEmitter;

/// Renders a compiled table into some textual form.
pub trait TableEmitter {
    /// Append the rendering of `table` to `out`.
    fn emit(&self, table: &OpcodeTable, out: &mut String) -> fmt::Result;

    /// Render the whole table into a fresh string.
    fn render(&self, table: &OpcodeTable) -> GenResult<String> {
        let mut out = String::new();
        self.emit(table, &mut out)?;
        Ok(out)
    }
}
