//! opgen - opcode definition table compiler.
//!
//! Turns a textual instruction definition table (`WABT_OPCODE(...)` lines)
//! into a strongly-typed opcode table with O(1) decode from opcode byte to
//! instruction metadata, and renders that table as a Rust module.
//!
//! # Primary Usage
//!
//! ```
//! use opgen::definition::read_definitions;
//! use opgen::table::compile;
//!
//! let defs = r#"WABT_OPCODE(I32, I32, I32, ___, 0, 0, 0x6a, I32Add, "i32.add")"#;
//! let records = read_definitions(defs.lines(), "WABT_OPCODE")?;
//! let table = compile(records)?;
//! assert_eq!(table.decode(0x6a).map(|op| op.text.as_str()), Some("i32.add"));
//! assert!(table.decode(0x6b).is_none());
//! # Ok::<(), opgen::GenError>(())
//! ```
//!
//! # Architecture
//!
//! - [`definition`] - record types and the line reader with its filters
//! - [`table`] - identifier derivation, duplicate checks and the decode table
//! - [`emit`] - rendering a compiled table as Rust source
//! - [`generate`] - file-to-file runs
//! - [`core`] - errors and configuration

pub mod core;
pub mod definition;
pub mod emit;
pub mod generate;
pub mod table;

pub use crate::core::{GenConfig, GenError, GenResult};
pub use definition::{InstructionRecord, ValueType};
pub use table::{OpMeta, OpcodeTable};
