// This module defines error types for the opcode table generator using the thiserror crate.
// GenError covers every way a generation run can fail: malformed definition rows, rows that
// reference a value type the target runtime cannot represent, two mnemonics collapsing onto
// the same canonical identifier, two records claiming the same opcode byte, unreadable or
// unwritable files, and emitter failures. Each variant carries the offending record names,
// line numbers or paths so the binary can print a useful diagnostic before exiting non-zero.
// GenResult<T> is the convenience alias used throughout the crate.

//! Error types for the opcode table generator.
//!
//! Every error is fatal to a generation run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for a generation run.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        line: usize,
        reason: String,
    },

    #[error("record {text:?} on line {line} uses the unsupported V128 operand type")]
    UnsupportedOperand {
        line: usize,
        text: String,
    },

    #[error("mnemonics {first:?} and {second:?} both map to identifier {ident}")]
    NameCollision {
        ident: String,
        first: String,
        second: String,
    },

    #[error("opcode {code:#04x} is claimed by both {first:?} and {second:?}")]
    DuplicateOpcode {
        code: u8,
        first: String,
        second: String,
    },

    #[error("{}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render opcode table: {0}")]
    Emit(#[from] std::fmt::Error),
}

impl GenError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        GenError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn resource(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Resource {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for generation operations.
pub type GenResult<T> = Result<T, GenError>;
