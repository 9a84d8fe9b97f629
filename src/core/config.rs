//! Generation run configuration.

use std::path::PathBuf;

/// Definition file read when no input is given.
pub const DEFAULT_INPUT: &str = "wabt_opcode.def";

/// Generated module written when no output is given.
pub const DEFAULT_OUTPUT: &str = "src/parser/opcode.rs";

/// Call-like token that opens every record line.
pub const DEFAULT_MARKER: &str = "WABT_OPCODE";

/// Paths and options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub marker: String,
    /// Compile the table but do not write the output file.
    pub check_only: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            marker: DEFAULT_MARKER.to_string(),
            check_only: false,
        }
    }
}

impl GenConfig {
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }
}
