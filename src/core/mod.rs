// This module collects the infrastructure shared by every stage of the generator: the
// error taxonomy (GenError and the GenResult alias) and the run configuration (GenConfig
// with its fixed default file names). The reader, compiler, emitter and binary all depend
// on these two pieces and on nothing else in here.

//! Shared infrastructure: errors and configuration.

pub mod config;
pub mod error;

pub use config::{GenConfig, DEFAULT_INPUT, DEFAULT_MARKER, DEFAULT_OUTPUT};
pub use error::{GenError, GenResult};
