// This module wires the generator stages into a single run: read the definition file,
// parse and filter its record lines, compile the opcode table, render it with the Rust
// source emitter, and only then write the result. Rendering happens entirely in memory and
// the file is replaced through a temporary sibling plus rename, so a failed run never leaves
// a truncated or half-written opcode module behind. The summary returned to the caller
// reports how many rows were seen, kept and filtered out.

//! End-to-end generation runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{GenConfig, GenError, GenResult};
use crate::definition::{read_rows, DropReason, ParsedRow};
use crate::emit::{RustSourceEmitter, TableEmitter};
use crate::table::{compile, OpcodeTable};

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenSummary {
    /// Marker lines found in the input.
    pub rows: usize,
    pub retained: usize,
    pub dropped_vector: usize,
    pub dropped_prefixed: usize,
}

/// Compiled table together with its run statistics.
#[derive(Debug, Clone)]
pub struct Generated {
    pub table: OpcodeTable,
    pub summary: GenSummary,
}

/// Parse and compile definition text.
pub fn compile_definitions(text: &str, marker: &str) -> GenResult<Generated> {
    let rows = read_rows(text.lines(), marker)?;
    let mut summary = GenSummary {
        rows: rows.len(),
        ..GenSummary::default()
    };

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            ParsedRow::Retained(record) => records.push(record),
            ParsedRow::Dropped { reason: DropReason::VectorResult, .. } => {
                summary.dropped_vector += 1
            }
            ParsedRow::Dropped { reason: DropReason::Prefixed(_), .. } => {
                summary.dropped_prefixed += 1
            }
        }
    }
    summary.retained = records.len();

    let table = compile(records)?;
    Ok(Generated { table, summary })
}

/// Parse, compile and render definition text to Rust source.
pub fn generate_source(text: &str, marker: &str) -> GenResult<String> {
    let generated = compile_definitions(text, marker)?;
    RustSourceEmitter::new().render(&generated.table)
}

/// Run the generator as configured.
pub fn run(config: &GenConfig) -> GenResult<GenSummary> {
    log::info!("reading opcode definitions from {}", config.input.display());
    let text = fs::read_to_string(&config.input)
        .map_err(|e| GenError::resource(&config.input, e))?;

    let Generated { table, summary } = compile_definitions(&text, &config.marker)?;
    log::info!(
        "{} opcodes retained, {} vector and {} prefixed rows dropped",
        summary.retained,
        summary.dropped_vector,
        summary.dropped_prefixed
    );

    let source = RustSourceEmitter::new().render(&table)?;
    if config.check_only {
        log::info!("check only, not writing {}", config.output.display());
        return Ok(summary);
    }

    write_atomically(&config.output, &source)?;
    log::info!("wrote {}", config.output.display());
    Ok(summary)
}

/// Replace `path` with `contents` without exposing a partially written file.
fn write_atomically(path: &Path, contents: &str) -> GenResult<()> {
    let tmp = temp_sibling(path);
    fs::write(&tmp, contents).map_err(|e| GenError::resource(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(GenError::resource(path, e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
