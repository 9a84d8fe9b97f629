//! Opcode table generator binary.
//!
//! With no arguments, reads `wabt_opcode.def` from the working directory and
//! writes `src/parser/opcode.rs`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use opgen::core::{GenConfig, DEFAULT_INPUT, DEFAULT_MARKER, DEFAULT_OUTPUT};
use opgen::generate;

#[derive(Parser, Debug)]
#[command(name = "opgen", version, about = "Compile an opcode definition table into Rust source")]
struct Args {
    /// Definition table to read.
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Rust module to write; replaced on success.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Token that opens each record line.
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Compile and report without writing the output.
    #[arg(long)]
    check: bool,
}

impl From<Args> for GenConfig {
    fn from(args: Args) -> Self {
        GenConfig::default()
            .with_input(args.input)
            .with_output(args.output)
            .with_marker(args.marker)
            .check_only(args.check)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GenConfig::from(Args::parse());
    match generate::run(&config) {
        Ok(summary) => {
            log::debug!("{summary:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
