//! RISC-V architectural state exchange CLI.
//!
//! This binary runs one test vector through the reference hart. It performs:
//! 1. **Configuration:** Loads an optional JSON config and applies command-line overrides.
//! 2. **Exchange:** Reads the input vector, assigns it, steps, and writes the result file.
//! 3. **Reporting:** Logs non-fatal diagnostics; any error exits with status 1.
//!
//! The reference hart does not execute instructions, so the step is a pass-through and
//! the output reflects the assigned state after legalization.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rvsync_core::common::Xlen;
use rvsync_core::model::TargetModel;
use rvsync_core::{Config, RefHart, Session};

#[derive(Parser, Debug)]
#[command(
    name = "rvsync",
    author,
    version,
    about = "Exchange RISC-V architectural state between a test vector and a reference model",
    long_about = "Reads a test vector (default assign.in), assigns it to the reference hart, \
                  and writes the resulting state (default result.out).\n\n\
                  Examples:\n  rvsync\n  rvsync --xlen 64\n  rvsync --config rvsync.json"
)]
struct Cli {
    /// JSON configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ISA width (32 or 64), overriding the configuration.
    #[arg(long, value_parser = parse_xlen)]
    xlen: Option<Xlen>,
}

fn parse_xlen(arg: &str) -> Result<Xlen, String> {
    let bits: u32 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is not a number"))?;
    Xlen::try_from(bits)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&Cli::parse()) {
        eprintln!("Fatal error: {e}");
        process::exit(1);
    }
}

/// Builds the configuration and runs one exchange against a fresh reference hart.
fn run(cli: &Cli) -> rvsync_core::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(xlen) = cli.xlen {
        config.general.xlen = xlen;
    }
    debug!(?config, "configuration resolved");

    let session = Session::new(&config);
    let mut hart = RefHart::new(&config.model, session.xlen())?;

    let summary = session.run(&mut hart, |hart: &mut RefHart, instruction_bits: u64| {
        debug!(
            instruction = format_args!("{instruction_bits:#x}"),
            pc = format_args!("{:#x}", hart.pc()),
            "reference hart holds state across the step"
        );
        Ok(())
    })?;

    info!(
        xlen = %session.xlen(),
        applied = summary.applied.len(),
        memory_entries = summary.memory_entries,
        "wrote {}",
        session.output_path().display()
    );
    Ok(())
}
