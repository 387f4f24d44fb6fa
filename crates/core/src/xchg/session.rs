//! File-level exchange driver.
//!
//! A `Session` runs the whole pipeline for one test vector: load, assign, rebind memory,
//! step, extract, dump. The step is supplied by the caller, since executing the instruction
//! is the target model's business.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{binder, codec};
use crate::common::{Diagnostic, Error, Result, Xlen};
use crate::config::{Config, GeneralConfig};
use crate::model::{MemoryHost, TargetModel};

/// Summary of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Encoding of the instruction the step was asked to execute.
    pub instruction_bits: u64,
    /// Names of the CSRs pushed into the model.
    pub applied: Vec<&'static str>,
    /// Every non-fatal condition from loading and assigning, in the order observed.
    pub diagnostics: Vec<Diagnostic>,
    /// Override entries in the memory image after the step.
    pub memory_entries: usize,
}

/// Drives one load-assign-step-extract-dump cycle.
#[derive(Clone, Debug)]
pub struct Session {
    xlen: Xlen,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl Session {
    /// Creates a session from the exchange section of a configuration.
    pub fn new(config: &Config) -> Self {
        Self::from_general(&config.general)
    }

    /// Creates a session from exchange settings.
    pub fn from_general(general: &GeneralConfig) -> Self {
        Self {
            xlen: general.xlen,
            input_path: general.input_path.clone(),
            output_path: general.output_path.clone(),
        }
    }

    /// Active ISA width.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Path of the input test vector.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Path of the output state file.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Runs the pipeline against the configured input and output files.
    ///
    /// The output file is written only if every stage succeeds.
    ///
    /// # Arguments
    ///
    /// * `model` - Target model; its memory is replaced by the test vector's image.
    /// * `step` - Executes one instruction, given the model and the instruction bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the input cannot be read or the output cannot be written,
    /// and otherwise any error of [`Session::exchange`].
    pub fn run<M, F>(&self, model: &mut M, step: F) -> Result<RunSummary>
    where
        M: TargetModel + MemoryHost + ?Sized,
        F: FnOnce(&mut M, u64) -> Result<()>,
    {
        let input = fs::read_to_string(&self.input_path).map_err(|source| Error::Io {
            path: self.input_path.clone(),
            source,
        })?;

        let mut output = Vec::new();
        let summary = self.exchange(&input, model, step, &mut output)?;

        fs::write(&self.output_path, &output).map_err(|source| Error::Io {
            path: self.output_path.clone(),
            source,
        })?;
        info!(
            input = %self.input_path.display(),
            output = %self.output_path.display(),
            diagnostics = summary.diagnostics.len(),
            "state exchange complete"
        );
        Ok(summary)
    }

    /// Runs the pipeline over an in-memory input, writing the result to `out`.
    ///
    /// # Errors
    ///
    /// Returns any load, assign or dump error, and any error returned by `step`.
    pub fn exchange<M, F, W>(
        &self,
        input: &str,
        model: &mut M,
        step: F,
        out: &mut W,
    ) -> Result<RunSummary>
    where
        M: TargetModel + MemoryHost + ?Sized,
        F: FnOnce(&mut M, u64) -> Result<()>,
        W: std::io::Write + ?Sized,
    {
        let vector = codec::parse(input, self.xlen)?;
        let instruction_bits = vector.instruction_bits();
        let (record, memory) = vector.into_parts();

        let report = binder::assign(&record, model)?;
        binder::rebind_memory(model, memory);

        debug!(instruction = format_args!("{instruction_bits:#x}"), "stepping target model");
        step(&mut *model, instruction_bits)?;

        let snapshot = binder::extract(&*model);
        let memory = binder::rebound_memory(model)?;
        codec::dump(&snapshot, memory, self.xlen, out)?;

        let mut diagnostics = record.diagnostics;
        diagnostics.extend(report.diagnostics);
        Ok(RunSummary {
            instruction_bits,
            applied: report.applied,
            diagnostics,
            memory_entries: memory.len(),
        })
    }
}
