//! Parsed and extracted state records.
//!
//! `LoadRecord` is what the codec builds from an input file and what `assign` consumes;
//! `StateSnapshot` is what `extract` reads back from the model and what `dump` writes.

use super::csr_table::{CSR_TABLE, CsrEntry, NUM_DUMPED, lookup};
use crate::common::{Diagnostic, NUM_BASE_REGS, NUM_CSR_SLOTS, NUM_GPRS};
use crate::memory::SparseMemory;

/// Value of one named CSR slot and whether the input supplied it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrSlot {
    /// Value read from the input (0 if not supplied).
    pub value: u64,
    /// Whether the input supplied this CSR.
    pub modified: bool,
}

/// Register state parsed from a test vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRecord {
    /// Encoding of the instruction under test.
    pub instruction_bits: u64,
    /// `x0`..`x31` followed by `pc`, assigned by position.
    pub base: [u64; NUM_BASE_REGS],
    /// CSR slots in table order.
    pub csrs: [CsrSlot; NUM_CSR_SLOTS],
    /// Non-fatal conditions observed while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadRecord {
    /// Creates a record with all registers zero and no CSR marked as modified.
    pub fn new(instruction_bits: u64) -> Self {
        Self {
            instruction_bits,
            base: [0; NUM_BASE_REGS],
            csrs: [CsrSlot::default(); NUM_CSR_SLOTS],
            diagnostics: Vec::new(),
        }
    }

    /// Returns the slot for the CSR called `name`, or `None` for an unknown name.
    pub fn csr(&self, name: &str) -> Option<CsrSlot> {
        lookup(name).map(|idx| self.csrs[idx])
    }

    /// Iterates over the CSRs the input supplied, in table order.
    pub fn modified(&self) -> impl Iterator<Item = (&'static CsrEntry, u64)> + '_ {
        CSR_TABLE
            .iter()
            .zip(&self.csrs)
            .filter(|(_, slot)| slot.modified)
            .map(|(entry, slot)| (entry, slot.value))
    }
}

/// A fully parsed test vector: register record plus initial memory image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestVector {
    /// Parsed register state.
    pub record: LoadRecord,
    /// Initial memory image.
    pub memory: SparseMemory,
}

impl TestVector {
    /// Encoding of the instruction under test.
    pub const fn instruction_bits(&self) -> u64 {
        self.record.instruction_bits
    }

    /// Splits the vector into its register record and memory image.
    pub fn into_parts(self) -> (LoadRecord, SparseMemory) {
        (self.record, self.memory)
    }
}

/// Architectural state read back from a model after the step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSnapshot {
    /// `x0`..`x31`.
    pub gprs: [u64; NUM_GPRS],
    /// Program counter.
    pub pc: u64,
    /// Output CSR subset, in output order.
    pub csrs: [u64; NUM_DUMPED],
    /// Privilege level encoding.
    pub privilege: u64,
}
