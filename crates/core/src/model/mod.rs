//! Target model collaborator interface.
//!
//! The exchange never executes instructions; it synchronizes state with a model that does.
//! This module defines what such a model must expose:
//! 1. **Registers:** Positional GPR access and the program counter.
//! 2. **CSRs:** A legalizing write path, raw field forcing, and the privilege setter.
//! 3. **Memory:** A replaceable `MemoryBackend` that all of the model's accesses go through.
//!
//! `RefHart` is a reference implementation used by the CLI and the tests.

/// Legalizing CSR access for the reference hart.
pub mod csr;

/// Reference hart.
pub mod hart;

pub use hart::RefHart;

use crate::arch::csr as csr_addr;
use crate::arch::mode::PrivilegeMode;
use crate::memory::MemoryBackend;

/// Internal state fields that can be written directly, bypassing CSR write side effects.
///
/// These are the registers whose normal write path would mask or reject bits a test vector
/// needs to set exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawField {
    /// Machine interrupt delegation (`mideleg`).
    Mideleg,
    /// Machine interrupt pending (`mip`).
    Mip,
    /// Machine interrupt enable (`mie`).
    Mie,
}

impl RawField {
    /// CSR address through which the field can be read back.
    pub const fn csr_addr(self) -> u32 {
        match self {
            Self::Mideleg => csr_addr::MIDELEG,
            Self::Mip => csr_addr::MIP,
            Self::Mie => csr_addr::MIE,
        }
    }
}

/// Register, CSR and privilege surface of a target model.
///
/// Instruction stepping is deliberately absent: the exchange hands the model to a caller-supplied
/// step between `assign` and `extract`.
pub trait TargetModel {
    /// Reads general-purpose register `idx` (0-31).
    fn read_gpr(&self, idx: usize) -> u64;

    /// Writes general-purpose register `idx` (0-31).
    fn write_gpr(&mut self, idx: usize, val: u64);

    /// Returns the program counter.
    fn pc(&self) -> u64;

    /// Sets the program counter.
    fn set_pc(&mut self, pc: u64);

    /// Reads a CSR by address.
    fn csr_read(&self, addr: u32) -> u64;

    /// Writes a CSR through the normal write path, which may legalize the value.
    fn csr_write(&mut self, addr: u32, val: u64);

    /// Stores `val` into an internal state field verbatim.
    fn force_field(&mut self, field: RawField, val: u64);

    /// Returns the current privilege level.
    fn privilege(&self) -> PrivilegeMode;

    /// Sets the privilege level from a raw encoding; the model legalizes it.
    fn set_privilege(&mut self, prv: u64);
}

/// Ownership of a target model's memory backend.
pub trait MemoryHost {
    /// Installs `backend` as the model's memory and returns the one it replaces.
    fn replace_memory(&mut self, backend: Box<dyn MemoryBackend>) -> Box<dyn MemoryBackend>;

    /// Returns the model's current memory backend.
    fn memory_mut(&mut self) -> &mut dyn MemoryBackend;
}
