//! RISC-V architectural state exchange library.
//!
//! This crate moves processor state between a text test-vector file and a target model
//! for single-instruction equivalence testing. It provides:
//! 1. **Memory:** A sparse byte-addressable store (default word plus overrides) behind a
//!    64-byte write-back window, and the `MemoryBackend` contract models access it through.
//! 2. **Exchange:** The text codec (`load`/`dump`), the CSR policy table, and the binder that
//!    pushes parsed state into a model and reads the result back.
//! 3. **Model:** The `TargetModel`/`MemoryHost` collaborator traits and `RefHart`, a
//!    reference implementation with CSR legalization.
//! 4. **Session:** The file-level pipeline around an externally supplied instruction step.

/// Common types and constants (errors, diagnostics, address width).
pub mod common;
/// Configuration (ISA width, file paths, reference-model RAM).
pub mod config;
/// Architectural register definitions (CSR addresses, GPR file, privilege modes).
pub mod arch;
/// Memory backends and the 64-byte window contract.
pub mod memory;
/// Target model collaborator traits and the reference hart.
pub mod model;
/// Test-vector text codec, CSR table, state binder and session driver.
pub mod xchg;

/// Crate-wide error and result types.
pub use crate::common::error::{Error, Result};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Sparse memory store handed to the target model after rebinding.
pub use crate::memory::SparseMemory;
/// Reference target model.
pub use crate::model::RefHart;
/// File-level pipeline driver.
pub use crate::xchg::Session;
