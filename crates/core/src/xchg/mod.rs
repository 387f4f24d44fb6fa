//! State exchange between test vectors and a target model.
//!
//! This module implements the load-assign-dump pipeline. It provides:
//! 1. **Codec:** Parsing and writing the test-vector text format.
//! 2. **CSR Table:** The accepted CSR names and how each is applied.
//! 3. **Binder:** Pushing parsed state into a model and reading it back.
//! 4. **Session:** The file-level driver around a caller-supplied instruction step.

/// Assignment, memory rebinding and extraction.
pub mod binder;

/// Test-vector text codec.
pub mod codec;

/// CSR name table and assignment policies.
pub mod csr_table;

/// Parsed and extracted state records.
pub mod record;

/// File-level driver.
pub mod session;

pub use binder::{AssignReport, assign, extract, rebind_memory, rebound_memory};
pub use record::{CsrSlot, LoadRecord, StateSnapshot, TestVector};
pub use session::{RunSummary, Session};
