//! RISC-V architecture-specific components.
//!
//! It includes the following modules:
//! 1. **CSRs:** Control and Status Register addresses, field masks and storage.
//! 2. **GPRs:** General-Purpose Register file implementation.
//! 3. **Modes:** Privilege mode definitions and legalization.

/// Control and Status Register (CSR) definitions and storage.
pub mod csr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Privilege mode definitions.
pub mod mode;
