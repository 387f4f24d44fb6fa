//! Common utilities and types shared by the memory, model and exchange layers.
//!
//! It includes:
//! 1. **Constants:** Register counts, window size and protocol sentinels.
//! 2. **Error Handling:** The fatal `Error` taxonomy and non-fatal `Diagnostic` records.
//! 3. **Tokens:** The whitespace token reader shared by the register and memory parsers.
//! 4. **Address Width:** The `Xlen` selector that drives address wrapping and output masking.

/// Register counts, window geometry and text-protocol sentinels.
pub mod constants;

/// Error and diagnostic types.
pub mod error;

/// Whitespace token reader for the test-vector format.
pub mod tokens;

/// Active ISA width.
pub mod xlen;

pub use constants::{NUM_BASE_REGS, NUM_CSR_SLOTS, NUM_GPRS, WINDOW_SIZE};
pub use error::{Diagnostic, Error, Result};
pub use tokens::Tokens;
pub use xlen::Xlen;
