//! Shared constants.

/// Number of general-purpose registers (`x0`-`x31`).
pub const NUM_GPRS: usize = 32;

/// Number of positional base-register slots: the GPRs followed by `pc`.
pub const NUM_BASE_REGS: usize = NUM_GPRS + 1;

/// Index of the `pc` slot within the base-register array.
pub const PC_SLOT: usize = NUM_GPRS;

/// Number of named CSR slots accepted by the input format (including `Priv`).
pub const NUM_CSR_SLOTS: usize = 31;

/// Size of the materialized memory window in bytes.
pub const WINDOW_SIZE: usize = 64;

/// Sentinel opening the CSR section.
pub const CSR_BEGIN: &str = ".CSR_BEGIN";

/// Sentinel closing the CSR section.
pub const CSR_END: &str = ".CSR_END";

/// Positional labels of the base registers, in file order.
pub const BASE_REG_NAMES: [&str; NUM_BASE_REGS] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11", "x12", "x13", "x14",
    "x15", "x16", "x17", "x18", "x19", "x20", "x21", "x22", "x23", "x24", "x25", "x26", "x27",
    "x28", "x29", "x30", "x31", "pc",
];
