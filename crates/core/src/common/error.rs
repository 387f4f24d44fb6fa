//! Error and diagnostic definitions.
//!
//! This module defines how a state-exchange run reports problems. It provides:
//! 1. **Fatal Errors:** The `Error` enum; any of these invalidates the whole run.
//! 2. **Diagnostics:** Non-fatal conditions that are logged and carried alongside results.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading, assigning or dumping state.
///
/// There is no partial-result mode: a caller that receives one of these must abandon
/// the run.
#[derive(Debug, Error)]
pub enum Error {
    /// A test-vector file could not be opened, read or written.
    #[error("{} is not accessible: {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a state stream failed.
    #[error("state stream failed: {0}")]
    Stream(#[from] std::io::Error),

    /// The input is missing a sentinel or a section boundary.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The input ended early or contains a token that is not a number.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A CSR name is not in the register table, or has no binding in the target model.
    #[error("unrecognized register: {0}")]
    UnknownRegister(String),

    /// The flat RAM of a target model could not be allocated.
    #[error("failed to allocate {size} bytes of RAM: {source}")]
    Allocation {
        /// Requested size in bytes.
        size: usize,
        /// Underlying OS failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal conditions observed during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A base-register label did not match its position; the value was assigned by position.
    OrderWarning {
        /// Label expected at this position.
        expected: &'static str,
        /// Label found in the input.
        found: String,
    },

    /// The input supplied a nonzero value for `x0`; zero was written instead.
    ZeroRegisterForced {
        /// Value requested by the input.
        requested: u64,
    },

    /// `misa` was present in the input but is never written to the model.
    InformationalMismatch {
        /// Value the model reports.
        fixed: u64,
        /// Value requested by the input.
        requested: u64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderWarning { expected, found } => {
                write!(f, "change unordered assignment: {found} to {expected}")
            }
            Self::ZeroRegisterForced { requested } => {
                write!(f, "forcing x0 to be 0 (input {requested:#x})")
            }
            Self::InformationalMismatch { fixed, requested } => {
                write!(f, "fixed ISA: {fixed:x} unchanged: {requested:x}")
            }
        }
    }
}
