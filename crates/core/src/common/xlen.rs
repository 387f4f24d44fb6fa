//! Active ISA width.
//!
//! The width decides two things: where memory addresses wrap, and which bits survive
//! when registers and memory are written to the output file.

use std::fmt;

use serde::Deserialize;

/// Register and address width of the architecture under test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum Xlen {
    /// RV32: addresses wrap at 2^32, dumped values are truncated to 32 bits.
    #[default]
    Rv32,
    /// RV64: full 64-bit addresses and values.
    Rv64,
}

impl Xlen {
    /// Returns the bit mask covering one register of this width.
    #[inline]
    pub const fn mask(self) -> u64 {
        match self {
            Self::Rv32 => 0xFFFF_FFFF,
            Self::Rv64 => u64::MAX,
        }
    }

    /// Wraps an address (or truncates a value) to this width.
    #[inline]
    pub const fn wrap(self, value: u64) -> u64 {
        value & self.mask()
    }

    /// Returns the width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }
}

impl TryFrom<u32> for Xlen {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            32 => Ok(Self::Rv32),
            64 => Ok(Self::Rv64),
            other => Err(format!("unsupported xlen {other} (expected 32 or 64)")),
        }
    }
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RV{}", self.bits())
    }
}
