//! RISC-V Privilege Modes.
//!
//! This module defines the privilege levels the reference hart can be placed in.
//! It implements the following:
//! 1. **Mode Classification:** User (U), Supervisor (S), and Machine (M) modes.
//! 2. **Legalization:** Folding raw `Priv` values from a test vector into a legal mode.
//! 3. **Observability:** Human-readable naming and display formatting.

/// RISC-V privilege mode levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeMode {
    /// User mode (U-mode). The level a hart is left in when `Priv` is not supplied.
    #[default]
    User = 0,

    /// Supervisor mode (S-mode).
    Supervisor = 1,

    /// Machine mode (M-mode).
    Machine = 3,
}

impl PrivilegeMode {
    /// Converts a raw privilege value into a legal mode.
    ///
    /// The reserved encoding 2 (hypervisor) folds to `User`; values above 3 saturate to
    /// `Machine`.
    ///
    /// # Arguments
    ///
    /// * `val` - The raw privilege value, as written in a test vector.
    pub const fn legalize(val: u64) -> Self {
        match val {
            0 | 2 => Self::User,
            1 => Self::Supervisor,
            _ => Self::Machine,
        }
    }

    /// Converts a privilege mode to its numeric encoding (0, 1, or 3).
    pub const fn to_u64(self) -> u64 {
        self as u64
    }

    /// Returns the human-readable name of the privilege mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
