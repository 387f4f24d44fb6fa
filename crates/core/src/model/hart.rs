//! Reference hart.
//!
//! `RefHart` is a minimal architectural-state model: registers, CSRs, privilege and a
//! swappable memory backend. It does not decode or execute instructions; steps are supplied
//! by the caller of the exchange. It exists so the pipeline can run end to end, and so the
//! binder can be tested against real legalization behavior.

use tracing::debug;

use super::{MemoryHost, RawField, TargetModel};
use crate::arch::csr::{self, Csrs};
use crate::arch::gpr::Gpr;
use crate::arch::mode::PrivilegeMode;
use crate::common::{Error, NUM_GPRS, Result, Xlen};
use crate::config::ModelConfig;
use crate::memory::{FlatMemory, MemoryBackend};

/// Width of a sized memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    /// One byte.
    Byte,
    /// Two bytes.
    Half,
    /// Four bytes.
    Word,
    /// Eight bytes.
    Double,
}

impl MemWidth {
    /// Access size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

/// Reference target model.
pub struct RefHart {
    pub(crate) gpr: Gpr,
    pub(crate) pc: u64,
    pub(crate) csrs: Csrs,
    pub(crate) privilege: PrivilegeMode,
    pub(crate) xlen: Xlen,
    memory: Box<dyn MemoryBackend>,
}

impl RefHart {
    /// Creates a hart in its reset state, owning a flat RAM region.
    ///
    /// The hart starts in machine mode with a fixed `misa` for its width; on RV64 the
    /// `mstatus` UXL/SXL fields report 64-bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the RAM region cannot be allocated.
    pub fn new(config: &ModelConfig, xlen: Xlen) -> Result<Self> {
        let memory = FlatMemory::new(config.ram_base, config.ram_size).map_err(|source| {
            Error::Allocation {
                size: config.ram_size,
                source,
            }
        })?;

        let (misa, mstatus) = match xlen {
            Xlen::Rv32 => (csr::MISA_MXL_32 | csr::MISA_EXTENSIONS, 0),
            Xlen::Rv64 => (csr::MISA_MXL_64 | csr::MISA_EXTENSIONS, csr::MSTATUS_XL_64),
        };
        let csrs = Csrs {
            misa,
            mstatus,
            sstatus: mstatus & csr::SSTATUS_MASK,
            ..Csrs::default()
        };

        Ok(Self {
            gpr: Gpr::new(),
            pc: config.ram_base,
            csrs,
            privilege: PrivilegeMode::Machine,
            xlen,
            memory: Box::new(memory),
        })
    }

    /// The hart's ISA width.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Raw CSR storage.
    pub const fn csrs(&self) -> &Csrs {
        &self.csrs
    }

    /// Name of the memory backend currently installed.
    pub fn memory_name(&self) -> &str {
        self.memory.name()
    }

    /// Loads a zero-extended little-endian value through the memory backend.
    ///
    /// The address wraps at the hart width. Each access opens exactly one window.
    pub fn load(&mut self, addr: u64, width: MemWidth) -> u64 {
        let window = self.memory.window(self.xlen.wrap(addr));
        match width {
            MemWidth::Byte => u64::from(window.read_u8(0)),
            MemWidth::Half => u64::from(window.read_u16(0)),
            MemWidth::Word => u64::from(window.read_u32(0)),
            MemWidth::Double => window.read_u64(0),
        }
    }

    /// Stores the low `width` bytes of `val` little-endian through the memory backend.
    pub fn store(&mut self, addr: u64, width: MemWidth, val: u64) {
        let mut window = self.memory.window(self.xlen.wrap(addr));
        match width {
            MemWidth::Byte => window.write_u8(0, val as u8),
            MemWidth::Half => window.write_u16(0, val as u16),
            MemWidth::Word => window.write_u32(0, val as u32),
            MemWidth::Double => window.write_u64(0, val),
        }
    }

    /// Returns all 32 GPR values.
    pub const fn gprs(&self) -> [u64; NUM_GPRS] {
        self.gpr.snapshot()
    }
}

impl TargetModel for RefHart {
    fn read_gpr(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    fn write_gpr(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    fn pc(&self) -> u64 {
        self.pc
    }

    fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    fn csr_read(&self, addr: u32) -> u64 {
        Self::csr_read(self, addr)
    }

    fn csr_write(&mut self, addr: u32, val: u64) {
        Self::csr_write(self, addr, val);
    }

    fn force_field(&mut self, field: RawField, val: u64) {
        Self::force_field(self, field, val);
    }

    fn privilege(&self) -> PrivilegeMode {
        self.privilege
    }

    fn set_privilege(&mut self, prv: u64) {
        self.privilege = PrivilegeMode::legalize(prv);
    }
}

impl MemoryHost for RefHart {
    fn replace_memory(&mut self, backend: Box<dyn MemoryBackend>) -> Box<dyn MemoryBackend> {
        debug!(from = self.memory.name(), to = backend.name(), "memory backend replaced");
        std::mem::replace(&mut self.memory, backend)
    }

    fn memory_mut(&mut self) -> &mut dyn MemoryBackend {
        self.memory.as_mut()
    }
}

impl std::fmt::Debug for RefHart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefHart")
            .field("pc", &format_args!("{:#x}", self.pc))
            .field("privilege", &self.privilege)
            .field("xlen", &self.xlen)
            .field("memory", &self.memory.name())
            .finish_non_exhaustive()
    }
}
