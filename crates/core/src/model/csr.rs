//! CSR Access Logic.
//!
//! This module implements the CSR access paths of the reference hart. It performs:
//! 1. **Read Operations:** Returns CSR values, resolving the `sie`/`sip` delegation views.
//! 2. **Write Operations:** Applies WARL legalization on the normal write path.
//! 3. **Forced Writes:** Stores raw values into internal fields with no side effects.

use super::RawField;
use super::hart::RefHart;
use crate::arch::csr;
use crate::common::Xlen;

impl RefHart {
    /// Reads a value from a Control and Status Register (CSR).
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit address of the CSR to read.
    ///
    /// # Returns
    ///
    /// The current value of the CSR, or 0 if it is not modeled.
    pub const fn csr_read(&self, addr: u32) -> u64 {
        self.csrs.read(addr)
    }

    /// Writes a value to a CSR through the architectural write path.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit address of the CSR to write.
    /// * `val` - The value requested; WARL fields are legalized before storing.
    pub fn csr_write(&mut self, addr: u32, val: u64) {
        match addr {
            csr::MSTATUS => {
                // WARL: UXL and SXL are fixed by the hart width.
                let fixed = csr::MSTATUS_UXL | csr::MSTATUS_SXL;
                self.csrs.mstatus = (val & !fixed) | (self.csrs.mstatus & fixed);
                self.csrs.sstatus = self.csrs.mstatus & csr::SSTATUS_MASK;
            }
            csr::MISA => {
                // MISA is WARL: writes are silently ignored (extensions are hardwired).
            }
            csr::MEDELEG => self.csrs.medeleg = val,
            csr::MIDELEG => {
                let mask = csr::MIP_SSIP | csr::MIP_STIP | csr::MIP_SEIP;
                self.csrs.mideleg = val & mask;
            }
            csr::MIE => {
                let mask = csr::MIP_SSIP
                    | csr::MIP_MSIP
                    | csr::MIP_STIP
                    | csr::MIP_MTIP
                    | csr::MIP_SEIP
                    | csr::MIP_MEIP;
                self.csrs.mie = val & mask;
            }
            csr::MTVEC => self.csrs.mtvec = val,
            csr::MSCRATCH => self.csrs.mscratch = val,
            csr::MEPC => self.csrs.mepc = val & !1,
            csr::MCAUSE => self.csrs.mcause = val,
            csr::MTVAL => self.csrs.mtval = val,
            csr::MIP => {
                let mask = csr::MIP_SSIP | csr::MIP_STIP | csr::MIP_SEIP;
                self.csrs.mip = (self.csrs.mip & !mask) | (val & mask);
            }
            csr::SSTATUS => {
                // UXL is read-only in sstatus (always reflects mstatus UXL)
                let writable_mask = csr::SSTATUS_MASK & !csr::MSTATUS_UXL;
                self.csrs.mstatus = (self.csrs.mstatus & !writable_mask) | (val & writable_mask);
                self.csrs.sstatus = self.csrs.mstatus & csr::SSTATUS_MASK;
            }
            csr::SIE => {
                let mask = self.csrs.mideleg;
                self.csrs.mie = (self.csrs.mie & !mask) | (val & mask);
            }
            csr::STVEC => self.csrs.stvec = val,
            csr::SSCRATCH => self.csrs.sscratch = val,
            csr::SEPC => self.csrs.sepc = val & !1,
            csr::SCAUSE => self.csrs.scause = val,
            csr::STVAL => self.csrs.stval = val,
            csr::SIP => {
                let mask = self.csrs.mideleg & csr::MIP_SSIP;
                self.csrs.mip = (self.csrs.mip & !mask) | (val & mask);
            }
            csr::SATP => {
                if self.xlen == Xlen::Rv32 {
                    self.csrs.satp = val;
                    return;
                }
                let mode = (val >> csr::SATP_MODE_SHIFT) & csr::SATP_MODE_MASK;
                // WARL: unsupported modes leave satp unchanged.
                if mode == csr::SATP_MODE_SV39 || mode == csr::SATP_MODE_BARE {
                    self.csrs.satp = val;
                }
            }
            _ => {}
        }
    }

    /// Stores a raw value into an internal field, skipping all write-path masking.
    pub const fn force_field(&mut self, field: RawField, val: u64) {
        match field {
            RawField::Mideleg => self.csrs.mideleg = val,
            RawField::Mip => self.csrs.mip = val,
            RawField::Mie => self.csrs.mie = val,
        }
    }
}
