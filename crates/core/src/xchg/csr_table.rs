//! CSR name table.
//!
//! Every CSR name the input format accepts, in file-table order, together with the way
//! `assign` pushes a modified value into the target model. The table also fixes the subset
//! (and order) of CSRs written to the output file.

use crate::arch::csr;
use crate::common::NUM_CSR_SLOTS;
use crate::model::RawField;

/// How a modified CSR value reaches the target model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsrPolicy {
    /// Written through the model's normal (legalizing) CSR write path at this address.
    Set(u32),
    /// Stored verbatim into an internal field.
    Force(RawField),
    /// Routed to the privilege setter.
    Privilege,
    /// Never written; the model's fixed value at this address is reported instead.
    Report(u32),
    /// Accepted by the parser but has no counterpart in the model.
    Unbound,
}

/// One row of the CSR table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsrEntry {
    /// Name as it appears in the test-vector file.
    pub name: &'static str,
    /// Assignment policy.
    pub policy: CsrPolicy,
}

const fn entry(name: &'static str, policy: CsrPolicy) -> CsrEntry {
    CsrEntry { name, policy }
}

/// The CSR names accepted in the `.CSR_BEGIN`/`.CSR_END` section, in table order.
///
/// Legacy names are kept: `mbadaddr`/`sbadaddr` are `mtval`/`stval` and `sptbr` is `satp`.
pub static CSR_TABLE: [CsrEntry; NUM_CSR_SLOTS] = [
    entry("misa", CsrPolicy::Report(csr::MISA)),
    entry("mstatus", CsrPolicy::Set(csr::MSTATUS)),
    entry("mtvec", CsrPolicy::Set(csr::MTVEC)),
    entry("medeleg", CsrPolicy::Set(csr::MEDELEG)),
    entry("mideleg", CsrPolicy::Force(RawField::Mideleg)),
    entry("mip", CsrPolicy::Force(RawField::Mip)),
    entry("mie", CsrPolicy::Force(RawField::Mie)),
    entry("mscratch", CsrPolicy::Set(csr::MSCRATCH)),
    entry("mepc", CsrPolicy::Set(csr::MEPC)),
    entry("mcause", CsrPolicy::Set(csr::MCAUSE)),
    entry("mbadaddr", CsrPolicy::Set(csr::MTVAL)),
    entry("sstatus", CsrPolicy::Set(csr::SSTATUS)),
    entry("sedeleg", CsrPolicy::Unbound),
    entry("sideleg", CsrPolicy::Unbound),
    entry("sie", CsrPolicy::Set(csr::SIE)),
    entry("sip", CsrPolicy::Set(csr::SIP)),
    entry("sptbr", CsrPolicy::Set(csr::SATP)),
    entry("stvec", CsrPolicy::Set(csr::STVEC)),
    entry("sscratch", CsrPolicy::Set(csr::SSCRATCH)),
    entry("sepc", CsrPolicy::Set(csr::SEPC)),
    entry("scause", CsrPolicy::Set(csr::SCAUSE)),
    entry("sbadaddr", CsrPolicy::Set(csr::STVAL)),
    entry("ustatus", CsrPolicy::Unbound),
    entry("uie", CsrPolicy::Unbound),
    entry("utvec", CsrPolicy::Unbound),
    entry("uscratch", CsrPolicy::Unbound),
    entry("uepc", CsrPolicy::Unbound),
    entry("ucause", CsrPolicy::Unbound),
    entry("ubadaddr", CsrPolicy::Unbound),
    entry("uip", CsrPolicy::Unbound),
    entry("Priv", CsrPolicy::Privilege),
];

/// Number of CSRs written to the output file (excluding `Priv`).
pub const NUM_DUMPED: usize = 20;

/// CSRs written to the output file, in output order, with the address each is read from.
pub static DUMPED: [(&str, u32); NUM_DUMPED] = [
    ("misa", csr::MISA),
    ("mstatus", csr::MSTATUS),
    ("mtvec", csr::MTVEC),
    ("mideleg", csr::MIDELEG),
    ("medeleg", csr::MEDELEG),
    ("mip", csr::MIP),
    ("mie", csr::MIE),
    ("mscratch", csr::MSCRATCH),
    ("mepc", csr::MEPC),
    ("mcause", csr::MCAUSE),
    ("mbadaddr", csr::MTVAL),
    ("sstatus", csr::SSTATUS),
    ("sie", csr::SIE),
    ("sip", csr::SIP),
    ("sptbr", csr::SATP),
    ("stvec", csr::STVEC),
    ("sscratch", csr::SSCRATCH),
    ("sepc", csr::SEPC),
    ("scause", csr::SCAUSE),
    ("sbadaddr", csr::STVAL),
];

/// Label of the privilege line in both file formats.
pub const PRIV_NAME: &str = "Priv";

/// Returns the table index of `name`, or `None` if the name is not a known CSR.
///
/// Names are case-sensitive.
pub fn lookup(name: &str) -> Option<usize> {
    CSR_TABLE.iter().position(|entry| entry.name == name)
}
