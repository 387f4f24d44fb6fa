//! State binder.
//!
//! This module moves state between a `LoadRecord` and a target model. It performs:
//! 1. **Assignment:** Writes the base registers and every modified CSR according to its
//!    table policy, and settles the privilege level.
//! 2. **Memory Rebinding:** Hands the parsed `SparseMemory` to the model as its backend.
//! 3. **Extraction:** Reads registers, the output CSR subset and privilege back out.

use tracing::{debug, info, warn};

use super::csr_table::{CsrPolicy, DUMPED};
use super::record::{LoadRecord, StateSnapshot};
use crate::common::constants::PC_SLOT;
use crate::common::{Diagnostic, Error, NUM_GPRS, Result};
use crate::memory::{MemoryBackend, SparseMemory};
use crate::model::{MemoryHost, TargetModel};

/// Outcome of a successful [`assign`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignReport {
    /// Names of the CSRs that were pushed into the model, in table order.
    pub applied: Vec<&'static str>,
    /// Non-fatal conditions observed while assigning.
    pub diagnostics: Vec<Diagnostic>,
}

/// Pushes a parsed register record into a target model.
///
/// `x0` is always written as zero; `pc` comes from the last base slot. Modified CSRs are
/// applied in table order, so `mideleg` is in place before `sie`/`sip` are written through
/// their delegation masks. Unmodified CSRs are left untouched. When the input does not
/// supply `Priv`, the model is put in user mode.
///
/// # Errors
///
/// Returns [`Error::UnknownRegister`] if the record modifies a CSR that has no binding in
/// the model (`sedeleg`, `sideleg`, and the user-level CSRs). The check runs before anything
/// is written, so a rejected record leaves the model untouched.
pub fn assign<M: TargetModel + ?Sized>(record: &LoadRecord, model: &mut M) -> Result<AssignReport> {
    if let Some((entry, _)) = record
        .modified()
        .find(|(entry, _)| entry.policy == CsrPolicy::Unbound)
    {
        return Err(unbound(entry.name));
    }

    let mut report = AssignReport::default();

    let requested = record.base[0];
    if requested != 0 {
        warn!(requested = format_args!("{requested:#x}"), "forcing x0 to be 0");
        report
            .diagnostics
            .push(Diagnostic::ZeroRegisterForced { requested });
    }
    model.write_gpr(0, 0);
    for (idx, &value) in record.base.iter().enumerate().take(NUM_GPRS).skip(1) {
        model.write_gpr(idx, value);
    }
    model.set_pc(record.base[PC_SLOT]);

    let mut privilege_set = false;
    for (entry, value) in record.modified() {
        match entry.policy {
            CsrPolicy::Set(addr) => model.csr_write(addr, value),
            CsrPolicy::Force(field) => model.force_field(field, value),
            CsrPolicy::Privilege => {
                model.set_privilege(value);
                privilege_set = true;
            }
            CsrPolicy::Report(addr) => {
                let fixed = model.csr_read(addr);
                info!(
                    name = entry.name,
                    fixed = format_args!("{fixed:#x}"),
                    requested = format_args!("{value:#x}"),
                    "fixed register left unchanged"
                );
                report.diagnostics.push(Diagnostic::InformationalMismatch {
                    fixed,
                    requested: value,
                });
                continue;
            }
            CsrPolicy::Unbound => return Err(unbound(entry.name)),
        }
        report.applied.push(entry.name);
    }

    if !privilege_set {
        model.set_privilege(0);
    }

    debug!(
        applied = report.applied.len(),
        diagnostics = report.diagnostics.len(),
        "register state assigned"
    );
    Ok(report)
}

fn unbound(name: &str) -> Error {
    Error::UnknownRegister(format!("{name} has no binding in the target model"))
}

/// Installs `memory` as the model's memory backend, releasing the backend it replaces.
///
/// Ownership of the store moves into the model; afterwards it is reachable only through
/// [`MemoryHost::memory_mut`].
pub fn rebind_memory<H: MemoryHost + ?Sized>(host: &mut H, memory: SparseMemory) {
    let overrides = memory.len();
    let previous = host.replace_memory(Box::new(memory));
    debug!(released = previous.name(), overrides, "memory rebound to sparse store");
}

/// Returns the model's sparse store after [`rebind_memory`].
///
/// # Errors
///
/// Returns [`Error::Protocol`] if the model's backend is not a `SparseMemory`, which means
/// the memory was never rebound.
pub fn rebound_memory<H: MemoryHost + ?Sized>(host: &mut H) -> Result<&SparseMemory> {
    let backend: &dyn MemoryBackend = host.memory_mut();
    backend.as_sparse().ok_or_else(|| {
        Error::Protocol(format!(
            "model memory is `{}`, not the rebound sparse store",
            backend.name()
        ))
    })
}

/// Reads the post-step architectural state from a model.
pub fn extract<M: TargetModel + ?Sized>(model: &M) -> StateSnapshot {
    let gprs = std::array::from_fn(|idx| model.read_gpr(idx));
    let csrs = std::array::from_fn(|i| model.csr_read(DUMPED[i].1));
    StateSnapshot {
        gprs,
        pc: model.pc(),
        csrs,
        privilege: model.privilege().to_u64(),
    }
}
