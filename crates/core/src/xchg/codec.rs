//! Test-vector text codec.
//!
//! This module converts between the text format and in-memory state. It provides:
//! 1. **Load:** Parses the instruction word, the positional base registers, the named CSR
//!    section and the memory image into a `TestVector`.
//! 2. **Dump:** Writes a `StateSnapshot` and a `SparseMemory` back in the same format,
//!    without the instruction line.
//!
//! Numbers are hexadecimal except the memory override count, which is decimal. Output hex
//! is lowercase with no prefix. In 32-bit mode, base registers and memory are truncated to
//! 32 bits on output; CSR values never are.

use std::io::{Read, Write};

use tracing::{debug, warn};

use super::csr_table::{DUMPED, PRIV_NAME, lookup};
use super::record::{CsrSlot, LoadRecord, StateSnapshot, TestVector};
use crate::common::constants::{BASE_REG_NAMES, CSR_BEGIN, CSR_END, PC_SLOT};
use crate::common::tokens::parse_hex;
use crate::common::{Diagnostic, Error, Result, Tokens, Xlen};
use crate::memory::SparseMemory;

/// Reads a whole test vector from `reader`.
///
/// # Errors
///
/// Returns [`Error::Stream`] if the reader fails, and any error of [`parse`].
pub fn load<R: Read>(mut reader: R, xlen: Xlen) -> Result<TestVector> {
    let mut text = String::new();
    let _ = reader.read_to_string(&mut text)?;
    parse(&text, xlen)
}

/// Parses a test vector from text.
///
/// # Arguments
///
/// * `text` - The whole input file.
/// * `xlen` - Width of the memory image's address space.
///
/// # Errors
///
/// * [`Error::MalformedInput`] if the memory image ends early, or a number does not parse.
/// * [`Error::Protocol`] if the text ends before all 33 base registers are read,
///   `.CSR_BEGIN` is missing, or the text ends before `.CSR_END`.
/// * [`Error::UnknownRegister`] if the CSR section names a register not in the table.
pub fn parse(text: &str, xlen: Xlen) -> Result<TestVector> {
    let mut tokens = Tokens::new(text);

    let instruction_bits = header_hex(&mut tokens, "instruction bits")?;
    let mut record = LoadRecord::new(instruction_bits);

    read_base_registers(&mut tokens, &mut record)?;
    read_csr_section(&mut tokens, &mut record)?;

    let mut memory = SparseMemory::new(0, xlen);
    memory.load_from_text(&mut tokens, xlen)?;

    let consumed = tokens.consumed();
    let trailing = tokens.remaining();
    if trailing > 0 {
        debug!(consumed, trailing, "ignoring tokens after memory image");
    }
    debug!(
        instruction = format_args!("{instruction_bits:#x}"),
        csrs = record.modified().count(),
        overrides = memory.len(),
        "test vector loaded"
    );

    Ok(TestVector { record, memory })
}

/// Takes the next token of the fixed-length header; running out there is a token-count
/// error rather than a malformed number.
fn header_token<'a>(tokens: &mut Tokens<'a>, what: &str) -> Result<&'a str> {
    tokens.next_opt().ok_or_else(|| {
        Error::Protocol(format!(
            "input ended after {} tokens while reading {what}",
            tokens.consumed()
        ))
    })
}

fn header_hex(tokens: &mut Tokens<'_>, what: &str) -> Result<u64> {
    let token = header_token(tokens, what)?;
    parse_hex(token).ok_or_else(|| {
        Error::MalformedInput(format!("expected hex value for {what}, found `{token}`"))
    })
}

fn read_base_registers(tokens: &mut Tokens<'_>, record: &mut LoadRecord) -> Result<()> {
    for (slot, &expected) in BASE_REG_NAMES.iter().enumerate() {
        let label = header_token(tokens, "base register label")?;
        let value = header_hex(tokens, expected)?;
        if label != expected {
            // Labels are advisory: the value still lands in the positional slot.
            warn!(expected, found = label, "change unordered assignment");
            record.diagnostics.push(Diagnostic::OrderWarning {
                expected,
                found: label.to_owned(),
            });
        }
        record.base[slot] = value;
    }
    Ok(())
}

fn read_csr_section(tokens: &mut Tokens<'_>, record: &mut LoadRecord) -> Result<()> {
    match tokens.next_opt() {
        Some(CSR_BEGIN) => {}
        Some(other) => {
            return Err(Error::Protocol(format!(
                "expected {CSR_BEGIN}, found `{other}`"
            )));
        }
        None => {
            return Err(Error::Protocol(format!(
                "input ended before {CSR_BEGIN}"
            )));
        }
    }

    let unterminated = || Error::Protocol(format!("input ended before {CSR_END}"));
    loop {
        let name = tokens.next_opt().ok_or_else(unterminated)?;
        if name == CSR_END {
            return Ok(());
        }
        let idx = lookup(name).ok_or_else(|| Error::UnknownRegister(name.to_owned()))?;
        let token = tokens.next_opt().ok_or_else(unterminated)?;
        let value = parse_hex(token).ok_or_else(|| {
            Error::MalformedInput(format!("expected hex value for {name}, found `{token}`"))
        })?;
        record.csrs[idx] = CsrSlot {
            value,
            modified: true,
        };
    }
}

/// Writes post-step state in the output format.
///
/// # Arguments
///
/// * `snapshot` - Registers, output CSRs and privilege read from the model.
/// * `memory` - The memory image after the step.
/// * `xlen` - Output width; in 32-bit mode registers and memory are truncated.
/// * `out` - Destination stream.
///
/// # Errors
///
/// Returns [`Error::Stream`] if writing to `out` fails.
pub fn dump<W: Write + ?Sized>(
    snapshot: &StateSnapshot,
    memory: &SparseMemory,
    xlen: Xlen,
    out: &mut W,
) -> Result<()> {
    for (i, &value) in snapshot.gprs.iter().enumerate() {
        writeln!(out, "x{i} {:x}", xlen.wrap(value))?;
    }
    writeln!(out, "{} {:x}", BASE_REG_NAMES[PC_SLOT], xlen.wrap(snapshot.pc))?;

    writeln!(out, "{CSR_BEGIN}")?;
    for ((name, _), value) in DUMPED.iter().zip(&snapshot.csrs) {
        writeln!(out, "{name} {value:x}")?;
    }
    writeln!(out, "{PRIV_NAME} {:x}", snapshot.privilege)?;
    writeln!(out, "{CSR_END}")?;

    memory.dump_to_text(out, xlen)
}

/// Renders [`dump`] output into a `String`.
///
/// # Errors
///
/// Never fails in practice; writing into a `Vec` cannot fail, and the output is ASCII.
pub fn dump_to_string(
    snapshot: &StateSnapshot,
    memory: &SparseMemory,
    xlen: Xlen,
) -> Result<String> {
    let mut buf = Vec::new();
    dump(snapshot, memory, xlen, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| Error::Stream(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
