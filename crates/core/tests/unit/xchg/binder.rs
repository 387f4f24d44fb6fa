//! # Binder Tests
//!
//! Verifies exactly which calls `assign` makes on a target model, using a mock, and that
//! `extract` reads the output subset back by address.

use mockall::Sequence;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rvsync_core::arch::csr;
use rvsync_core::arch::mode::PrivilegeMode;
use rvsync_core::common::{Diagnostic, Xlen};
use rvsync_core::model::RawField;
use rvsync_core::xchg::{LoadRecord, assign, codec, extract};
use rvsync_core::Error;

use crate::common::harness::VectorBuilder;
use crate::common::mocks::target::MockTarget;

fn record(builder: &VectorBuilder) -> LoadRecord {
    codec::parse(&builder.build(), Xlen::Rv64).unwrap().record
}

#[test]
fn test_base_registers_and_pc_are_written_by_position() {
    let rec = record(&VectorBuilder::new().base(7, 0x77).base(32, 0x8000_0000));
    let mut target = MockTarget::new();
    let _ = target.expect_write_gpr().with(eq(0), eq(0)).times(1).return_const(());
    let _ = target.expect_write_gpr().with(eq(7), eq(0x77)).times(1).return_const(());
    let _ = target
        .expect_write_gpr()
        .withf(|idx, val| *idx != 0 && *idx != 7 && *val == 0)
        .times(30)
        .return_const(());
    let _ = target.expect_set_pc().with(eq(0x8000_0000)).times(1).return_const(());
    let _ = target.expect_set_privilege().with(eq(0)).times(1).return_const(());

    let report = assign(&rec, &mut target).unwrap();
    assert!(report.applied.is_empty());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_nonzero_x0_is_forced_with_warning() {
    let rec = record(&VectorBuilder::new().base(0, 0xBAD));
    let mut target = MockTarget::new();
    let _ = target.expect_write_gpr().with(eq(0), eq(0)).times(1).return_const(());
    let _ = target.expect_write_gpr().withf(|idx, _| *idx != 0).times(31).return_const(());
    let _ = target.expect_set_pc().return_const(());
    let _ = target.expect_set_privilege().return_const(());

    let report = assign(&rec, &mut target).unwrap();
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::ZeroRegisterForced { requested: 0xBAD }]
    );
}

#[test]
fn test_csr_policies_dispatch_in_table_order() {
    let rec = record(
        &VectorBuilder::new()
            .csr("sie", 0x2)
            .csr("mideleg", 0x222)
            .csr("sptbr", 0x8000_0000_0000_1234)
            .csr("mbadaddr", 0xDEAD)
            .csr("mip", 0x80),
    );
    let mut seq = Sequence::new();
    let mut target = MockTarget::accepting_base_registers();
    let _ = target
        .expect_force_field()
        .with(eq(RawField::Mideleg), eq(0x222))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = target
        .expect_force_field()
        .with(eq(RawField::Mip), eq(0x80))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = target
        .expect_csr_write()
        .with(eq(csr::MTVAL), eq(0xDEAD))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = target
        .expect_csr_write()
        .with(eq(csr::SIE), eq(0x2))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = target
        .expect_csr_write()
        .with(eq(csr::SATP), eq(0x8000_0000_0000_1234))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = target
        .expect_set_privilege()
        .with(eq(0))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let report = assign(&rec, &mut target).unwrap();
    assert_eq!(report.applied, vec!["mideleg", "mip", "mbadaddr", "sie", "sptbr"]);
}

#[test]
fn test_priv_uses_privilege_setter_once() {
    let rec = record(&VectorBuilder::new().csr("Priv", 3));
    let mut target = MockTarget::accepting_base_registers();
    let _ = target.expect_set_privilege().with(eq(3)).times(1).return_const(());

    let report = assign(&rec, &mut target).unwrap();
    assert_eq!(report.applied, vec!["Priv"]);
}

#[test]
fn test_misa_is_reported_not_written() {
    let rec = record(&VectorBuilder::new().csr("misa", 0x1234));
    let mut target = MockTarget::accepting_base_registers();
    let _ = target
        .expect_csr_read()
        .with(eq(csr::MISA))
        .times(1)
        .return_const(0x8000_0000_0014_1101u64);
    let _ = target.expect_set_privilege().return_const(());

    let report = assign(&rec, &mut target).unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::InformationalMismatch {
            fixed: 0x8000_0000_0014_1101,
            requested: 0x1234,
        }]
    );
}

#[test]
fn test_unbound_csr_fails_before_touching_model() {
    for name in ["sedeleg", "sideleg", "ustatus", "uip"] {
        let rec = record(&VectorBuilder::new().base(3, 3).csr("mtvec", 0x100).csr(name, 1));
        let mut target = MockTarget::new();
        match assign(&rec, &mut target) {
            Err(Error::UnknownRegister(msg)) => assert!(msg.starts_with(name)),
            other => panic!("expected UnknownRegister for {name}, got {other:?}"),
        }
    }
}

#[test]
fn test_extract_reads_output_subset_by_address() {
    let mut target = MockTarget::new();
    let _ = target.expect_read_gpr().returning(|idx| idx as u64 * 0x10);
    let _ = target.expect_pc().return_const(0x8000_0004u64);
    let _ = target.expect_csr_read().returning(|addr| u64::from(addr));
    let _ = target.expect_privilege().return_const(PrivilegeMode::Supervisor);

    let snapshot = extract(&target);
    assert_eq!(snapshot.gprs[3], 0x30);
    assert_eq!(snapshot.pc, 0x8000_0004);
    assert_eq!(snapshot.csrs[0], u64::from(csr::MISA));
    assert_eq!(snapshot.csrs[10], u64::from(csr::MTVAL));
    assert_eq!(snapshot.csrs[14], u64::from(csr::SATP));
    assert_eq!(snapshot.privilege, 1);
}
