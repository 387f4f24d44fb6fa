//! # Reference Hart Tests
//!
//! Verifies the reset state, CSR legalization, privilege handling and memory routing of
//! the reference target model.

use rvsync_core::arch::csr;
use rvsync_core::arch::mode::PrivilegeMode;
use rvsync_core::common::Xlen;
use rvsync_core::config::ModelConfig;
use rvsync_core::memory::{MemoryBackend, SparseMemory};
use rvsync_core::model::hart::MemWidth;
use rvsync_core::model::{MemoryHost, RawField, TargetModel};
use rvsync_core::RefHart;

use crate::common::harness::hart;

#[test]
fn test_reset_state_rv64() {
    let hart = hart(Xlen::Rv64);
    assert_eq!(hart.privilege(), PrivilegeMode::Machine);
    assert_eq!(
        hart.csr_read(csr::MISA),
        csr::MISA_MXL_64 | csr::MISA_EXTENSIONS
    );
    assert_eq!(hart.csr_read(csr::MSTATUS), csr::MSTATUS_XL_64);
    assert_eq!(hart.memory_name(), "flat");
}

#[test]
fn test_reset_state_rv32() {
    let hart = hart(Xlen::Rv32);
    assert_eq!(
        hart.csr_read(csr::MISA),
        csr::MISA_MXL_32 | csr::MISA_EXTENSIONS
    );
    assert_eq!(hart.csr_read(csr::MSTATUS), 0);
    assert_eq!(hart.xlen(), Xlen::Rv32);
}

#[test]
fn test_misa_write_is_ignored() {
    let mut hart = hart(Xlen::Rv64);
    let before = hart.csr_read(csr::MISA);
    TargetModel::csr_write(&mut hart, csr::MISA, 0);
    assert_eq!(hart.csr_read(csr::MISA), before);
}

#[test]
fn test_mstatus_keeps_xl_fields_and_mirrors_sstatus() {
    let mut hart = hart(Xlen::Rv64);
    TargetModel::csr_write(&mut hart, csr::MSTATUS, csr::MSTATUS_SIE | csr::MSTATUS_MIE);
    let mstatus = hart.csr_read(csr::MSTATUS);
    assert_eq!(
        mstatus,
        csr::MSTATUS_XL_64 | csr::MSTATUS_SIE | csr::MSTATUS_MIE
    );
    assert_eq!(hart.csr_read(csr::SSTATUS), mstatus & csr::SSTATUS_MASK);
}

#[test]
fn test_sie_is_masked_by_mideleg() {
    let mut hart = hart(Xlen::Rv64);
    TargetModel::force_field(&mut hart, RawField::Mideleg, csr::MIP_SSIP);
    TargetModel::csr_write(&mut hart, csr::SIE, csr::MIP_SSIP | csr::MIP_STIP);
    assert_eq!(hart.csr_read(csr::SIE), csr::MIP_SSIP);
    assert_eq!(hart.csr_read(csr::MIE), csr::MIP_SSIP);
}

#[test]
fn test_epc_clears_bit_zero() {
    let mut hart = hart(Xlen::Rv64);
    TargetModel::csr_write(&mut hart, csr::MEPC, 0x8000_0003);
    TargetModel::csr_write(&mut hart, csr::SEPC, 0x1001);
    assert_eq!(hart.csr_read(csr::MEPC), 0x8000_0002);
    assert_eq!(hart.csr_read(csr::SEPC), 0x1000);
}

#[test]
fn test_set_privilege_legalizes() {
    let mut hart = hart(Xlen::Rv64);
    hart.set_privilege(2);
    assert_eq!(hart.privilege(), PrivilegeMode::User);
    hart.set_privilege(1);
    assert_eq!(hart.privilege(), PrivilegeMode::Supervisor);
}

#[test]
fn test_x0_is_hardwired() {
    let mut hart = hart(Xlen::Rv64);
    hart.write_gpr(0, 5);
    hart.write_gpr(31, 7);
    assert_eq!(hart.read_gpr(0), 0);
    assert_eq!(hart.gprs()[31], 7);
}

#[test]
fn test_loads_and_stores_use_flat_ram_before_rebinding() {
    let config = ModelConfig {
        ram_base: 0x8000_0000,
        ram_size: 0x1000,
    };
    let mut hart = RefHart::new(&config, Xlen::Rv64).unwrap();
    hart.store(0x8000_0100, MemWidth::Word, 0xCAFE_BABE);
    assert_eq!(hart.load(0x8000_0100, MemWidth::Word), 0xCAFE_BABE);
    assert_eq!(hart.load(0x8000_0102, MemWidth::Half), 0xCAFE);
    assert_eq!(hart.load(0x0, MemWidth::Double), 0);
}

#[test]
fn test_loads_and_stores_use_sparse_store_after_rebinding() {
    let mut hart = hart(Xlen::Rv32);
    let previous = hart.replace_memory(Box::new(SparseMemory::new(0x4433_2211, Xlen::Rv32)));
    assert_eq!(previous.name(), "flat");

    assert_eq!(hart.load(0x1_0000_0001, MemWidth::Half), 0x3322);
    hart.store(0x40, MemWidth::Byte, 0x1FF);
    assert_eq!(hart.load(0x40, MemWidth::Word), 0x4433_22FF);

    let memory = hart.memory_mut().as_sparse().unwrap();
    assert_eq!(memory.get(0x40), Some(0xFF));
}

#[test]
fn test_mem_width_sizes() {
    assert_eq!(MemWidth::Byte.bytes(), 1);
    assert_eq!(MemWidth::Half.bytes(), 2);
    assert_eq!(MemWidth::Word.bytes(), 4);
    assert_eq!(MemWidth::Double.bytes(), 8);
}
