//! Sparse Memory Unit Tests.
//!
//! Verifies load-time normalization, the default fill pattern seen through windows,
//! write-back, address wrapping and the dump format.

use pretty_assertions::assert_eq;
use rvsync_core::common::Xlen;
use rvsync_core::memory::{MemoryBackend, SparseMemory};
use rvsync_core::Error;

fn dump(memory: &SparseMemory, xlen: Xlen) -> String {
    let mut out = Vec::new();
    memory.dump_to_text(&mut out, xlen).unwrap();
    String::from_utf8(out).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Loading
// ══════════════════════════════════════════════════════════

#[test]
fn test_load_drops_entries_equal_to_default() {
    let mut memory = SparseMemory::parse("2 0 1000 ab 1004 0", Xlen::Rv64).unwrap();
    assert_eq!(memory.len(), 1);
    assert_eq!(memory.get(0x1000), Some(0xAB));
    assert_eq!(memory.get(0x1004), None);

    let window = memory.window(0x1000);
    assert_eq!(window[0], 0xAB);
    assert_eq!(window[4], 0x00);
}

#[test]
fn test_load_keeps_full_value_but_window_sees_low_byte() {
    let mut memory = SparseMemory::parse("1 0 20 1234", Xlen::Rv64).unwrap();
    assert_eq!(memory.get(0x20), Some(0x1234));
    assert_eq!(memory.window(0x20)[0], 0x34);
}

#[test]
fn test_load_replaces_previous_contents() {
    let mut memory = SparseMemory::parse("1 0 10 ff", Xlen::Rv64).unwrap();
    let mut tokens = rvsync_core::common::Tokens::new("1 11111111 40 5");
    memory.load_from_text(&mut tokens, Xlen::Rv64).unwrap();
    assert_eq!(memory.default_word(), 0x1111_1111);
    assert_eq!(memory.overrides().collect::<Vec<_>>(), vec![(0x40, 5)]);
}

#[test]
fn test_load_wraps_addresses_in_32_bit_mode() {
    let memory = SparseMemory::parse("1 0 100000010 7", Xlen::Rv32).unwrap();
    assert_eq!(memory.get(0x10), Some(7));
}

#[test]
fn test_load_aliased_addresses_share_one_entry_in_32_bit_mode() {
    let memory = SparseMemory::parse("2 0 100001000 aa 1000 bb", Xlen::Rv32).unwrap();
    assert_eq!(memory.len(), 1);
    assert_eq!(memory.get(0x1000), Some(0xBB));
    assert_eq!(memory.get(0x1_0000_1000), None);

    let memory = SparseMemory::parse("2 0 100001000 aa 1000 bb", Xlen::Rv64).unwrap();
    assert_eq!(memory.len(), 2);
}

#[test]
fn test_load_later_pair_equal_to_default_keeps_earlier_entry() {
    let memory = SparseMemory::parse("2 0 1000 ab 1000 0", Xlen::Rv64).unwrap();
    assert_eq!(memory.len(), 1);
    assert_eq!(memory.get(0x1000), Some(0xAB));
}

#[test]
fn test_load_later_non_default_pair_replaces_earlier_entry() {
    let memory = SparseMemory::parse("3 0 1000 ab 1000 0 1000 cd", Xlen::Rv64).unwrap();
    assert_eq!(memory.overrides().collect::<Vec<_>>(), vec![(0x1000, 0xCD)]);
}

#[test]
fn test_load_accepts_prefixed_hex() {
    let memory = SparseMemory::parse("1 0x0 0x1000 0xAB", Xlen::Rv64).unwrap();
    assert_eq!(memory.get(0x1000), Some(0xAB));
}

#[test]
fn test_load_truncated_stream_is_malformed() {
    let err = SparseMemory::parse("3 0 1000 ab 1004", Xlen::Rv64).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_load_non_numeric_token_is_malformed() {
    let err = SparseMemory::parse("1 0 zz 1", Xlen::Rv64).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
    let err = SparseMemory::parse("one 0", Xlen::Rv64).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

// ══════════════════════════════════════════════════════════
// 2. Windowing
// ══════════════════════════════════════════════════════════

#[test]
fn test_default_pattern_depends_on_address_not_window_base() {
    let mut memory = SparseMemory::new(0xDDCC_BBAA, Xlen::Rv64);
    let window = memory.window(0x1001);
    assert_eq!(&window[..4], &[0xBB, 0xCC, 0xDD, 0xAA]);
}

#[test]
fn test_window_wraps_at_32_bits() {
    let mut memory = SparseMemory::new(0, Xlen::Rv32);
    {
        let mut window = memory.window(0xFFFF_FFF0);
        window[0x10] = 0x42;
    }
    assert_eq!(memory.get(0x0), Some(0x42));
    assert_eq!(memory.peek(0x1_0000_0000), 0x42);
}

#[test]
fn test_window_wraps_at_64_bits() {
    let mut memory = SparseMemory::new(0, Xlen::Rv64);
    memory.window(u64::MAX).write_u16(0, 0xBEEF);
    assert_eq!(memory.get(u64::MAX), Some(0xEF));
    assert_eq!(memory.get(0), Some(0xBE));
}

#[test]
fn test_write_back_is_visible_to_overlapping_window() {
    let mut memory = SparseMemory::new(0, Xlen::Rv64);
    memory.window(0x2000).write_u32(0x3C, 0x1122_3344);
    let window = memory.window(0x2030);
    assert_eq!(window.read_u32(0xC), 0x1122_3344);
}

#[test]
fn test_unmodified_window_still_commits_every_byte() {
    let mut memory = SparseMemory::parse("0 0", Xlen::Rv64).unwrap();
    drop(memory.window(0x80));
    assert_eq!(memory.len(), 64);
    assert!(memory.overrides().all(|(_, v)| v == 0));
}

#[test]
fn test_write_back_narrows_loaded_values_to_bytes() {
    let mut memory = SparseMemory::parse("1 0 20 1234", Xlen::Rv64).unwrap();
    drop(memory.window(0x20));
    assert_eq!(memory.get(0x20), Some(0x34));
}

#[test]
fn test_backend_downcasts_to_sparse() {
    let mut memory = SparseMemory::new(0, Xlen::Rv64);
    let backend: &mut dyn MemoryBackend = &mut memory;
    assert_eq!(backend.name(), "sparse");
    assert!(backend.addr_is_memory(0x1000_0000));
    assert!(backend.as_sparse().is_some());
    backend.as_sparse_mut().unwrap().window(0).write_u8(0, 9);
    assert_eq!(memory.get(0), Some(9));
}

// ══════════════════════════════════════════════════════════
// 3. Dumping
// ══════════════════════════════════════════════════════════

#[test]
fn test_dump_is_address_sorted_lowercase_hex() {
    let memory = SparseMemory::parse("3 0 3000 C 1000 A 2000 B", Xlen::Rv64).unwrap();
    assert_eq!(dump(&memory, Xlen::Rv64), "3 0\n1000 a\n2000 b\n3000 c\n");
}

#[test]
fn test_dump_masks_to_32_bits() {
    let memory = SparseMemory::parse("1 ffffffff00000001 10 123456789", Xlen::Rv64).unwrap();
    assert_eq!(dump(&memory, Xlen::Rv32), "1 1\n10 23456789\n");
}

#[test]
fn test_dump_empty_store() {
    let memory = SparseMemory::new(0xAB, Xlen::Rv32);
    assert_eq!(dump(&memory, Xlen::Rv32), "0 ab\n");
}
