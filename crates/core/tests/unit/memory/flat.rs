//! Flat RAM Backend Tests.
//!
//! Verifies that the flat backend behaves as a bounded RAM behind the window contract.

use rvsync_core::memory::{FlatMemory, MemoryBackend};

#[test]
fn test_flat_memory_geometry() {
    let memory = FlatMemory::new(0x8000_0000, 0x1000).unwrap();
    assert_eq!(memory.base(), 0x8000_0000);
    assert_eq!(memory.size(), 0x1000);
    assert!(memory.contains(0x8000_0FFF));
    assert!(!memory.contains(0x8000_1000));
}

#[test]
fn test_flat_memory_window_straddling_end_of_ram() {
    let mut memory = FlatMemory::new(0x1000, 0x40).unwrap();
    memory.window(0x1020).write_u64(0x1C, u64::MAX);
    let window = memory.window(0x1020);
    assert_eq!(window.read_u64(0x1C), 0x0000_0000_FFFF_FFFF);
}

#[test]
fn test_flat_memory_is_not_sparse() {
    let mut memory = FlatMemory::new(0, 0).unwrap();
    let backend: &mut dyn MemoryBackend = &mut memory;
    assert_eq!(backend.name(), "flat");
    assert!(backend.as_sparse().is_none());
    assert!(backend.as_sparse_mut().is_none());
}
