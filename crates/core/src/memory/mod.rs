//! Memory backends.
//!
//! This module defines how a target model reaches memory. It provides:
//! 1. **Contract:** The `MemoryBackend` trait; every access goes through a 64-byte window.
//! 2. **Sparse Store:** `SparseMemory`, the default-plus-overrides store built from a test vector.
//! 3. **Flat RAM:** `FlatMemory`, the contiguous buffer a model owns until it is rebound.
//!
//! No memory-mapped I/O is modeled: every address is ordinary memory.

/// Lazily allocated RAM buffer.
pub mod buffer;

/// Contiguous RAM backend.
pub mod flat;

/// Sparse default-plus-overrides store.
pub mod sparse;

/// Scoped write-back window.
pub mod window;

pub use buffer::RamBuffer;
pub use flat::FlatMemory;
pub use sparse::SparseMemory;
pub use window::{Window, WindowSink};

/// Memory as seen by a target model: a window of 64 contiguous bytes at any address.
///
/// Only one window can be live at a time; it is written back when released.
pub trait MemoryBackend {
    /// Returns a short name for this backend (e.g., `"sparse"`, `"flat"`).
    fn name(&self) -> &str;

    /// Materializes the 64-byte window starting at `addr`.
    fn window(&mut self, addr: u64) -> Window<'_>;

    /// Returns `true` if `addr` is ordinary memory. Always true: no MMIO is modeled.
    fn addr_is_memory(&self, _addr: u64) -> bool {
        true
    }

    /// Returns this backend as a `SparseMemory` if it is one; otherwise `None`.
    fn as_sparse(&self) -> Option<&SparseMemory> {
        None
    }

    /// Returns this backend mutably as a `SparseMemory` if it is one; otherwise `None`.
    fn as_sparse_mut(&mut self) -> Option<&mut SparseMemory> {
        None
    }
}
