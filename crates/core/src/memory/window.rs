//! Scoped 64-byte memory window.
//!
//! A `Window` is the only way a target model touches memory. It performs:
//! 1. **Materialization:** Hands out a 64-byte buffer filled by the backend for `[base, base+64)`.
//! 2. **Mutation:** Exposes the buffer mutably, plus little-endian sized accessors.
//! 3. **Write-back:** Commits the entire buffer to the backend when the guard is released.
//!
//! The whole window is committed unconditionally: every byte counts as dirty from the moment
//! the window is handed out, whether or not the caller changed it.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::common::WINDOW_SIZE;

/// Receiver of window write-backs.
///
/// Implemented by the storage half of each memory backend.
pub trait WindowSink {
    /// Writes the 64 bytes of a released window back to storage.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of the first window byte.
    /// * `bytes` - Window contents at release time.
    fn commit(&mut self, base: u64, bytes: &[u8; WINDOW_SIZE]);
}

/// Live view of 64 contiguous bytes of a memory backend.
///
/// Dropping the window commits it. Because the window mutably borrows its backend, a second
/// window cannot be opened until this one has been written back.
pub struct Window<'a> {
    base: u64,
    bytes: &'a mut [u8; WINDOW_SIZE],
    sink: &'a mut dyn WindowSink,
}

impl<'a> Window<'a> {
    /// Wraps an already-filled staging buffer.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of byte 0.
    /// * `bytes` - Staging buffer holding the materialized contents.
    /// * `sink` - Storage that receives the buffer when the window is released.
    pub fn new(base: u64, bytes: &'a mut [u8; WINDOW_SIZE], sink: &'a mut dyn WindowSink) -> Self {
        Self { base, bytes, sink }
    }

    /// Address of the first byte in the window.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Reads the byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside the window.
    pub const fn read_u8(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    /// Reads a little-endian halfword at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the access extends past the end of the window.
    pub fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes(self.array(offset))
    }

    /// Reads a little-endian word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the access extends past the end of the window.
    pub fn read_u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes(self.array(offset))
    }

    /// Reads a little-endian doubleword at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the access extends past the end of the window.
    pub fn read_u64(&self, offset: usize) -> u64 {
        u64::from_le_bytes(self.array(offset))
    }

    /// Writes the byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside the window.
    pub const fn write_u8(&mut self, offset: usize, val: u8) {
        self.bytes[offset] = val;
    }

    /// Writes a little-endian halfword at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the access extends past the end of the window.
    pub fn write_u16(&mut self, offset: usize, val: u16) {
        self.bytes[offset..offset + 2].copy_from_slice(&val.to_le_bytes());
    }

    /// Writes a little-endian word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the access extends past the end of the window.
    pub fn write_u32(&mut self, offset: usize, val: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&val.to_le_bytes());
    }

    /// Writes a little-endian doubleword at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the access extends past the end of the window.
    pub fn write_u64(&mut self, offset: usize, val: u64) {
        self.bytes[offset..offset + 8].copy_from_slice(&val.to_le_bytes());
    }

    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[offset..offset + N]);
        out
    }
}

impl Deref for Window<'_> {
    type Target = [u8; WINDOW_SIZE];

    fn deref(&self) -> &Self::Target {
        &*self.bytes
    }
}

impl DerefMut for Window<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.bytes
    }
}

impl Drop for Window<'_> {
    fn drop(&mut self) {
        self.sink.commit(self.base, &*self.bytes);
    }
}

impl fmt::Debug for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("base", &format_args!("{:#x}", self.base))
            .field("bytes", &&self.bytes[..])
            .finish_non_exhaustive()
    }
}
