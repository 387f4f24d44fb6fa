//! Contiguous RAM backend.
//!
//! `FlatMemory` is the memory a target model owns before the exchange rebinds it to a
//! `SparseMemory`. It maps `[base, base + size)` onto a `RamBuffer`; window bytes that fall
//! outside that range read as zero and writes to them are dropped.

use super::buffer::RamBuffer;
use super::window::{Window, WindowSink};
use super::MemoryBackend;
use crate::common::WINDOW_SIZE;

#[derive(Debug)]
struct FlatRam {
    base: u64,
    buffer: RamBuffer,
}

impl FlatRam {
    fn offset(&self, addr: u64) -> Option<usize> {
        let offset = usize::try_from(addr.wrapping_sub(self.base)).ok()?;
        (offset < self.buffer.len()).then_some(offset)
    }
}

impl WindowSink for FlatRam {
    fn commit(&mut self, base: u64, bytes: &[u8; WINDOW_SIZE]) {
        for (k, &byte) in bytes.iter().enumerate() {
            if let Some(offset) = self.offset(base.wrapping_add(k as u64)) {
                self.buffer.as_mut_slice()[offset] = byte;
            }
        }
    }
}

/// Flat RAM region backed by a lazily allocated buffer.
#[derive(Debug)]
pub struct FlatMemory {
    ram: FlatRam,
    staging: [u8; WINDOW_SIZE],
}

impl FlatMemory {
    /// Creates a zeroed RAM region.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of the first RAM byte.
    /// * `size` - Region size in bytes.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the buffer cannot be allocated.
    pub fn new(base: u64, size: usize) -> std::io::Result<Self> {
        Ok(Self {
            ram: FlatRam {
                base,
                buffer: RamBuffer::new(size)?,
            },
            staging: [0; WINDOW_SIZE],
        })
    }

    /// Address of the first RAM byte.
    pub const fn base(&self) -> u64 {
        self.ram.base
    }

    /// Region size in bytes.
    pub fn size(&self) -> usize {
        self.ram.buffer.len()
    }

    /// Returns `true` if `addr` falls inside the RAM region.
    pub fn contains(&self, addr: u64) -> bool {
        self.ram.offset(addr).is_some()
    }
}

impl MemoryBackend for FlatMemory {
    fn name(&self) -> &str {
        "flat"
    }

    fn window(&mut self, addr: u64) -> Window<'_> {
        let bytes = self.ram.buffer.as_slice();
        for (k, slot) in self.staging.iter_mut().enumerate() {
            *slot = self
                .ram
                .offset(addr.wrapping_add(k as u64))
                .map_or(0, |offset| bytes[offset]);
        }
        Window::new(addr, &mut self.staging, &mut self.ram)
    }
}
