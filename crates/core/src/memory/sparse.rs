//! Sparse memory store.
//!
//! This module models an address space of up to 2^64 bytes without materializing it. It provides:
//! 1. **Representation:** A default fill word tiled every 4 bytes plus an ordered override map.
//! 2. **Windowing:** A single-entry, direct-mapped, write-back 64-byte window over the store.
//! 3. **Text Codec:** Loading and dumping the override list in the test-vector format.
//!
//! An address without an override reads as byte `address % 4` of the default word, in
//! little-endian order. The fill depends only on the address, never on where a window starts.

use std::collections::BTreeMap;
use std::io::Write;

use tracing::{debug, trace};

use super::window::{Window, WindowSink};
use super::MemoryBackend;
use crate::common::{Result, Tokens, WINDOW_SIZE, Xlen};

/// Returns the default-fill byte for `addr` given the default word.
#[inline]
pub const fn fill_byte(default_word: u64, addr: u64) -> u8 {
    (default_word >> (8 * (addr % 4))) as u8
}

/// Storage half of [`SparseMemory`]: everything except the window staging buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct OverrideStore {
    default_word: u64,
    overrides: BTreeMap<u64, u64>,
    xlen: Xlen,
}

impl OverrideStore {
    #[inline]
    fn byte_at(&self, addr: u64) -> u8 {
        self.overrides
            .get(&addr)
            .map_or_else(|| fill_byte(self.default_word, addr), |&value| value as u8)
    }
}

impl WindowSink for OverrideStore {
    fn commit(&mut self, base: u64, bytes: &[u8; WINDOW_SIZE]) {
        for (k, &byte) in bytes.iter().enumerate() {
            let addr = self.xlen.wrap(base.wrapping_add(k as u64));
            let _ = self.overrides.insert(addr, u64::from(byte));
        }
        trace!(base = format_args!("{base:#x}"), entries = self.overrides.len(), "window written back");
    }
}

/// Byte-addressable memory made of a default fill word and sparse overrides.
///
/// Overrides keep the granularity they were inserted with: entries from a loaded file
/// hold the full value given there (only its low byte is visible through a window), while
/// window write-back inserts one entry per byte. Window write-back re-commits all 64 bytes,
/// so an address that was ever covered by a window stays in the override map even if its
/// value equals the default fill.
#[derive(Clone, Debug)]
pub struct SparseMemory {
    store: OverrideStore,
    staging: [u8; WINDOW_SIZE],
}

impl SparseMemory {
    /// Creates an empty store where every address reads as the default fill.
    ///
    /// # Arguments
    ///
    /// * `default_word` - Fill word; byte `addr % 4` is visible at `addr`.
    /// * `xlen` - Address width at which window addresses wrap.
    pub fn new(default_word: u64, xlen: Xlen) -> Self {
        Self {
            store: OverrideStore {
                default_word,
                overrides: BTreeMap::new(),
                xlen,
            },
            staging: [0; WINDOW_SIZE],
        }
    }

    /// Parses a memory section (count, default word, pairs) from text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedInput`] if the text ends before all pairs are read.
    pub fn parse(text: &str, xlen: Xlen) -> Result<Self> {
        let mut memory = Self::new(0, xlen);
        memory.load_from_text(&mut Tokens::new(text), xlen)?;
        Ok(memory)
    }

    /// Replaces the contents of the store with a memory section read from `tokens`.
    ///
    /// The section is a decimal pair count, a hex default word, then that many hex
    /// `(address, value)` pairs. Addresses wrap at `xlen`, so two addresses that alias at
    /// that width share one entry. Pairs whose value equals the default word are skipped
    /// and never touch an earlier entry; among the rest, a later pair for the same address
    /// replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedInput`] if the tokens run out before `count` pairs
    /// are read, or a token is not a number.
    pub fn load_from_text(&mut self, tokens: &mut Tokens<'_>, xlen: Xlen) -> Result<()> {
        let count = tokens.next_dec("memory override count")?;
        let default_word = tokens.next_hex("memory default word")?;

        let mut overrides = BTreeMap::new();
        for _ in 0..count {
            let addr = xlen.wrap(tokens.next_hex("memory address")?);
            let value = tokens.next_hex("memory value")?;
            if value != default_word {
                let _ = overrides.insert(addr, value);
            }
        }

        debug!(
            count,
            kept = overrides.len(),
            default = format_args!("{default_word:#x}"),
            %xlen,
            "memory image loaded"
        );
        self.store = OverrideStore {
            default_word,
            overrides,
            xlen,
        };
        Ok(())
    }

    /// Materializes the 64-byte window starting at `addr`.
    ///
    /// Addresses inside the window wrap at the store's width. The returned guard may be
    /// mutated in place; releasing it writes all 64 bytes back into the override map.
    pub fn window(&mut self, addr: u64) -> Window<'_> {
        let base = self.store.xlen.wrap(addr);
        for (k, slot) in self.staging.iter_mut().enumerate() {
            let a = self.store.xlen.wrap(base.wrapping_add(k as u64));
            *slot = self.store.byte_at(a);
        }
        Window::new(base, &mut self.staging, &mut self.store)
    }

    /// Writes the memory section in the test-vector format.
    ///
    /// Emits the override count (decimal) and default word, then one `address value` line
    /// per override in ascending address order. In 32-bit mode the default word, addresses
    /// and values are truncated to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Stream`] if the output stream fails.
    pub fn dump_to_text<W: Write + ?Sized>(&self, out: &mut W, xlen: Xlen) -> Result<()> {
        writeln!(
            out,
            "{} {:x}",
            self.store.overrides.len(),
            xlen.wrap(self.store.default_word)
        )?;
        for (&addr, &value) in &self.store.overrides {
            writeln!(out, "{:x} {:x}", xlen.wrap(addr), xlen.wrap(value))?;
        }
        Ok(())
    }

    /// Reads the byte at `addr` without opening a window.
    pub fn peek(&self, addr: u64) -> u8 {
        self.store.byte_at(self.store.xlen.wrap(addr))
    }

    /// Returns the raw override stored at `addr`, if any.
    pub fn get(&self, addr: u64) -> Option<u64> {
        self.store.overrides.get(&addr).copied()
    }

    /// Iterates over `(address, value)` overrides in ascending address order.
    pub fn overrides(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.store.overrides.iter().map(|(&a, &v)| (a, v))
    }

    /// Number of override entries.
    pub fn len(&self) -> usize {
        self.store.overrides.len()
    }

    /// Returns `true` if no address differs from the default fill.
    pub fn is_empty(&self) -> bool {
        self.store.overrides.is_empty()
    }

    /// The default fill word.
    pub const fn default_word(&self) -> u64 {
        self.store.default_word
    }

    /// The width at which addresses wrap.
    pub const fn xlen(&self) -> Xlen {
        self.store.xlen
    }
}

impl Default for SparseMemory {
    fn default() -> Self {
        Self::new(0, Xlen::default())
    }
}

impl PartialEq for SparseMemory {
    /// Two stores are equal when they hold the same default, overrides and width; the
    /// staging buffer is scratch space and does not take part.
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl Eq for SparseMemory {}

impl MemoryBackend for SparseMemory {
    fn name(&self) -> &str {
        "sparse"
    }

    fn window(&mut self, addr: u64) -> Window<'_> {
        Self::window(self, addr)
    }

    fn as_sparse(&self) -> Option<&SparseMemory> {
        Some(self)
    }

    fn as_sparse_mut(&mut self) -> Option<&mut SparseMemory> {
        Some(self)
    }
}
