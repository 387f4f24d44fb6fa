//! Window and Normalization Properties.
//!
//! Randomized checks of the sparse store: untouched bytes follow the default pattern,
//! written bytes survive write-back, and load/dump normalization is idempotent.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rvsync_core::common::{WINDOW_SIZE, Xlen};
use rvsync_core::memory::sparse::fill_byte;
use rvsync_core::memory::SparseMemory;

fn dump(memory: &SparseMemory, xlen: Xlen) -> String {
    let mut out = Vec::new();
    memory.dump_to_text(&mut out, xlen).unwrap();
    String::from_utf8(out).unwrap()
}

fn section(default_word: u64, pairs: &BTreeMap<u64, u64>) -> String {
    let mut text = format!("{} {default_word:x}", pairs.len());
    for (addr, value) in pairs {
        text.push_str(&format!(" {addr:x} {value:x}"));
    }
    text
}

fn xlen() -> impl Strategy<Value = Xlen> {
    prop_oneof![Just(Xlen::Rv32), Just(Xlen::Rv64)]
}

proptest! {
    #[test]
    fn prop_untouched_window_follows_default_pattern(
        default_word in any::<u64>(),
        addr in any::<u64>(),
        xlen in xlen(),
    ) {
        let mut memory = SparseMemory::new(default_word, xlen);
        let window = memory.window(addr);
        for k in 0..WINDOW_SIZE {
            let a = xlen.wrap(addr.wrapping_add(k as u64));
            prop_assert_eq!(window[k], fill_byte(default_word, a));
        }
    }

    #[test]
    fn prop_written_byte_survives_write_back(
        default_word in any::<u64>(),
        addr in any::<u64>(),
        k in 0..WINDOW_SIZE,
        value in any::<u8>(),
        xlen in xlen(),
    ) {
        let mut memory = SparseMemory::new(default_word, xlen);
        memory.window(addr)[k] = value;
        let window = memory.window(addr.wrapping_add(k as u64));
        prop_assert_eq!(window[0], value);
    }

    #[test]
    fn prop_window_never_changes_other_addresses(
        addr in 0x1000u64..0x2000,
        probe in 0u64..0x1000,
        value in any::<u8>(),
    ) {
        let mut memory = SparseMemory::new(0x0706_0504, Xlen::Rv64);
        memory.window(addr)[0] = value;
        prop_assert_eq!(memory.peek(probe), fill_byte(0x0706_0504, probe));
    }

    #[test]
    fn prop_load_dump_normalization_is_idempotent(
        default_word in any::<u32>(),
        pairs in prop::collection::btree_map(any::<u32>(), any::<u32>(), 0..24),
        xlen in xlen(),
    ) {
        let pairs: BTreeMap<u64, u64> =
            pairs.into_iter().map(|(a, v)| (u64::from(a), u64::from(v))).collect();
        let text = section(u64::from(default_word), &pairs);

        let once = dump(&SparseMemory::parse(&text, xlen).unwrap(), xlen);
        let twice = dump(&SparseMemory::parse(&once, xlen).unwrap(), xlen);
        prop_assert_eq!(once, twice);
    }
}
