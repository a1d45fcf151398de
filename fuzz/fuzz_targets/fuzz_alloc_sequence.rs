#![no_main]

use libfuzzer_sys::fuzz_target;

use scopealloc::{ArenaError, FixedArena, GrowingArena, RegionScope, SliceAllocator};

fn overlaps(a: (usize, usize), b: (usize, usize)) -> bool {
    if a.1 == 0 || b.1 == 0 {
        return false;
    }
    a.0 < b.0 + b.1 && b.0 < a.0 + a.1
}

fuzz_target!(|data: &[u8]| {
    let growing = match GrowingArena::with_block_size(RegionScope::confined(), 512) {
        Ok(arena) => arena,
        Err(_) => return,
    };
    let fixed = match FixedArena::new(RegionScope::confined(), 4096) {
        Ok(arena) => arena,
        Err(_) => return,
    };

    let mut carved = Vec::new();
    for op in data.chunks_exact(3) {
        // Two bytes of size, capped; one byte selecting alignment.
        let size = usize::from(u16::from_le_bytes([op[0], op[1]])) % 2048;
        let align = 1usize << (op[2] % 8);

        let slice = growing.allocate(size, align).expect("growing arena never exhausts");
        assert_eq!(slice.address() % align, 0);
        assert_eq!(slice.len(), size);
        carved.push((slice.address(), slice.len()));

        match fixed.allocate(size, align) {
            Ok(slice) => {
                assert_eq!(slice.address() % align, 0);
                carved.push((slice.address(), slice.len()));
            }
            Err(ArenaError::CapacityExceeded { requested, .. }) => {
                assert_eq!(requested, size);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    for (i, a) in carved.iter().enumerate() {
        for b in &carved[i + 1..] {
            assert!(!overlaps(*a, *b), "{a:?} overlaps {b:?}");
        }
    }
});
