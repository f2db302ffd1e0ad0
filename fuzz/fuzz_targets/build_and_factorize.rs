#![no_main]

use libfuzzer_sys::fuzz_target;

use esa_matchfinder::Session;

// Input bytes double as both the block to factorize and a source of entropy
// for min/max match length — no embedded 0x00 bytes allowed, since the
// suffix-array oracle reserves that byte as its own sentinel.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.contains(&0u8) {
        return;
    }
    if data.len() > 1 << 16 {
        return;
    }

    let Ok(mut session) = Session::new(data.len(), 2, 64) else {
        return;
    };
    if session.parse(data).is_err() {
        return;
    }

    let mut out = Vec::new();
    for pos in 0..data.len() {
        let before = session.position();
        session.find_all_matches(&mut out);
        assert_eq!(session.position() as usize, before as usize + 1);
        for m in &out {
            assert!(m.length >= 2);
            assert!(m.offset > 0);
            assert!((m.offset as usize) <= pos);
        }
    }
});
