#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use esa_matchfinder::Session;

#[derive(Arbitrary, Debug)]
struct Input {
    block: Vec<u8>,
    min_len: u8,
    max_len_extra: u8,
    workers: u8,
    rewind_target: u32,
}

// Drives the full create/parse/rewind/advance lifecycle with randomized
// parameters to catch panics in boundary handling that a fixed-block test
// wouldn't reach.
fuzz_target!(|input: Input| {
    let block: Vec<u8> = input.block.into_iter().filter(|&b| b != 0).collect();
    if block.is_empty() || block.len() > 1 << 16 {
        return;
    }

    let min_len = (input.min_len as u32 % 30) + 2;
    let max_len = min_len + (input.max_len_extra as u32 % 30);
    let workers = (input.workers % 8) as usize;

    let Ok(mut session) = Session::new_parallel(block.len(), min_len, max_len, workers) else {
        return;
    };
    if session.parse(&block).is_err() {
        return;
    }

    let mut out = Vec::new();
    for _ in 0..block.len().min(64) {
        session.find_best_match();
        session.find_all_matches(&mut out);
    }

    if session.rewind(input.rewind_target).is_ok() {
        session.advance(1);
    }
});
