//! End-to-end coverage of the `Session` lifecycle against realistic inputs,
//! independent of the unit tests embedded in `src/session.rs`.

use esa_matchfinder::Session;

#[test]
fn full_pass_over_english_text_is_internally_consistent() {
    let block = b"it was the best of times, it was the worst of times, \
it was the age of wisdom, it was the age of foolishness";
    let mut session = Session::new(block.len(), 3, 64).unwrap();
    session.parse(block).unwrap();

    let mut out = Vec::new();
    let mut total_matches = 0usize;
    for pos in 0..block.len() {
        session.find_all_matches(&mut out);
        total_matches += out.len();
        for m in &out {
            assert!(m.length >= 3);
            assert!(m.length as usize <= pos);
            assert!(m.offset > 0 && (m.offset as usize) <= pos);
            // The referenced bytes must actually match the bytes at `pos`.
            let src = pos - m.offset as usize;
            assert_eq!(
                &block[src..src + m.length as usize],
                &block[pos..pos + m.length as usize]
            );
        }
    }

    // This text repeats "it was the " and "of " many times over; a pass
    // that never emits anything is internally consistent too, which is
    // exactly why well-formedness alone isn't enough coverage.
    assert!(total_matches > 0, "expected at least one match over a heavily repetitive block");
}

// Scenario B (SPEC_FULL.md §8): a repeated block must reference its
// earlier occurrence, including when that occurrence starts at position 0.
#[test]
fn single_repeated_block_references_its_first_occurrence() {
    let block = b"abcabc";
    let mut session = Session::new(block.len(), 2, 64).unwrap();
    session.parse(block).unwrap();

    let mut out = Vec::new();
    let mut found_at_3 = false;
    for pos in 0..block.len() {
        session.find_all_matches(&mut out);
        if pos == 3 {
            assert!(out.iter().any(|m| m.offset == 3 && m.length >= 3));
            found_at_3 = true;
        }
    }
    assert!(found_at_3);
}

// Scenario C (SPEC_FULL.md §8): a run of one repeated byte nests matches of
// every length from 2 up to the run length seen so far, all at offset 1.
#[test]
fn a_run_of_one_byte_finds_every_nested_match_length() {
    let block = b"aaaaaa";
    let mut session = Session::new(block.len(), 2, 64).unwrap();
    session.parse(block).unwrap();

    let mut out = Vec::new();
    let mut total_matches = 0usize;
    for pos in 0..block.len() {
        session.find_all_matches(&mut out);
        total_matches += out.len();
        for m in &out {
            assert_eq!(m.offset, 1);
            // A match can extend past the current position into text that
            // comes after it (the whole block is known up front), but it
            // can never run past the end of the block.
            assert!(pos + (m.length as usize) <= block.len());
        }
        if pos >= 2 && pos + 2 <= block.len() {
            // Every position past the second 'a', with at least 2 bytes of
            // block remaining, must find the two-byte match directly
            // behind it (a position with fewer than 2 bytes left can't
            // have a length-2 match regardless of tree shape).
            assert!(out.iter().any(|m| m.length >= 2));
        }
    }
    assert!(total_matches > 0, "a run of repeated bytes must not be treated as a flat, match-free tree");
}

#[test]
fn rewind_to_a_midpoint_then_resuming_agrees_with_a_fresh_pass() {
    let block = b"abcabcabcabcabcabc";
    let mut session = Session::new(block.len(), 2, 64).unwrap();
    session.parse(block).unwrap();

    let mut reference = Vec::new();
    for _ in 0..block.len() {
        let mut out = Vec::new();
        session.find_all_matches(&mut out);
        reference.push(out);
    }

    let midpoint = 7u32;
    session.rewind(midpoint).unwrap();
    assert_eq!(session.position(), midpoint);
    for expected in &reference[midpoint as usize..] {
        let mut out = Vec::new();
        session.find_all_matches(&mut out);
        assert_eq!(&out, expected);
    }
}

#[test]
fn parallel_session_survives_a_reparse_with_a_different_block() {
    let mut session = Session::new_parallel(4096, 2, 64, 4).unwrap();
    session.parse(b"first block with some repeats repeats repeats").unwrap();
    let first_size = session.block_size();

    session.parse(b"a completely different second block, second block").unwrap();
    assert_ne!(session.block_size(), 0);

    let mut out = Vec::new();
    for _ in 0..session.block_size() {
        session.find_all_matches(&mut out);
    }
    assert_ne!(session.block_size(), first_size);
}
