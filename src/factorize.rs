//! Factorization engine: bottom-up leaf→root walks that emit matches and
//! stamp the current position into every interval they pass through.
//!
//! This is the hot loop the rest of the crate exists to set up for: one
//! array load and one array store per tree level visited, no allocation, no
//! branching beyond the walk's own termination test.

use crate::node;

/// One back-reference: `length` bytes starting at the current position equal
/// `length` bytes starting `offset` bytes earlier in the block.
///
/// `#[repr(C)]` for a stable, predictable layout even though this crate does
/// not export a C ABI (see `SPEC_FULL.md` §1 Non-goals) — callers that do
/// want to hand these to foreign code can rely on the field order and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Match {
    pub length: i32,
    pub offset: i32,
}

/// Walks from `leaf_link[position]` to the root, stamping `position` into
/// every node it passes through, and appending every match whose length
/// strictly exceeds the best length seen so far in this walk (ancestor order
/// guarantees lengths are strictly decreasing, so this is equivalent to
/// "record everything, the walk order is already correct").
///
/// Returns the number of matches appended to `out`.
pub fn walk_all_matches(
    nodes: &mut [u64],
    leaf_link: &[u32],
    position: u32,
    min_match_length: u32,
    out: &mut Vec<Match>,
) -> usize {
    walk(nodes, leaf_link, position, min_match_length, |m| {
        out.push(m)
    })
}

/// Same walk, but only the single longest match (the first one emitted) is
/// kept.
pub fn walk_best_match(
    nodes: &mut [u64],
    leaf_link: &[u32],
    position: u32,
    min_match_length: u32,
) -> Match {
    let mut best = Match::default();
    let mut seen_any = false;
    walk(nodes, leaf_link, position, min_match_length, |m| {
        if !seen_any {
            best = m;
            seen_any = true;
        }
    });
    best
}

/// Walks and stamps without emitting any match at all. Used by `advance` to
/// skip positions cheaply and by `rewind`'s replay step.
pub fn walk_stamp_only(nodes: &mut [u64], leaf_link: &[u32], position: u32, min_match_length: u32) {
    walk(nodes, leaf_link, position, min_match_length, |_| {});
}

/// Core bottom-up walk shared by the three entry points above.
///
/// `min_match_length` feeds the length computation (`length = (min - 1) +
/// lcp`); the stamp-only caller still computes it, it simply discards every
/// match via a no-op `emit`, so the walk structure is identical regardless
/// of which public operation is driving it.
fn walk(
    nodes: &mut [u64],
    leaf_link: &[u32],
    position: u32,
    min_match_length: u32,
    mut emit: impl FnMut(Match),
) -> usize {
    let mut count = 0;
    let mut r = leaf_link[position as usize] as u64;
    if r == 0 {
        return 0;
    }
    loop {
        let w = nodes[r as usize];
        let prior_offset = node::offset(w);
        if !node::offset_is_unset(w) {
            let length = (min_match_length - 1) + node::lcp(w);
            let offset = (position as u64) - prior_offset;
            emit(Match {
                length: length as i32,
                offset: offset as i32,
            });
            count += 1;
        }
        nodes[r as usize] = node::with_offset(w, position as u64);
        let parent = node::parent(w);
        if parent == 0 {
            break;
        }
        r = parent;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder, node, oracle};

    fn build_tree(block: &[u8], min_len: u32, max_len: u32) -> (Vec<u64>, Vec<u32>) {
        let arrays = oracle::build(block).unwrap();
        let n = block.len();
        let mut nodes = vec![node::root_word(); n];
        let mut leaf_link = vec![0u32; n];
        builder::build_range(
            &arrays.sa,
            &arrays.plcp,
            &mut nodes,
            |pos, idx| leaf_link[pos] = idx as u32,
            0..n,
            0..n,
            min_len,
            max_len,
        );
        (nodes, leaf_link)
    }

    #[test]
    fn position_zero_emits_nothing() {
        let (mut nodes, leaf_link) = build_tree(b"abcabc", 2, 64);
        let mut out = Vec::new();
        let n = walk_all_matches(&mut nodes, &leaf_link, 0, 2, &mut out);
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn abcabc_finds_the_repeat_at_position_three() {
        let block = b"abcabc";
        let (mut nodes, leaf_link) = build_tree(block, 2, 64);
        let mut out = Vec::new();
        for p in 0..block.len() as u32 {
            out.clear();
            walk_all_matches(&mut nodes, &leaf_link, p, 2, &mut out);
            if p == 3 {
                assert!(out.iter().any(|m| m.length >= 3 && m.offset == 3));
            }
        }
    }

    #[test]
    fn matches_within_one_walk_are_strictly_decreasing_in_length() {
        let block = b"abababab";
        let (mut nodes, leaf_link) = build_tree(block, 2, 64);
        let mut out = Vec::new();
        for p in 0..block.len() as u32 {
            out.clear();
            walk_all_matches(&mut nodes, &leaf_link, p, 2, &mut out);
            for w in out.windows(2) {
                assert!(w[0].length > w[1].length);
            }
        }
    }

    #[test]
    fn best_match_is_the_first_all_matches_entry() {
        let block = b"abcabcabc";
        let (tree_all, leaf_link) = build_tree(block, 2, 64);
        let (tree_best, _) = build_tree(block, 2, 64);
        let mut nodes_all = tree_all;
        let mut nodes_best = tree_best;
        for p in 0..block.len() as u32 {
            let mut out = Vec::new();
            walk_all_matches(&mut nodes_all, &leaf_link, p, 2, &mut out);
            let best = walk_best_match(&mut nodes_best, &leaf_link, p, 2);
            assert_eq!(out.first().copied().unwrap_or_default(), best);
        }
    }

    #[test]
    fn max_length_cap_is_respected() {
        let block = vec![b'x'; 100];
        let (mut nodes, leaf_link) = build_tree(&block, 2, 8);
        let mut out = Vec::new();
        for p in 0..block.len() as u32 {
            out.clear();
            walk_all_matches(&mut nodes, &leaf_link, p, 2, &mut out);
            for m in &out {
                assert!(m.length <= 8);
            }
        }
    }
}
