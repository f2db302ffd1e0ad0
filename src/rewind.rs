//! Rewind / reset: undo the offset stamps a factorization pass left behind
//! so the same tree can be walked again from an earlier position.

use crate::factorize;
use crate::node;
use crate::parallel::WorkerSpan;

/// Clears the `offset` field of every node in `spans`, then — if `target >
/// 0` — replays positions `0..target` (stamping only, no match output) so
/// the tree's offsets are exactly what a fresh left-to-right pass would have
/// left behind at `target`.
///
/// `spans` are the per-worker `[tree_start, tree_end)` ranges recorded by
/// the most recent `parse` (see [`crate::parallel::build`]); clearing only
/// those spans — rather than `0..block_size` — is what lets rewind stay
/// cheap for large blocks built with many workers that only touched a
/// fraction of the node array each.
pub fn rewind(
    nodes: &mut [u64],
    leaf_link: &[u32],
    spans: &[WorkerSpan],
    target: u32,
    min_match_length: u32,
) {
    for span in spans {
        for word in &mut nodes[span.tree_start..span.tree_end] {
            *word = node::clear_offset(*word);
        }
    }

    for position in 0..target {
        factorize::walk_stamp_only(nodes, leaf_link, position, min_match_length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder, node, oracle};

    fn build_tree(block: &[u8], min_len: u32, max_len: u32) -> (Vec<u64>, Vec<u32>, Vec<WorkerSpan>) {
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
        let spans = vec![WorkerSpan {
            tree_start: 0,
            tree_end: n,
        }];
        (nodes, leaf_link, spans)
    }

    #[test]
    fn rewind_to_zero_matches_a_fresh_tree() {
        let block = b"abcabcabc";
        let (mut nodes, leaf_link, spans) = build_tree(block, 2, 64);
        let (fresh_nodes, _, _) = build_tree(block, 2, 64);

        for p in 0..block.len() as u32 {
            let mut out = Vec::new();
            factorize::walk_all_matches(&mut nodes, &leaf_link, p, 2, &mut out);
        }
        rewind(&mut nodes, &leaf_link, &spans, 0, 2);
        assert_eq!(nodes, fresh_nodes);
    }

    #[test]
    fn rewind_then_replay_matches_a_partial_fresh_pass() {
        let block = b"abcabcabcabc";
        let (mut nodes_full, leaf_link, spans) = build_tree(block, 2, 64);
        for p in 0..block.len() as u32 {
            let mut out = Vec::new();
            factorize::walk_all_matches(&mut nodes_full, &leaf_link, p, 2, &mut out);
        }

        let target = 5u32;
        rewind(&mut nodes_full, &leaf_link, &spans, target, 2);

        let (mut nodes_partial, _, _) = build_tree(block, 2, 64);
        for p in 0..target {
            let mut out = Vec::new();
            factorize::walk_all_matches(&mut nodes_partial, &leaf_link, p, 2, &mut out);
        }

        assert_eq!(nodes_full, nodes_partial);
    }
}
