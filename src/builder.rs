//! Interval-tree builder: turns `(sa, plcp)` into node words in one
//! right-to-left sweep driven by a monotone stack.
//!
//! [`build_range`] is the unit both the single-threaded session and every
//! worker of the parallel driver ([`crate::parallel`]) call; the parallel
//! driver's only job is computing disjoint, independently-buildable SA
//! ranges and node-index windows and handing each pair to this function.

use crate::node;

/// An interval still open on the sweep's monotone stack.
///
/// Node indices are assigned when a frame *closes* (pops), not when it
/// opens: a child interval always closes before the parent interval that
/// contains it (that's the stack discipline), so handing out indices in
/// closing order and counting them down means every child gets a strictly
/// larger index than its parent, for free. The cost is that a frame's own
/// node word, and the node words of every sub-interval it already closed,
/// can't be written until the frame's *own* index is known — which only
/// happens when it in turn closes. `pending_children` and `pending_leaves`
/// are exactly that backlog: entries waiting on this frame's index so they
/// can be written (or attached to leaf links) in one shot the moment it's
/// assigned.
struct Frame {
    lcp: u32,
    is_root: bool,
    pending_children: Vec<(u64, u32)>,
    pending_leaves: Vec<usize>,
}

impl Frame {
    fn root() -> Self {
        Frame {
            lcp: 0,
            is_root: true,
            pending_children: Vec::new(),
            pending_leaves: Vec::new(),
        }
    }

    fn open(lcp: u32) -> Self {
        Frame {
            lcp,
            is_root: false,
            pending_children: Vec::new(),
            pending_leaves: Vec::new(),
        }
    }
}

/// Builds the node words for SA indices in `range`, writing leaf links via
/// `set_leaf(text_position, node_index)`.
///
/// `range` selects which SA indices this call sweeps; `node_window` selects
/// which node indices it's allowed to allocate into, and need not line up
/// with `range` at all (the parallel driver hands out windows sized to each
/// partition's actual interval count, not its raw SA-index width — see
/// `crate::parallel` and `DESIGN.md`). `nodes_local` must have exactly
/// `node_window.len()` entries, one per index in `node_window`.
///
/// `range` must lie entirely within `[0, sa.len())`. An empty range is a
/// no-op (the degenerate case where a parallel partition found no
/// breakpoint of its own and its neighbor absorbed its span).
pub fn build_range(
    sa: &[u64],
    plcp: &[u32],
    nodes_local: &mut [u64],
    mut set_leaf: impl FnMut(usize, u64),
    range: std::ops::Range<usize>,
    node_window: std::ops::Range<usize>,
    min_match_length: u32,
    max_match_length: u32,
) {
    debug_assert_eq!(nodes_local.len(), node_window.len());
    if range.is_empty() {
        return;
    }

    let node_base = node_window.start;
    let clip_hi = max_match_length - (min_match_length - 1);
    let write_node = |nodes_local: &mut [u64], idx: u64, lcp: u32, parent: u64| {
        nodes_local[(idx as usize) - node_base] = node::pack(lcp, node::ROOT_OFFSET_SENTINEL, parent);
    };

    // Attaches a just-closed frame (`idx`, `lcp`) to `parent`: written
    // immediately if `parent` is the root (root's index, 0, is always
    // known), otherwise queued on `parent` until *it* closes.
    fn attach(nodes_local: &mut [u64], write_node: &dyn Fn(&mut [u64], u64, u32, u64), parent: &mut Frame, idx: u64, lcp: u32) {
        if parent.is_root {
            write_node(nodes_local, idx, lcp, 0);
        } else {
            parent.pending_children.push((idx, lcp));
        }
    }

    let mut stack: Vec<Frame> = vec![Frame::root()];
    let mut next_free = node_window.end;

    for i in range.clone().rev() {
        let pos = sa[i] as usize;
        let raw_plcp = plcp[pos];
        let lcp_prime = raw_plcp.saturating_sub(min_match_length - 1).min(clip_hi);

        let mut last_popped: Option<(u64, u32)> = None;

        while stack.last().unwrap().lcp > lcp_prime {
            let closed = stack.pop().unwrap();
            next_free -= 1;
            let idx = next_free as u64;

            for &(child_idx, child_lcp) in &closed.pending_children {
                write_node(nodes_local, child_idx, child_lcp, idx);
            }
            for &leaf_pos in &closed.pending_leaves {
                set_leaf(leaf_pos, idx);
            }

            attach(nodes_local, &write_node, stack.last_mut().unwrap(), idx, closed.lcp);
            last_popped = Some((idx, closed.lcp));
        }

        if lcp_prime > stack.last().unwrap().lcp {
            let mut cand = Frame::open(lcp_prime);
            // The interval that just closed is bounded on its left by this
            // position and sits strictly inside the interval opening here —
            // it becomes this new interval's child, not the grandparent's.
            if let Some((idx, lcp)) = last_popped {
                cand.pending_children.push((idx, lcp));
            }
            stack.push(cand);
        }

        // The leftmost member of whichever interval just closed is exactly
        // this position; it must reference that (now-closed, index-known)
        // interval, never whatever remains open afterward (which may be an
        // ancestor several levels up, or root).
        if let Some((idx, _)) = last_popped {
            set_leaf(pos, idx);
        } else {
            let top = stack.last_mut().unwrap();
            if top.is_root {
                set_leaf(pos, 0);
            } else {
                top.pending_leaves.push(pos);
            }
        }
    }

    while stack.len() > 1 {
        let closed = stack.pop().unwrap();
        next_free -= 1;
        let idx = next_free as u64;

        for &(child_idx, child_lcp) in &closed.pending_children {
            write_node(nodes_local, child_idx, child_lcp, idx);
        }
        for &leaf_pos in &closed.pending_leaves {
            set_leaf(leaf_pos, idx);
        }

        attach(nodes_local, &write_node, stack.last_mut().unwrap(), idx, closed.lcp);
    }

    debug_assert!(next_free >= node_window.start);
}

/// Counts how many real (non-root) intervals a sweep of `range` would open
/// and close, without writing any node or leaf-link output. Used by the
/// parallel driver to size each worker's node-index window before any
/// worker actually runs (see `crate::parallel::build`).
pub(crate) fn count_real_nodes(
    sa: &[u64],
    plcp: &[u32],
    range: std::ops::Range<usize>,
    min_match_length: u32,
    max_match_length: u32,
) -> usize {
    if range.is_empty() {
        return 0;
    }
    let clip_hi = max_match_length - (min_match_length - 1);
    let mut stack_lcp: Vec<u32> = vec![0];
    let mut pushes = 0usize;

    for i in range.rev() {
        let raw_plcp = plcp[sa[i] as usize];
        let lcp_prime = raw_plcp.saturating_sub(min_match_length - 1).min(clip_hi);

        while *stack_lcp.last().unwrap() > lcp_prime {
            stack_lcp.pop();
        }
        if lcp_prime > *stack_lcp.last().unwrap() {
            stack_lcp.push(lcp_prime);
            pushes += 1;
        }
    }
    pushes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle;

    fn build_single_threaded(block: &[u8], min_len: u32, max_len: u32) -> (Vec<u64>, Vec<u32>) {
        let arrays = oracle::build(block).unwrap();
        let n = block.len();
        let mut nodes = vec![node::root_word(); n];
        let mut leaf_link = vec![0u32; n];
        build_range(
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
    fn parent_always_precedes_child_index() {
        let (nodes, _) = build_single_threaded(b"abcabcabc", 2, 64);
        for (i, &w) in nodes.iter().enumerate().skip(1) {
            if node::lcp(w) == 0 {
                continue;
            }
            assert!((node::parent(w) as usize) < i);
        }
    }

    #[test]
    fn parent_lcp_is_strictly_less_than_child_lcp() {
        let (nodes, _) = build_single_threaded(b"abababab", 2, 64);
        for &w in nodes.iter().skip(1) {
            if node::lcp(w) == 0 {
                continue;
            }
            let parent_word = nodes[node::parent(w) as usize];
            assert!(node::lcp(parent_word) < node::lcp(w));
        }
    }

    #[test]
    fn leaf_link_reaches_root_within_bounded_steps() {
        let block = b"abcabcabcabc";
        let (nodes, leaf_link) = build_single_threaded(block, 2, 64);
        let max_steps = 64 - 2 + 1 + 1;
        for &start in &leaf_link {
            let mut idx = start as u64;
            let mut steps = 0;
            while idx != 0 {
                idx = node::parent(nodes[idx as usize]);
                steps += 1;
                assert!(steps <= max_steps, "leaf link walk did not reach root");
            }
        }
    }

    // Regression for a left-boundary leaf-link bug: the SA-leftmost
    // occurrence of an interval must reference that interval itself, not
    // whatever remains open on the stack afterward.
    #[test]
    fn left_boundary_of_an_interval_links_to_the_interval_it_bounds() {
        let (nodes, leaf_link) = build_single_threaded(b"abcabc", 2, 64);
        let idx = leaf_link[3] as usize;
        assert_ne!(idx, 0, "position 3 must not fall back to root");
        assert_eq!(node::lcp(nodes[idx]), 2);
    }

    // Regression for a flat-tree bug: a monotonically nested run must
    // produce a proper chain of nested intervals, not every level parented
    // directly to root.
    #[test]
    fn a_run_of_one_byte_nests_its_intervals() {
        let (nodes, leaf_link) = build_single_threaded(b"aaaaaa", 2, 64);
        let mut depths = std::collections::HashSet::new();
        for &start in &leaf_link {
            let mut idx = start as u64;
            let mut depth = 0;
            while idx != 0 {
                idx = node::parent(nodes[idx as usize]);
                depth += 1;
            }
            depths.insert(depth);
        }
        assert!(depths.len() > 1, "expected a nested chain of varying depths, found a flat tree");
    }
}
