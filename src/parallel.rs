//! Parallel builder driver.
//!
//! The sweep in [`crate::builder`] is embarrassingly parallel *between*
//! independent prunes: any SA index `i` with `plcp[sa[i]] < min_match_length`
//! collapses the monotone stack back to the bare root sentinel, so the
//! state before and after that index is identical. This driver finds one
//! such "breakpoint" per worker partition, then lets each worker build its
//! own final SA range independently — mirroring the reference thread-pool
//! idiom (`rayon::scope` fanning out over a partition with a single barrier,
//! as in the reference multi-threaded compression pipeline) rather than a
//! hand-rolled work queue.
//!
//! A worker's SA range and its node-index *window* are two different
//! things. The single-threaded sweep draws every real node's index from one
//! counter that counts down across the *whole* block as intervals close,
//! so a partition that happens to contain fewer real intervals than its raw
//! SA-index width gets correspondingly fewer node slots — not the same
//! slots a same-sized SA range elsewhere would get. To reproduce that
//! exactly, this driver first counts, per partition and without writing
//! anything, how many real intervals each partition's sweep will close (see
//! [`builder::count_real_nodes`]), then lays those counts end to end from
//! the top of the node array down — a right-to-left running total, because
//! that's the order the single-threaded sweep itself visits partitions in.
//! Each worker's window is sized to its own count, so workers never need to
//! coordinate at runtime; the counting pass is what makes the windows land
//! exactly where a sequential pass would have put them.

use std::ops::Range;

use crate::builder;
use crate::node;

/// `[tree_start, tree_end)` span of node indices a single worker built.
/// Recorded per worker so `rewind` can clear exactly the spans a pass
/// touched without scanning the whole node array. This is the worker's
/// node-index *window*, not its SA range — the two can differ in size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSpan {
    pub tree_start: usize,
    pub tree_end: usize,
}

/// Wraps a raw pointer to make it `Send`/`Sync` for the scoped fan-out below.
///
/// SAFETY: the suffix array is a permutation, so distinct workers (which own
/// disjoint, non-overlapping ranges of SA indices) always write to disjoint
/// text positions through this pointer — never the same `usize` offset from
/// two threads. That disjointness, not any synchronization, is what makes
/// sharing this pointer sound; see the reference `SyncCDictPtr` idiom this
/// is patterned on for sharing an otherwise-`!Sync` raw pointer across a
/// rayon fan-out.
struct SharedLeafLinkPtr(*mut u32);
unsafe impl Send for SharedLeafLinkPtr {}
unsafe impl Sync for SharedLeafLinkPtr {}

impl SharedLeafLinkPtr {
    #[inline]
    unsafe fn set(&self, pos: usize, idx: u64) {
        *self.0.add(pos) = idx as u32;
    }
}

/// Builds the whole tree using `num_workers` workers (`num_workers == 1`
/// takes the direct single-threaded path with no thread spawned at all, and
/// must produce byte-identical node/leaf-link arrays to calling
/// [`crate::builder::build_range`] directly over `0..block_size`).
pub fn build(
    sa: &[u64],
    plcp: &[u32],
    nodes: &mut [u64],
    leaf_link: &mut [u32],
    min_match_length: u32,
    max_match_length: u32,
    num_workers: usize,
) -> Vec<WorkerSpan> {
    let block_size = sa.len();
    debug_assert_eq!(nodes.len(), block_size);
    debug_assert_eq!(leaf_link.len(), block_size);

    if block_size == 0 {
        return Vec::new();
    }

    if num_workers <= 1 {
        builder::build_range(
            sa,
            plcp,
            nodes,
            |pos, idx| leaf_link[pos] = idx as u32,
            0..block_size,
            0..block_size,
            min_match_length,
            max_match_length,
        );
        return vec![WorkerSpan {
            tree_start: 0,
            tree_end: block_size,
        }];
    }

    let partitions = partition_indices(block_size, num_workers);
    let breakpoints: Vec<Option<usize>> = partitions
        .iter()
        .map(|p| find_rightmost_breakpoint(sa, plcp, p.clone(), min_match_length))
        .collect();

    let ranges = ranges_from_breakpoints(&breakpoints, block_size);
    let windows = node_windows(sa, plcp, &ranges, block_size, min_match_length, max_match_length);

    let leading_gap = windows.first().map(|w| w.start).unwrap_or(block_size);
    let (_dead, mut remaining) = nodes.split_at_mut(leading_gap);

    let leaf_ptr = SharedLeafLinkPtr(leaf_link.as_mut_ptr());
    let mut slices: Vec<(&mut [u64], Range<usize>, Range<usize>)> = Vec::with_capacity(ranges.len());
    for (range, window) in ranges.iter().zip(windows.iter()) {
        let (head, tail) = remaining.split_at_mut(window.len());
        slices.push((head, range.clone(), window.clone()));
        remaining = tail;
    }

    rayon::scope(|scope| {
        for (nodes_local, range, window) in slices.into_iter() {
            let leaf_ptr = &leaf_ptr;
            let sa = &sa;
            let plcp = &plcp;
            scope.spawn(move |_| {
                builder::build_range(
                    sa,
                    plcp,
                    nodes_local,
                    |pos, idx| unsafe { leaf_ptr.set(pos, idx) },
                    range,
                    window,
                    min_match_length,
                    max_match_length,
                );
            });
        }
    });

    windows
        .into_iter()
        .map(|w| WorkerSpan {
            tree_start: w.start,
            tree_end: w.end,
        })
        .collect()
}

/// Splits `[0, block_size)` into `num_workers` chunks, boundaries snapped to
/// a 16-index grid so no partition straddles a cache line's worth of SA
/// entries awkwardly.
fn partition_indices(block_size: usize, num_workers: usize) -> Vec<Range<usize>> {
    const ALIGN: usize = 16;
    let mut bounds = Vec::with_capacity(num_workers + 1);
    bounds.push(0usize);
    for w in 1..num_workers {
        let raw = block_size * w / num_workers;
        let snapped = (raw / ALIGN) * ALIGN;
        bounds.push(snapped.clamp(*bounds.last().unwrap(), block_size));
    }
    bounds.push(block_size);
    bounds.dedup();
    let mut out = Vec::with_capacity(bounds.len().saturating_sub(1));
    for w in bounds.windows(2) {
        out.push(w[0]..w[1]);
    }
    out
}

/// Largest `i` in `partition` with `plcp[sa[i]] < min_match_length`, or
/// `None` if the partition is densely matched throughout.
fn find_rightmost_breakpoint(
    sa: &[u64],
    plcp: &[u32],
    partition: Range<usize>,
    min_match_length: u32,
) -> Option<usize> {
    partition
        .rev()
        .find(|&i| plcp[sa[i] as usize] < min_match_length)
}

/// Turns the per-partition breakpoints into final, possibly unevenly sized,
/// build ranges. A partition with no breakpoint contributes nothing; its
/// neighbor's range grows to cover the gap.
fn ranges_from_breakpoints(breakpoints: &[Option<usize>], block_size: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(breakpoints.len());
    let mut lo = 0usize;
    for (k, bp) in breakpoints.iter().enumerate() {
        if k + 1 == breakpoints.len() {
            ranges.push(lo..block_size);
            break;
        }
        match bp {
            Some(b) if *b > lo => {
                ranges.push(lo..*b);
                lo = *b;
            }
            _ => ranges.push(lo..lo),
        }
    }
    ranges
}

/// Computes each range's node-index window by counting (without writing)
/// how many real intervals its sweep closes, then laying those counts end
/// to end against the top of the node array, right to left — the same
/// order and the same running total the single-threaded sweep itself would
/// produce. See the module docs for why this, and not one window per SA
/// range, is what makes parallel and sequential builds agree.
fn node_windows(
    sa: &[u64],
    plcp: &[u32],
    ranges: &[Range<usize>],
    block_size: usize,
    min_match_length: u32,
    max_match_length: u32,
) -> Vec<Range<usize>> {
    let counts: Vec<usize> = ranges
        .iter()
        .map(|r| builder::count_real_nodes(sa, plcp, r.clone(), min_match_length, max_match_length))
        .collect();

    let mut windows = vec![0..0usize; ranges.len()];
    let mut window_end = block_size;
    for k in (0..ranges.len()).rev() {
        let window_start = window_end - counts[k];
        windows[k] = window_start..window_end;
        window_end = window_start;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle;

    fn build_and_compare(block: &[u8], min_len: u32, max_len: u32, workers: usize) {
        let arrays = oracle::build(block).unwrap();
        let n = block.len();

        let mut nodes_seq = vec![node::root_word(); n];
        let mut leaf_seq = vec![0u32; n];
        build(
            &arrays.sa,
            &arrays.plcp,
            &mut nodes_seq,
            &mut leaf_seq,
            min_len,
            max_len,
            1,
        );

        let mut nodes_par = vec![node::root_word(); n];
        let mut leaf_par = vec![0u32; n];
        build(
            &arrays.sa,
            &arrays.plcp,
            &mut nodes_par,
            &mut leaf_par,
            min_len,
            max_len,
            workers,
        );

        assert_eq!(nodes_seq, nodes_par, "node arrays diverged for {workers} workers");
        assert_eq!(leaf_seq, leaf_par, "leaf links diverged for {workers} workers");
    }

    #[test]
    fn parallel_build_matches_sequential_build() {
        let block = b"the quick brown fox jumps over the lazy dog. the quick brown fox.";
        for workers in [1, 2, 3, 4, 8] {
            build_and_compare(block, 2, 64, workers);
        }
    }

    #[test]
    fn dense_match_input_still_matches_sequential() {
        let block = vec![b'x'; 200];
        build_and_compare(&block, 2, 8, 4);
    }

    // Regression for a parallel/sequential divergence bug: an input whose
    // partitions each contain an interior prune point (so each partition's
    // real-node count is strictly less than its raw SA-index width) used to
    // land real nodes at different indices than the sequential build.
    #[test]
    fn unevenly_pruned_partitions_still_match_sequential() {
        let block = b"ababXcdcdXefefXghghXijijXklklXmnmnXopopXqrqrXstst";
        for workers in [2, 3, 4, 5] {
            build_and_compare(block, 2, 64, workers);
        }
    }
}
