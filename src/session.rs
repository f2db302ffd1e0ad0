//! Session controller: the public, safe-Rust handle that replaces the
//! distilled spec's C-style `create`/`destroy`/`parse`/... surface (see
//! `SPEC_FULL.md` §4.10, §6). Lifecycle is create → parse → (rewind,
//! iterate)* → drop; `Drop` does the job a `destroy` call would, the same
//! way the reference layout replaces its `_free` functions with RAII.

use crate::config::{self, MAX_BLOCK_SIZE, MAX_WORKERS, MIN_MATCH_LENGTH_FLOOR};
use crate::error::{Error, Result};
use crate::factorize::{self, Match};
use crate::node;
use crate::oracle;
use crate::parallel::{self, WorkerSpan};
use crate::prefetch;
use crate::rewind;

/// An ESA match-finding session for blocks of up to `max_block_size` bytes.
///
/// Parsing (`parse`) may use multiple worker threads; every other operation
/// (`find_all_matches`, `find_best_match`, `advance`, `rewind`,
/// `get_position`) is strictly single-threaded and must not be called
/// concurrently on the same `Session` (see `SPEC_FULL.md` §5).
pub struct Session {
    max_block_size: usize,
    min_match_length: u32,
    max_match_length: u32,
    num_workers: usize,

    nodes: Vec<u64>,
    leaf_link: Vec<u32>,
    spans: Vec<WorkerSpan>,

    block_size: usize,
    position: u32,

    /// Rotating prefetch scratch (spec §9): fed each leaf a walk is about to
    /// start from. Pure accelerator, never consulted for correctness.
    prefetch: prefetch::Ring,
}

impl Session {
    /// Single-threaded session. Equivalent to `new_parallel(.., 1)`, and
    /// guaranteed to produce byte-identical trees to any `new_parallel`
    /// session parsing the same block (see property 9 in `SPEC_FULL.md` §8).
    pub fn new(max_block_size: usize, min_match_length: u32, max_match_length: u32) -> Result<Self> {
        Self::new_parallel(max_block_size, min_match_length, max_match_length, 1)
    }

    /// Parallel session. `num_workers == 0` picks an implementation default
    /// based on the detected core count (see [`config::default_worker_count`]).
    pub fn new_parallel(
        max_block_size: usize,
        min_match_length: u32,
        max_match_length: u32,
        num_workers: usize,
    ) -> Result<Self> {
        // `0 <= max_block_size <= MAX_BLOCK_SIZE` (SPEC_FULL.md §6): 0 is a
        // valid, if useless, configuration — such a session can never
        // successfully `parse` a non-empty block, which `parse` itself
        // already rejects as `BlockTooLarge` (every non-empty block exceeds
        // a max_block_size of 0).
        if max_block_size > MAX_BLOCK_SIZE {
            return Err(Error::BlockSizeOutOfRange {
                requested: max_block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        if min_match_length < MIN_MATCH_LENGTH_FLOOR {
            return Err(Error::MinMatchTooSmall {
                requested: min_match_length,
                floor: MIN_MATCH_LENGTH_FLOOR,
            });
        }
        if min_match_length > max_match_length {
            return Err(Error::MatchLengthRangeInverted {
                min: min_match_length,
                max: max_match_length,
            });
        }
        let clip_hi = config::MAX_MATCH_LENGTH + min_match_length - 1;
        if max_match_length > clip_hi {
            return Err(Error::MaxMatchLengthOutOfRange {
                requested: max_match_length,
                max: clip_hi,
            });
        }
        let num_workers = if num_workers == 0 {
            config::default_worker_count()
        } else {
            num_workers
        };
        if num_workers > MAX_WORKERS {
            return Err(Error::TooManyWorkers {
                requested: num_workers,
                max: MAX_WORKERS,
            });
        }

        crate::diag!(
            1,
            "esa_matchfinder: session created (max_block_size={max_block_size}, \
             min_match_length={min_match_length}, max_match_length={max_match_length}, \
             num_workers={num_workers})"
        );

        Ok(Session {
            max_block_size,
            min_match_length,
            max_match_length,
            num_workers,
            nodes: vec![node::root_word(); max_block_size],
            leaf_link: vec![0u32; max_block_size],
            spans: Vec::new(),
            block_size: 0,
            position: 0,
            prefetch: prefetch::Ring::new(),
        })
    }

    /// Rebuilds all derived state for `block`. Resets the current position
    /// to 0. `block.len()` must be in `1..=max_block_size`.
    pub fn parse(&mut self, block: &[u8]) -> Result<()> {
        if block.is_empty() || block.len() > self.max_block_size {
            return Err(Error::BlockTooLarge {
                requested: block.len(),
                max: self.max_block_size,
            });
        }

        let arrays = oracle::build(block)?;

        let n = block.len();
        for word in &mut self.nodes[..n] {
            *word = node::root_word();
        }
        for link in &mut self.leaf_link[..n] {
            *link = 0;
        }

        self.spans = parallel::build(
            &arrays.sa,
            &arrays.plcp,
            &mut self.nodes[..n],
            &mut self.leaf_link[..n],
            self.min_match_length,
            self.max_match_length,
            self.num_workers,
        );

        self.block_size = n;
        self.position = 0;

        crate::diag!(
            2,
            "esa_matchfinder: parse built {} worker span(s) over {n} bytes",
            self.spans.len()
        );

        Ok(())
    }

    /// Current factorization position (number of `find_*`/`advance` calls
    /// made since the last successful `parse` or `rewind`).
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Size of the block passed to the most recent successful `parse`.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Resets offsets so the next `find_*` call behaves as if only positions
    /// `0..target` had been factorized. `target` must be in `0..block_size`.
    pub fn rewind(&mut self, target: u32) -> Result<()> {
        if (target as usize) >= self.block_size {
            return Err(Error::RewindTargetOutOfRange {
                requested: target,
                block_size: self.block_size as u32,
            });
        }
        crate::diag!(2, "esa_matchfinder: rewind to position {target}");
        rewind::rewind(
            &mut self.nodes[..self.block_size],
            &self.leaf_link[..self.block_size],
            &self.spans,
            target,
            self.min_match_length,
        );
        self.position = target;
        Ok(())
    }

    /// Emits every distance-optimal match for the current position into
    /// `out` (cleared first), then advances the position by one. Returns
    /// the number of matches emitted.
    pub fn find_all_matches(&mut self, out: &mut Vec<Match>) -> usize {
        out.clear();
        self.prefetch.touch(&self.nodes, self.leaf_link[self.position as usize] as u64);
        let n = factorize::walk_all_matches(
            &mut self.nodes[..self.block_size],
            &self.leaf_link[..self.block_size],
            self.position,
            self.min_match_length,
            out,
        );
        self.position += 1;
        n
    }

    /// Returns only the single longest match for the current position, then
    /// advances the position by one. `Match { length: 0, offset: 0 }` if
    /// there is none.
    pub fn find_best_match(&mut self) -> Match {
        self.prefetch.touch(&self.nodes, self.leaf_link[self.position as usize] as u64);
        let m = factorize::walk_best_match(
            &mut self.nodes[..self.block_size],
            &self.leaf_link[..self.block_size],
            self.position,
            self.min_match_length,
        );
        self.position += 1;
        m
    }

    /// Stamps `n` consecutive positions without emitting any matches,
    /// advancing the position by `n`.
    pub fn advance(&mut self, n: u32) {
        for _ in 0..n {
            self.prefetch.touch(&self.nodes, self.leaf_link[self.position as usize] as u64);
            factorize::walk_stamp_only(
                &mut self.nodes[..self.block_size],
                &self.leaf_link[..self.block_size],
                self.position,
                self.min_match_length,
            );
            self.position += 1;
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        crate::diag!(1, "esa_matchfinder: session destroyed");
    }
}
