//! Compile-time configuration constants.
//!
//! These mirror the role of a `config.rs` constants module: a single place
//! for the tunables that shape the bit-packed node encoding and the default
//! parallel fan-out, with environment-variable overrides for the handful of
//! knobs that make sense to flip without a rebuild.

/// Bits reserved for the pruned match length in a node word. See [`crate::node`].
pub const MATCH_BITS: u32 = 6;

/// Longest match length the tree can represent: `2^MATCH_BITS`.
pub const MAX_MATCH_LENGTH: u32 = 1 << MATCH_BITS;

/// Bit-width of the `offset` and `parent` fields: `(64 - MATCH_BITS) / 2`.
pub const FIELD_BITS: u32 = (64 - MATCH_BITS) / 2;

/// Largest block a session can be configured for: `2^FIELD_BITS - 1`.
///
/// One less than the field's full range, not the full `2^FIELD_BITS`: the
/// all-ones value in that range is reserved as [`crate::node::ROOT_OFFSET_SENTINEL`],
/// the "never stamped" marker every node's `offset` field starts at (see
/// `crate::node` docs). If the largest valid text position were allowed to
/// equal that sentinel, stamping it would be indistinguishable from having
/// never visited the node at all — silently dropping a match sourced at
/// exactly the last byte of a maximal-size block.
pub const MAX_BLOCK_SIZE: usize = (1usize << FIELD_BITS) - 1;

/// Smallest match length the engine will ever report.
pub const MIN_MATCH_LENGTH_FLOOR: u32 = 2;

/// Upper bound on the number of parallel tree-builder workers.
pub const MAX_WORKERS: usize = 256;

/// Default number of workers when `Session::new_parallel` is asked for 0
/// (i.e. "pick a sensible default"). Auto-detects rather than hard-coding a
/// count, unlike the reference config's fixed default worker count.
pub fn default_worker_count() -> usize {
    crate::util::cores::count_cores().min(MAX_WORKERS)
}

/// Name of the environment variable that overrides the diagnostic verbosity
/// level (see [`crate::diag`]). This crate has no persistent global CLI
/// state of its own, so the override lives in the environment rather than a
/// `-v` flag threaded through every call site.
pub const VERBOSITY_ENV_VAR: &str = "ESA_MF_VERBOSE";

/// Default diagnostic verbosity when `ESA_MF_VERBOSE` is unset.
pub const VERBOSITY_DEFAULT: u32 = 1;
