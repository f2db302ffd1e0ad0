//! Verbosity-gated session diagnostics.
//!
//! This crate has no `log`/`tracing` dependency; instead it follows the same
//! macro-based display-level idiom used throughout the reference CLI this
//! crate's layout is patterned on: a single atomic verbosity level, read by a
//! `diag!` macro at call sites, rather than a trait-object logging facade.
//!
//! 0 = silent, 1 = lifecycle events (create/parse/destroy), 2 = worker
//! partitioning detail, 3 = per-position factorization trace (expensive;
//! intended for debugging small inputs only).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::config::{VERBOSITY_DEFAULT, VERBOSITY_ENV_VAR};

static VERBOSITY: OnceLock<AtomicU32> = OnceLock::new();

fn cell() -> &'static AtomicU32 {
    VERBOSITY.get_or_init(|| {
        let level = std::env::var(VERBOSITY_ENV_VAR)
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(VERBOSITY_DEFAULT);
        AtomicU32::new(level)
    })
}

/// Current diagnostic verbosity level.
pub fn verbosity() -> u32 {
    cell().load(Ordering::Relaxed)
}

/// Overrides the diagnostic verbosity level for the process, ignoring
/// `ESA_MF_VERBOSE`. Mainly useful for tests and the CLI harness's `--quiet`
/// / `--verbose` flags.
pub fn set_verbosity(level: u32) {
    cell().store(level, Ordering::Relaxed);
}

/// Emit a diagnostic line to stderr if `level <= verbosity()`.
///
/// Equivalent in spirit to the reference `DISPLAYLEVEL(l, ...)` macro.
#[macro_export]
macro_rules! diag {
    ($level:expr, $($arg:tt)*) => {
        if $level <= $crate::diag::verbosity() {
            eprintln!($($arg)*);
        }
    };
}
