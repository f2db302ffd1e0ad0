//! Argument definitions for the `esa-matchfind` binary.

use clap::Parser;

/// Run an enhanced-suffix-array match-finding pass over a file and report
/// the back-references found at every position.
#[derive(Parser, Debug)]
#[command(name = "esa-matchfind", version, about)]
pub struct Args {
    /// File to factorize.
    pub input: std::path::PathBuf,

    /// Minimum match length to report.
    #[arg(long, default_value_t = 4)]
    pub min_len: u32,

    /// Maximum match length to report.
    #[arg(long, default_value_t = 64)]
    pub max_len: u32,

    /// Worker threads used to build the tree (0 = pick automatically).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Print every match found instead of a per-position count histogram.
    #[arg(long)]
    pub dump: bool,

    /// Diagnostic verbosity (0 = silent). Overrides `ESA_MF_VERBOSE`.
    #[arg(short, long)]
    pub verbose: Option<u32>,
}
