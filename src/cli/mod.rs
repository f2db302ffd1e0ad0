//! Command-line harness: argument parsing for the `esa-matchfind` binary.

pub mod args;
