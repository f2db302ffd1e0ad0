//! Binary entry point for the `esa-matchfind` command-line tool.
//!
//! Reads an input file, builds a [`esa_matchfinder::Session`] sized to that
//! file, runs a full left-to-right factorization pass over it, and reports
//! either a per-position match-count histogram or (with `--dump`) the full
//! match list. Corresponds to the CLI harness described in `SPEC_FULL.md`
//! §4.11.

use clap::Parser;

use esa_matchfinder::cli::args::Args;
use esa_matchfinder::Session;

fn run(args: Args) -> anyhow::Result<i32> {
    if let Some(level) = args.verbose {
        esa_matchfinder::diag::set_verbosity(level);
    }

    let block = std::fs::read(&args.input)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", args.input.display()))?;

    if block.is_empty() {
        eprintln!("esa-matchfind: {} is empty, nothing to factorize", args.input.display());
        return Ok(1);
    }

    let mut session = Session::new_parallel(block.len(), args.min_len, args.max_len, args.workers)?;
    session.parse(&block)?;

    let mut out = Vec::new();
    let mut histogram = vec![0u32; block.len()];

    for pos in 0..block.len() {
        session.find_all_matches(&mut out);
        histogram[pos] = out.len() as u32;
        if args.dump {
            for m in &out {
                println!("{pos}\t{}\t{}", m.length, m.offset);
            }
        }
    }

    if !args.dump {
        let total: u64 = histogram.iter().map(|&n| n as u64).sum();
        let with_matches = histogram.iter().filter(|&&n| n > 0).count();
        println!("positions: {}", block.len());
        println!("positions with at least one match: {with_matches}");
        println!("total matches emitted: {total}");
    }

    Ok(0)
}

fn main() {
    let args = Args::parse();
    let exit_code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("esa-matchfind: {e}");
            1
        }
    };
    std::process::exit(exit_code);
}
