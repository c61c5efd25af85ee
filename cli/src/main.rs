//! Motd binary.
//!
//! Prints one randomly picked motto from an indexed plain text file, or
//! clears the index and PRNG state cache.

mod args;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use motd_core::{engine, CachePaths};
use tracing::{debug, info};

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    setup_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("motd: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let paths = CachePaths::under_home(&home);
    let config = args.to_config(&paths);
    debug!(?config, "resolved configuration");

    if args.clear_cache {
        paths.clear(&config.index_path, &config.state_path)?;
        info!(dir = %paths.cache_dir.display(), "cache cleared");
        return Ok(());
    }

    paths.ensure_cache_dir();

    let mut out = BufWriter::new(io::stdout().lock());
    let outcome = engine::run(&config, &mut out)?;
    debug!(
        record = outcome.selection.record,
        record_count = outcome.selection.record_count,
        via = ?outcome.selection.via,
        "done"
    );
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("MOTD_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
