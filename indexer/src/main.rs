#[macro_use]
extern crate log;

use anyhow::Context;
use bench_indexer::{write_index, ScanOptions, Scanner};
use clap::Parser as _;

mod cli;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    env_logger::try_init()?;

    let args = cli::CliArgs::parse();
    info!("{CRATE_NAME} {CRATE_VERSION}");
    info!("Using data directory: {}", args.data_dir.display());

    let scanner = Scanner::new(ScanOptions::default().strict(args.strict));
    let runs = scanner
        .scan(&args.data_dir)
        .context("Failed to scan benchmark data")?;
    debug!("Found {} runs", runs.len());

    write_index(&runs, &args.output).context("Failed to write index")?;

    println!("Wrote {} entries to {}", runs.len(), args.output.display());

    Ok(())
}
