use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use dftbench_cli::{run, Args, BarProgress};

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let mut progress = if args.json || args.write {
        BarProgress::hidden()
    } else {
        BarProgress::stderr()
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out, &mut progress)?;
    out.flush()?;
    Ok(())
}
