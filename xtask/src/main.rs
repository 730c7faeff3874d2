#[cfg(not(test))]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for dftbench")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    /// fmt followed by clippy
    Analyze,
    /// Criterion benchmarks
    Bench,
    /// Release run of the dftbench binary
    Timing {
        /// Arguments passed through to dftbench
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[cfg(not(test))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    let status = match cli.command {
        Commands::Build => build_command(&cfg).status()?,
        Commands::Test => test_command(&cfg).status()?,
        Commands::Clippy => clippy_command().status()?,
        Commands::Fmt => fmt_command().status()?,
        Commands::Analyze => return run_in_sequence(fmt_command(), clippy_command()),
        Commands::Bench => bench_command(&cfg).status()?,
        Commands::Timing { args } => timing_command(&cfg, &args).status()?,
    };
    if !status.success() {
        bail!("task failed with {status}");
    }
    Ok(())
}
