use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::LevelFilter;

use dftbench::clock::MonotonicClock;
use dftbench::config::{
    BenchConfig, SignalConfig, SignalModel, SignalRepresentation, SpectrumEncoding,
    DEFAULT_LOOPS, DEFAULT_MEAN, DEFAULT_SIZE, DEFAULT_STD_DEV, DEFAULT_TRIALS,
};
use dftbench::harness::{Artifact, DirectorySink, Harness};
use dftbench::progress::Progress;
use dftbench::random::StdRandom;
use dftbench::summary::{render_report, render_sqer_only, SummaryRecord};
use dftbench::transform::{NaiveDft, PlannedFft, TransformAdapter};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Representation {
    /// Plain amplitudes
    Real,
    /// (timestamp, amplitude) pairs
    Complex,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Raw,
    Hermitian,
    Ccs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// rustfft/realfft plans
    Planned,
    /// Direct O(n²) DFT
    Naive,
}

/// Benchmark round-trip DFT speed and accuracy on synthetic signals.
#[derive(Parser, Debug)]
#[command(name = "dftbench", version)]
pub struct Args {
    /// Samples per signal
    #[arg(short, long, env = "DFTBENCH_SIZE", default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Number of timed trials
    #[arg(short, long, env = "DFTBENCH_COUNT", default_value_t = DEFAULT_TRIALS)]
    pub count: usize,

    /// Transform repetitions inside one timed trial
    #[arg(short, long = "loop", env = "DFTBENCH_LOOP", default_value_t = DEFAULT_LOOPS)]
    pub loops: usize,

    /// Mean of the Gaussian model
    #[arg(
        short,
        long,
        env = "DFTBENCH_MEAN",
        default_value_t = DEFAULT_MEAN,
        allow_negative_numbers = true
    )]
    pub mean: f64,

    /// Standard deviation of the Gaussian model
    #[arg(short, long, env = "DFTBENCH_DEVIATION", default_value_t = DEFAULT_STD_DEV)]
    pub deviation: f64,

    /// Time the inverse transform too and measure SQER
    #[arg(short, long)]
    pub invert: bool,

    /// Use the deterministic multi-tone signal instead of Gaussian noise
    #[arg(short, long)]
    pub periodic: bool,

    /// Dump one round trip to text files instead of timing
    #[arg(short, long)]
    pub write: bool,

    /// Print only the average SQER (implies --invert)
    #[arg(long)]
    pub sqer_only: bool,

    #[arg(long, value_enum, env = "DFTBENCH_REPRESENTATION", default_value_t = Representation::Real)]
    pub representation: Representation,

    /// Spectrum layout used by --write
    #[arg(long, value_enum, env = "DFTBENCH_ENCODING", default_value_t = Encoding::Hermitian)]
    pub encoding: Encoding,

    #[arg(long, value_enum, env = "DFTBENCH_BACKEND", default_value_t = Backend::Planned)]
    pub backend: Backend,

    /// Directory receiving signal.txt, spectrum.txt and inverse.txt
    #[arg(long, env = "DFTBENCH_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed for the Gaussian model; drawn from the OS when absent
    #[arg(long, env = "DFTBENCH_SEED")]
    pub seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            signal: SignalConfig {
                size: self.size,
                model: if self.periodic {
                    SignalModel::Periodic
                } else {
                    SignalModel::Gaussian
                },
                representation: match self.representation {
                    Representation::Real => SignalRepresentation::RealOnly,
                    Representation::Complex => SignalRepresentation::ComplexPair,
                },
                mean: self.mean,
                std_dev: self.deviation,
                ..SignalConfig::default()
            },
            trials: self.count,
            loops: self.loops,
            invert: self.invert,
            sqer_only: self.sqer_only,
            encoding: match self.encoding {
                Encoding::Raw => SpectrumEncoding::Raw,
                Encoding::Hermitian => SpectrumEncoding::HermitianPacked,
                Encoding::Ccs => SpectrumEncoding::CcsMagnitude,
            },
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn random_source(&self) -> StdRandom {
        match self.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        }
    }
}

pub fn make_backend(backend: Backend) -> Box<dyn TransformAdapter> {
    match backend {
        Backend::Planned => Box::new(PlannedFft::new()),
        Backend::Naive => Box::new(NaiveDft::new()),
    }
}

/// Percent-complete bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn stderr() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos:>3} %") {
            bar.set_style(style);
        }
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::hidden()),
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Progress for BarProgress {
    fn update(&mut self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Execute one invocation, writing the report to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W, progress: &mut dyn Progress) -> Result<()> {
    // CCS pairs only line up with the packed real-input spectrum
    if args.encoding == Encoding::Ccs && args.representation == Representation::Complex {
        bail!("--encoding ccs requires --representation real");
    }
    let config = args.bench_config();
    let mut harness = Harness::new(config, make_backend(args.backend), MonotonicClock::new())
        .context("invalid benchmark configuration")?;
    let mut rng = args.random_source();

    if args.write {
        let mut sink = DirectorySink::new(&args.output_dir);
        let report = harness
            .write_artifacts(&mut rng, &mut sink)
            .with_context(|| format!("write mode failed in {}", sink.dir().display()))?;
        for artifact in Artifact::ALL {
            writeln!(out, "Wrote {}", sink.path(artifact).display())?;
        }
        writeln!(out, "SQER:       {:.8} dB", report.error.sqer_db())?;
        return Ok(());
    }

    let summary = harness
        .run(&mut rng, progress)
        .context("benchmark run failed")?;
    if args.json {
        let record = SummaryRecord::new(harness.transform().name(), harness.config(), &summary);
        serde_json::to_writer_pretty(&mut *out, &record).context("failed to encode summary")?;
        writeln!(out)?;
    } else if args.sqer_only {
        out.write_all(render_sqer_only(&summary).as_bytes())?;
    } else {
        out.write_all(render_report(harness.config(), &summary).as_bytes())?;
    }
    Ok(())
}
