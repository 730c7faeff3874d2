//! Trial loop: generate, transform, time, measure, aggregate.
//!
//! A run in timing mode repeats the following for every trial:
//!
//! 1. overwrite the whole signal buffer with fresh samples,
//! 2. copy it aside when round-trip accuracy is measured,
//! 3. read the clock, run `loops` forward transforms (or forward + inverse
//!    pairs in invert mode), read the clock again,
//! 4. compare the reconstruction against the copy,
//! 5. fold the timing and error into the summary and report progress.
//!
//! Only step 3 sits between the clock readings. Any generation or
//! transform failure aborts the run.
//!
//! Write mode runs a single forward/inverse round trip and dumps the input,
//! the spectrum and the reconstruction through an [`ArtifactSink`].

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::mem;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::clock::Clock;
use crate::codec::{encode_signal, encode_spectrum, write_lines};
use crate::config::{BenchConfig, ConfigError};
use crate::generator::{generate, regenerate};
use crate::metric::{ErrorSample, MetricError};
use crate::progress::{PercentTracker, Progress};
use crate::random::RandomSource;
use crate::signal::{Signal, Spectrum};
use crate::transform::{TransformAdapter, TransformError};

/// Everything that can abort a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("round-trip comparison failed: {0}")]
    LengthMismatch(#[from] MetricError),
    #[error("transform failed: {0}")]
    TransformFailure(#[from] TransformError),
    #[error("failed to write {artifact}: {source}")]
    IoFailure {
        artifact: Artifact,
        #[source]
        source: io::Error,
    },
}

/// Text dumps produced in write mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Input signal before the forward transform.
    Signal,
    /// Forward spectrum in the configured encoding.
    Spectrum,
    /// Signal after the inverse transform.
    Reconstruction,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Signal, Artifact::Spectrum, Artifact::Reconstruction];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Signal => "signal.txt",
            Artifact::Spectrum => "spectrum.txt",
            Artifact::Reconstruction => "inverse.txt",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Destination for write-mode dumps.
pub trait ArtifactSink {
    fn write(&mut self, artifact: Artifact, lines: &[String]) -> io::Result<()>;
}

/// Writes each artifact to its own file inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifact: Artifact, lines: &[String]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(artifact);
        debug!("writing {} lines to {}", lines.len(), path.display());
        let mut out = BufWriter::new(File::create(path)?);
        write_lines(&mut out, lines)
    }
}

/// Outcome of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    pub elapsed: Duration,
    pub error: Option<ErrorSample>,
}

/// Aggregate over all trials of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSummary {
    pub trials: usize,
    pub loops: usize,
    pub operations_per_trial: usize,
    pub total: Duration,
    /// Mean SQER over trials, present when accuracy was measured.
    pub average_sqer_db: Option<f64>,
}

impl BenchmarkSummary {
    /// Transform operations timed over the whole run.
    pub fn operations(&self) -> usize {
        self.trials * self.operations_per_trial
    }

    /// Mean nanoseconds per transform operation.
    pub fn average_ns(&self) -> f64 {
        self.total.as_nanos() as f64 / self.operations() as f64
    }

    pub fn average_us(&self) -> f64 {
        self.average_ns() / 1000.0
    }
}

/// Running totals folded into a [`BenchmarkSummary`].
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    loops: usize,
    operations_per_trial: usize,
    trials: usize,
    total: Duration,
    sqer_sum: f64,
    measured: bool,
}

impl SummaryBuilder {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            loops: config.loops,
            operations_per_trial: config.operations_per_trial(),
            trials: 0,
            total: Duration::ZERO,
            sqer_sum: 0.0,
            measured: false,
        }
    }

    pub fn record(&mut self, result: &TrialResult) {
        self.trials += 1;
        self.total += result.elapsed;
        if let Some(sample) = result.error {
            self.sqer_sum += sample.sqer_db();
            self.measured = true;
        }
    }

    pub fn finish(self) -> BenchmarkSummary {
        let average_sqer_db = if self.measured && self.trials > 0 {
            Some(self.sqer_sum / self.trials as f64)
        } else {
            None
        };
        BenchmarkSummary {
            trials: self.trials,
            loops: self.loops,
            operations_per_trial: self.operations_per_trial,
            total: self.total,
            average_sqer_db,
        }
    }
}

/// Result of a write-mode run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteReport {
    pub error: ErrorSample,
}

/// Buffers allocated once per run and reused by every trial.
struct TrialBuffers {
    signal: Signal,
    original: Signal,
    output: Spectrum,
}

impl TrialBuffers {
    fn new(config: &BenchConfig) -> Self {
        let repr = config.signal.representation;
        let size = config.signal.size;
        Self {
            signal: Signal::zeroed(repr, size),
            original: if config.measures_accuracy() {
                Signal::zeroed(repr, size)
            } else {
                Signal::default()
            },
            output: if config.performs_inverse() {
                Spectrum::default()
            } else {
                Spectrum::zeroed(repr, size)
            },
        }
    }
}

/// Drives a transform adapter through a configured benchmark.
pub struct Harness<T, C> {
    config: BenchConfig,
    transform: T,
    clock: C,
}

impl<T: TransformAdapter, C: Clock> Harness<T, C> {
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`] before any work is done when
    /// `config` is invalid.
    pub fn new(config: BenchConfig, transform: T, clock: C) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self {
            config,
            transform,
            clock,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Run every configured trial and summarise them.
    ///
    /// # Errors
    ///
    /// Aborts on the first generation, transform or comparison failure.
    pub fn run(
        &mut self,
        rng: &mut dyn RandomSource,
        progress: &mut dyn Progress,
    ) -> Result<BenchmarkSummary, BenchError> {
        let trials = self.config.trials;
        info!(
            "starting {trials} trials of {} points with the {} backend ({} ops per trial)",
            self.config.signal.size,
            self.transform.name(),
            self.config.operations_per_trial()
        );

        let mut buffers = TrialBuffers::new(&self.config);
        let mut summary = SummaryBuilder::new(&self.config);
        let mut tracker = PercentTracker::new(trials);
        if let Some(percent) = tracker.advance(0) {
            progress.update(percent);
        }

        for trial in 0..trials {
            regenerate(&self.config.signal, rng, &mut buffers.signal)?;
            let result = self.run_trial(&mut buffers)?;
            summary.record(&result);
            if let Some(percent) = tracker.advance(trial + 1) {
                progress.update(percent);
            }
        }
        progress.finish();

        let summary = summary.finish();
        info!(
            "finished in {} ns, {:.3} ns per operation",
            summary.total.as_nanos(),
            summary.average_ns()
        );
        if let Some(db) = summary.average_sqer_db {
            if db.is_infinite() {
                warn!("average SQER is {db}: at least one trial reconstructed its input exactly");
            }
        }
        Ok(summary)
    }

    fn run_trial(&mut self, buffers: &mut TrialBuffers) -> Result<TrialResult, BenchError> {
        let loops = self.config.loops;
        if !self.config.performs_inverse() {
            let start = self.clock.now();
            for _ in 0..loops {
                self.transform
                    .forward_into(&buffers.signal, &mut buffers.output)?;
            }
            let elapsed = self.clock.now().saturating_sub(start);
            return Ok(TrialResult {
                elapsed,
                error: None,
            });
        }

        let measure = self.config.measures_accuracy();
        if measure {
            buffers.original.copy_from(&buffers.signal);
        }
        let start = self.clock.now();
        for _ in 0..loops {
            let spectrum = self.transform.forward(mem::take(&mut buffers.signal))?;
            buffers.signal = self.transform.inverse(spectrum)?;
        }
        let elapsed = self.clock.now().saturating_sub(start);

        let error = if measure {
            Some(ErrorSample::between(&buffers.original, &buffers.signal)?)
        } else {
            None
        };
        Ok(TrialResult { elapsed, error })
    }

    /// Generate one signal, round-trip it once and dump all three stages.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::IoFailure`] naming the artifact that could not
    /// be written, or any generation/transform failure.
    pub fn write_artifacts(
        &mut self,
        rng: &mut dyn RandomSource,
        sink: &mut dyn ArtifactSink,
    ) -> Result<WriteReport, BenchError> {
        let signal = generate(&self.config.signal, rng)?;
        let original = signal.clone();
        emit(sink, Artifact::Signal, &encode_signal(&original))?;

        let spectrum = self.transform.forward(signal)?;
        emit(
            sink,
            Artifact::Spectrum,
            &encode_spectrum(&spectrum, self.config.encoding),
        )?;

        let reconstructed = self.transform.inverse(spectrum)?;
        emit(sink, Artifact::Reconstruction, &encode_signal(&reconstructed))?;

        let error = ErrorSample::between(&original, &reconstructed)?;
        info!("write mode round trip: SQER {:.3} dB", error.sqer_db());
        Ok(WriteReport { error })
    }
}

fn emit(sink: &mut dyn ArtifactSink, artifact: Artifact, lines: &[String]) -> Result<(), BenchError> {
    sink.write(artifact, lines)
        .map_err(|source| BenchError::IoFailure { artifact, source })
}
