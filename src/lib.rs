//! # dftbench - round-trip DFT benchmark harness
//!
//! Measures how fast and how accurately a forward/inverse discrete Fourier
//! transform handles synthetic one-dimensional signals.
//!
//! ## Features
//!
//! - **Synthetic signals**: Gaussian noise or a deterministic three-tone
//!   periodic signal, as plain amplitudes or `(timestamp, amplitude)` pairs
//! - **Pluggable transforms**: `rustfft`/`realfft` plans or a naive reference
//!   DFT behind one [`TransformAdapter`] trait
//! - **Accuracy**: Signal-to-Quantization-Error Ratio (SQER) of the round trip
//! - **Spectrum dumps**: raw complex bins, Hermitian-packed storage pairs, or
//!   CCS magnitudes, in a fixed-precision text format
//!
//! ## Example
//!
//! ```no_run
//! use dftbench::clock::MonotonicClock;
//! use dftbench::config::BenchConfig;
//! use dftbench::harness::Harness;
//! use dftbench::progress::Silent;
//! use dftbench::random::StdRandom;
//! use dftbench::transform::PlannedFft;
//!
//! let config = BenchConfig {
//!     invert: true,
//!     ..BenchConfig::default()
//! };
//! let mut harness = Harness::new(config, PlannedFft::new(), MonotonicClock::new())?;
//! let summary = harness.run(&mut StdRandom::from_entropy(), &mut Silent)?;
//! println!("{:.1} ns per transform", summary.average_ns());
//! # Ok::<(), dftbench::harness::BenchError>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

/// Immutable run configuration and defaults.
pub mod config;

/// Time- and frequency-domain buffers.
pub mod signal;

/// Random sample capability used by the Gaussian model.
pub mod random;

/// Gaussian and periodic signal construction.
pub mod generator;

/// Forward/inverse DFT adapters.
pub mod transform;

/// Signal energy, quantization-error energy and SQER.
pub mod metric;

/// Fixed-precision text encoders for signals and spectra.
pub mod codec;

pub mod clock;
pub mod progress;

/// Trial loop, aggregation and write-mode dumps.
pub mod harness;

pub mod summary;

pub use config::{BenchConfig, SignalConfig, SignalModel, SignalRepresentation, SpectrumEncoding};
pub use harness::{BenchError, BenchmarkSummary, Harness};
pub use signal::{Signal, Spectrum};
pub use transform::{NaiveDft, PlannedFft, TransformAdapter};
