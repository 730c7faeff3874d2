//! Immutable run configuration.
//!
//! A [`BenchConfig`] is built once at startup and handed to every component
//! by reference. Nothing in the crate keeps process-wide mutable settings.

use serde::Serialize;
use thiserror::Error;

/// Default number of samples per buffer.
pub const DEFAULT_SIZE: usize = 8192;
/// Default number of timed trials.
pub const DEFAULT_TRIALS: usize = 1000;
/// Default number of transform repetitions inside one timed trial.
pub const DEFAULT_LOOPS: usize = 1;
/// Default mean of the Gaussian model.
pub const DEFAULT_MEAN: f64 = 0.5;
/// Default standard deviation of the Gaussian model.
pub const DEFAULT_STD_DEV: f64 = 0.2;
/// Default spacing between timestamps of the complex-pair representation.
pub const DEFAULT_SAMPLE_SPACING: f64 = 0.2;
/// Step between consecutive time points of the periodic model.
pub const PERIODIC_STEP: f64 = 0.01;

/// Errors raised when a configuration cannot drive a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("buffer size must be positive")]
    ZeroSize,
    #[error("trial count must be positive")]
    ZeroTrials,
    #[error("loops per trial must be positive")]
    ZeroLoops,
    #[error("standard deviation must be finite and positive, got {0}")]
    NonPositiveStdDev(f64),
    #[error("mean must be finite, got {0}")]
    NonFiniteMean(f64),
    #[error("sample spacing must be finite, got {0}")]
    NonFiniteSpacing(f64),
}

/// Generative model used to fill the signal buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalModel {
    #[default]
    Gaussian,
    Periodic,
}

/// Sample layout of a [`Signal`](crate::signal::Signal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalRepresentation {
    /// One amplitude per sample.
    #[default]
    RealOnly,
    /// `(timestamp, amplitude)` stored as the real and imaginary parts of a
    /// complex sample.
    ComplexPair,
}

/// Text layout used when dumping a forward spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpectrumEncoding {
    /// Complex bins as `re, im` lines.
    Raw,
    /// Consecutive storage values as `data[i], data[i + 1]` lines.
    #[default]
    HermitianPacked,
    /// One magnitude per packed pair from the lower half of the storage.
    CcsMagnitude,
}

/// Parameters of the synthetic signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalConfig {
    pub size: usize,
    pub model: SignalModel,
    pub representation: SignalRepresentation,
    pub mean: f64,
    pub std_dev: f64,
    pub sample_spacing: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            model: SignalModel::default(),
            representation: SignalRepresentation::default(),
            mean: DEFAULT_MEAN,
            std_dev: DEFAULT_STD_DEV,
            sample_spacing: DEFAULT_SAMPLE_SPACING,
        }
    }
}

impl SignalConfig {
    /// Check the invariants every generator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero size, a non-positive or non-finite
    /// standard deviation, or non-finite mean and spacing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(ConfigError::NonPositiveStdDev(self.std_dev));
        }
        if !self.mean.is_finite() {
            return Err(ConfigError::NonFiniteMean(self.mean));
        }
        if !self.sample_spacing.is_finite() {
            return Err(ConfigError::NonFiniteSpacing(self.sample_spacing));
        }
        Ok(())
    }
}

/// Full description of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchConfig {
    pub signal: SignalConfig,
    pub trials: usize,
    pub loops: usize,
    /// Run the inverse transform after every forward transform.
    pub invert: bool,
    /// Report only the average SQER. Implies `invert`.
    pub sqer_only: bool,
    pub encoding: SpectrumEncoding,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            trials: DEFAULT_TRIALS,
            loops: DEFAULT_LOOPS,
            invert: false,
            sqer_only: false,
            encoding: SpectrumEncoding::default(),
        }
    }
}

impl BenchConfig {
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in the trial settings or in
    /// the nested [`SignalConfig`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.loops == 0 {
            return Err(ConfigError::ZeroLoops);
        }
        self.signal.validate()
    }

    /// Whether each loop runs forward and inverse transforms.
    pub fn performs_inverse(&self) -> bool {
        self.invert || self.sqer_only
    }

    /// Round-trip error is only observable when the inverse runs.
    pub fn measures_accuracy(&self) -> bool {
        self.performs_inverse()
    }

    /// Transform operations timed inside one trial.
    pub fn operations_per_trial(&self) -> usize {
        self.loops * if self.performs_inverse() { 2 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = BenchConfig::default();
        assert_eq!(cfg.signal.size, 8192);
        assert_eq!(cfg.trials, 1000);
        assert_eq!(cfg.signal.mean, 0.5);
        assert_eq!(cfg.signal.std_dev, 0.2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = BenchConfig::default();
        cfg.signal.size = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSize));

        let mut cfg = BenchConfig::default();
        cfg.trials = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTrials));

        let mut cfg = BenchConfig::default();
        cfg.loops = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLoops));

        for std_dev in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut cfg = BenchConfig::default();
            cfg.signal.std_dev = std_dev;
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::NonPositiveStdDev(_))
            ));
        }

        let mut cfg = BenchConfig::default();
        cfg.signal.mean = f64::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::NonFiniteMean(_))));
    }

    #[test]
    fn operations_per_trial_counts_inverse() {
        let mut cfg = BenchConfig::default();
        assert_eq!(cfg.operations_per_trial(), 1);
        cfg.invert = true;
        assert_eq!(cfg.operations_per_trial(), 2);
        cfg.loops = 3;
        assert_eq!(cfg.operations_per_trial(), 6);

        let cfg = BenchConfig {
            sqer_only: true,
            ..BenchConfig::default()
        };
        assert!(cfg.performs_inverse());
        assert!(cfg.measures_accuracy());
    }
}
