//! Synthetic signal construction.
//!
//! Two models are available:
//!
//! - **Gaussian**: every amplitude is an independent draw from
//!   `N(mean, std_dev)`.
//! - **Periodic**: `sin(πt) + sin(2πt) + sin(3πt)` with
//!   `t = i * PERIODIC_STEP`. It never touches the random source, so two
//!   calls with the same configuration are bit-identical.
//!
//! In the complex-pair layout the real part of sample `i` is the timestamp
//! `i * Δt` (`sample_spacing` for Gaussian, [`PERIODIC_STEP`] for periodic)
//! and the imaginary part is the amplitude.

use core::f64::consts::PI;

use rustfft::num_complex::Complex64;

use crate::config::{ConfigError, SignalConfig, SignalModel, PERIODIC_STEP};
use crate::random::RandomSource;
use crate::signal::Signal;

/// Periodic amplitude at time `t`.
pub fn periodic_amplitude(t: f64) -> f64 {
    (PI * t).sin() + (2.0 * PI * t).sin() + (3.0 * PI * t).sin()
}

/// Draw a fresh Gaussian signal.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails validation.
pub fn generate_gaussian(
    config: &SignalConfig,
    rng: &mut dyn RandomSource,
) -> Result<Signal, ConfigError> {
    config.validate()?;
    let mut signal = Signal::zeroed(config.representation, config.size);
    fill_gaussian(config, rng, &mut signal);
    Ok(signal)
}

/// Build the deterministic multi-tone signal.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails validation.
pub fn generate_periodic(config: &SignalConfig) -> Result<Signal, ConfigError> {
    config.validate()?;
    let mut signal = Signal::zeroed(config.representation, config.size);
    fill_periodic(&mut signal);
    Ok(signal)
}

/// Generate a signal using the model selected by `config`.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails validation.
pub fn generate(config: &SignalConfig, rng: &mut dyn RandomSource) -> Result<Signal, ConfigError> {
    match config.model {
        SignalModel::Gaussian => generate_gaussian(config, rng),
        SignalModel::Periodic => generate_periodic(config),
    }
}

/// Overwrite every sample of `signal` in place.
///
/// The buffer is reshaped to the configured size and layout first, so
/// nothing from a previous trial survives.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails validation.
pub fn regenerate(
    config: &SignalConfig,
    rng: &mut dyn RandomSource,
    signal: &mut Signal,
) -> Result<(), ConfigError> {
    config.validate()?;
    if signal.len() != config.size || signal.representation() != config.representation {
        *signal = Signal::zeroed(config.representation, config.size);
    }
    match config.model {
        SignalModel::Gaussian => fill_gaussian(config, rng, signal),
        SignalModel::Periodic => fill_periodic(signal),
    }
    Ok(())
}

fn fill_gaussian(config: &SignalConfig, rng: &mut dyn RandomSource, signal: &mut Signal) {
    let mut draw = || config.mean + config.std_dev * rng.standard_normal();
    match signal {
        Signal::Real(data) => data.iter_mut().for_each(|x| *x = draw()),
        Signal::Complex(data) => {
            for (i, x) in data.iter_mut().enumerate() {
                *x = Complex64::new(i as f64 * config.sample_spacing, draw());
            }
        }
    }
}

fn fill_periodic(signal: &mut Signal) {
    match signal {
        Signal::Real(data) => {
            for (i, x) in data.iter_mut().enumerate() {
                *x = periodic_amplitude(i as f64 * PERIODIC_STEP);
            }
        }
        Signal::Complex(data) => {
            for (i, x) in data.iter_mut().enumerate() {
                let t = i as f64 * PERIODIC_STEP;
                *x = Complex64::new(t, periodic_amplitude(t));
            }
        }
    }
}
