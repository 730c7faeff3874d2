//! Signal-to-Quantization-Error Ratio (SQER).
//!
//! `SQER = 10·log10(E_signal / E_error)` where `E_signal` is the sum of
//! squared amplitudes of the original and `E_error` the sum of squared
//! amplitude differences against the reconstruction. Timestamps of
//! complex-pair signals are ignored.
//!
//! A perfect reconstruction has zero error energy. Instead of dividing by
//! zero the ratio is pinned to a sentinel:
//!
//! | signal energy | error energy | SQER |
//! |---------------|--------------|------|
//! | any           | 0            | `+∞` |
//! | 0             | > 0          | `-∞` |

use serde::Serialize;
use thiserror::Error;

use crate::signal::Signal;

/// Errors raised when comparing two signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("cannot compare {original} samples against {reconstructed}")]
    LengthMismatch { original: usize, reconstructed: usize },
}

/// Sum of squared amplitudes.
pub fn signal_energy(signal: &Signal) -> f64 {
    signal.amplitudes().map(|a| a * a).sum()
}

/// Sum of squared amplitude differences.
///
/// # Errors
///
/// Returns [`MetricError::LengthMismatch`] when the signals differ in length.
pub fn quantization_error_energy(
    original: &Signal,
    reconstructed: &Signal,
) -> Result<f64, MetricError> {
    check_lengths(original, reconstructed)?;
    Ok(original
        .amplitudes()
        .zip(reconstructed.amplitudes())
        .map(|(a, b)| (a - b) * (a - b))
        .sum())
}

/// SQER in decibels, see the module docs for the sentinel values.
///
/// # Errors
///
/// Returns [`MetricError::LengthMismatch`] when the signals differ in length.
pub fn sqer(original: &Signal, reconstructed: &Signal) -> Result<f64, MetricError> {
    Ok(ErrorSample::between(original, reconstructed)?.sqer_db())
}

fn check_lengths(original: &Signal, reconstructed: &Signal) -> Result<(), MetricError> {
    if original.len() != reconstructed.len() {
        return Err(MetricError::LengthMismatch {
            original: original.len(),
            reconstructed: reconstructed.len(),
        });
    }
    Ok(())
}

/// Energies measured between an original and its round-tripped copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorSample {
    pub signal_energy: f64,
    pub error_energy: f64,
}

impl ErrorSample {
    /// # Errors
    ///
    /// Returns [`MetricError::LengthMismatch`] when the signals differ in
    /// length.
    pub fn between(original: &Signal, reconstructed: &Signal) -> Result<Self, MetricError> {
        let error_energy = quantization_error_energy(original, reconstructed)?;
        Ok(Self {
            signal_energy: signal_energy(original),
            error_energy,
        })
    }

    pub fn sqer_db(&self) -> f64 {
        if self.error_energy == 0.0 {
            f64::INFINITY
        } else if self.signal_energy == 0.0 {
            f64::NEG_INFINITY
        } else {
            10.0 * (self.signal_energy / self.error_energy).log10()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex64;

    #[test]
    fn identical_signals_hit_the_sentinel() {
        let x = Signal::Real(vec![1.0, -2.0, 3.0]);
        assert_eq!(sqer(&x, &x).unwrap(), f64::INFINITY);
        let zero = Signal::Real(vec![0.0; 3]);
        assert_eq!(sqer(&zero, &zero).unwrap(), f64::INFINITY);
    }

    #[test]
    fn zero_signal_with_error_is_negative_infinity() {
        let zero = Signal::Real(vec![0.0; 2]);
        let noisy = Signal::Real(vec![0.1, 0.0]);
        assert_eq!(sqer(&zero, &noisy).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn known_ratio() {
        // energy 100, error 1 -> 20 dB
        let x = Signal::Real(vec![10.0, 0.0]);
        let y = Signal::Real(vec![10.0, 1.0]);
        let sample = ErrorSample::between(&x, &y).unwrap();
        assert_eq!(sample.signal_energy, 100.0);
        assert_eq!(sample.error_energy, 1.0);
        assert!((sample.sqer_db() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn timestamps_do_not_count() {
        let x = Signal::Complex(vec![Complex64::new(0.0, 3.0), Complex64::new(0.2, 4.0)]);
        let y = Signal::Complex(vec![Complex64::new(9.0, 3.0), Complex64::new(9.0, 4.0)]);
        assert_eq!(signal_energy(&x), 25.0);
        assert_eq!(quantization_error_energy(&x, &y).unwrap(), 0.0);
    }

    #[test]
    fn length_mismatch_is_reported() {
        let x = Signal::Real(vec![1.0; 4]);
        let y = Signal::Real(vec![1.0; 3]);
        assert_eq!(
            sqer(&x, &y),
            Err(MetricError::LengthMismatch {
                original: 4,
                reconstructed: 3
            })
        );
    }
}
