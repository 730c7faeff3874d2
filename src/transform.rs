//! Forward and inverse DFT behind a single adapter trait.
//!
//! The benchmark treats the transform as an opaque collaborator. Two
//! adapters are provided:
//!
//! - [`PlannedFft`]: `rustfft` for complex buffers and `realfft` for real
//!   buffers, with plans and scratch space cached across calls.
//! - [`NaiveDft`]: direct O(n²) evaluation, used as a reference.
//!
//! Both follow the same conventions: the forward transform is unnormalised,
//! the inverse divides by `n`, and real input produces the CCS packed layout
//! documented on [`Spectrum::Packed`].

use std::collections::HashMap;
use std::sync::Arc;

use core::f64::consts::PI;

use log::debug;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use thiserror::Error;

use crate::signal::{pack_ccs, packed_bin, unpack_ccs, Signal, Spectrum};

/// Errors reported by a transform backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("cannot transform an empty buffer")]
    EmptyBuffer,
    #[error("transform backend failed: {0}")]
    Backend(String),
}

impl From<realfft::FftError> for TransformError {
    fn from(err: realfft::FftError) -> Self {
        TransformError::Backend(err.to_string())
    }
}

/// Length-preserving DFT over owned buffers.
///
/// Buffers move into the call and come back transformed, so the caller
/// never holds an alias to data the transform is overwriting.
pub trait TransformAdapter {
    /// Short backend name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Unnormalised forward DFT.
    fn forward(&mut self, signal: Signal) -> Result<Spectrum, TransformError>;

    /// Inverse DFT scaled by `1 / n`, so `inverse(forward(x)) ≈ x`.
    fn inverse(&mut self, spectrum: Spectrum) -> Result<Signal, TransformError>;

    /// Out-of-place forward DFT. `signal` is left untouched and `output`'s
    /// allocation is reused.
    fn forward_into(&mut self, signal: &Signal, output: &mut Spectrum) -> Result<(), TransformError> {
        let staged = std::mem::take(output).into_staged(signal);
        *output = self.forward(staged)?;
        Ok(())
    }
}

impl<T: TransformAdapter + ?Sized> TransformAdapter for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn forward(&mut self, signal: Signal) -> Result<Spectrum, TransformError> {
        (**self).forward(signal)
    }

    fn inverse(&mut self, spectrum: Spectrum) -> Result<Signal, TransformError> {
        (**self).inverse(spectrum)
    }

    fn forward_into(&mut self, signal: &Signal, output: &mut Spectrum) -> Result<(), TransformError> {
        (**self).forward_into(signal, output)
    }
}

/// Planned transforms from `rustfft` and `realfft`.
pub struct PlannedFft {
    complex: FftPlanner<f64>,
    real: RealFftPlanner<f64>,
    forward_complex: HashMap<usize, Arc<dyn Fft<f64>>>,
    inverse_complex: HashMap<usize, Arc<dyn Fft<f64>>>,
    forward_real: HashMap<usize, Arc<dyn RealToComplex<f64>>>,
    inverse_real: HashMap<usize, Arc<dyn ComplexToReal<f64>>>,
    half: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

impl Default for PlannedFft {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannedFft {
    pub fn new() -> Self {
        Self {
            complex: FftPlanner::new(),
            real: RealFftPlanner::new(),
            forward_complex: HashMap::new(),
            inverse_complex: HashMap::new(),
            forward_real: HashMap::new(),
            inverse_real: HashMap::new(),
            half: Vec::new(),
            scratch: Vec::new(),
        }
    }

    fn complex_plan(&mut self, n: usize, inverse: bool) -> Arc<dyn Fft<f64>> {
        let (cache, planner) = if inverse {
            (&mut self.inverse_complex, &mut self.complex)
        } else {
            (&mut self.forward_complex, &mut self.complex)
        };
        Arc::clone(cache.entry(n).or_insert_with(|| {
            debug!("planning complex {} fft of {n} points", direction(inverse));
            if inverse {
                planner.plan_fft_inverse(n)
            } else {
                planner.plan_fft_forward(n)
            }
        }))
    }

    fn process_complex(&mut self, data: &mut [Complex64], inverse: bool) {
        let plan = self.complex_plan(data.len(), inverse);
        let scratch_len = plan.get_inplace_scratch_len();
        resize_scratch(&mut self.scratch, scratch_len);
        plan.process_with_scratch(data, &mut self.scratch[..scratch_len]);
    }
}

impl TransformAdapter for PlannedFft {
    fn name(&self) -> &'static str {
        "planned"
    }

    fn forward(&mut self, signal: Signal) -> Result<Spectrum, TransformError> {
        if signal.is_empty() {
            return Err(TransformError::EmptyBuffer);
        }
        match signal {
            Signal::Complex(mut data) => {
                self.process_complex(&mut data, false);
                Ok(Spectrum::Complex(data))
            }
            Signal::Real(mut data) => {
                let n = data.len();
                let planner = &mut self.real;
                let plan = Arc::clone(self.forward_real.entry(n).or_insert_with(|| {
                    debug!("planning real forward fft of {n} points");
                    planner.plan_fft_forward(n)
                }));
                self.half.resize(n / 2 + 1, Complex64::new(0.0, 0.0));
                let scratch_len = plan.get_scratch_len();
                resize_scratch(&mut self.scratch, scratch_len);
                // realfft uses the input as scratch, so the packed result can
                // be written straight back into it.
                plan.process_with_scratch(&mut data, &mut self.half, &mut self.scratch[..scratch_len])?;
                pack_ccs(&self.half, &mut data);
                Ok(Spectrum::Packed(data))
            }
        }
    }

    fn inverse(&mut self, spectrum: Spectrum) -> Result<Signal, TransformError> {
        if spectrum.is_empty() {
            return Err(TransformError::EmptyBuffer);
        }
        match spectrum {
            Spectrum::Complex(mut data) => {
                self.process_complex(&mut data, true);
                let scale = 1.0 / data.len() as f64;
                data.iter_mut().for_each(|c| *c *= scale);
                Ok(Signal::Complex(data))
            }
            Spectrum::Packed(mut data) => {
                let n = data.len();
                let planner = &mut self.real;
                let plan = Arc::clone(self.inverse_real.entry(n).or_insert_with(|| {
                    debug!("planning real inverse fft of {n} points");
                    planner.plan_fft_inverse(n)
                }));
                self.half.resize(n / 2 + 1, Complex64::new(0.0, 0.0));
                unpack_ccs(&data, &mut self.half);
                let scratch_len = plan.get_scratch_len();
                resize_scratch(&mut self.scratch, scratch_len);
                plan.process_with_scratch(&mut self.half, &mut data, &mut self.scratch[..scratch_len])?;
                let scale = 1.0 / n as f64;
                data.iter_mut().for_each(|x| *x *= scale);
                Ok(Signal::Real(data))
            }
        }
    }
}

/// Direct evaluation of the DFT sum.
#[derive(Debug, Default)]
pub struct NaiveDft {
    work: Vec<Complex64>,
}

impl NaiveDft {
    pub fn new() -> Self {
        Self::default()
    }

    /// `out[k] = Σ x[j]·e^{∓2πi·jk/n}` for every `k` in `0..out.len()`.
    fn evaluate(input: &[Complex64], out: &mut [Complex64], inverse: bool) {
        let n = input.len();
        let sign = if inverse { 1.0 } else { -1.0 };
        for (k, slot) in out.iter_mut().enumerate() {
            let mut sum = Complex64::new(0.0, 0.0);
            for (j, x) in input.iter().enumerate() {
                // reduce jk mod n first to keep the angle small
                let angle = sign * 2.0 * PI * ((j * k) % n) as f64 / n as f64;
                sum += x * Complex64::from_polar(1.0, angle);
            }
            *slot = sum;
        }
    }
}

impl TransformAdapter for NaiveDft {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn forward(&mut self, signal: Signal) -> Result<Spectrum, TransformError> {
        if signal.is_empty() {
            return Err(TransformError::EmptyBuffer);
        }
        match signal {
            Signal::Complex(mut data) => {
                self.work.resize(data.len(), Complex64::new(0.0, 0.0));
                Self::evaluate(&data, &mut self.work, false);
                data.copy_from_slice(&self.work);
                Ok(Spectrum::Complex(data))
            }
            Signal::Real(mut data) => {
                let n = data.len();
                let input: Vec<Complex64> = data.iter().map(|&x| Complex64::new(x, 0.0)).collect();
                self.work.resize(n / 2 + 1, Complex64::new(0.0, 0.0));
                Self::evaluate(&input, &mut self.work, false);
                pack_ccs(&self.work, &mut data);
                Ok(Spectrum::Packed(data))
            }
        }
    }

    fn inverse(&mut self, spectrum: Spectrum) -> Result<Signal, TransformError> {
        if spectrum.is_empty() {
            return Err(TransformError::EmptyBuffer);
        }
        let n = spectrum.len();
        let scale = 1.0 / n as f64;
        match spectrum {
            Spectrum::Complex(mut data) => {
                self.work.resize(n, Complex64::new(0.0, 0.0));
                Self::evaluate(&data, &mut self.work, true);
                for (dst, src) in data.iter_mut().zip(&self.work) {
                    *dst = src * scale;
                }
                Ok(Signal::Complex(data))
            }
            Spectrum::Packed(mut data) => {
                let full: Vec<Complex64> = (0..n).map(|k| packed_bin(&data, k)).collect();
                self.work.resize(n, Complex64::new(0.0, 0.0));
                Self::evaluate(&full, &mut self.work, true);
                for (dst, src) in data.iter_mut().zip(&self.work) {
                    *dst = src.re * scale;
                }
                Ok(Signal::Real(data))
            }
        }
    }
}

fn resize_scratch(scratch: &mut Vec<Complex64>, len: usize) {
    if scratch.len() < len {
        scratch.resize(len, Complex64::new(0.0, 0.0));
    }
}

fn direction(inverse: bool) -> &'static str {
    if inverse {
        "inverse"
    } else {
        "forward"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_real(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect()
    }

    fn random_complex(n: usize, seed: u64) -> Vec<Complex64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Complex64::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
            .collect()
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut fft = PlannedFft::new();
        let mut impulse = vec![Complex64::new(0.0, 0.0); 4];
        impulse[0] = Complex64::new(1.0, 0.0);
        match fft.forward(Signal::Complex(impulse)).unwrap() {
            Spectrum::Complex(bins) => {
                for c in &bins {
                    assert!((c.re - 1.0).abs() < 1e-12, "re = {}", c.re);
                    assert!(c.im.abs() < 1e-12, "im = {}", c.im);
                }
            }
            Spectrum::Packed(_) => panic!("complex input must give a complex spectrum"),
        }
    }

    #[test]
    fn planned_matches_naive_for_real_input() {
        for n in [1_usize, 2, 5, 8, 30, 64] {
            let x = random_real(n, n as u64);
            let a = PlannedFft::new().forward(Signal::Real(x.clone())).unwrap();
            let b = NaiveDft::new().forward(Signal::Real(x)).unwrap();
            let (a, b) = (a.storage(), b.storage());
            for (p, q) in a.iter().zip(b.iter()) {
                assert!((p - q).abs() < 1e-8, "n = {n}: {p} vs {q}");
            }
        }
    }

    #[test]
    fn planned_matches_naive_for_complex_input() {
        let x = random_complex(12, 3);
        let a = PlannedFft::new().forward(Signal::Complex(x.clone())).unwrap();
        let b = NaiveDft::new().forward(Signal::Complex(x)).unwrap();
        for k in 0..12 {
            assert!((a.bin(k) - b.bin(k)).norm() < 1e-9);
        }
    }

    #[test]
    fn round_trip_recovers_input() {
        let adapters: Vec<Box<dyn TransformAdapter>> =
            vec![Box::new(PlannedFft::new()), Box::new(NaiveDft::new())];
        for mut fft in adapters {
            for n in [3_usize, 16, 17] {
                let x = random_real(n, 11);
                let spec = fft.forward(Signal::Real(x.clone())).unwrap();
                let back = fft.inverse(spec).unwrap();
                for (i, a) in x.iter().enumerate() {
                    assert!((a - back.amplitude(i)).abs() < 1e-9, "{}", fft.name());
                }

                let z = random_complex(n, 12);
                let spec = fft.forward(Signal::Complex(z.clone())).unwrap();
                match fft.inverse(spec).unwrap() {
                    Signal::Complex(back) => {
                        for (a, b) in z.iter().zip(&back) {
                            assert!((a - b).norm() < 1e-9, "{}", fft.name());
                        }
                    }
                    Signal::Real(_) => panic!("layout changed"),
                }
            }
        }
    }

    #[test]
    fn forward_into_leaves_input_untouched() {
        let mut fft = PlannedFft::new();
        let signal = Signal::Real(random_real(32, 5));
        let copy = signal.clone();
        let mut out = Spectrum::Packed(vec![0.0; 32]);
        fft.forward_into(&signal, &mut out).unwrap();
        assert_eq!(signal, copy);
        let expected = fft.forward(copy).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_buffer_is_an_error() {
        let mut fft = PlannedFft::new();
        assert_eq!(
            fft.forward(Signal::Real(Vec::new())),
            Err(TransformError::EmptyBuffer)
        );
        assert_eq!(
            NaiveDft::new().inverse(Spectrum::Complex(Vec::new())),
            Err(TransformError::EmptyBuffer)
        );
    }
}
