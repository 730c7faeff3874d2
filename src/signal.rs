//! Sample buffers shared by the generator, the transforms and the encoders.

use std::borrow::Cow;

use rustfft::num_complex::Complex64;

use crate::config::SignalRepresentation;

/// Time-domain buffer. Its length is fixed for a whole run.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Real(Vec<f64>),
    /// Real part holds the timestamp, imaginary part the amplitude.
    Complex(Vec<Complex64>),
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Real(Vec::new())
    }
}

impl Signal {
    /// Zero-filled buffer of `len` samples in the given layout.
    pub fn zeroed(representation: SignalRepresentation, len: usize) -> Self {
        match representation {
            SignalRepresentation::RealOnly => Signal::Real(vec![0.0; len]),
            SignalRepresentation::ComplexPair => {
                Signal::Complex(vec![Complex64::new(0.0, 0.0); len])
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Signal::Real(v) => v.len(),
            Signal::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn representation(&self) -> SignalRepresentation {
        match self {
            Signal::Real(_) => SignalRepresentation::RealOnly,
            Signal::Complex(_) => SignalRepresentation::ComplexPair,
        }
    }

    /// Amplitude of sample `i`, skipping the timestamp of complex pairs.
    pub fn amplitude(&self, i: usize) -> f64 {
        match self {
            Signal::Real(v) => v[i],
            Signal::Complex(v) => v[i].im,
        }
    }

    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.amplitude(i))
    }

    /// Overwrite `self` with the contents of `other`, reusing the existing
    /// allocation when both share a layout.
    pub fn copy_from(&mut self, other: &Signal) {
        match (self, other) {
            (Signal::Real(dst), Signal::Real(src)) => {
                dst.clear();
                dst.extend_from_slice(src);
            }
            (Signal::Complex(dst), Signal::Complex(src)) => {
                dst.clear();
                dst.extend_from_slice(src);
            }
            (dst, src) => *dst = src.clone(),
        }
    }
}

/// Frequency-domain buffer produced by a forward transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Spectrum {
    /// Real-input spectrum in CCS packed order:
    /// `[Re0, Re1, Im1, Re2, Im2, ...]`, ending with `Re(n/2)` when `n` is
    /// even. Same length as the input signal.
    Packed(Vec<f64>),
    /// Full complex spectrum of a complex signal.
    Complex(Vec<Complex64>),
}

impl Default for Spectrum {
    fn default() -> Self {
        Spectrum::Packed(Vec::new())
    }
}

impl Spectrum {
    /// Zero-filled spectrum matching a signal of the given layout.
    pub fn zeroed(representation: SignalRepresentation, len: usize) -> Self {
        match representation {
            SignalRepresentation::RealOnly => Spectrum::Packed(vec![0.0; len]),
            SignalRepresentation::ComplexPair => {
                Spectrum::Complex(vec![Complex64::new(0.0, 0.0); len])
            }
        }
    }

    /// Number of transform points.
    pub fn len(&self) -> usize {
        match self {
            Spectrum::Packed(v) => v.len(),
            Spectrum::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat view of the underlying values. Complex spectra are interleaved
    /// as `re, im, re, im, ...`.
    pub fn storage(&self) -> Cow<'_, [f64]> {
        match self {
            Spectrum::Packed(v) => Cow::Borrowed(v),
            Spectrum::Complex(v) => Cow::Owned(v.iter().flat_map(|c| [c.re, c.im]).collect()),
        }
    }

    /// Bin `k` as a complex number. Packed spectra are expanded with
    /// conjugate symmetry for bins above `n / 2`.
    pub fn bin(&self, k: usize) -> Complex64 {
        match self {
            Spectrum::Complex(v) => v[k],
            Spectrum::Packed(v) => packed_bin(v, k),
        }
    }

    /// Reinterpret the spectrum allocation as a signal buffer holding a copy
    /// of `source`. Used by out-of-place transforms to avoid reallocating.
    pub fn into_staged(self, source: &Signal) -> Signal {
        let mut staged = match self {
            Spectrum::Packed(v) => Signal::Real(v),
            Spectrum::Complex(v) => Signal::Complex(v),
        };
        staged.copy_from(source);
        staged
    }
}

/// Bin `k` of a CCS packed buffer. Bins above `n / 2` are the conjugates
/// of their mirror images.
pub(crate) fn packed_bin(data: &[f64], k: usize) -> Complex64 {
    let n = data.len();
    if k > n / 2 {
        return packed_bin(data, n - k).conj();
    }
    if k == 0 {
        return Complex64::new(data[0], 0.0);
    }
    let re = data[2 * k - 1];
    let im = if 2 * k < n { data[2 * k] } else { 0.0 };
    Complex64::new(re, im)
}

/// Write the half spectrum `half` (length `n / 2 + 1`) into CCS order.
pub(crate) fn pack_ccs(half: &[Complex64], out: &mut [f64]) {
    let n = out.len();
    if n == 0 {
        return;
    }
    out[0] = half[0].re;
    for (k, c) in half.iter().enumerate().skip(1) {
        let i = 2 * k - 1;
        if i < n {
            out[i] = c.re;
        }
        if i + 1 < n {
            out[i + 1] = c.im;
        }
    }
}

/// Expand a CCS buffer into the half spectrum expected by a real inverse
/// transform. The DC term and, for even `n`, the Nyquist term get a zero
/// imaginary part.
pub(crate) fn unpack_ccs(packed: &[f64], half: &mut [Complex64]) {
    for (k, c) in half.iter_mut().enumerate() {
        *c = packed_bin(packed, k);
    }
}
