//! Text layouts for signals and spectra.
//!
//! Encoders are pure projections: they read a buffer and return one string
//! per output line. Every value is printed in scientific notation with
//! [`SIGNIFICANT_DIGITS`] significant digits, so small bins and residuals
//! keep their precision and dumps are byte-for-byte reproducible.

use std::io::{self, Write};

use crate::config::SpectrumEncoding;
use crate::signal::{Signal, Spectrum};

/// Significant digits per printed value.
pub const SIGNIFICANT_DIGITS: usize = 10;

/// Separator between the two values of a pair line.
pub const PAIR_SEPARATOR: &str = ", ";

/// Format one value as `d.ddddddddde<exp>`. Negative zero prints unsigned.
pub fn format_value(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
}

fn format_pair(a: f64, b: f64) -> String {
    format!("{}{}{}", format_value(a), PAIR_SEPARATOR, format_value(b))
}

/// Time-domain dump: one amplitude per line for real signals, one
/// `re, im` pair per line for complex signals.
pub fn encode_signal(signal: &Signal) -> Vec<String> {
    match signal {
        Signal::Real(data) => data.iter().map(|&x| format_value(x)).collect(),
        Signal::Complex(data) => data.iter().map(|c| format_pair(c.re, c.im)).collect(),
    }
}

/// Dump a spectrum in the requested layout.
pub fn encode_spectrum(spectrum: &Spectrum, encoding: SpectrumEncoding) -> Vec<String> {
    match encoding {
        SpectrumEncoding::Raw => encode_raw(spectrum),
        SpectrumEncoding::HermitianPacked => encode_hermitian(&spectrum.storage()),
        SpectrumEncoding::CcsMagnitude => encode_ccs_magnitude(&spectrum.storage()),
    }
}

/// Every bin as `re, im`, packed spectra expanded to all `n` bins.
pub fn encode_raw(spectrum: &Spectrum) -> Vec<String> {
    (0..spectrum.len())
        .map(|k| {
            let c = spectrum.bin(k);
            format_pair(c.re, c.im)
        })
        .collect()
}

/// Storage values two at a time: `data[i], data[i + 1]` for even `i`.
/// An odd trailing value is emitted alone.
pub fn encode_hermitian(data: &[f64]) -> Vec<String> {
    data.chunks(2)
        .map(|pair| match *pair {
            [a, b] => format_pair(a, b),
            [a] => format_value(a),
            _ => unreachable!("chunks(2) yields one or two values"),
        })
        .collect()
}

/// `sqrt(data[i]² + data[i + 1]²)` for `i = 1, 3, 5, ...` while
/// `i < data.len() / 2`.
///
/// The pairing assumes the CCS packed layout of [`Spectrum::Packed`]. On the
/// interleaved view of a complex spectrum it combines the imaginary part of
/// one bin with the real part of the next, so callers should only use it
/// for real-input spectra.
pub fn encode_ccs_magnitude(data: &[f64]) -> Vec<String> {
    (1..data.len() / 2)
        .step_by(2)
        .map(|i| format_value((data[i] * data[i] + data[i + 1] * data[i + 1]).sqrt()))
        .collect()
}

/// Write `lines` to `out`, each terminated by `\n`.
pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex64;

    #[test]
    fn formats_with_ten_significant_digits() {
        assert_eq!(format_value(1.0), "1.000000000e0");
        assert_eq!(format_value(-2.5), "-2.500000000e0");
        assert_eq!(format_value(-1e-17), "-1.000000000e-17");
        assert_eq!(format_value(-0.0), "0.000000000e0");
        assert_eq!(format_value(f64::INFINITY), "inf");
    }

    #[test]
    fn small_values_keep_significant_digits() {
        assert_eq!(format_value(1.2345678912e-5), "1.234567891e-5");
        assert_eq!(format_value(3.3e-11), "3.300000000e-11");
        let back: f64 = format_value(-9.87654321e-13).parse().unwrap();
        assert!((back / -9.87654321e-13 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ccs_magnitude_pythagorean() {
        assert_eq!(encode_ccs_magnitude(&[0.0, 3.0, 4.0, 0.0]), vec!["5.000000000e0"]);
    }

    #[test]
    fn ccs_magnitude_covers_lower_half() {
        let data = [9.0, 3.0, 4.0, 6.0, 8.0, 1.0, 1.0, 1.0];
        assert_eq!(
            encode_ccs_magnitude(&data),
            vec!["5.000000000e0", "1.000000000e1"]
        );
        assert!(encode_ccs_magnitude(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn hermitian_pairs_storage() {
        let lines = encode_hermitian(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            lines,
            vec![
                "1.000000000e0, 2.000000000e0",
                "3.000000000e0, 4.000000000e0",
                "5.000000000e0"
            ]
        );
    }

    #[test]
    fn raw_expands_packed_bins() {
        let spec = Spectrum::Packed(vec![10.0, 1.0, 2.0, 3.0]);
        assert_eq!(
            encode_raw(&spec),
            vec![
                "1.000000000e1, 0.000000000e0",
                "1.000000000e0, 2.000000000e0",
                "3.000000000e0, 0.000000000e0",
                "1.000000000e0, -2.000000000e0",
            ]
        );
    }

    #[test]
    fn signal_dumps_follow_layout() {
        assert_eq!(encode_signal(&Signal::Real(vec![0.5])), vec!["5.000000000e-1"]);
        let s = Signal::Complex(vec![Complex64::new(0.2, -1.0)]);
        assert_eq!(encode_signal(&s), vec!["2.000000000e-1, -1.000000000e0"]);
    }

    #[test]
    fn encoders_do_not_mutate() {
        let spec = Spectrum::Complex(vec![Complex64::new(3.0, 4.0), Complex64::new(1.0, 1.0)]);
        let before = spec.clone();
        for enc in [
            SpectrumEncoding::Raw,
            SpectrumEncoding::HermitianPacked,
            SpectrumEncoding::CcsMagnitude,
        ] {
            let _ = encode_spectrum(&spec, enc);
        }
        assert_eq!(spec, before);
    }

    #[test]
    fn write_lines_appends_newlines() {
        let mut out = Vec::new();
        write_lines(&mut out, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(out, b"a\nb\n");
    }
}
