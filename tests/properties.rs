// Test intent: generator, transform and metric invariants over random inputs.
use dftbench::config::{SignalConfig, SignalModel, SignalRepresentation};
use dftbench::generator::{generate, generate_periodic};
use dftbench::metric::{signal_energy, sqer};
use dftbench::random::StdRandom;
use dftbench::signal::Signal;
use dftbench::transform::{NaiveDft, PlannedFft, TransformAdapter};
use proptest::prelude::*;
use rustfft::num_complex::Complex64;

fn representation() -> impl Strategy<Value = SignalRepresentation> {
    prop_oneof![
        Just(SignalRepresentation::RealOnly),
        Just(SignalRepresentation::ComplexPair),
    ]
}

fn model() -> impl Strategy<Value = SignalModel> {
    prop_oneof![Just(SignalModel::Gaussian), Just(SignalModel::Periodic)]
}

proptest! {
    #[test]
    fn generated_length_matches_config(
        size in 1usize..300,
        model in model(),
        representation in representation(),
        seed in any::<u64>(),
    ) {
        let cfg = SignalConfig { size, model, representation, ..SignalConfig::default() };
        let signal = generate(&cfg, &mut StdRandom::seeded(seed)).unwrap();
        prop_assert_eq!(signal.len(), size);
        prop_assert_eq!(signal.representation(), representation);
    }

    #[test]
    fn periodic_is_deterministic(size in 1usize..300, representation in representation()) {
        let cfg = SignalConfig {
            size,
            model: SignalModel::Periodic,
            representation,
            ..SignalConfig::default()
        };
        prop_assert_eq!(generate_periodic(&cfg).unwrap(), generate_periodic(&cfg).unwrap());
    }

    #[test]
    fn planned_round_trip_is_accurate(
        size in 1usize..257,
        representation in representation(),
        mean in -10.0f64..10.0,
        std_dev in 0.01f64..5.0,
        seed in any::<u64>(),
    ) {
        let cfg = SignalConfig { size, representation, mean, std_dev, ..SignalConfig::default() };
        let original = generate(&cfg, &mut StdRandom::seeded(seed)).unwrap();
        let mut fft = PlannedFft::new();
        let spectrum = fft.forward(original.clone()).unwrap();
        let back = fft.inverse(spectrum).unwrap();
        prop_assert_eq!(back.len(), original.len());
        for (a, b) in original.amplitudes().zip(back.amplitudes()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn naive_round_trip_is_accurate(
        size in 1usize..65,
        representation in representation(),
        seed in any::<u64>(),
    ) {
        let cfg = SignalConfig { size, representation, ..SignalConfig::default() };
        let original = generate(&cfg, &mut StdRandom::seeded(seed)).unwrap();
        let mut dft = NaiveDft::new();
        let spectrum = dft.forward(original.clone()).unwrap();
        let back = dft.inverse(spectrum).unwrap();
        for (a, b) in original.amplitudes().zip(back.amplitudes()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn energy_is_non_negative(values in proptest::collection::vec(-1e3f64..1e3, 0..64)) {
        let energy = signal_energy(&Signal::Real(values.clone()));
        prop_assert!(energy >= 0.0);
        if values.iter().any(|&v| v != 0.0) {
            prop_assert!(energy > 0.0);
        } else {
            prop_assert_eq!(energy, 0.0);
        }
    }

    #[test]
    fn energy_ignores_timestamps(values in proptest::collection::vec(-1e3f64..1e3, 1..64)) {
        let real = Signal::Real(values.clone());
        let pairs = Signal::Complex(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Complex64::new(i as f64 * 0.2, v))
                .collect(),
        );
        prop_assert_eq!(signal_energy(&real), signal_energy(&pairs));
    }

    #[test]
    fn identical_signals_are_infinite(values in proptest::collection::vec(-1e3f64..1e3, 1..64)) {
        let signal = Signal::Real(values);
        let db = sqer(&signal, &signal).unwrap();
        prop_assert!(db.is_infinite() && db > 0.0);
    }
}

#[test]
fn zero_signal_has_zero_energy() {
    assert_eq!(signal_energy(&Signal::Real(vec![0.0; 32])), 0.0);
}
