//! Criterion benchmarks for dftbench live under `benches/`.

use dftbench::config::{ConfigError, SignalConfig, SignalRepresentation};
use dftbench::generator::generate;
use dftbench::random::StdRandom;
use dftbench::signal::Signal;

/// Seeded Gaussian input shared by every benchmark.
pub fn gaussian_input(
    size: usize,
    representation: SignalRepresentation,
) -> Result<Signal, ConfigError> {
    let cfg = SignalConfig {
        size,
        representation,
        ..SignalConfig::default()
    };
    generate(&cfg, &mut StdRandom::seeded(0x5eed))
}
