//! Human-readable and JSON renderings of a finished run.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{BenchConfig, SignalConfig, SignalModel};
use crate::harness::BenchmarkSummary;

/// Digits after the decimal point in the console report.
const REPORT_PRECISION: usize = 8;

/// Console report in the classic `Label:  value` layout.
pub fn render_report(config: &BenchConfig, summary: &BenchmarkSummary) -> String {
    let mut out = String::new();
    let p = REPORT_PRECISION;
    // writing into a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "Iterations: {}", summary.trials);
    let _ = writeln!(out, "Per loop:   {}", summary.loops);
    let _ = writeln!(out, "Data size:  {}", config.signal.size);
    let _ = writeln!(out, "Model:      {}", model_name(config.signal.model));
    if config.signal.model == SignalModel::Gaussian {
        let _ = writeln!(out, "Mean:       {}", config.signal.mean);
        let _ = writeln!(out, "Std Dev:    {}", config.signal.std_dev);
    }
    let _ = writeln!(out, "Mode:       {}", mode_name(config));
    let _ = writeln!(out);
    let _ = writeln!(out, "Time:       {} ns", summary.total.as_nanos());
    let _ = writeln!(
        out,
        "Average:    {:.p$} ns ({:.p$} μs)",
        summary.average_ns(),
        summary.average_us()
    );
    if let Some(db) = summary.average_sqer_db {
        let _ = writeln!(out, "SQER:       {db:.p$} dB");
    }
    out
}

/// Single line printed in SQER-only mode.
pub fn render_sqer_only(summary: &BenchmarkSummary) -> String {
    match summary.average_sqer_db {
        Some(db) => format!("Average SQER: {db:.prec$} dB\n", prec = REPORT_PRECISION),
        None => "Average SQER: n/a\n".to_string(),
    }
}

fn model_name(model: SignalModel) -> &'static str {
    match model {
        SignalModel::Gaussian => "gaussian",
        SignalModel::Periodic => "periodic",
    }
}

fn mode_name(config: &BenchConfig) -> &'static str {
    if config.performs_inverse() {
        "forward + inverse"
    } else {
        "forward"
    }
}

/// Machine-readable run record.
///
/// Infinite SQER values serialise as `null` in JSON.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord<'a> {
    pub backend: &'a str,
    pub signal: &'a SignalConfig,
    pub invert: bool,
    pub trials: usize,
    pub loops: usize,
    pub operations: usize,
    pub total_ns: u128,
    pub average_ns: f64,
    pub average_us: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_sqer_db: Option<f64>,
}

impl<'a> SummaryRecord<'a> {
    pub fn new(backend: &'a str, config: &'a BenchConfig, summary: &BenchmarkSummary) -> Self {
        Self {
            backend,
            signal: &config.signal,
            invert: config.performs_inverse(),
            trials: summary.trials,
            loops: summary.loops,
            operations: summary.operations(),
            total_ns: summary.total.as_nanos(),
            average_ns: summary.average_ns(),
            average_us: summary.average_us(),
            average_sqer_db: summary.average_sqer_db,
        }
    }
}
