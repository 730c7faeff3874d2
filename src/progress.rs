//! Percent-complete reporting.
//!
//! The harness converts completed trials into an integer percentage and
//! forwards it only when the value changes. Reporting always happens
//! between trials, never inside a timed section.

use std::io::{self, Write};

/// Receiver of progress updates.
pub trait Progress {
    /// Called with a new integer percentage in `0..=100`.
    fn update(&mut self, percent: u8);

    /// Called once after the last trial.
    fn finish(&mut self) {}
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn update(&mut self, _percent: u8) {}
}

/// Writes `\r<n> %` to a plain status stream such as stderr.
///
/// Library users without a terminal progress bar can pass this to
/// [`Harness::run`](crate::harness::Harness::run); the `dftbench` binary
/// draws its own bar instead.
#[derive(Debug)]
pub struct PercentWriter<W: Write> {
    out: W,
}

impl<W: Write> PercentWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, percent: u8) -> io::Result<()> {
        write!(self.out, "\r{percent} %    ")?;
        self.out.flush()
    }
}

impl<W: Write> Progress for PercentWriter<W> {
    fn update(&mut self, percent: u8) {
        // a broken status stream must not abort the benchmark
        let _ = self.draw(percent);
    }

    fn finish(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}

/// Turns completed-trial counts into percentages, suppressing repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentTracker {
    total: usize,
    last: Option<u8>,
}

impl PercentTracker {
    pub fn new(total: usize) -> Self {
        Self { total, last: None }
    }

    /// Integer percentage for `completed` trials, or `None` when it equals
    /// the last reported value.
    pub fn advance(&mut self, completed: usize) -> Option<u8> {
        let percent = if self.total == 0 {
            100
        } else {
            (completed.min(self.total) * 100 / self.total) as u8
        };
        if self.last == Some(percent) {
            return None;
        }
        self.last = Some(percent);
        Some(percent)
    }
}
