//! Timing harness for copy-construction versus move-construction of a
//! [`Holder`].

use crate::buffer::OwningBuffer;
use crate::holder::Holder;
use crate::profiler::{AllocationProfiler, PhaseAllocations, PhaseGuard};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Instant;

pub const COPY_PHASE: &str = "copy";
pub const MOVE_PHASE: &str = "move";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Number of integers in the benchmarked buffer.
    pub size: usize,
    /// Constructions per timed repetition.
    pub iterations: usize,
    /// Untimed constructions run before each phase.
    pub warmup: usize,
    /// Timed runs per phase.
    pub repetitions: usize,
    pub track_allocations: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            iterations: 10_000_000,
            warmup: 0,
            repetitions: 1,
            track_allocations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub name: String,
    /// Elapsed microseconds, one entry per repetition.
    pub samples_micros: Vec<u64>,
    pub allocations: Option<PhaseAllocations>,
}

impl PhaseResult {
    pub fn mean_micros(&self) -> u64 {
        if self.samples_micros.is_empty() {
            return 0;
        }
        self.samples_micros.iter().sum::<u64>() / self.samples_micros.len() as u64
    }

    pub fn min_micros(&self) -> u64 {
        self.samples_micros.iter().copied().min().unwrap_or(0)
    }

    pub fn max_micros(&self) -> u64 {
        self.samples_micros.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub config: BenchConfig,
    pub copy: PhaseResult,
    #[serde(rename = "move")]
    pub transfer: PhaseResult,
}

impl BenchReport {
    /// How many times faster the move phase ran, by mean time. `None` when
    /// the move phase was too fast to register.
    pub fn speedup(&self) -> Option<f64> {
        let transfer = self.transfer.mean_micros();
        if transfer == 0 {
            return None;
        }
        Some(self.copy.mean_micros() as f64 / transfer as f64)
    }
}

/// Runs the copy phase and then the move phase on a buffer holding
/// `0..size`, with `size` clamped to the number of non-negative `i32`s.
///
/// Each copy iteration builds a holder from a borrowed buffer, paying for one
/// allocation and a full element copy. Each move iteration moves the buffer
/// into a holder and back out again, so every transfer carries the populated
/// block and allocates nothing.
pub fn run(config: &BenchConfig) -> BenchReport {
    let source: Vec<i32> = (0..=i32::MAX).take(config.size).collect();
    let mut buffer = OwningBuffer::from_slice(&source);

    let was_active = AllocationProfiler::is_enabled();
    if config.track_allocations {
        AllocationProfiler::enable();
    }

    let copy = run_phase(COPY_PHASE, config, || {
        let holder = Holder::from_borrowed(&buffer);
        black_box(&holder);
    });

    let transfer = run_phase(MOVE_PHASE, config, || {
        let holder = black_box(Holder::take_ownership(&mut buffer));
        buffer = holder.into_buffer();
    });

    if config.track_allocations && !was_active {
        AllocationProfiler::disable();
    }

    BenchReport {
        config: *config,
        copy,
        transfer,
    }
}

fn run_phase<F: FnMut()>(name: &'static str, config: &BenchConfig, mut body: F) -> PhaseResult {
    for _ in 0..config.warmup {
        body();
    }

    let mut samples_micros = Vec::with_capacity(config.repetitions);
    let phase = config
        .track_allocations
        .then(|| AllocationProfiler::phase(name));

    for _ in 0..config.repetitions {
        let start = Instant::now();
        for _ in 0..config.iterations {
            body();
        }
        samples_micros.push(start.elapsed().as_micros() as u64);
    }

    let allocations = phase.map(PhaseGuard::finish);

    PhaseResult {
        name: name.to_string(),
        samples_micros,
        allocations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(samples: &[u64]) -> PhaseResult {
        PhaseResult {
            name: COPY_PHASE.to_string(),
            samples_micros: samples.to_vec(),
            allocations: None,
        }
    }

    #[test]
    fn phase_statistics() {
        let result = phase(&[30, 10, 20]);
        assert_eq!(result.mean_micros(), 20);
        assert_eq!(result.min_micros(), 10);
        assert_eq!(result.max_micros(), 30);
    }

    #[test]
    fn empty_phase_reports_zero() {
        let result = phase(&[]);
        assert_eq!(result.mean_micros(), 0);
        assert_eq!(result.min_micros(), 0);
        assert_eq!(result.max_micros(), 0);
    }

    #[test]
    fn speedup_needs_measurable_move_phase() {
        let report = BenchReport {
            config: BenchConfig::default(),
            copy: phase(&[100]),
            transfer: phase(&[0]),
        };
        assert_eq!(report.speedup(), None);

        let report = BenchReport {
            transfer: phase(&[25]),
            ..report
        };
        assert_eq!(report.speedup(), Some(4.0));
    }

    #[test]
    fn run_leaves_timings_per_repetition() {
        let config = BenchConfig {
            size: 8,
            iterations: 10,
            warmup: 2,
            repetitions: 3,
            track_allocations: false,
        };
        let report = run(&config);

        assert_eq!(report.copy.samples_micros.len(), 3);
        assert_eq!(report.transfer.samples_micros.len(), 3);
        assert!(report.copy.allocations.is_none());
        assert_eq!(report.transfer.name, MOVE_PHASE);
    }

    #[test]
    fn untracked_run_records_no_phases() {
        let config = BenchConfig {
            size: 4,
            iterations: 5,
            warmup: 0,
            repetitions: 1,
            track_allocations: false,
        };

        AllocationProfiler::reset_phases();
        run(&config);
        run(&config);

        assert!(AllocationProfiler::phases().is_empty());
    }
}
