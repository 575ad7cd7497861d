use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

// Global flag to enable/disable profiling - starts disabled
static PROFILING_ACTIVE: AtomicBool = AtomicBool::new(false);

pub const OUTPUT_ENV: &str = "MOVE_SEMANTICS_ALLOC_OUTPUT";

pub struct ProfilerData {
    pub total_allocations: AtomicUsize,
    pub total_deallocations: AtomicUsize,
    pub total_bytes_allocated: AtomicUsize,
    pub peak_memory: AtomicUsize,
    pub current_memory: AtomicUsize,
    pub phases: Mutex<Vec<PhaseAllocations>>,
}

static PROFILER: Lazy<ProfilerData> = Lazy::new(|| ProfilerData {
    total_allocations: AtomicUsize::new(0),
    total_deallocations: AtomicUsize::new(0),
    total_bytes_allocated: AtomicUsize::new(0),
    peak_memory: AtomicUsize::new(0),
    current_memory: AtomicUsize::new(0),
    phases: Mutex::new(Vec::new()),
});

/// Counter values at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSnapshot {
    pub total_allocations: usize,
    pub total_deallocations: usize,
    pub total_bytes_allocated: usize,
    pub peak_memory: usize,
    pub current_memory: usize,
}

/// Allocator activity between the start and end of a named phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAllocations {
    pub name: String,
    pub allocations: usize,
    pub deallocations: usize,
    pub bytes_allocated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub totals: AllocationSnapshot,
    pub phases: Vec<PhaseAllocations>,
}

pub struct AllocationProfiler;
impl AllocationProfiler {
    pub fn record_allocation(size: usize) {
        // Quick atomic check (no allocation)
        if !PROFILING_ACTIVE.load(Ordering::Relaxed) {
            return;
        }

        PROFILER.total_allocations.fetch_add(1, Ordering::Relaxed);
        PROFILER
            .total_bytes_allocated
            .fetch_add(size, Ordering::Relaxed);

        let new_current = PROFILER.current_memory.fetch_add(size, Ordering::Relaxed) + size;
        PROFILER.peak_memory.fetch_max(new_current, Ordering::Relaxed);
    }

    pub fn record_deallocation(size: usize) {
        if !PROFILING_ACTIVE.load(Ordering::Relaxed) {
            return;
        }

        PROFILER.total_deallocations.fetch_add(1, Ordering::Relaxed);
        // Blocks allocated before profiling started are released untracked.
        let _ = PROFILER
            .current_memory
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_sub(size))
            });
    }

    pub fn snapshot() -> AllocationSnapshot {
        AllocationSnapshot {
            total_allocations: PROFILER.total_allocations.load(Ordering::Relaxed),
            total_deallocations: PROFILER.total_deallocations.load(Ordering::Relaxed),
            total_bytes_allocated: PROFILER.total_bytes_allocated.load(Ordering::Relaxed),
            peak_memory: PROFILER.peak_memory.load(Ordering::Relaxed),
            current_memory: PROFILER.current_memory.load(Ordering::Relaxed),
        }
    }

    /// Starts measuring a phase. Counts are taken from the global counters, so
    /// allocations on other threads during the phase are included.
    pub fn phase(name: &'static str) -> PhaseGuard {
        PhaseGuard {
            name,
            start: Self::snapshot(),
        }
    }

    /// Every phase finished so far, in completion order.
    pub fn phases() -> Vec<PhaseAllocations> {
        PROFILER.phases.lock().clone()
    }

    /// Forgets every finished phase. Counter totals are left untouched.
    pub fn reset_phases() {
        PROFILER.phases.lock().clear();
    }

    /// Enable allocation profiling
    pub fn enable() {
        PROFILING_ACTIVE.store(true, Ordering::Relaxed);
    }

    /// Disable allocation profiling
    pub fn disable() {
        PROFILING_ACTIVE.store(false, Ordering::Relaxed);
    }

    pub fn is_enabled() -> bool {
        PROFILING_ACTIVE.load(Ordering::Relaxed)
    }

    /// Writes totals and phases as JSON to the file named by
    /// `MOVE_SEMANTICS_ALLOC_OUTPUT`, if set.
    pub fn write_report() -> std::io::Result<()> {
        if let Ok(output_path) = std::env::var(OUTPUT_ENV) {
            // Disable profiling during report generation
            Self::disable();

            let report = ProfileReport {
                totals: Self::snapshot(),
                phases: Self::phases(),
            };
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(&output_path, json)?;
        }
        Ok(())
    }
}

pub struct PhaseGuard {
    name: &'static str,
    start: AllocationSnapshot,
}

impl PhaseGuard {
    pub fn finish(self) -> PhaseAllocations {
        let end = AllocationProfiler::snapshot();

        // The bookkeeping below allocates; keep it out of the counters.
        let was_active = AllocationProfiler::is_enabled();
        AllocationProfiler::disable();

        let phase = PhaseAllocations {
            name: self.name.to_string(),
            allocations: end.total_allocations - self.start.total_allocations,
            deallocations: end.total_deallocations - self.start.total_deallocations,
            bytes_allocated: end.total_bytes_allocated - self.start.total_bytes_allocated,
        };
        PROFILER.phases.lock().push(phase.clone());

        if was_active {
            AllocationProfiler::enable();
        }
        phase
    }
}
