/// Instrumentation for hot-path call counting
/// Counters are compiled to no-ops unless the `profiling` feature is on, so
/// release builds pay nothing for them.
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters over the generation and meshing paths.
pub struct FunctionCounters {
    // Region counters
    pub terrain_fill_calls: AtomicU64,

    // Meshing counters
    pub mesh_chunk_calls: AtomicU64,
    pub mask_build_calls: AtomicU64,
    pub quads_emitted: AtomicU64,
}

impl FunctionCounters {
    pub const fn new() -> Self {
        Self {
            terrain_fill_calls: AtomicU64::new(0),
            mesh_chunk_calls: AtomicU64::new(0),
            mask_build_calls: AtomicU64::new(0),
            quads_emitted: AtomicU64::new(0),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.terrain_fill_calls.store(0, Ordering::Relaxed);
        self.mesh_chunk_calls.store(0, Ordering::Relaxed);
        self.mask_build_calls.store(0, Ordering::Relaxed);
        self.quads_emitted.store(0, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            terrain_fill_calls: self.terrain_fill_calls.load(Ordering::Relaxed),
            mesh_chunk_calls: self.mesh_chunk_calls.load(Ordering::Relaxed),
            mask_build_calls: self.mask_build_calls.load(Ordering::Relaxed),
            quads_emitted: self.quads_emitted.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of counter values at a point in time
#[derive(Debug, Clone, Copy)]
pub struct CounterSnapshot {
    pub terrain_fill_calls: u64,
    pub mesh_chunk_calls: u64,
    pub mask_build_calls: u64,
    pub quads_emitted: u64,
}

impl CounterSnapshot {
    /// Print formatted report
    pub fn print_report(&self) {
        println!("\n=== Performance Counters Report ===");
        println!("\nRegion Operations:");
        println!("  terrain_fill calls:         {:12}", self.terrain_fill_calls);

        println!("\nMeshing Operations:");
        println!("  mesh_chunk calls:           {:12}", self.mesh_chunk_calls);
        println!("  mask builds:                {:12}", self.mask_build_calls);
        println!("  quads emitted:              {:12}", self.quads_emitted);
        if self.mesh_chunk_calls > 0 {
            let per_chunk = self.quads_emitted as f64 / self.mesh_chunk_calls as f64;
            println!("  quads per chunk:            {:12.1}", per_chunk);
        }

        println!();
    }
}

/// Global function counters instance
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Macro for incrementing a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Macro for adding to a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

#[cfg(all(test, feature = "profiling"))]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate_and_reset() {
        let counters = FunctionCounters::new();
        counters.terrain_fill_calls.fetch_add(3, Ordering::Relaxed);
        counters.quads_emitted.fetch_add(10, Ordering::Relaxed);

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.terrain_fill_calls, 3);
        assert_eq!(snapshot.quads_emitted, 10);

        counters.reset();
        assert_eq!(counters.snapshot().terrain_fill_calls, 0);
    }
}
