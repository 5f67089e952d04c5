// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host memory sampler backed by jemalloc heap statistics.
//!
//! `used` is the managed-heap allocation reported by jemalloc; `limit`
//! is total system memory, captured once at startup. On MSVC (no
//! jemalloc) the host falls back to the no-op sampler and the pressure
//! controller degrades gracefully.

use auricle_core::MemorySampler;

#[cfg(not(target_env = "msvc"))]
pub use jemalloc::JemallocSampler;

#[cfg(not(target_env = "msvc"))]
mod jemalloc {
    use auricle_core::{MemoryReading, MemorySampler};

    /// Samples the jemalloc-managed heap.
    pub struct JemallocSampler {
        limit_bytes: u64,
    }

    impl JemallocSampler {
        pub fn new() -> Self {
            let mut system = sysinfo::System::new();
            system.refresh_memory();
            Self {
                limit_bytes: system.total_memory(),
            }
        }
    }

    impl Default for JemallocSampler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemorySampler for JemallocSampler {
        fn sample(&mut self) -> Option<MemoryReading> {
            // Fresh jemalloc stats require an epoch advance first.
            tikv_jemalloc_ctl::epoch::advance().ok()?;
            let used = tikv_jemalloc_ctl::stats::allocated::read().ok()?;
            Some(MemoryReading {
                used_bytes: used as u64,
                limit_bytes: self.limit_bytes,
            })
        }
    }
}

/// Returns the best sampler this host supports.
pub fn host_sampler() -> Box<dyn MemorySampler> {
    #[cfg(not(target_env = "msvc"))]
    {
        Box::new(JemallocSampler::new())
    }
    #[cfg(target_env = "msvc")]
    {
        Box::new(auricle_core::NoopSampler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_sampler_reports_live_heap() {
        let mut sampler = JemallocSampler::new();
        let reading = sampler.sample().expect("jemalloc stats should be readable");
        assert!(reading.used_bytes > 0);
        assert!(reading.limit_bytes > 0);
    }

    #[test]
    fn host_sampler_always_constructs() {
        let _ = host_sampler();
    }
}
