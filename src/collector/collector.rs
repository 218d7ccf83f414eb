//! Top-level collector that produces one [`SystemSnapshot`] per tick.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::collector::procfs::SystemCollector;
use crate::collector::traits::HostSource;
use crate::model::{MAX_DISKS, MAX_INTERFACES, SystemSnapshot};
use crate::rates::DeltaState;

/// Timing information for snapshot collection.
///
/// Used for debugging slow metric sources.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total snapshot collection time.
    pub total: Duration,
    /// Time to read `/proc/stat`.
    pub cpu: Duration,
    /// Time to read `/proc/meminfo`.
    pub memory: Duration,
    /// Time to run `df -k`.
    pub disks: Duration,
    /// Time to read `/proc/net/dev`.
    pub network: Duration,
}

/// Main collector that gathers all host metrics.
///
/// Owns the counter-delta state, so CPU usage and network rates are always
/// computed against the previous call on the same collector.
pub struct Collector<H: HostSource> {
    system_collector: SystemCollector<H>,
    state: DeltaState,
    /// Timing information from the last collect_snapshot call.
    last_timing: Option<CollectorTiming>,
}

impl<H: HostSource> Collector<H> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `host` - Host implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(host: H, proc_path: impl Into<String>) -> Self {
        Self {
            system_collector: SystemCollector::new(host, proc_path),
            state: DeltaState::new(),
            last_timing: None,
        }
    }

    /// Returns timing information from the last collect_snapshot call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    pub fn state(&self) -> &DeltaState {
        &self.state
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.system_collector.host_mut()
    }

    /// Collects a complete snapshot using the current instant for rates.
    pub fn collect_snapshot(&mut self) -> SystemSnapshot {
        self.collect_snapshot_at(Instant::now())
    }

    /// Collects a complete snapshot, timing network rates against `now`.
    ///
    /// Never fails as a whole: each domain is marked invalid (or left empty)
    /// on its own when its source cannot be read.
    pub fn collect_snapshot_at(&mut self, now: Instant) -> SystemSnapshot {
        let total_start = Instant::now();
        let mut timing = CollectorTiming::default();

        let timestamp = chrono::Utc::now().timestamp();

        let start = Instant::now();
        let cpu = self.system_collector.collect_cpu(&mut self.state.cpu);
        timing.cpu = start.elapsed();

        let start = Instant::now();
        let memory = self.system_collector.collect_memory();
        timing.memory = start.elapsed();

        let start = Instant::now();
        let disks = self.system_collector.collect_disks(MAX_DISKS);
        timing.disks = start.elapsed();

        let start = Instant::now();
        let interfaces =
            self.system_collector
                .collect_network(MAX_INTERFACES, &mut self.state.net, now);
        timing.network = start.elapsed();

        timing.total = total_start.elapsed();
        trace!(
            total_us = timing.total.as_micros() as u64,
            cpu_us = timing.cpu.as_micros() as u64,
            memory_us = timing.memory.as_micros() as u64,
            disks_us = timing.disks.as_micros() as u64,
            network_us = timing.network.as_micros() as u64,
            "snapshot collected"
        );
        self.last_timing = Some(timing);

        SystemSnapshot {
            timestamp,
            cpu,
            memory,
            disks,
            interfaces,
        }
    }
}
