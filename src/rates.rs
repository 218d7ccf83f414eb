//! Counter-delta engine.
//!
//! Kernel counters in `/proc/stat` and `/proc/net/dev` only ever grow. This
//! module is the single place that turns two successive readings into a
//! percentage (CPU) or a rate (network). The previous readings live in
//! [`DeltaState`], owned by the collector and threaded through every call.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::model::{CpuCounters, MAX_INTERFACES, NetCounters};

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute u64 delta, returning `None` on counter regression (reset, replaced device).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

/// CPU busy percentage between two readings: `100 * (1 - idle_diff / total_diff)`.
///
/// Returns 0 when `total_diff <= 0`. The result is not clamped: an idle diff
/// larger than the total diff yields a negative value.
pub fn cpu_usage_percent(prev: &CpuCounters, curr: &CpuCounters) -> f64 {
    let total_diff = i128::from(curr.total()) - i128::from(prev.total());
    let idle_diff = i128::from(curr.idle_total()) - i128::from(prev.idle_total());

    if total_diff <= 0 {
        return 0.0;
    }
    100.0 * (1.0 - idle_diff as f64 / total_diff as f64)
}

/// Converts a byte difference over `elapsed_secs` into megabits per second.
///
/// `elapsed_secs <= 0` means no rate can be computed and yields 0.
pub fn rate_mbps(bytes_diff: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    bytes_diff as f64 / elapsed_secs / 1024.0 / 1024.0 * 8.0
}

// ---------------------------------------------------------------------------
// Rate state structs
// ---------------------------------------------------------------------------

/// Previous aggregate CPU reading.
#[derive(Debug, Default)]
pub struct CpuRateState {
    prev: Option<CpuCounters>,
}

impl CpuRateState {
    /// Computes usage against the stored reading, then stores `current`.
    ///
    /// The very first call always reports 0.
    pub fn update(&mut self, current: CpuCounters) -> f64 {
        let usage = self
            .prev
            .as_ref()
            .map(|prev| cpu_usage_percent(prev, &current))
            .unwrap_or(0.0);
        self.prev = Some(current);
        usage
    }

    pub fn previous(&self) -> Option<&CpuCounters> {
        self.prev.as_ref()
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        self.prev = None;
    }
}

/// Previous per-interface network readings plus the time they were taken.
///
/// Timing is per full network sample, not per interface.
#[derive(Debug, Default)]
pub struct NetRateState {
    prev_sample: HashMap<String, NetCounters>,
    prev_at: Option<Instant>,
}

impl NetRateState {
    /// Seconds since the previous committed sample, `None` before the first one.
    pub fn elapsed_secs(&self, now: Instant) -> Option<f64> {
        self.prev_at
            .map(|at| now.saturating_duration_since(at).as_secs_f64())
    }

    /// RX/TX rates in Mbps for one interface.
    ///
    /// Zero when there is no baseline for `interface`, when `elapsed` is
    /// missing or zero, or when a counter went backwards.
    pub fn rates(&self, interface: &str, current: &NetCounters, elapsed: Option<f64>) -> (f64, f64) {
        let (Some(elapsed), Some(prev)) = (elapsed, self.prev_sample.get(interface)) else {
            return (0.0, 0.0);
        };

        let rx = match du64(current.rx_bytes, prev.rx_bytes) {
            Some(diff) => rate_mbps(diff, elapsed),
            None => {
                debug!(interface, "rx byte counter went backwards, treating as reset");
                0.0
            }
        };
        let tx = match du64(current.tx_bytes, prev.tx_bytes) {
            Some(diff) => rate_mbps(diff, elapsed),
            None => {
                debug!(interface, "tx byte counter went backwards, treating as reset");
                0.0
            }
        };
        (rx, tx)
    }

    /// Replaces the stored readings with the just-collected set.
    ///
    /// Interfaces missing from `readings` are forgotten; at most
    /// [`MAX_INTERFACES`] are kept.
    pub fn commit<'a, I>(&mut self, readings: I, now: Instant)
    where
        I: IntoIterator<Item = (&'a str, NetCounters)>,
    {
        self.prev_sample.clear();
        for (name, counters) in readings.into_iter().take(MAX_INTERFACES) {
            self.prev_sample.insert(name.to_string(), counters);
        }
        self.prev_at = Some(now);
    }

    pub fn previous(&self, interface: &str) -> Option<&NetCounters> {
        self.prev_sample.get(interface)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.prev_sample.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.prev_sample.is_empty()
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        self.prev_sample.clear();
        self.prev_at = None;
    }
}

/// All previous-sample state, one slot per delta-driven domain.
#[derive(Debug, Default)]
pub struct DeltaState {
    pub cpu: CpuRateState,
    pub net: NetRateState,
}

impl DeltaState {
    pub fn new() -> Self {
        Self::default()
    }
}
