//! Point-in-time samples for each metric domain.
//!
//! Every sample carries a `valid` flag: a domain whose source could not be
//! read still yields a sample, it is just marked invalid for that tick.

/// Upper bound on filesystems kept per snapshot.
pub const MAX_DISKS: usize = 8;

/// Upper bound on network interfaces kept per snapshot (and in delta state).
pub const MAX_INTERFACES: usize = 16;

/// Raw aggregate CPU counters from the first line of `/proc/stat`.
///
/// All values are cumulative clock ticks since boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CpuCounters {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuCounters {
    /// Sum of all eight accounting buckets.
    pub fn total(&self) -> u64 {
        self.user
            .wrapping_add(self.nice)
            .wrapping_add(self.system)
            .wrapping_add(self.idle)
            .wrapping_add(self.iowait)
            .wrapping_add(self.irq)
            .wrapping_add(self.softirq)
            .wrapping_add(self.steal)
    }

    /// Idle time including I/O wait.
    pub fn idle_total(&self) -> u64 {
        self.idle.wrapping_add(self.iowait)
    }
}

/// CPU sample.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CpuSample {
    /// Busy percentage since the previous sample.
    pub usage_percent: f64,
    pub user_time: u64,
    pub system_time: u64,
    pub idle_time: u64,
    pub total_time: u64,
    pub valid: bool,
}

impl CpuSample {
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Memory sample, all sizes in kilobytes.
///
/// `used_kb = total_kb - free_kb - buffers_kb - cached_kb` (saturating at 0).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MemorySample {
    pub total_kb: u64,
    /// Saturates at 0 when free, buffers and cached add up to more than total.
    pub used_kb: u64,
    pub free_kb: u64,
    pub available_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
    pub usage_percent: f64,
    pub valid: bool,
}

impl MemorySample {
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Usage of one mounted filesystem, sizes in kilobytes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DiskSample {
    pub device: String,
    pub mount_point: String,
    pub total_kb: u64,
    pub used_kb: u64,
    pub available_kb: u64,
    pub usage_percent: f64,
    pub valid: bool,
}

/// Raw cumulative counters of one interface from `/proc/net/dev`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NetCounters {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
}

/// One network interface with derived throughput.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NetworkSample {
    pub interface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub tx_packets: u64,
    /// Receive rate in megabits per second.
    pub rx_rate_mbps: f64,
    /// Transmit rate in megabits per second.
    pub tx_rate_mbps: f64,
    pub valid: bool,
}

impl NetworkSample {
    /// Raw counters of this sample, used as the next delta baseline.
    pub fn counters(&self) -> NetCounters {
        NetCounters {
            rx_bytes: self.rx_bytes,
            rx_packets: self.rx_packets,
            tx_bytes: self.tx_bytes,
            tx_packets: self.tx_packets,
        }
    }
}
