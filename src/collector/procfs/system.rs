//! System collector for gathering per-domain host metrics.
//!
//! Each domain is collected independently: a failure in one never aborts the
//! others, it just yields an invalid (or empty) sample for that tick. Nothing
//! is retried; the next tick tries again.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

use crate::collector::procfs::parser::{
    ParseError, parse_cpu_line, parse_df, parse_meminfo, parse_net_dev,
};
use crate::collector::traits::HostSource;
use crate::model::{CpuCounters, CpuSample, DiskSample, MemorySample, NetworkSample};
use crate::rates::{CpuRateState, NetRateState};

/// Name of the loopback interface, never reported.
const LOOPBACK: &str = "lo";

/// Errors that can occur while reading one metric source.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading the source.
    Io(std::io::Error),
    /// Source content did not have the expected shape.
    Parse(String),
    /// Source was readable but reported nonsense (e.g. zero total memory).
    Invalid(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
            CollectError::Invalid(msg) => write!(f, "invalid data: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e.message)
    }
}

/// Collects host metrics from `/proc` and `df -k`.
pub struct SystemCollector<H: HostSource> {
    host: H,
    proc_path: String,
}

impl<H: HostSource> SystemCollector<H> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `host` - Host implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(host: H, proc_path: impl Into<String>) -> Self {
        Self {
            host,
            proc_path: proc_path.into(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn read_proc(&self, name: &str) -> Result<String, CollectError> {
        let path = format!("{}/{}", self.proc_path, name);
        Ok(self.host.read_to_string(Path::new(&path))?)
    }

    /// Reads the aggregate CPU counters from `/proc/stat`.
    pub fn read_cpu_counters(&self) -> Result<CpuCounters, CollectError> {
        let content = self.read_proc("stat")?;
        Ok(parse_cpu_line(&content)?)
    }

    /// Collects the CPU sample, updating `state` with the new reading.
    ///
    /// On failure `state` is left untouched.
    pub fn collect_cpu(&self, state: &mut CpuRateState) -> CpuSample {
        match self.read_cpu_counters() {
            Ok(counters) => {
                let usage_percent = state.update(counters);
                CpuSample {
                    usage_percent,
                    user_time: counters.user,
                    system_time: counters.system,
                    idle_time: counters.idle,
                    total_time: counters.total(),
                    valid: true,
                }
            }
            Err(e) => {
                warn!("cpu: {}", e);
                CpuSample::invalid()
            }
        }
    }

    /// Reads memory usage from `/proc/meminfo`.
    pub fn read_memory(&self) -> Result<MemorySample, CollectError> {
        let content = self.read_proc("meminfo")?;
        let info = parse_meminfo(&content);

        if info.mem_total == 0 {
            return Err(CollectError::Invalid("MemTotal is zero or missing".into()));
        }

        let used_kb = info
            .mem_total
            .saturating_sub(info.mem_free)
            .saturating_sub(info.buffers)
            .saturating_sub(info.cached);

        Ok(MemorySample {
            total_kb: info.mem_total,
            used_kb,
            free_kb: info.mem_free,
            available_kb: info.mem_available,
            buffers_kb: info.buffers,
            cached_kb: info.cached,
            usage_percent: used_kb as f64 / info.mem_total as f64 * 100.0,
            valid: true,
        })
    }

    /// Collects the memory sample; invalid if the source is unreadable.
    pub fn collect_memory(&self) -> MemorySample {
        self.read_memory().unwrap_or_else(|e| {
            warn!("memory: {}", e);
            MemorySample::invalid()
        })
    }

    /// Reads device-backed filesystems from `df -k`, at most `max_n`.
    pub fn read_disks(&self, max_n: usize) -> Result<Vec<DiskSample>, CollectError> {
        let report = self.host.command_output("df", &["-k"])?;

        let mut disks = Vec::with_capacity(max_n);
        for entry in parse_df(&report) {
            if disks.len() >= max_n {
                break;
            }
            if !entry.is_device_backed() {
                debug!(device = %entry.device, "disk: skipping pseudo filesystem");
                continue;
            }
            disks.push(DiskSample {
                device: entry.device,
                mount_point: entry.mount_point,
                total_kb: entry.total_kb,
                used_kb: entry.used_kb,
                available_kb: entry.available_kb,
                usage_percent: f64::from(entry.usage_percent),
                valid: true,
            });
        }
        Ok(disks)
    }

    /// Collects up to `max_n` disk samples; empty if `df` is unavailable.
    pub fn collect_disks(&self, max_n: usize) -> Vec<DiskSample> {
        self.read_disks(max_n).unwrap_or_else(|e| {
            warn!("disk: {}", e);
            Vec::new()
        })
    }

    /// Collects up to `max_n` non-loopback interfaces from `/proc/net/dev`.
    ///
    /// Rates are computed against `state`, which is then replaced by the
    /// readings collected here (new interfaces included). On a read failure
    /// the result is empty and `state` is left untouched.
    pub fn collect_network(
        &self,
        max_n: usize,
        state: &mut NetRateState,
        now: Instant,
    ) -> Vec<NetworkSample> {
        let content = match self.read_proc("net/dev") {
            Ok(content) => content,
            Err(e) => {
                warn!("network: {}", e);
                return Vec::new();
            }
        };

        let elapsed = state.elapsed_secs(now);
        let mut interfaces = Vec::with_capacity(max_n);
        for entry in parse_net_dev(&content) {
            if interfaces.len() >= max_n {
                break;
            }
            if entry.interface == LOOPBACK {
                continue;
            }

            let mut sample = NetworkSample {
                interface: entry.interface,
                rx_bytes: entry.rx_bytes,
                tx_bytes: entry.tx_bytes,
                rx_packets: entry.rx_packets,
                tx_packets: entry.tx_packets,
                valid: true,
                ..NetworkSample::default()
            };
            let (rx, tx) = state.rates(&sample.interface, &sample.counters(), elapsed);
            sample.rx_rate_mbps = rx;
            sample.tx_rate_mbps = tx;
            interfaces.push(sample);
        }

        state.commit(
            interfaces
                .iter()
                .map(|s: &NetworkSample| (s.interface.as_str(), s.counters())),
            now,
        );
        interfaces
    }
}
