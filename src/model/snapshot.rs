//! Aggregate snapshot produced by one sampling tick.

use super::system::{CpuSample, DiskSample, MemorySample, NetworkSample};

/// All samples taken in one tick.
///
/// Replaced wholesale on every tick; only the collector's delta state
/// survives between snapshots.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SystemSnapshot {
    /// Unix timestamp (seconds) when collection started.
    pub timestamp: i64,
    pub cpu: CpuSample,
    pub memory: MemorySample,
    /// At most [`MAX_DISKS`](super::MAX_DISKS) entries.
    pub disks: Vec<DiskSample>,
    /// At most [`MAX_INTERFACES`](super::MAX_INTERFACES) entries, never `lo`.
    pub interfaces: Vec<NetworkSample>,
}

impl SystemSnapshot {
    /// Short human-readable description for log lines.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        parts.push(if self.cpu.valid {
            format!("cpu {:.1}%", self.cpu.usage_percent)
        } else {
            "cpu n/a".to_string()
        });
        parts.push(if self.memory.valid {
            format!("mem {:.1}%", self.memory.usage_percent)
        } else {
            "mem n/a".to_string()
        });
        parts.push(format!("{} disks", self.disks.len()));
        parts.push(format!("{} interfaces", self.interfaces.len()));
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_snapshot_lists_all_domains() {
        let snapshot = SystemSnapshot {
            timestamp: 0,
            cpu: CpuSample {
                usage_percent: 12.5,
                valid: true,
                ..CpuSample::default()
            },
            memory: MemorySample::invalid(),
            disks: vec![DiskSample::default(), DiskSample::default()],
            interfaces: Vec::new(),
        };

        let desc = snapshot.describe();
        assert!(desc.contains("cpu 12.5%"));
        assert!(desc.contains("mem n/a"));
        assert!(desc.contains("2 disks"));
        assert!(desc.contains("0 interfaces"));
    }
}
