//! UI-agnostic view text.
//!
//! Turns a [`SystemSnapshot`] into the plain multi-line text shown in each
//! quadrant. The TUI only wraps and paints it.

mod sections;

pub use sections::{
    DISK_SEPARATOR, MAX_DISPLAYED_ENTRIES, NETWORK_SEPARATOR, format_cpu, format_disks,
    format_memory, format_network,
};

use crate::model::SystemSnapshot;

/// Text for all four quadrants of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadrantText {
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub network: String,
}

/// Formats every section of `snapshot`.
pub fn quadrant_text(snapshot: &SystemSnapshot) -> QuadrantText {
    QuadrantText {
        cpu: format_cpu(&snapshot.cpu),
        memory: format_memory(&snapshot.memory),
        disk: format_disks(&snapshot.disks),
        network: format_network(&snapshot.interfaces),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{Collector, MockHost};

    #[test]
    fn quadrant_text_from_typical_snapshot() {
        let mut collector = Collector::new(MockHost::typical_system(), "/proc");
        let text = quadrant_text(&collector.collect_snapshot());

        assert!(text.cpu.starts_with("Usage: 0.0%"));
        assert!(text.memory.contains("Total: 15.6 GB"));
        assert!(text.disk.contains("/dev/nvme0n1p2: 22.0%"));
        assert!(!text.disk.contains("overlay"));
        assert!(text.network.starts_with("eth0:"));
        assert!(!text.network.contains("lo:"));
    }

    #[test]
    fn quadrant_text_from_empty_snapshot() {
        let text = quadrant_text(&SystemSnapshot::default());

        assert_eq!(text.cpu, "CPU information unavailable");
        assert_eq!(text.memory, "Memory information unavailable");
        assert_eq!(text.disk, "No disk information available");
        assert_eq!(text.network, "No network interfaces found");
    }
}
