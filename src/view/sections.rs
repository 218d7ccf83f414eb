//! Per-section text formatters.

use crate::fmt::{format_bytes, format_kb, format_rate};
use crate::model::{CpuSample, DiskSample, MemorySample, NetworkSample};

/// Multi-entry sections show at most this many entries.
pub const MAX_DISPLAYED_ENTRIES: usize = 4;

/// Between disk blocks: one blank line.
pub const DISK_SEPARATOR: &str = "\n\n";

/// Between interface blocks: two blank lines.
pub const NETWORK_SEPARATOR: &str = "\n\n\n";

pub fn format_cpu(cpu: &CpuSample) -> String {
    if !cpu.valid {
        return "CPU information unavailable".to_string();
    }
    format!(
        "Usage: {:.1}%\nUser Time: {}\nSystem Time: {}\nIdle Time: {}\nTotal Time: {}",
        cpu.usage_percent, cpu.user_time, cpu.system_time, cpu.idle_time, cpu.total_time
    )
}

/// Memory block; sizes are shown in bytes scaled from the kB readings.
pub fn format_memory(mem: &MemorySample) -> String {
    if !mem.valid {
        return "Memory information unavailable".to_string();
    }
    format!(
        "Usage: {:.1}%\nTotal: {}\nUsed: {}\nFree: {}\nAvailable: {}\nBuffers: {}\nCached: {}",
        mem.usage_percent,
        format_kb(mem.total_kb),
        format_kb(mem.used_kb),
        format_kb(mem.free_kb),
        format_kb(mem.available_kb),
        format_kb(mem.buffers_kb),
        format_kb(mem.cached_kb),
    )
}

fn disk_block(disk: &DiskSample) -> String {
    format!(
        "{}: {:.1}%\n  Mount: {}\n  Total: {}\n  Used: {}\n  Free: {}",
        disk.device,
        disk.usage_percent,
        disk.mount_point,
        format_kb(disk.total_kb),
        format_kb(disk.used_kb),
        format_kb(disk.available_kb),
    )
}

/// First [`MAX_DISPLAYED_ENTRIES`] valid disks, separated by [`DISK_SEPARATOR`].
pub fn format_disks(disks: &[DiskSample]) -> String {
    let blocks: Vec<String> = disks
        .iter()
        .filter(|d| d.valid)
        .take(MAX_DISPLAYED_ENTRIES)
        .map(disk_block)
        .collect();

    if blocks.is_empty() {
        return "No disk information available".to_string();
    }
    blocks.join(DISK_SEPARATOR)
}

fn network_block(net: &NetworkSample) -> String {
    format!(
        "{}:\n  RX: {} ({})\n  TX: {} ({})\n  Packets RX: {}\n  Packets TX: {}",
        net.interface,
        format_bytes(net.rx_bytes),
        format_rate(net.rx_rate_mbps),
        format_bytes(net.tx_bytes),
        format_rate(net.tx_rate_mbps),
        net.rx_packets,
        net.tx_packets,
    )
}

/// First [`MAX_DISPLAYED_ENTRIES`] valid interfaces, separated by [`NETWORK_SEPARATOR`].
pub fn format_network(interfaces: &[NetworkSample]) -> String {
    let blocks: Vec<String> = interfaces
        .iter()
        .filter(|n| n.valid)
        .take(MAX_DISPLAYED_ENTRIES)
        .map(network_block)
        .collect();

    if blocks.is_empty() {
        return "No network interfaces found".to_string();
    }
    blocks.join(NETWORK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(device: &str) -> DiskSample {
        DiskSample {
            device: device.to_string(),
            mount_point: "/".to_string(),
            total_kb: 1024,
            used_kb: 512,
            available_kb: 512,
            usage_percent: 50.0,
            valid: true,
        }
    }

    fn iface(name: &str) -> NetworkSample {
        NetworkSample {
            interface: name.to_string(),
            rx_bytes: 2048,
            tx_bytes: 100,
            rx_packets: 7,
            tx_packets: 3,
            rx_rate_mbps: 2.0,
            tx_rate_mbps: 0.5,
            valid: true,
        }
    }

    #[test]
    fn cpu_text() {
        let cpu = CpuSample {
            usage_percent: 12.345,
            user_time: 1,
            system_time: 2,
            idle_time: 3,
            total_time: 6,
            valid: true,
        };
        assert_eq!(
            format_cpu(&cpu),
            "Usage: 12.3%\nUser Time: 1\nSystem Time: 2\nIdle Time: 3\nTotal Time: 6"
        );
        assert_eq!(format_cpu(&CpuSample::invalid()), "CPU information unavailable");
    }

    #[test]
    fn negative_values_are_printed_as_is() {
        let cpu = CpuSample {
            usage_percent: -100.0,
            user_time: 1,
            system_time: 0,
            idle_time: 3,
            total_time: 4,
            valid: true,
        };
        assert_eq!(
            format_cpu(&cpu),
            "Usage: -100.0%\nUser Time: 1\nSystem Time: 0\nIdle Time: 3\nTotal Time: 4"
        );

        assert_eq!(format_rate(-0.5), "-512.0 Kbps");
        let mut eth0 = iface("eth0");
        eth0.rx_rate_mbps = -0.5;
        let text = format_network(&[eth0]);
        assert_eq!(text.lines().nth(1), Some("  RX: 2.0 KB (-512.0 Kbps)"));
    }

    #[test]
    fn memory_text() {
        let mem = MemorySample {
            total_kb: 1024 * 1024,
            used_kb: 1024,
            free_kb: 1,
            available_kb: 0,
            buffers_kb: 0,
            cached_kb: 0,
            usage_percent: 0.1,
            valid: true,
        };
        let text = format_memory(&mem);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Usage: 0.1%");
        assert_eq!(lines[1], "Total: 1.0 GB");
        assert_eq!(lines[2], "Used: 1.0 MB");
        assert_eq!(lines[3], "Free: 1.0 KB");
        assert_eq!(lines[4], "Available: 0 B");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn disk_blocks_single_blank_line_between() {
        let text = format_disks(&[disk("/dev/sda1"), disk("/dev/sdb1")]);
        assert_eq!(
            text,
            "/dev/sda1: 50.0%\n  Mount: /\n  Total: 1.0 MB\n  Used: 512.0 KB\n  Free: 512.0 KB\n\
             \n\
             /dev/sdb1: 50.0%\n  Mount: /\n  Total: 1.0 MB\n  Used: 512.0 KB\n  Free: 512.0 KB"
        );
    }

    #[test]
    fn disks_capped_to_four_valid() {
        let mut disks: Vec<DiskSample> = (0..6).map(|i| disk(&format!("/dev/sd{i}"))).collect();
        disks[1].valid = false;

        let text = format_disks(&disks);
        assert!(text.contains("/dev/sd0"));
        assert!(!text.contains("/dev/sd1"));
        assert!(text.contains("/dev/sd4"));
        assert!(!text.contains("/dev/sd5"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn no_disks() {
        assert_eq!(format_disks(&[]), "No disk information available");
    }

    #[test]
    fn network_blocks_two_blank_lines_between() {
        let text = format_network(&[iface("eth0"), iface("wlan0")]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "eth0:");
        assert_eq!(lines[1], "  RX: 2.0 KB (2.0 Mbps)");
        assert_eq!(lines[2], "  TX: 100 B (512.0 Kbps)");
        assert_eq!(lines[3], "  Packets RX: 7");
        assert_eq!(lines[4], "  Packets TX: 3");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "wlan0:");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn network_capped_to_four() {
        let interfaces: Vec<NetworkSample> =
            (0..6).map(|i| iface(&format!("veth{i}"))).collect();
        let text = format_network(&interfaces);
        assert!(text.contains("veth3:"));
        assert!(!text.contains("veth4:"));
    }

    #[test]
    fn no_interfaces() {
        assert_eq!(format_network(&[]), "No network interfaces found");
    }
}
