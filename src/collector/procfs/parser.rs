//! Parsers for host metric sources.
//!
//! These are pure functions that parse the content of `/proc` files and the
//! `df -k` report into structured data. They are designed to be easily
//! testable with string inputs.

use crate::model::CpuCounters;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

// ============ /proc/stat ============

/// Number of accounting buckets read from the aggregate CPU line.
const CPU_FIELDS: usize = 8;

/// Parses the aggregate CPU line (the first line) of `/proc/stat`.
///
/// The line must carry the `cpu` label followed by at least eight unsigned
/// integers: user, nice, system, idle, iowait, irq, softirq, steal. Newer
/// kernels append guest columns which are ignored.
pub fn parse_cpu_line(content: &str) -> Result<CpuCounters, ParseError> {
    let line = content
        .lines()
        .next()
        .ok_or_else(|| ParseError::new("empty /proc/stat"))?;

    let mut parts = line.split_whitespace();
    if parts.next() != Some("cpu") {
        return Err(ParseError::new(format!(
            "first line is not the aggregate cpu line: {line:?}"
        )));
    }

    let values: Vec<u64> = parts
        .take(CPU_FIELDS)
        .map_while(|s| s.parse().ok())
        .collect();
    if values.len() != CPU_FIELDS {
        return Err(ParseError::new(format!(
            "expected {CPU_FIELDS} cpu counters, got {}",
            values.len()
        )));
    }

    Ok(CpuCounters {
        user: values[0],
        nice: values[1],
        system: values[2],
        idle: values[3],
        iowait: values[4],
        irq: values[5],
        softirq: values[6],
        steal: values[7],
    })
}

// ============ /proc/meminfo ============

/// Parsed data from `/proc/meminfo`, values in kB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
}

/// Parses `/proc/meminfo` content.
///
/// Lines have the form `Key: <integer> kB`; unknown keys and lines that do not
/// parse are ignored, missing keys stay 0.
pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest
            .split_whitespace()
            .next()
            .and_then(|s| s.parse::<u64>().ok())
        else {
            continue;
        };

        match key.trim() {
            "MemTotal" => info.mem_total = value,
            "MemFree" => info.mem_free = value,
            "MemAvailable" => info.mem_available = value,
            "Buffers" => info.buffers = value,
            "Cached" => info.cached = value,
            _ => {}
        }
    }

    info
}

// ============ df -k ============

/// One row of the `df -k` report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DfEntry {
    pub device: String,
    pub total_kb: u64,
    pub used_kb: u64,
    pub available_kb: u64,
    pub usage_percent: u32,
    pub mount_point: String,
}

impl DfEntry {
    /// Whether the row is backed by a real device, tmpfs, or udev.
    ///
    /// Overlay, proc-like and other pseudo filesystems are rejected.
    pub fn is_device_backed(&self) -> bool {
        self.device.starts_with("/dev/")
            || self.device.starts_with("tmpfs")
            || self.device.starts_with("udev")
    }
}

/// Parses one `df -k` data row.
///
/// Expects device, total, used, available and `NN%` followed by the mount
/// point, which keeps its spaces (joined back with single spaces). Returns
/// `None` for anything else (wrapped device names, `-` placeholders).
pub fn parse_df_line(line: &str) -> Option<DfEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return None;
    }

    Some(DfEntry {
        device: fields[0].to_string(),
        total_kb: fields[1].parse().ok()?,
        used_kb: fields[2].parse().ok()?,
        available_kb: fields[3].parse().ok()?,
        usage_percent: fields[4].strip_suffix('%')?.parse().ok()?,
        mount_point: fields[5..].join(" "),
    })
}

/// Parses a `df -k` report, skipping the header line and malformed rows.
///
/// Format:
/// Filesystem     1K-blocks     Used Available Use% Mounted on
/// /dev/nvme0n1p2 490617784 98123556 367494420  22% /
pub fn parse_df(content: &str) -> Vec<DfEntry> {
    content.lines().skip(1).filter_map(parse_df_line).collect()
}

// ============ /proc/net/dev ============

/// Parsed data from one `/proc/net/dev` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetDevEntry {
    /// Interface name (eth0, lo, etc.)
    pub interface: String,
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
}

/// Minimum counter columns per `/proc/net/dev` row.
const NET_DEV_FIELDS: usize = 16;

/// Parses one `/proc/net/dev` interface row.
///
/// The name ends at the first colon (counters may follow it without a space).
pub fn parse_net_dev_line(line: &str) -> Option<NetDevEntry> {
    let (name, counters) = line.split_once(':')?;
    let interface = name.trim();
    if interface.is_empty() {
        return None;
    }

    let values: Vec<u64> = counters
        .split_whitespace()
        .map(|s| s.parse().ok())
        .collect::<Option<Vec<u64>>>()?;
    if values.len() < NET_DEV_FIELDS {
        return None;
    }

    Some(NetDevEntry {
        interface: interface.to_string(),
        rx_bytes: values[0],
        rx_packets: values[1],
        tx_bytes: values[8],
        tx_packets: values[9],
    })
}

/// Parses `/proc/net/dev` content.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
pub fn parse_net_dev(content: &str) -> Vec<NetDevEntry> {
    content
        .lines()
        .skip(2)
        .filter_map(parse_net_dev_line)
        .collect()
}
