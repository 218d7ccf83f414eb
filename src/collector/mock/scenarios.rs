//! Pre-built mock host scenarios for testing.
//!
//! These scenarios provide realistic `/proc` and `df -k` output for testing
//! various host conditions.

use super::host::MockHost;

/// Header lines of `/proc/net/dev`.
const NET_DEV_HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

impl MockHost {
    /// Creates a typical host: 4 CPUs, 16 GB of memory, a few filesystems
    /// and two interfaces besides loopback.
    pub fn typical_system() -> Self {
        let mut host = Self::new();

        host.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        host.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        host.add_command(
            "df",
            &["-k"],
            "\
Filesystem     1K-blocks     Used Available Use% Mounted on
udev             8123456        0   8123456   0% /dev
tmpfs            1638400     2048   1636352   1% /run
/dev/nvme0n1p2 490617784 98123556 367494420  22% /
overlay        490617784 98123556 367494420  22% /var/lib/docker/overlay2/abc/merged
/dev/nvme0n1p1    523248     6220    517028   2% /boot/efi
",
        );
        host.add_file(
            "/proc/net/dev",
            format!(
                "{NET_DEV_HEADER}\
    lo: 12345678    9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321  654321    5   10    0     0          0       100 123456789   54321    2    5    0     0       0          0
 wlan0: 1048576    1000    0    0    0     0          0         0  524288      500    0    0    0     0       0          0
"
            ),
        );

        host
    }

    /// Creates a host whose `/proc/net/dev` lists the given interfaces as
    /// `(name, rx_bytes, rx_packets, tx_bytes, tx_packets)`.
    pub fn with_interfaces(interfaces: &[(&str, u64, u64, u64, u64)]) -> Self {
        let mut host = Self::new();
        host.set_interfaces(interfaces);
        host
    }

    /// Rewrites `/proc/net/dev` with the given interfaces.
    pub fn set_interfaces(&mut self, interfaces: &[(&str, u64, u64, u64, u64)]) {
        let mut content = NET_DEV_HEADER.to_string();
        for (name, rx_bytes, rx_packets, tx_bytes, tx_packets) in interfaces {
            content.push_str(&format!(
                "{name:>6}: {rx_bytes} {rx_packets} 0 0 0 0 0 0 {tx_bytes} {tx_packets} 0 0 0 0 0 0\n"
            ));
        }
        self.add_file("/proc/net/dev", content);
    }

    /// Rewrites the aggregate CPU line of `/proc/stat`.
    pub fn set_cpu(&mut self, user: u64, nice: u64, system: u64, idle: u64, iowait: u64) {
        self.add_file(
            "/proc/stat",
            format!("cpu  {user} {nice} {system} {idle} {iowait} 0 0 0 0 0\n"),
        );
    }

    /// A host where no metric source is readable.
    pub fn unavailable() -> Self {
        Self::new()
    }
}
