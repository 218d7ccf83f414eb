//! Data models for sampled host metrics.
//!
//! - [`system`]: per-domain samples (CPU, memory, disk, network) and the raw
//!   counter readings they are derived from
//! - [`snapshot`]: the aggregate [`SystemSnapshot`] handed to the view layer
//!
//! Multi-entry domains are bounded by [`MAX_DISKS`] and [`MAX_INTERFACES`].

mod snapshot;
mod system;

pub use snapshot::SystemSnapshot;
pub use system::{
    CpuCounters, CpuSample, DiskSample, MAX_DISKS, MAX_INTERFACES, MemorySample, NetCounters,
    NetworkSample,
};
