//! Host metrics collector for Linux.
//!
//! This module provides infrastructure for sampling CPU, memory, disk and
//! network metrics from `/proc` and `df -k`, with support for mocking so the
//! whole path is testable off Linux.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                   Collector                   │
//! │  ┌──────────────────────┐   ┌──────────────┐  │
//! │  │   SystemCollector    │   │  DeltaState  │  │
//! │  │  - /proc/stat        │◄──┤  - cpu       │  │
//! │  │  - /proc/meminfo     │   │  - net       │  │
//! │  │  - /proc/net/dev     │   └──────────────┘  │
//! │  │  - df -k             │                     │
//! │  └──────────┬───────────┘                     │
//! │      ┌──────▼──────┐                          │
//! │      │ HostSource  │ (trait)                  │
//! │      └──────┬──────┘                          │
//! └─────────────┼─────────────────────────────────┘
//!        ┌──────┴───────┐
//!  ┌─────▼─────┐  ┌─────▼─────┐
//!  │ RealHost  │  │ MockHost  │
//!  └───────────┘  └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use quadtop::collector::{Collector, MockHost};
//!
//! let mut collector = Collector::new(MockHost::typical_system(), "/proc");
//! let snapshot = collector.collect_snapshot();
//! assert!(snapshot.memory.valid);
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use collector::{Collector, CollectorTiming};
pub use mock::MockHost;
pub use procfs::{CollectError, SystemCollector};
pub use traits::{HostSource, RealHost};
