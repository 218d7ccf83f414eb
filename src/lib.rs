//! quadtop - four-quadrant terminal dashboard for host metrics.
//!
//! Samples CPU, memory, disk and network usage from `/proc` and `df -k` and
//! draws them into a fixed 2x2 grid that survives terminal resizes.
//!
//! - [`collector`]: host access, parsers and per-domain collectors
//! - [`rates`]: counter deltas (CPU percentage, network throughput)
//! - [`model`]: samples and snapshots
//! - [`view`] and [`fmt`]: snapshot to quadrant text
//! - [`tui`]: layout manager and the main loop

pub mod collector;
pub mod fmt;
pub mod model;
pub mod rates;
pub mod tui;
pub mod view;
