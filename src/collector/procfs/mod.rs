//! Collectors for Linux `/proc` and the `df` report.
//!
//! This module provides parsers and per-domain collectors for reading host
//! metrics.

pub mod parser;
pub mod system;

pub use parser::ParseError;
pub use system::{CollectError, SystemCollector};
