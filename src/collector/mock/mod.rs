//! Mock host implementations for testing.
//!
//! This module provides `MockHost` and pre-built scenarios for testing
//! collectors without requiring actual Linux `/proc` access or `df`.

mod host;
mod scenarios;

pub use host::MockHost;
