//! Abstractions for host access to enable testing and mocking.
//!
//! The `HostSource` trait allows collectors to work with the real `/proc`
//! filesystem and system commands on Linux, and with in-memory fixtures in
//! tests or on other platforms.

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Abstraction over the host metric sources.
pub trait HostSource {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Runs `program` with `args` and returns its standard output.
    ///
    /// A command that cannot be spawned is an I/O error, and so is one that
    /// exits unsuccessfully without printing anything.
    fn command_output(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// Real host implementation backed by `std::fs` and `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealHost;

impl RealHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostSource for RealHost {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn command_output(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let output = Command::new(program).args(args).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        // df exits 1 when a single mount is unreadable but still prints the rest
        if stdout.trim().is_empty() {
            return Err(io::Error::other(format!(
                "{} exited with {} and no output",
                program, output.status
            )));
        }
        debug!(program, status = %output.status, "command failed, using its output");
        Ok(stdout)
    }
}
