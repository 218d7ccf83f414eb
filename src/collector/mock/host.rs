//! In-memory mock host for testing collectors without real `/proc`.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::collector::traits::HostSource;

/// In-memory host for testing.
///
/// Stores file contents and command outputs in memory. Anything not added
/// reads as `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Map from command line (`program arg1 arg2`) to stdout.
    commands: HashMap<String, String>,
}

impl MockHost {
    /// Creates a new empty mock host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    /// Removes a file, making subsequent reads fail.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    /// Registers the stdout of a command.
    pub fn add_command(&mut self, program: &str, args: &[&str], stdout: impl Into<String>) {
        self.commands
            .insert(command_key(program, args), stdout.into());
    }
}

fn command_key(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl HostSource for MockHost {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock file not found: {}", path.display()),
            )
        })
    }

    fn command_output(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let key = command_key(program, args);
        self.commands.get(&key).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock command not found: {key}"),
            )
        })
    }
}
