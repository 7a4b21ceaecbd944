//! Process table access through the proc pseudo-filesystem
//!
//! Direct /proc reads instead of a snapshotting library: every scan walks
//! the live table, so freshly spawned or exited processes are seen as-is.

use std::fs;
use std::io::{self, Read};
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

/// Upper bound on a single command-line read. The kernel reports no size
/// for `cmdline`, so reads are capped at this many bytes.
pub const MAX_CMDLINE_READ: u64 = 4096;

/// Ownership metadata of a single process table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMeta {
    /// Uid owning the process
    pub uid: u32,
}

/// Capability seam over the process table
///
/// Implementations may fail per entry at any time; a pid returned by
/// `list_pids` can be gone before the next call. Callers treat per-entry
/// errors as "process vanished" and only a failed listing as fatal.
pub trait ProcessSource {
    /// List the pids currently present in the table
    fn list_pids(&self) -> io::Result<Vec<u32>>;

    /// Read ownership metadata for one pid
    fn read_metadata(&self, pid: u32) -> io::Result<ProcessMeta>;

    /// Read the raw command line of one pid, capped at [`MAX_CMDLINE_READ`]
    fn read_command_line(&self, pid: u32) -> io::Result<Vec<u8>>;
}

/// Production process table rooted at /proc
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    /// Create a source reading the real /proc
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/proc"),
        }
    }

    /// Create a source rooted at an arbitrary directory (tests)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get current process PID
    pub fn current_pid() -> u32 {
        std::process::id()
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for ProcFs {
    fn list_pids(&self) -> io::Result<Vec<u32>> {
        let mut pids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(name) => name,
                None => continue,
            };
            // Only purely numeric entries are pids; /proc mixes in names
            // like "self" and "acpi", and "12monkeys" is not a pid either.
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(pid) = name.parse::<u32>() {
                pids.push(pid);
            }
        }
        Ok(pids)
    }

    fn read_metadata(&self, pid: u32) -> io::Result<ProcessMeta> {
        let meta = fs::metadata(self.root.join(pid.to_string()))?;
        Ok(ProcessMeta { uid: meta.uid() })
    }

    fn read_command_line(&self, pid: u32) -> io::Result<Vec<u8>> {
        let path = self.root.join(pid.to_string()).join("cmdline");
        let file = fs::File::open(path)?;
        let mut raw = Vec::new();
        file.take(MAX_CMDLINE_READ).read_to_end(&mut raw)?;
        Ok(raw)
    }
}
