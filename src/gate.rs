//! Launch gate for version-aware sweeping
//!
//! Applications embed kill-others to clean up stale instances left behind
//! by an upgrade. The gate records, per process name, the highest version
//! code that has already swept; later launches of the same build skip the
//! table walk entirely. Markers are TOML files under the user's state
//! directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Persisted marker content
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
struct GateState {
    /// Highest version code that has run a sweep
    version_code: u32,
}

/// Per-process-name version gate
pub struct LaunchGate {
    dir: Option<PathBuf>,
}

impl LaunchGate {
    /// Create a gate under the user's state directory
    ///
    /// A platform without a resolvable directory disables persistence;
    /// every launch then counts as the first.
    pub fn new() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }

    /// Create a gate storing markers under an explicit directory (tests)
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Default marker directory (XDG state dir, falling back to local data)
    ///
    /// Returns `~/.local/state/kill-others` on Linux
    pub fn default_dir() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("kill-others"))
    }

    /// Check whether `version_code` still needs its sweep, recording it as
    /// handled when it does
    ///
    /// Returns false when a marker already records this or a higher code.
    /// Otherwise the marker is written before returning true; a failed
    /// write is logged as a warning and does not block the sweep.
    pub fn first_launch(&self, name: &str, version_code: u32) -> bool {
        if let Some(recorded) = self.recorded_version(name) {
            if recorded >= version_code {
                return false;
            }
        }
        if let Err(e) = self.record_version(name, version_code) {
            log::warn!("Could not persist launch marker for '{}': {}", name, e);
        }
        true
    }

    /// Read the recorded version code for `name`
    ///
    /// A missing, unreadable, or unparsable marker reads as no marker.
    pub fn recorded_version(&self, name: &str) -> Option<u32> {
        let path = self.marker_path(name)?;
        let content = fs::read_to_string(path).ok()?;
        let state: GateState = toml::from_str(&content).ok()?;
        Some(state.version_code)
    }

    /// Persist `version_code` as handled for `name`
    pub fn record_version(&self, name: &str, version_code: u32) -> io::Result<()> {
        let Some(path) = self.marker_path(name) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no state directory available",
            ));
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let state = GateState { version_code };
        let content =
            toml::to_string(&state).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)
    }

    /// Marker file path for `name`
    fn marker_path(&self, name: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.toml", sanitize_name(name))))
    }
}

impl Default for LaunchGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce a process name to a safe marker file stem
///
/// Process names are usually paths and can hold arbitrary bytes; every
/// character outside [A-Za-z0-9._-] becomes '_', and the empty name maps
/// to "unnamed".
fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        return "unnamed".to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
