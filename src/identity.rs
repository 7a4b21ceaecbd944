//! Process identity resolution
//!
//! Names are the raw first segment of `/proc/<pid>/cmdline` and are
//! compared byte for byte, never through a lossy decode. One enumeration
//! pass is partitioned into the caller's own identity and the set of
//! candidate processes.

use crate::proc::ProcessSource;
use std::collections::HashMap;

/// Candidate pids mapped to their resolved raw names
pub type CandidateSet = HashMap<u32, Vec<u8>>;

/// Identity of the calling process within one enumeration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfIdentity {
    /// Pid of the caller
    pub pid: u32,
    /// Resolved raw name; empty when the caller's command line is unreadable
    pub name: Vec<u8>,
}

/// Resolves process names and splits a scan into self vs. the rest
pub struct IdentityResolver<'a, S: ProcessSource> {
    source: &'a S,
}

impl<'a, S: ProcessSource> IdentityResolver<'a, S> {
    /// Create a resolver reading names from `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve the name of one pid
    ///
    /// An unreadable command line resolves to the empty name rather than
    /// an error; short-lived processes disappear mid-scan all the time.
    pub fn resolve_name(&self, pid: u32) -> Vec<u8> {
        match self.source.read_command_line(pid) {
            Ok(raw) => first_segment(&raw).to_vec(),
            Err(_) => Vec::new(),
        }
    }

    /// Partition enumerated pids into the caller's identity and the
    /// candidate set
    ///
    /// The caller's own pid never enters the candidate set, even though
    /// its name trivially matches its own.
    pub fn partition(
        &self,
        pids: impl Iterator<Item = u32>,
        self_pid: u32,
    ) -> (SelfIdentity, CandidateSet) {
        let mut me = SelfIdentity {
            pid: self_pid,
            name: Vec::new(),
        };
        let mut candidates = CandidateSet::new();
        for pid in pids {
            if pid == self_pid {
                me.name = self.resolve_name(pid);
            } else {
                candidates.insert(pid, self.resolve_name(pid));
            }
        }
        (me, candidates)
    }
}

/// Cut the first name segment out of a raw command line
///
/// A NUL byte ends the segment and is dropped; a newline ends it but stays
/// part of the name. Names are fingerprints for equality, not display
/// strings, so the trailing newline is preserved rather than trimmed.
fn first_segment(raw: &[u8]) -> &[u8] {
    for (i, b) in raw.iter().enumerate() {
        match *b {
            0 => return &raw[..i],
            b'\n' => return &raw[..=i],
            _ => {}
        }
    }
    raw
}
