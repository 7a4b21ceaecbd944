//! Duplicate sweep engine
//!
//! Composes enumeration, identity resolution, and termination into the one
//! operation this crate exists for: find every other process that is the
//! same program run by the same user, and remove it.

use crate::enumerate::ProcessEnumerator;
use crate::error::KillOthersError;
use crate::identity::IdentityResolver;
use crate::proc::{ProcFs, ProcessSource};
use crate::signal::{KernelSignaler, Signaler};
use crate::terminate::{KillOutcome, Terminator};

/// Record of one duplicate handled during a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillRecord {
    /// Target process ID
    pub pid: u32,
    /// Resolved name (lossy UTF-8, for reporting only)
    pub name: String,
    /// Whether the duplicate is confirmed gone
    pub success: bool,
    /// Detailed message about the outcome
    pub message: String,
}

impl KillRecord {
    /// Create a record from a termination outcome
    pub fn from_outcome(pid: u32, name: impl Into<String>, outcome: &KillOutcome) -> Self {
        let (success, message) = match outcome {
            KillOutcome::ConfirmedDead { attempts } => (
                true,
                format!("Confirmed dead after {} SIGKILL signal(s)", attempts),
            ),
            KillOutcome::StillAlive { attempts } => (
                false,
                KillOthersError::RetryExhausted(pid, *attempts).to_string(),
            ),
            KillOutcome::SignalFailed { errno, .. } => (
                false,
                KillOthersError::SignalFailed(pid, *errno).to_string(),
            ),
        };
        Self {
            pid,
            name: name.into(),
            success,
            message,
        }
    }

    /// Create a dry-run record
    pub fn dry_run(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            success: true,
            message: "Would send SIGKILL to process (dry run)".to_string(),
        }
    }
}

/// Result of one full duplicate sweep
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Individual records, ordered by pid
    pub records: Vec<KillRecord>,
    /// Total number of duplicates matched
    pub total_matched: usize,
    /// Total number of duplicates confirmed gone
    pub total_killed: usize,
}

impl SweepReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the report
    pub fn add(&mut self, record: KillRecord) {
        if record.success {
            self.total_killed += 1;
        }
        self.total_matched += 1;
        self.records.push(record);
    }

    /// Check if every matched duplicate is confirmed gone
    pub fn all_killed(&self) -> bool {
        self.total_matched > 0 && self.total_killed == self.total_matched
    }

    /// Check if any matched duplicate survived
    pub fn any_failed(&self) -> bool {
        self.total_killed < self.total_matched
    }

    /// Check if the sweep matched nothing
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Engine that finds and kills duplicates of the calling process
pub struct Sweeper<S: ProcessSource, K: Signaler> {
    source: S,
    terminator: Terminator<K>,
    self_pid: u32,
    uid: u32,
}

impl Sweeper<ProcFs, KernelSignaler> {
    /// Create a sweeper over the real /proc for the current process
    pub fn new() -> Self {
        Self::with_parts(
            ProcFs::new(),
            Terminator::new(KernelSignaler),
            ProcFs::current_pid(),
            nix::unistd::geteuid().as_raw(),
        )
    }
}

impl Default for Sweeper<ProcFs, KernelSignaler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ProcessSource, K: Signaler> Sweeper<S, K> {
    /// Create a sweeper from explicit parts (tests swap in fakes)
    pub fn with_parts(source: S, terminator: Terminator<K>, self_pid: u32, uid: u32) -> Self {
        Self {
            source,
            terminator,
            self_pid,
            uid,
        }
    }

    /// Run one sweep
    ///
    /// Enumerates same-uid processes, resolves names, and kills every
    /// candidate whose name equals the caller's byte for byte. Candidates
    /// are handled independently; one failure does not stop the rest. The
    /// caller's own pid is never a candidate.
    pub fn sweep(&self, dry_run: bool) -> Result<SweepReport, KillOthersError> {
        let enumerator = ProcessEnumerator::new(&self.source, self.uid);
        let resolver = IdentityResolver::new(&self.source);
        let (me, candidates) = resolver.partition(enumerator.scan()?, self.self_pid);

        // Candidate map order is arbitrary; report by ascending pid
        let mut duplicates: Vec<(u32, &Vec<u8>)> = candidates
            .iter()
            .filter(|(_, name)| **name == me.name)
            .map(|(pid, name)| (*pid, name))
            .collect();
        duplicates.sort_unstable_by_key(|(pid, _)| *pid);

        let mut report = SweepReport::new();
        for (pid, name) in duplicates {
            let display = String::from_utf8_lossy(name).into_owned();
            let record = if dry_run {
                KillRecord::dry_run(pid, display)
            } else {
                KillRecord::from_outcome(pid, display, &self.terminator.kill(pid))
            };
            report.add(record);
        }
        Ok(report)
    }
}
