//! Kill-with-confirmation retry loop
//!
//! kill(2) returning success only means the signal was queued; the target
//! may need a moment to actually die. Death is confirmed by a later kill
//! reporting ESRCH. The terminator sends one SIGKILL per schedule slot,
//! waits after every accepted send, and gives up when the schedule is
//! exhausted.

use crate::error::KillOthersError;
use crate::signal::Signaler;
use nix::errno::Errno;
use std::thread;
use std::time::Duration;

/// Escalating waits between SIGKILL attempts
pub const DEFAULT_BACKOFF: [Duration; 3] = [
    Duration::from_millis(50),
    Duration::from_millis(100),
    Duration::from_millis(200),
];

/// Terminal state of one kill attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// The kernel reported ESRCH; the process no longer exists
    ConfirmedDead {
        /// Signals sent, counting the one that reported ESRCH
        attempts: usize,
    },
    /// Every scheduled signal was accepted and the process outlived them all
    StillAlive {
        /// Signals sent, all accepted
        attempts: usize,
    },
    /// kill(2) failed with something other than ESRCH
    SignalFailed {
        /// Signals sent, counting the failed one
        attempts: usize,
        /// The unexpected errno
        errno: Errno,
    },
}

impl KillOutcome {
    /// Whether the target is confirmed gone
    pub fn is_dead(&self) -> bool {
        matches!(self, KillOutcome::ConfirmedDead { .. })
    }

    /// Signals sent before this outcome was reached
    pub fn attempts(&self) -> usize {
        match self {
            KillOutcome::ConfirmedDead { attempts }
            | KillOutcome::StillAlive { attempts }
            | KillOutcome::SignalFailed { attempts, .. } => *attempts,
        }
    }
}

/// Kills single pids with bounded retries
pub struct Terminator<K: Signaler> {
    signaler: K,
    schedule: Vec<Duration>,
}

impl<K: Signaler> Terminator<K> {
    /// Create a terminator with the default backoff schedule
    pub fn new(signaler: K) -> Self {
        Self::with_schedule(signaler, DEFAULT_BACKOFF.to_vec())
    }

    /// Create a terminator with an explicit schedule (tests use zero waits)
    pub fn with_schedule(signaler: K, schedule: Vec<Duration>) -> Self {
        Self { signaler, schedule }
    }

    /// Send SIGKILL to `pid` until death is confirmed or the schedule is
    /// exhausted
    ///
    /// One signal per schedule slot, and the slot's wait follows every
    /// accepted send, the last one included. ESRCH at any point confirms
    /// death; any other errno ends the attempt on the spot. The schedule
    /// bounds the number of signals ever sent.
    pub fn kill(&self, pid: u32) -> KillOutcome {
        let mut attempts = 0;
        for delay in &self.schedule {
            attempts += 1;
            match self.signaler.send_kill(pid) {
                Ok(()) => thread::sleep(*delay),
                Err(Errno::ESRCH) => {
                    log::warn!("Old process {} has been killed", pid);
                    return KillOutcome::ConfirmedDead { attempts };
                }
                Err(errno) => {
                    log::error!("{}", KillOthersError::SignalFailed(pid, errno));
                    return KillOutcome::SignalFailed { attempts, errno };
                }
            }
        }
        log::error!("{}", KillOthersError::RetryExhausted(pid, attempts));
        KillOutcome::StillAlive { attempts }
    }
}
