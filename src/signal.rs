//! SIGKILL delivery using the nix crate
//!
//! The only signal this crate ever sends is SIGKILL; duplicates are not
//! asked to shut down, they are removed. The raw errno is surfaced
//! unclassified so the retry loop can tell "already gone" (ESRCH) from a
//! real failure.

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// Capability seam over kill(2)
pub trait Signaler {
    /// Send SIGKILL to one pid, surfacing the raw errno on failure
    fn send_kill(&self, pid: u32) -> Result<(), Errno>;
}

impl<S: Signaler + ?Sized> Signaler for &S {
    fn send_kill(&self, pid: u32) -> Result<(), Errno> {
        (**self).send_kill(pid)
    }
}

/// Production signaler backed by kill(2)
pub struct KernelSignaler;

impl Signaler for KernelSignaler {
    fn send_kill(&self, pid: u32) -> Result<(), Errno> {
        signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording signaler for unit tests

    use super::Signaler;
    use nix::errno::Errno;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// How a staged pid responds to SIGKILL
    #[derive(Debug, Clone, Copy)]
    pub(crate) enum Disposition {
        /// Accepts every signal and never dies
        Unkillable,
        /// ESRCH from the first signal on
        AlreadyGone,
        /// Accepts `n` signals, then reports ESRCH
        DiesAfter(usize),
        /// Fails every signal with the given errno
        Fails(Errno),
    }

    /// Signaler that records every send and follows a per-pid script
    ///
    /// Pids without a script respond with ESRCH, like the kernel would for
    /// a pid that does not exist.
    pub(crate) struct FakeSignaler {
        plan: HashMap<u32, Disposition>,
        sent: RefCell<Vec<u32>>,
    }

    impl FakeSignaler {
        pub(crate) fn new() -> Self {
            Self {
                plan: HashMap::new(),
                sent: RefCell::new(Vec::new()),
            }
        }

        /// Script the response for one pid
        pub(crate) fn stage(&mut self, pid: u32, disposition: Disposition) {
            self.plan.insert(pid, disposition);
        }

        /// Every send so far, in order
        pub(crate) fn sent(&self) -> Vec<u32> {
            self.sent.borrow().clone()
        }

        /// Number of sends that targeted `pid`
        pub(crate) fn sent_to(&self, pid: u32) -> usize {
            self.sent.borrow().iter().filter(|p| **p == pid).count()
        }
    }

    impl Signaler for FakeSignaler {
        fn send_kill(&self, pid: u32) -> Result<(), Errno> {
            self.sent.borrow_mut().push(pid);
            let delivered = self.sent_to(pid);
            match self.plan.get(&pid) {
                None | Some(Disposition::AlreadyGone) => Err(Errno::ESRCH),
                Some(Disposition::Unkillable) => Ok(()),
                Some(Disposition::Fails(errno)) => Err(*errno),
                Some(Disposition::DiesAfter(n)) => {
                    if delivered <= *n {
                        Ok(())
                    } else {
                        Err(Errno::ESRCH)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{Disposition, FakeSignaler};
    use super::*;

    // KernelSignaler tests

    #[test]
    fn test_send_to_nonexistent_process() {
        // Use a very high PID that's unlikely to exist
        let result = KernelSignaler.send_kill(999999999);
        match result {
            Err(Errno::ESRCH) => {}
            Err(Errno::EPERM) => {
                // Some systems may return permission denied instead
            }
            Err(e) => panic!("Unexpected errno: {:?}", e),
            Ok(_) => panic!("Expected error for nonexistent process"),
        }
    }

    // FakeSignaler tests

    #[test]
    fn test_fake_unkillable_accepts_and_records() {
        let mut signaler = FakeSignaler::new();
        signaler.stage(100, Disposition::Unkillable);

        assert!(signaler.send_kill(100).is_ok());
        assert!(signaler.send_kill(100).is_ok());
        assert_eq!(signaler.sent(), vec![100, 100]);
        assert_eq!(signaler.sent_to(100), 2);
    }

    #[test]
    fn test_fake_already_gone_reports_esrch() {
        let mut signaler = FakeSignaler::new();
        signaler.stage(100, Disposition::AlreadyGone);
        assert_eq!(signaler.send_kill(100), Err(Errno::ESRCH));
    }

    #[test]
    fn test_fake_unscripted_pid_reports_esrch() {
        let signaler = FakeSignaler::new();
        assert_eq!(signaler.send_kill(12345), Err(Errno::ESRCH));
    }

    #[test]
    fn test_fake_dies_after_sequence() {
        let mut signaler = FakeSignaler::new();
        signaler.stage(100, Disposition::DiesAfter(1));

        assert_eq!(signaler.send_kill(100), Ok(()));
        assert_eq!(signaler.send_kill(100), Err(Errno::ESRCH));
        assert_eq!(signaler.send_kill(100), Err(Errno::ESRCH));
    }

    #[test]
    fn test_fake_failing_pid_keeps_errno() {
        let mut signaler = FakeSignaler::new();
        signaler.stage(100, Disposition::Fails(Errno::EPERM));
        assert_eq!(signaler.send_kill(100), Err(Errno::EPERM));
    }

    #[test]
    fn test_fake_records_interleaved_sends() {
        let mut signaler = FakeSignaler::new();
        signaler.stage(100, Disposition::Unkillable);
        signaler.stage(200, Disposition::Unkillable);

        let _ = signaler.send_kill(100);
        let _ = signaler.send_kill(200);
        let _ = signaler.send_kill(100);
        assert_eq!(signaler.sent(), vec![100, 200, 100]);
        assert_eq!(signaler.sent_to(200), 1);
    }
}
