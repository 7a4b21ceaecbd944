//! Error types and exit codes for kill-others
//!
//! Distinguishes the one fatal condition (the process table itself cannot
//! be opened) from per-target kill failures, and maps both to exit codes.

use nix::errno::Errno;
use std::process::ExitCode;
use thiserror::Error;

/// Exit codes for the kill-others command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOthersExitCode {
    /// Successful execution (including "no duplicates found")
    Success = 0,
    /// At least one matched duplicate could not be killed
    KillFailed = 1,
    /// Fatal error before any kill was attempted
    Fatal = 255,
}

impl From<KillOthersExitCode> for ExitCode {
    fn from(code: KillOthersExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Error types for kill-others operations
#[derive(Error, Debug)]
pub enum KillOthersError {
    /// The process table could not be listed; nothing can be enumerated
    #[error("'/proc' cannot be opened: {0}")]
    ProcUnavailable(#[from] std::io::Error),

    /// kill(2) reported something other than success or ESRCH
    #[error("Sending SIGKILL to process {0} failed: {1}")]
    SignalFailed(u32, Errno),

    /// Every scheduled SIGKILL was delivered and the process is still there
    #[error("Killing process {0} failed: still alive after {1} SIGKILL attempts")]
    RetryExhausted(u32, usize),
}

impl KillOthersError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> KillOthersExitCode {
        match self {
            KillOthersError::ProcUnavailable(_) => KillOthersExitCode::Fatal,
            KillOthersError::SignalFailed(_, _) | KillOthersError::RetryExhausted(_, _) => {
                KillOthersExitCode::KillFailed
            }
        }
    }
}
