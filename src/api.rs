//! Embedding boundary
//!
//! The operations applications call at startup. None of them return
//! errors or panic; failures end up in the log and nowhere else.

use crate::gate::LaunchGate;
use crate::identity::IdentityResolver;
use crate::proc::ProcFs;
use crate::sweep::Sweeper;

/// Kill every duplicate of the calling process
///
/// Enumerates the caller's same-uid processes and SIGKILLs each one whose
/// name matches the caller's own, with retries and death confirmation.
/// Failures are logged; the caller gets no result either way.
pub fn kill_others() {
    let sweeper = Sweeper::new();
    if let Err(e) = sweeper.sweep(false) {
        log::error!("{}", e);
    }
}

/// Resolve the calling process's own name
///
/// Lossy UTF-8 rendering of the raw name; the empty string when the
/// caller's command line cannot be read.
pub fn get_my_process_name() -> String {
    let source = ProcFs::new();
    let resolver = IdentityResolver::new(&source);
    String::from_utf8_lossy(&resolver.resolve_name(ProcFs::current_pid())).into_owned()
}

/// Run [`kill_others`] at most once per version code
///
/// Consults the launch gate for the caller's name; when the recorded code
/// is current or newer the sweep is skipped. Otherwise the code is
/// persisted first and the sweep runs.
pub fn try_kill(version_code: u32) {
    let name = get_my_process_name();
    let gate = LaunchGate::new();
    if gate.first_launch(&name, version_code) {
        kill_others();
    }
}
