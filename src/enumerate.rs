//! Same-user process enumeration
//!
//! Walks the process table and yields the pids owned by one uid. Every
//! scan is a fresh walk; nothing is cached between calls.

use crate::error::KillOthersError;
use crate::proc::ProcessSource;

/// Enumerates process table entries owned by a single uid
pub struct ProcessEnumerator<'a, S: ProcessSource> {
    source: &'a S,
    uid: u32,
}

impl<'a, S: ProcessSource> ProcessEnumerator<'a, S> {
    /// Create an enumerator filtering for processes owned by `uid`
    pub fn new(source: &'a S, uid: u32) -> Self {
        Self { source, uid }
    }

    /// Walk the table once, yielding matching pids lazily
    ///
    /// An unopenable listing is the only fatal condition. Entries whose
    /// metadata cannot be read are dropped silently: a pid observed in the
    /// listing may be gone before it is stat'ed, and that is not an error.
    pub fn scan(&self) -> Result<impl Iterator<Item = u32> + 'a, KillOthersError> {
        let pids = self.source.list_pids()?;
        let source = self.source;
        let uid = self.uid;
        Ok(pids
            .into_iter()
            .filter(move |pid| match source.read_metadata(*pid) {
                Ok(meta) => meta.uid == uid,
                Err(_) => false,
            }))
    }
}
