//! "Last request wins" sequencing for overlapping forecast refreshes
//!
//! Every refresh takes a ticket with a monotonically increasing sequence
//! number. A completed result is applied only if no newer refresh has been
//! started since its ticket was issued; otherwise it is discarded. Nothing is
//! queued and nothing is cancelled: superseded work runs to completion and
//! its result is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Sequence number handed to a refresh when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Result of handing a completed refresh to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh was started; carries the newest issued sequence
    Superseded { latest: u64 },
}

#[derive(Debug)]
struct Applied<T> {
    sequence: u64,
    value: Option<T>,
}

/// Holds the most recently applied result of type `T`
///
/// Safe to share between threads; tickets come from an atomic counter and the
/// applied slot is guarded by a mutex.
#[derive(Debug)]
pub struct RefreshSequencer<T> {
    issued: AtomicU64,
    applied: Mutex<Applied<T>>,
}

impl<T> Default for RefreshSequencer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RefreshSequencer<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            applied: Mutex::new(Applied { sequence: 0, value: None }),
        }
    }

    /// Start a refresh; supersedes every earlier ticket
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Newest sequence number handed out so far (0 before any refresh)
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Sequence of the currently applied result (0 if none)
    pub fn applied_sequence(&self) -> u64 {
        self.lock().sequence
    }

    /// Apply `value` if `ticket` is still the newest refresh
    pub fn complete(&self, ticket: RefreshTicket, value: T) -> RefreshOutcome {
        let mut applied = self.lock();
        let latest = self.latest_issued();

        if ticket.0 != latest || ticket.0 <= applied.sequence {
            log::warn!("Discarding refresh #{} superseded by #{}", ticket.0, latest);
            return RefreshOutcome::Superseded { latest };
        }

        applied.sequence = ticket.0;
        applied.value = Some(value);
        RefreshOutcome::Applied
    }

    /// Run `f` against the applied result
    pub fn with_latest<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let applied = self.lock();
        f(applied.value.as_ref())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Applied<T>> {
        // slot only ever holds a fully built value
        self.applied.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> RefreshSequencer<T> {
    /// Clone of the applied result
    pub fn latest(&self) -> Option<T> {
        self.with_latest(|value| value.cloned())
    }
}
