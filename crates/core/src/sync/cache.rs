//! Last known-good schedule snapshot

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use agenda_domain::ScheduleSnapshot;
use parking_lot::RwLock;
use tracing::debug;

/// Position of a snapshot load in start order.
///
/// Taken before reading from the backend; a load can only land in the
/// cache if no later-started load has landed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
struct CacheState {
    snapshot: Option<Arc<ScheduleSnapshot>>,
    stale: bool,
    /// Newest ticket that installed a snapshot or marked the cache stale.
    newest: u64,
}

/// Holds at most one snapshot plus a stale flag.
///
/// The lock is only taken for pointer swaps and is never held across an
/// `.await`.
#[derive(Debug, Default)]
pub struct ScheduleCache {
    state: RwLock<CacheState>,
    tickets: AtomicU64,
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next ticket. Call before the backend reads start.
    pub fn begin_load(&self) -> LoadTicket {
        LoadTicket(self.tickets.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install a snapshot loaded under `ticket` and clear the stale flag.
    ///
    /// A load that started before the one already installed is dropped and
    /// the cached snapshot is returned instead.
    pub fn replace(&self, ticket: LoadTicket, snapshot: ScheduleSnapshot) -> Arc<ScheduleSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut state = self.state.write();
        if ticket.0 <= state.newest {
            debug!(ticket = ticket.0, newest = state.newest, "older snapshot load dropped");
            return state.snapshot.clone().unwrap_or(snapshot);
        }
        state.snapshot = Some(Arc::clone(&snapshot));
        state.stale = false;
        state.newest = ticket.0;
        snapshot
    }

    /// Flag the current snapshot as out of date with the backend.
    ///
    /// Loads started before `ticket` can no longer clear the flag.
    pub fn mark_stale(&self, ticket: LoadTicket) {
        let mut state = self.state.write();
        state.stale = true;
        state.newest = state.newest.max(ticket.0);
    }

    pub fn current(&self) -> Option<Arc<ScheduleSnapshot>> {
        self.state.read().snapshot.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().snapshot.is_some()
    }

    pub fn is_stale(&self) -> bool {
        self.state.read().stale
    }

    /// Snapshot trusted for conflict detection: loaded and not stale.
    pub fn trusted(&self) -> Option<Arc<ScheduleSnapshot>> {
        let state = self.state.read();
        if state.stale {
            None
        } else {
            state.snapshot.clone()
        }
    }
}
