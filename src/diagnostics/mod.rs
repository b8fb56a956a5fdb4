// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for observing toast lifecycle behavior.
//!
//! The manager records what happens to each toast (added, queued,
//! dismissed, expired, removed, ...) into a memory-bounded log that a
//! host can inspect after the fact. Recording is opt-in: attach a
//! [`DiagnosticsHandle`] via `ToastManager::set_diagnostics`.
//!
//! # Architecture
//!
//! - [`LifecycleKind`] / [`LifecycleEvent`]: what happened, and when
//! - [`EventLog`]: bounded ring retaining events in chronological order
//! - [`DiagnosticsHandle`]: cheap-to-clone handle shared between the
//!   manager (writer) and the host (reader)
//!
//! The whole notification core is single-threaded, so the handle shares
//! its log through `Rc<RefCell<..>>` rather than a channel.

mod events;
mod log;

pub use events::{LifecycleEvent, LifecycleKind};
pub use log::{EventLog, DEFAULT_LOG_CAPACITY};

use std::cell::RefCell;
use std::rc::Rc;

/// Shared access to a lifecycle event log.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsHandle {
    log: Rc<RefCell<EventLog>>,
}

impl DiagnosticsHandle {
    /// Creates a handle over an empty log with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle over an empty log retaining at most `capacity`
    /// events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: Rc::new(RefCell::new(EventLog::with_capacity(capacity))),
        }
    }

    /// Records a lifecycle event.
    pub fn record(&self, kind: LifecycleKind) {
        self.log.borrow_mut().record(kind);
    }

    /// Returns a snapshot of the retained events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.log.borrow().iter().cloned().collect()
    }

    /// Returns a snapshot of the retained kinds, oldest first.
    #[must_use]
    pub fn kinds(&self) -> Vec<LifecycleKind> {
        self.log.borrow().kinds()
    }

    /// Returns the number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Returns true when no event is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Drops all retained events.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_log() {
        let handle = DiagnosticsHandle::new();
        let writer = handle.clone();

        writer.record(LifecycleKind::Cleared);

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.kinds(), vec![LifecycleKind::Cleared]);
    }

    #[test]
    fn capacity_bounds_the_shared_log() {
        let handle = DiagnosticsHandle::with_capacity(1);
        handle.record(LifecycleKind::Dismissed {
            id: "a".to_string(),
        });
        handle.record(LifecycleKind::Dismissed {
            id: "b".to_string(),
        });

        assert_eq!(
            handle.kinds(),
            vec![LifecycleKind::Dismissed {
                id: "b".to_string()
            }]
        );
    }
}
