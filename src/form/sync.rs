//! Lifecycle synchronizer - decides when an open form must be reseeded
//!
//! The parent owns both the open flag and the record being edited, and may
//! change either at any time. A form is reseeded when it becomes open, or
//! when the bound record changes while it stays open. Nothing happens while
//! it is closed, and nothing happens when neither input changed (so typing
//! is never clobbered).

/// Inputs the synchronizer watches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncInputs {
    pub open: bool,
    /// Key of the bound record, `None` in create mode
    pub record: Option<String>,
}

impl SyncInputs {
    pub fn new(open: bool, record: Option<String>) -> Self {
        Self { open, record }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}

/// Pure transition function: should the form be reinitialized?
pub fn should_reinitialize(prev: &SyncInputs, next: &SyncInputs) -> bool {
    next.open && (!prev.open || prev.record != next.record)
}

/// Remembers the last observed inputs and applies [`should_reinitialize`]
#[derive(Debug, Clone, Default)]
pub struct LifecycleSync {
    last: SyncInputs,
}

impl LifecycleSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest inputs; returns true if the form must be reseeded now
    pub fn observe(&mut self, next: SyncInputs) -> bool {
        let reinit = should_reinitialize(&self.last, &next);
        if reinit {
            tracing::debug!(
                was_open = self.last.open,
                from = ?self.last.record,
                to = ?next.record,
                "reinitializing form"
            );
        }
        self.last = next;
        reinit
    }

    /// The inputs seen by the last `observe` call
    pub fn last(&self) -> &SyncInputs {
        &self.last
    }
}
