//! Fetch lifecycle state machine.
//!
//! A [`PaginationContext`] records whether a page fetch is outstanding. The
//! scroll thread reads it on every offset change while the fetch itself
//! usually completes elsewhere, so every read and transition goes through
//! one lock. No callback ever runs with that lock held.

use std::sync::Arc;

use parking_lot::Mutex;

/// State of a pagination context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaginationState {
    /// No fetch has started yet.
    #[default]
    Idle,
    /// A page fetch is in flight.
    Fetching,
    /// The last fetch was cancelled.
    Cancelled,
    /// The last fetch succeeded.
    Completed,
    /// The last fetch failed.
    Failed,
}

impl PaginationState {
    /// True only while a fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        *self == PaginationState::Fetching
    }

    /// True for the states that allow a new fetch to begin.
    pub fn is_at_rest(&self) -> bool {
        !self.is_fetching()
    }

    fn finished(succeeded: bool) -> Self {
        if succeeded {
            PaginationState::Completed
        } else {
            PaginationState::Failed
        }
    }
}

/// Thread-safe handle to the fetch state of one paginated viewport.
///
/// Clones share the same state, so a handle can be moved into the task that
/// performs the fetch and finished from there.
///
/// ```ignore
/// let context = controller.context();
/// context.start();
/// std::thread::spawn(move || {
///     let ok = load_next_page().is_ok();
///     context.finish(ok);
/// });
/// ```
#[derive(Clone, Default)]
pub struct PaginationContext {
    state: Arc<Mutex<PaginationState>>,
}

impl PaginationContext {
    /// Create a context in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PaginationState {
        *self.state.lock()
    }

    pub fn is_fetching(&self) -> bool {
        self.state().is_fetching()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == PaginationState::Cancelled
    }

    pub fn is_completed(&self) -> bool {
        self.state() == PaginationState::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.state() == PaginationState::Failed
    }

    /// Mark a page fetch as started.
    ///
    /// Call this from the delegate when it begins loading; until the fetch is
    /// finished or cancelled no further prefetch is triggered.
    pub fn start(&self) {
        self.transition("start", PaginationState::Fetching);
    }

    /// Mark the in-flight fetch as cancelled.
    ///
    /// This only records the cancellation. The fetch itself keeps running
    /// unless it checks [`is_cancelled`](Self::is_cancelled).
    pub fn cancel(&self) {
        self.transition("cancel", PaginationState::Cancelled);
    }

    /// Mark the in-flight fetch as completed (`true`) or failed (`false`).
    pub fn finish(&self, succeeded: bool) {
        self.transition("finish", PaginationState::finished(succeeded));
    }

    /// Apply a transition. Every transition is accepted; ending a fetch that
    /// was never started is logged and forced through.
    fn transition(&self, action: &'static str, next: PaginationState) {
        let previous = {
            let mut state = self.state.lock();
            std::mem::replace(&mut *state, next)
        };

        if next != PaginationState::Fetching && !previous.is_fetching() {
            tracing::warn!(
                "PaginationContext::{action} called while {previous:?}; forcing {next:?}"
            );
        } else {
            tracing::trace!("PaginationContext: {previous:?} -> {next:?}");
        }
    }
}

impl std::fmt::Debug for PaginationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationContext")
            .field("state", &self.state())
            .finish()
    }
}
