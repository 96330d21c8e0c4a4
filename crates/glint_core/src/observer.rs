//! Observer callback contracts
//!
//! Animation drivers never schedule themselves and never publish state
//! reactively; a host registers callbacks and drives ticks. Callbacks
//! are boxed `FnMut` so owners can keep their own mutable capture state,
//! and `Send` so a driver can live on whichever thread the host picks.

/// Terminal signal delivered at most once per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The driver ran to the end of its duration.
    Finished,
    /// The driver was stopped before completing.
    Cancelled,
}

impl Completion {
    /// True when the run reached its natural end.
    pub fn is_finished(&self) -> bool {
        matches!(self, Completion::Finished)
    }
}

/// Per-frame observer, invoked with eased progress.
pub type ProgressFn = Box<dyn FnMut(f64) + Send>;

/// Terminal observer, invoked with the run's [`Completion`].
pub type CompletionFn = Box<dyn FnMut(Completion) + Send>;

/// Bare event observer (cycle completion, step boundaries).
pub type EventFn = Box<dyn FnMut() + Send>;
