use chrono::{DateTime, Utc};

use lesson_core::model::Tier;

/// Identifies the session epoch a deferred transition was scheduled in.
///
/// Navigation and restarts move the session to a new epoch, which turns every
/// older ticket into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket(u64);

impl TransitionTicket {
    pub(crate) fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    #[must_use]
    pub fn epoch(self) -> u64 {
        self.0
    }
}

/// Tier change waiting out its feedback pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub ticket: TransitionTicket,
    pub target: Tier,
    pub due_at: DateTime<Utc>,
}

impl PendingTransition {
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_at
    }
}
