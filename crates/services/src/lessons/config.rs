use std::time::Duration;

/// Feedback pauses before a standard-tier answer moves to the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonTimings {
    pub advance_delay: Duration,
    pub remedial_delay: Duration,
}

impl LessonTimings {
    pub const ADVANCE_DELAY: Duration = Duration::from_millis(1200);
    pub const REMEDIAL_DELAY: Duration = Duration::from_millis(1500);

    /// No pauses; transitions are due as soon as they are scheduled.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            advance_delay: Duration::ZERO,
            remedial_delay: Duration::ZERO,
        }
    }
}

impl Default for LessonTimings {
    fn default() -> Self {
        Self {
            advance_delay: Self::ADVANCE_DELAY,
            remedial_delay: Self::REMEDIAL_DELAY,
        }
    }
}

/// What `can_proceed` becomes when navigating onto a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevisitPolicy {
    /// Moving forward always locks the new step; moving back always unlocks.
    #[default]
    AlwaysLock,
    /// Steps completed earlier in this pass stay unlocked when revisited.
    RememberCompleted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LessonConfig {
    pub timings: LessonTimings,
    pub revisit: RevisitPolicy,
}

impl LessonConfig {
    #[must_use]
    pub fn instant() -> Self {
        Self {
            timings: LessonTimings::instant(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_revisit(mut self, revisit: RevisitPolicy) -> Self {
        self.revisit = revisit;
        self
    }
}
