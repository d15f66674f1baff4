use chrono::{DateTime, Duration, Utc};

/// Source of "now" for lesson sessions.
///
/// Deferred tier changes are stamped with clock time instead of running on
/// ambient timers, so a `Fixed` clock makes them fully deterministic in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Timestamp `delay` from now.
    #[must_use]
    pub fn after(&self, delay: std::time::Duration) -> DateTime<Utc> {
        self.now() + to_chrono(delay)
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: std::time::Duration) {
        if let Clock::Fixed(t) = self {
            *t += to_chrono(delta);
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Converts a std duration, saturating at chrono's maximum.
#[must_use]
pub fn to_chrono(delay: std::time::Duration) -> Duration {
    Duration::from_std(delay).unwrap_or(Duration::MAX)
}

/// Time left until `due_at`, or zero if it has passed.
#[must_use]
pub fn remaining(now: DateTime<Utc>, due_at: DateTime<Utc>) -> std::time::Duration {
    (due_at - now).to_std().unwrap_or_default()
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[test]
    fn fixed_clock_advances_by_millis() {
        let mut clock = fixed_clock();
        let due = clock.after(StdDuration::from_millis(1200));
        assert_eq!(remaining(clock.now(), due), StdDuration::from_millis(1200));

        clock.advance(StdDuration::from_millis(1200));
        assert_eq!(clock.now(), due);
        assert_eq!(remaining(clock.now(), due), StdDuration::ZERO);
    }

    #[test]
    fn default_clock_ignores_advance() {
        let mut clock = Clock::default_clock();
        clock.advance(StdDuration::from_secs(60));
        assert!(!clock.is_fixed());
    }
}
