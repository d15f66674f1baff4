/// Score at which the progress bar is full.
pub const SCORE_TARGET: u32 = 50;

/// Progress-bar fill for a score, capped at 100.
#[must_use]
pub fn progress_percent(score: u32) -> u32 {
    (score.saturating_mul(100) / SCORE_TARGET).min(100)
}

/// Aggregated view of lesson progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonProgress {
    pub step: usize,
    pub total: usize,
    pub score: u32,
    pub percent: u32,
    pub is_finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_tracks_target_and_caps() {
        assert_eq!(progress_percent(0), 0);
        assert_eq!(progress_percent(10), 20);
        assert_eq!(progress_percent(45), 90);
        assert_eq!(progress_percent(50), 100);
        assert_eq!(progress_percent(130), 100);
    }
}
