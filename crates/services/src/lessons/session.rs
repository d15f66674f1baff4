use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use lesson_core::Catalog;
use lesson_core::model::{Concept, Question, SkillUpdate, Tier};
use lesson_core::quiz::{QuizAttempt, QuizOutcome};
use lesson_core::time::to_chrono;

use super::config::{LessonConfig, RevisitPolicy};
use super::progress::{LessonProgress, progress_percent};
use super::transition::{PendingTransition, TransitionTicket};
use crate::error::LessonError;

const STANDARD_CORRECT_POINTS: u32 = 10;
const STANDARD_WRONG_PENALTY: u32 = 2;
const ADVANCED_CORRECT_POINTS: u32 = 20;
const REMEDIAL_CORRECT_POINTS: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    Pending,
    Answered,
}

/// Everything one answer changed, for the caller to persist and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEffect {
    pub tier: Tier,
    pub is_correct: bool,
    pub score_before: u32,
    pub score_after: u32,
    /// Progress write the skill tree should receive.
    pub skill_update: Option<SkillUpdate>,
    /// Tier change that becomes due after the feedback pause.
    pub scheduled: Option<PendingTransition>,
    pub can_proceed: bool,
}

/// Where `advance` left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    Moved { step: usize },
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learning pass through the catalog.
///
/// The session never touches storage or reads the clock itself: callers pass
/// `now` in and persist the returned `SkillUpdate`s.
#[derive(Debug, Clone)]
pub struct LessonSession {
    catalog: Arc<Catalog>,
    config: LessonConfig,
    current_step: usize,
    score: u32,
    tier: Tier,
    phase: QuizPhase,
    can_proceed: bool,
    finished: bool,
    epoch: u64,
    pending: Option<PendingTransition>,
    attempt: QuizAttempt,
    completed: Vec<bool>,
    started_at: DateTime<Utc>,
}

impl LessonSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: LessonConfig, started_at: DateTime<Utc>) -> Self {
        let completed = vec![false; catalog.len()];
        Self {
            catalog,
            config,
            current_step: 0,
            score: 0,
            tier: Tier::Standard,
            phase: QuizPhase::Pending,
            can_proceed: false,
            finished: false,
            epoch: 0,
            pending: None,
            attempt: QuizAttempt::new(),
            completed,
            started_at,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> LessonConfig {
        self.config
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn quiz_phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.can_proceed
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        !self.finished && self.current_step > 0
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn attempt(&self) -> &QuizAttempt {
        &self.attempt
    }

    #[must_use]
    pub fn concept(&self) -> &Concept {
        &self.catalog.concepts()[self.current_step]
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        self.concept().question(self.tier)
    }

    #[must_use]
    pub fn progress(&self) -> LessonProgress {
        LessonProgress {
            step: self.current_step,
            total: self.step_count(),
            score: self.score,
            percent: progress_percent(self.score),
            is_finished: self.finished,
        }
    }

    /// Choose an option for the current question.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` after the last step,
    /// `LessonError::AlreadyAnswered` once the question was answered, and
    /// `LessonError::Quiz` if the index is out of range.
    pub fn select_option(&mut self, index: usize) -> Result<(), LessonError> {
        self.ensure_answerable()?;
        let question = self.catalog.concepts()[self.current_step].question(self.tier);
        self.attempt.select(question, index)?;
        Ok(())
    }

    /// Evaluate the selected option and apply the answer.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::AlreadyAnswered` once the question was answered,
    /// `LessonError::Finished` after the last step, and `LessonError::Quiz`
    /// if nothing was selected.
    pub fn check_answer(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<(AnswerEffect, QuizOutcome), LessonError> {
        self.ensure_answerable()?;
        let question = self.catalog.concepts()[self.current_step].question(self.tier);
        let outcome = self.attempt.submit(question, self.tier)?.clone();
        let effect = self.apply_answer(outcome.is_correct, now);
        Ok((effect, outcome))
    }

    /// Apply a correctness signal to the current (step, tier) pair.
    ///
    /// Only the first call per pair has any effect; later ones are rejected.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::AlreadyAnswered` once the question was answered
    /// and `LessonError::Finished` after the last step.
    pub fn submit_answer(
        &mut self,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<AnswerEffect, LessonError> {
        self.ensure_answerable()?;
        Ok(self.apply_answer(is_correct, now))
    }

    fn ensure_answerable(&self) -> Result<(), LessonError> {
        if self.finished {
            return Err(LessonError::Finished);
        }
        if self.phase == QuizPhase::Answered {
            return Err(LessonError::AlreadyAnswered);
        }
        Ok(())
    }

    fn apply_answer(&mut self, is_correct: bool, now: DateTime<Utc>) -> AnswerEffect {
        self.phase = QuizPhase::Answered;
        let score_before = self.score;
        let concept_id = self.concept().id().clone();
        let timings = self.config.timings;

        let mut skill_update = None;
        let mut scheduled = None;
        match (self.tier, is_correct) {
            (Tier::Standard, true) => {
                self.score += STANDARD_CORRECT_POINTS;
                skill_update = Some(SkillUpdate::Practiced(concept_id));
                scheduled = Some(self.schedule(Tier::Advanced, now, timings.advance_delay));
            }
            (Tier::Standard, false) => {
                self.score = self.score.saturating_sub(STANDARD_WRONG_PENALTY);
                scheduled = Some(self.schedule(Tier::Remedial, now, timings.remedial_delay));
            }
            (Tier::Advanced, true) => {
                self.score += ADVANCED_CORRECT_POINTS;
                skill_update = Some(SkillUpdate::Mastered(concept_id));
                self.complete_step();
            }
            (Tier::Remedial, true) => {
                self.score += REMEDIAL_CORRECT_POINTS;
                skill_update = Some(SkillUpdate::Practiced(concept_id));
                self.complete_step();
            }
            (Tier::Advanced | Tier::Remedial, false) => self.complete_step(),
        }

        AnswerEffect {
            tier: self.tier,
            is_correct,
            score_before,
            score_after: self.score,
            skill_update,
            scheduled,
            can_proceed: self.can_proceed,
        }
    }

    fn schedule(
        &mut self,
        target: Tier,
        now: DateTime<Utc>,
        delay: std::time::Duration,
    ) -> PendingTransition {
        let pending = PendingTransition {
            ticket: TransitionTicket::new(self.epoch),
            target,
            due_at: now + to_chrono(delay),
        };
        self.pending = Some(pending);
        pending
    }

    fn complete_step(&mut self) {
        self.can_proceed = true;
        self.completed[self.current_step] = true;
    }

    //
    // ─── DEFERRED TRANSITIONS ──────────────────────────────────────────────────
    //

    /// Apply the pending tier change if its pause has elapsed.
    ///
    /// Returns the tier the session moved to, if any.
    pub fn fire_due(&mut self, now: DateTime<Utc>) -> Option<Tier> {
        let pending = self.pending?;
        if !pending.is_due(now) {
            return None;
        }
        self.fire(pending.ticket)
    }

    /// Apply the pending tier change for `ticket`, ignoring its due time.
    ///
    /// Tickets from an earlier epoch, or already fired, do nothing.
    pub fn fire(&mut self, ticket: TransitionTicket) -> Option<Tier> {
        if ticket.epoch() != self.epoch {
            debug!(ticket = ticket.epoch(), epoch = self.epoch, "ignoring stale transition");
            return None;
        }
        let pending = self.pending.take_if(|pending| pending.ticket == ticket)?;
        self.tier = pending.target;
        self.phase = QuizPhase::Pending;
        self.attempt = QuizAttempt::new();
        debug!(step = self.current_step, tier = %self.tier, "tier transition");
        Some(self.tier)
    }

    /// Drop any pending tier change and invalidate outstanding tickets.
    pub fn cancel_pending(&mut self) -> Option<PendingTransition> {
        self.epoch += 1;
        self.pending.take()
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Move to the next concept, or finish after the last one.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` if already finished and
    /// `LessonError::CannotProceed` while the current step is incomplete.
    pub fn advance(&mut self) -> Result<StepChange, LessonError> {
        if self.finished {
            return Err(LessonError::Finished);
        }
        if !self.can_proceed {
            return Err(LessonError::CannotProceed);
        }
        self.cancel_pending();

        if self.current_step >= self.catalog.last_index() {
            self.finished = true;
            return Ok(StepChange::Finished);
        }
        self.enter_step(self.current_step + 1);
        self.can_proceed = match self.config.revisit {
            RevisitPolicy::AlwaysLock => false,
            RevisitPolicy::RememberCompleted => self.completed[self.current_step],
        };
        Ok(StepChange::Moved {
            step: self.current_step,
        })
    }

    /// Move back one concept.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` if already finished and
    /// `LessonError::AtFirstStep` on the first concept.
    pub fn retreat(&mut self) -> Result<usize, LessonError> {
        if self.finished {
            return Err(LessonError::Finished);
        }
        if self.current_step == 0 {
            return Err(LessonError::AtFirstStep);
        }
        self.cancel_pending();
        self.enter_step(self.current_step - 1);
        self.can_proceed = match self.config.revisit {
            RevisitPolicy::AlwaysLock => true,
            RevisitPolicy::RememberCompleted => self.completed[self.current_step],
        };
        Ok(self.current_step)
    }

    /// Start the pass over; the skill tree is left alone.
    pub fn restart(&mut self) {
        self.cancel_pending();
        self.enter_step(0);
        self.score = 0;
        self.can_proceed = false;
        self.finished = false;
        self.completed.fill(false);
    }

    fn enter_step(&mut self, step: usize) {
        self.current_step = step;
        self.tier = Tier::Standard;
        self.phase = QuizPhase::Pending;
        self.attempt = QuizAttempt::new();
    }
}
