use tracing::info;

use lesson_core::Catalog;
use lesson_core::model::{SkillTree, Tier};
use lesson_core::quiz::QuizOutcome;

use super::config::LessonConfig;
use super::session::{AnswerEffect, LessonSession, StepChange};
use super::transition::TransitionTicket;
use crate::Clock;
use crate::error::LessonError;
use crate::skill_tree_service::SkillTreeService;

/// Result of answering the current question with persistence applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonAnswerResult {
    pub effect: AnswerEffect,
    pub outcome: Option<QuizOutcome>,
    /// Snapshot written for the answer's skill update, if there was one.
    pub skill_tree: Option<SkillTree>,
}

/// Orchestrates lesson sessions against the clock and the skill-tree store.
#[derive(Clone)]
pub struct LessonLoopService {
    clock: Clock,
    config: LessonConfig,
    skills: SkillTreeService,
}

impl LessonLoopService {
    #[must_use]
    pub fn new(clock: Clock, config: LessonConfig, skills: SkillTreeService) -> Self {
        Self {
            clock,
            config,
            skills,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn config(&self) -> LessonConfig {
        self.config
    }

    #[must_use]
    pub fn skills(&self) -> &SkillTreeService {
        &self.skills
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.skills.catalog()
    }

    /// Start a pass over the catalog, initialising the skill tree if needed.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::SkillTree` if the skill tree cannot be loaded.
    pub async fn start(&self) -> Result<LessonSession, LessonError> {
        let tree = self.skills.load().await?;
        let catalog = self.skills.shared_catalog();
        info!(
            concepts = catalog.len(),
            xp = tree.total_xp(),
            "lesson session started"
        );
        Ok(LessonSession::new(catalog, self.config, self.clock.now()))
    }

    /// Evaluate the selected option, then persist the resulting skill write.
    ///
    /// The session is only updated once the write succeeded, so a failed
    /// write can be retried with the same selection.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the answer is rejected or persistence fails.
    pub async fn check_answer(
        &self,
        session: &mut LessonSession,
    ) -> Result<LessonAnswerResult, LessonError> {
        let mut next = session.clone();
        let (effect, outcome) = next.check_answer(self.clock.now())?;
        let result = self.persist(effect, Some(outcome)).await?;
        *session = next;
        Ok(result)
    }

    /// Apply a correctness signal, then persist the resulting skill write.
    ///
    /// The session is only updated once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the answer is rejected or persistence fails.
    pub async fn submit_answer(
        &self,
        session: &mut LessonSession,
        is_correct: bool,
    ) -> Result<LessonAnswerResult, LessonError> {
        let mut next = session.clone();
        let effect = next.submit_answer(is_correct, self.clock.now())?;
        let result = self.persist(effect, None).await?;
        *session = next;
        Ok(result)
    }

    async fn persist(
        &self,
        effect: AnswerEffect,
        outcome: Option<QuizOutcome>,
    ) -> Result<LessonAnswerResult, LessonError> {
        let skill_tree = match &effect.skill_update {
            Some(update) => Some(self.skills.apply(update).await?),
            None => None,
        };
        Ok(LessonAnswerResult {
            effect,
            outcome,
            skill_tree,
        })
    }

    /// Apply the pending tier change if it is due on this loop's clock.
    pub fn fire_due(&self, session: &mut LessonSession) -> Option<Tier> {
        session.fire_due(self.clock.now())
    }

    pub fn fire(&self, session: &mut LessonSession, ticket: TransitionTicket) -> Option<Tier> {
        session.fire(ticket)
    }

    /// # Errors
    ///
    /// Returns `LessonError` when the step cannot be left yet.
    pub fn advance(&self, session: &mut LessonSession) -> Result<StepChange, LessonError> {
        let change = session.advance()?;
        if change == StepChange::Finished {
            info!(score = session.score(), "lesson finished");
        }
        Ok(change)
    }

    /// # Errors
    ///
    /// Returns `LessonError` on the first step or after finishing.
    pub fn retreat(&self, session: &mut LessonSession) -> Result<usize, LessonError> {
        session.retreat()
    }

    pub fn restart(&self, session: &mut LessonSession) {
        session.restart();
        info!("lesson restarted");
    }
}
