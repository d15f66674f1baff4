use lesson_core::model::{Concept, Question, Tier};
use lesson_core::quiz::OptionMark;

use super::session::{LessonSession, QuizPhase};
use super::transition::PendingTransition;

/// Presentation-agnostic snapshot of a session for one render.
///
/// Holds borrowed catalog content and no formatted strings beyond what the
/// catalog and quiz feedback already provide.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonView<'a> {
    pub concept: &'a Concept,
    pub question: &'a Question,
    pub tier: Tier,
    pub quiz_phase: QuizPhase,
    pub score: u32,
    pub progress_percent: u32,
    pub can_proceed: bool,
    pub can_retreat: bool,
    pub finished: bool,
    pub step_index: usize,
    pub step_count: usize,
    /// Extra illustration; withheld on the advanced tier.
    pub visual: Option<&'a str>,
    pub selected: Option<usize>,
    pub marks: Vec<OptionMark>,
    pub feedback: Option<&'a str>,
    pub pending: Option<PendingTransition>,
}

impl LessonSession {
    #[must_use]
    pub fn view(&self) -> LessonView<'_> {
        let concept = self.concept();
        let question = self.question();
        let progress = self.progress();
        LessonView {
            concept,
            question,
            tier: self.tier(),
            quiz_phase: self.quiz_phase(),
            score: progress.score,
            progress_percent: progress.percent,
            can_proceed: self.can_proceed(),
            can_retreat: self.can_retreat(),
            finished: progress.is_finished,
            step_index: progress.step,
            step_count: progress.total,
            visual: concept.visual_for(self.tier()),
            selected: self.attempt().selected(),
            marks: self.attempt().marks(question),
            feedback: self.attempt().outcome().map(|o| o.feedback.as_str()),
            pending: self.pending().copied(),
        }
    }
}
