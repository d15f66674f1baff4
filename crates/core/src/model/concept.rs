use thiserror::Error;

use crate::model::ids::ConceptId;
use crate::model::tier::Tier;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConceptError {
    #[error("concept id cannot be empty")]
    EmptyId,

    #[error("concept title cannot be empty")]
    EmptyTitle,

    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: usize,
    feedback: String,
}

impl Question {
    /// Creates a question, checking that `correct_answer` indexes into `options`.
    ///
    /// # Errors
    ///
    /// Returns `ConceptError` if the text is blank, there are no options, or the
    /// correct answer index is out of range.
    pub fn new<I, S>(
        text: impl Into<String>,
        options: I,
        correct_answer: usize,
        feedback: impl Into<String>,
    ) -> Result<Self, ConceptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ConceptError::EmptyQuestion);
        }
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(ConceptError::NoOptions);
        }
        if correct_answer >= options.len() {
            return Err(ConceptError::CorrectAnswerOutOfRange {
                index: correct_answer,
                len: options.len(),
            });
        }

        Ok(Self {
            text,
            options,
            correct_answer,
            feedback: feedback.into(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer
    }
}

/// One question per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredQuestions {
    pub standard: Question,
    pub remedial: Question,
    pub advanced: Question,
}

impl TieredQuestions {
    #[must_use]
    pub fn get(&self, tier: Tier) -> &Question {
        match tier {
            Tier::Standard => &self.standard,
            Tier::Remedial => &self.remedial,
            Tier::Advanced => &self.advanced,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &Question)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

//
// ─── CONCEPT ───────────────────────────────────────────────────────────────────
//

/// One lesson unit: an explanation plus a question for each tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    id: ConceptId,
    title: String,
    skill_label: String,
    explanation: String,
    diagram: String,
    additional_visual: Option<String>,
    questions: TieredQuestions,
}

impl Concept {
    /// Creates a concept.
    ///
    /// # Errors
    ///
    /// Returns `ConceptError` if the id or title is blank.
    pub fn new(
        id: impl Into<ConceptId>,
        title: impl Into<String>,
        skill_label: impl Into<String>,
        explanation: impl Into<String>,
        diagram: impl Into<String>,
        questions: TieredQuestions,
    ) -> Result<Self, ConceptError> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(ConceptError::EmptyId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ConceptError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            skill_label: skill_label.into(),
            explanation: explanation.into(),
            diagram: diagram.into(),
            additional_visual: None,
            questions,
        })
    }

    #[must_use]
    pub fn with_additional_visual(mut self, visual: impl Into<String>) -> Self {
        self.additional_visual = Some(visual.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &ConceptId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short label used for the concept's skill-tree node.
    #[must_use]
    pub fn skill_label(&self) -> &str {
        &self.skill_label
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn diagram(&self) -> &str {
        &self.diagram
    }

    #[must_use]
    pub fn additional_visual(&self) -> Option<&str> {
        self.additional_visual.as_deref()
    }

    /// Supplementary visual shown alongside the explanation.
    ///
    /// The mastery check is shown without it.
    #[must_use]
    pub fn visual_for(&self, tier: Tier) -> Option<&str> {
        match tier {
            Tier::Advanced => None,
            Tier::Remedial | Tier::Standard => self.additional_visual(),
        }
    }

    #[must_use]
    pub fn questions(&self) -> &TieredQuestions {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, tier: Tier) -> &Question {
        self.questions.get(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question::new("Q?", ["a", "b"], correct, "because").unwrap()
    }

    #[test]
    fn question_rejects_out_of_range_answer() {
        let err = Question::new("Q?", ["a", "b"], 2, "").unwrap_err();
        assert_eq!(err, ConceptError::CorrectAnswerOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn question_rejects_empty_options_and_text() {
        let none: [&str; 0] = [];
        assert_eq!(Question::new("Q?", none, 0, "").unwrap_err(), ConceptError::NoOptions);
        assert_eq!(Question::new("  ", ["a"], 0, "").unwrap_err(), ConceptError::EmptyQuestion);
    }

    #[test]
    fn visual_is_hidden_on_the_mastery_check() {
        let concept = Concept::new(
            "motion",
            "What is Motion?",
            "Motion Basics",
            "explanation",
            "/diagrams/motion.png",
            TieredQuestions {
                standard: question(0),
                remedial: question(1),
                advanced: question(0),
            },
        )
        .unwrap()
        .with_additional_visual("a train");

        assert_eq!(concept.visual_for(Tier::Standard), Some("a train"));
        assert_eq!(concept.visual_for(Tier::Remedial), Some("a train"));
        assert_eq!(concept.visual_for(Tier::Advanced), None);
        assert_eq!(concept.question(Tier::Remedial).correct_answer(), 1);
    }

    #[test]
    fn concept_requires_id_and_title() {
        let questions = TieredQuestions {
            standard: question(0),
            remedial: question(0),
            advanced: question(0),
        };
        let err = Concept::new("", "t", "l", "e", "d", questions.clone()).unwrap_err();
        assert_eq!(err, ConceptError::EmptyId);
        let err = Concept::new("id", " ", "l", "e", "d", questions).unwrap_err();
        assert_eq!(err, ConceptError::EmptyTitle);
    }
}
