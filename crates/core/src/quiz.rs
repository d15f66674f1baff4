//! Single-question answer collection and evaluation.

use thiserror::Error;

use crate::model::{Question, Tier};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("answer already submitted")]
    Locked,

    #[error("no option selected")]
    NothingSelected,

    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub selected: usize,
    pub is_correct: bool,
    pub feedback: String,
}

/// How an option should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Idle,
    Selected,
    /// The correct option, revealed after submission whatever was chosen.
    Correct,
    /// The learner's wrong choice.
    Incorrect,
    Faded,
}

/// Learner's interaction with one question at one tier.
///
/// The choice may change freely until submission, after which it is frozen.
/// A fresh attempt is needed whenever the concept or tier changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAttempt {
    selected: Option<usize>,
    outcome: Option<QuizOutcome>,
}

impl QuizAttempt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    /// Choose an option, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Locked` after submission and
    /// `QuizError::OptionOutOfRange` for an index past the last option.
    pub fn select(&mut self, question: &Question, index: usize) -> Result<(), QuizError> {
        if self.is_submitted() {
            return Err(QuizError::Locked);
        }
        let len = question.options().len();
        if index >= len {
            return Err(QuizError::OptionOutOfRange { index, len });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Evaluate the current choice and freeze the attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Locked` if already submitted and
    /// `QuizError::NothingSelected` if no option was chosen.
    pub fn submit(&mut self, question: &Question, tier: Tier) -> Result<&QuizOutcome, QuizError> {
        if self.is_submitted() {
            return Err(QuizError::Locked);
        }
        let selected = self.selected.ok_or(QuizError::NothingSelected)?;
        let is_correct = question.is_correct(selected);
        let outcome = QuizOutcome {
            selected,
            is_correct,
            feedback: feedback_message(question, tier, is_correct),
        };
        Ok(&*self.outcome.insert(outcome))
    }

    /// Presentation of option `index`.
    #[must_use]
    pub fn mark(&self, question: &Question, index: usize) -> OptionMark {
        let is_selected = self.selected == Some(index);
        if !self.is_submitted() {
            return if is_selected {
                OptionMark::Selected
            } else {
                OptionMark::Idle
            };
        }
        if question.is_correct(index) {
            OptionMark::Correct
        } else if is_selected {
            OptionMark::Incorrect
        } else {
            OptionMark::Faded
        }
    }

    #[must_use]
    pub fn marks(&self, question: &Question) -> Vec<OptionMark> {
        (0..question.options().len())
            .map(|index| self.mark(question, index))
            .collect()
    }
}

/// Message shown after an answer; the question's feedback is always appended.
#[must_use]
pub fn feedback_message(question: &Question, tier: Tier, is_correct: bool) -> String {
    let prefix = match (is_correct, tier) {
        (true, Tier::Advanced) => "Advanced Mastery Unlocked! ",
        (true, _) => "Correct! ",
        (false, _) => "Not quite. ",
    };
    format!("{prefix}{}", question.feedback())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new("Pick b", ["a", "b", "c"], 1, "b is right.").unwrap()
    }

    #[test]
    fn reselection_overwrites_until_submitted() {
        let q = question();
        let mut attempt = QuizAttempt::new();
        attempt.select(&q, 0).unwrap();
        attempt.select(&q, 1).unwrap();
        assert_eq!(attempt.selected(), Some(1));

        let outcome = attempt.submit(&q, Tier::Standard).unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.feedback, "Correct! b is right.");

        assert_eq!(attempt.select(&q, 2), Err(QuizError::Locked));
        assert_eq!(attempt.selected(), Some(1));
        assert!(matches!(attempt.submit(&q, Tier::Standard), Err(QuizError::Locked)));
    }

    #[test]
    fn submit_requires_a_selection() {
        let q = question();
        let mut attempt = QuizAttempt::new();
        assert!(matches!(
            attempt.submit(&q, Tier::Remedial),
            Err(QuizError::NothingSelected)
        ));
        assert_eq!(
            attempt.select(&q, 3),
            Err(QuizError::OptionOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn marks_reveal_correct_option_after_wrong_answer() {
        let q = question();
        let mut attempt = QuizAttempt::new();
        attempt.select(&q, 2).unwrap();
        assert_eq!(
            attempt.marks(&q),
            vec![OptionMark::Idle, OptionMark::Idle, OptionMark::Selected]
        );

        let outcome = attempt.submit(&q, Tier::Standard).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.feedback, "Not quite. b is right.");
        assert_eq!(
            attempt.marks(&q),
            vec![OptionMark::Faded, OptionMark::Correct, OptionMark::Incorrect]
        );
    }

    #[test]
    fn advanced_correct_feedback_mentions_mastery() {
        let q = question();
        assert_eq!(
            feedback_message(&q, Tier::Advanced, true),
            "Advanced Mastery Unlocked! b is right."
        );
        assert_eq!(feedback_message(&q, Tier::Advanced, false), "Not quite. b is right.");
    }
}
