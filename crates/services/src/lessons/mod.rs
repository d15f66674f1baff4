mod config;
mod progress;
mod session;
mod transition;
mod view;
mod workflow;

// Public API of the lesson engine.
pub use crate::error::LessonError;
pub use config::{LessonConfig, LessonTimings, RevisitPolicy};
pub use progress::{LessonProgress, SCORE_TARGET, progress_percent};
pub use session::{AnswerEffect, LessonSession, QuizPhase, StepChange};
pub use transition::{PendingTransition, TransitionTicket};
pub use view::LessonView;
pub use workflow::{LessonAnswerResult, LessonLoopService};
