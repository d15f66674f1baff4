#![forbid(unsafe_code)]

pub mod accessibility_service;
pub mod app_services;
pub mod error;
pub mod lessons;
pub mod skill_tree_service;

pub use lesson_core::Clock;

pub use accessibility_service::AccessibilitySettingsService;
pub use app_services::AppServices;
pub use error::{AccessibilityServiceError, AppServicesError, LessonError, SkillTreeServiceError};
pub use lessons::{
    AnswerEffect, LessonAnswerResult, LessonConfig, LessonLoopService, LessonSession,
    LessonTimings, LessonView, QuizPhase, RevisitPolicy, StepChange,
};
pub use skill_tree_service::SkillTreeService;
