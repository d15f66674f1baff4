use std::sync::Arc;

use lesson_core::Catalog;
use lesson_core::model::{SkillLevel, SkillTree, Tier};
use lesson_core::time::fixed_clock;
use services::{
    LessonConfig, LessonError, LessonLoopService, LessonSession, QuizPhase, SkillTreeService,
    StepChange,
};
use storage::repository::{InMemoryRepository, SkillTreeRepository};

fn loop_service(repo: &InMemoryRepository) -> LessonLoopService {
    let skills = SkillTreeService::new(
        Arc::new(Catalog::physics_motion()),
        Arc::new(repo.clone()),
    );
    LessonLoopService::new(fixed_clock(), LessonConfig::instant(), skills)
}

async fn stored_tree(repo: &InMemoryRepository) -> SkillTree {
    repo.load_skill_tree().await.unwrap().expect("skill tree persisted")
}

/// Standard correct, then advanced with the given answer.
async fn climb(svc: &LessonLoopService, session: &mut LessonSession, advanced_correct: bool) {
    svc.submit_answer(session, true).await.unwrap();
    assert_eq!(svc.fire_due(session), Some(Tier::Advanced));
    svc.submit_answer(session, advanced_correct).await.unwrap();
}

#[tokio::test]
async fn full_pass_follows_the_documented_scenarios() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = svc.start().await.unwrap();
    assert_eq!(session.step_count(), 5);

    // Correct at standard: +10, practiced, moves to advanced.
    let result = svc.submit_answer(&mut session, true).await.unwrap();
    assert_eq!(result.effect.score_after, 10);
    assert_eq!(svc.fire_due(&mut session), Some(Tier::Advanced));
    assert_eq!(
        stored_tree(&repo).await.get("motion").unwrap().level,
        SkillLevel::Practiced
    );

    // Correct at advanced: +20, mastered, next unlocked.
    svc.submit_answer(&mut session, true).await.unwrap();
    assert_eq!(session.score(), 30);
    assert!(session.can_proceed());
    let tree = stored_tree(&repo).await;
    assert_eq!(tree.get("motion").unwrap().level, SkillLevel::Mastered);
    assert!(tree.get("velocity").unwrap().unlocked);

    // Advance resets the step.
    assert_eq!(svc.advance(&mut session).unwrap(), StepChange::Moved { step: 1 });
    assert_eq!(session.tier(), Tier::Standard);
    assert_eq!(session.quiz_phase(), QuizPhase::Pending);
    assert!(!session.can_proceed());

    for _ in 1..4 {
        climb(&svc, &mut session, true).await;
        svc.advance(&mut session).unwrap();
    }
    assert_eq!(session.current_step(), 4);
    assert_eq!(session.concept().id().as_str(), "freefall");

    // Wrong at advanced on the last concept still permits proceeding.
    svc.submit_answer(&mut session, true).await.unwrap();
    svc.fire_due(&mut session);
    let before = session.score();
    let result = svc.submit_answer(&mut session, false).await.unwrap();
    assert_eq!(result.effect.score_after, before);
    assert!(result.skill_tree.is_none());
    assert!(session.can_proceed());

    assert_eq!(svc.advance(&mut session).unwrap(), StepChange::Finished);
    assert!(session.is_finished());

    // Restart keeps the persisted skill tree.
    svc.restart(&mut session);
    assert_eq!(session.current_step(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.tier(), Tier::Standard);
    assert!(!session.is_finished());
    let tree = stored_tree(&repo).await;
    assert_eq!(tree.get("motion").unwrap().level, SkillLevel::Mastered);
    assert!(tree.get("velocity").unwrap().unlocked);
    assert_eq!(tree.get("freefall").unwrap().level, SkillLevel::Practiced);
}

#[tokio::test]
async fn double_submission_does_not_double_apply() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = svc.start().await.unwrap();

    svc.submit_answer(&mut session, true).await.unwrap();
    let err = svc.submit_answer(&mut session, true).await.unwrap_err();
    assert!(matches!(err, LessonError::AlreadyAnswered));
    assert_eq!(session.score(), 10);
    assert_eq!(stored_tree(&repo).await.total_xp(), 100);
}

#[tokio::test]
async fn score_never_drops_below_zero() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = svc.start().await.unwrap();

    for _ in 0..session.step_count() {
        let result = svc.submit_answer(&mut session, false).await.unwrap();
        assert_eq!(result.effect.score_after, 0);
        assert_eq!(svc.fire_due(&mut session), Some(Tier::Remedial));
        svc.submit_answer(&mut session, false).await.unwrap();
        svc.advance(&mut session).unwrap();
    }
    assert!(session.is_finished());
    assert_eq!(session.score(), 0);
    assert_eq!(stored_tree(&repo).await.total_xp(), 0);
}

#[tokio::test]
async fn unlock_follows_mastery_only() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = svc.start().await.unwrap();

    // Practiced via remedial: no unlock.
    svc.submit_answer(&mut session, false).await.unwrap();
    svc.fire_due(&mut session);
    svc.submit_answer(&mut session, true).await.unwrap();
    svc.advance(&mut session).unwrap();
    // Failed at advanced: no unlock either.
    climb(&svc, &mut session, false).await;
    svc.advance(&mut session).unwrap();
    // Mastered: unlocks exactly the next concept.
    climb(&svc, &mut session, true).await;

    let tree = stored_tree(&repo).await;
    let unlocked: Vec<bool> = tree.skills().iter().map(|s| s.unlocked).collect();
    assert_eq!(unlocked, vec![true, false, false, true, false]);
    let levels: Vec<u8> = tree.skills().iter().map(|s| s.level.value()).collect();
    assert_eq!(levels, vec![1, 1, 3, 0, 0]);
}

#[tokio::test]
async fn levels_never_regress_within_a_pass() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let mut session = svc.start().await.unwrap();

    climb(&svc, &mut session, true).await;
    svc.advance(&mut session).unwrap();
    svc.retreat(&mut session).unwrap();
    // Practising a mastered concept again keeps it mastered.
    svc.submit_answer(&mut session, true).await.unwrap();

    assert_eq!(
        stored_tree(&repo).await.get("motion").unwrap().level,
        SkillLevel::Mastered
    );
}
