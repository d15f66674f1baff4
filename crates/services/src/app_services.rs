use std::sync::Arc;

use lesson_core::Catalog;
use storage::repository::Storage;

use crate::Clock;
use crate::accessibility_service::AccessibilitySettingsService;
use crate::error::AppServicesError;
use crate::lessons::{LessonConfig, LessonLoopService};
use crate::skill_tree_service::SkillTreeService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    skills: Arc<SkillTreeService>,
    accessibility: Arc<AccessibilitySettingsService>,
    lesson_loop: Arc<LessonLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or skill-tree setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: LessonConfig,
        catalog: Catalog,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock, config, catalog).await
    }

    /// Build services over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if skill-tree setup fails.
    pub async fn in_memory(
        clock: Clock,
        config: LessonConfig,
        catalog: Catalog,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock, config, catalog).await
    }

    async fn from_storage(
        storage: &Storage,
        clock: Clock,
        config: LessonConfig,
        catalog: Catalog,
    ) -> Result<Self, AppServicesError> {
        let skills = SkillTreeService::new(Arc::new(catalog), Arc::clone(&storage.skill_tree));
        // First launch writes the default tree so every view has something to show.
        skills.load().await?;

        let accessibility = Arc::new(AccessibilitySettingsService::new(Arc::clone(
            &storage.accessibility,
        )));
        let lesson_loop = Arc::new(LessonLoopService::new(clock, config, skills.clone()));

        Ok(Self {
            skills: Arc::new(skills),
            accessibility,
            lesson_loop,
        })
    }

    #[must_use]
    pub fn skills(&self) -> Arc<SkillTreeService> {
        Arc::clone(&self.skills)
    }

    #[must_use]
    pub fn accessibility(&self) -> Arc<AccessibilitySettingsService> {
        Arc::clone(&self.accessibility)
    }

    #[must_use]
    pub fn lesson_loop(&self) -> Arc<LessonLoopService> {
        Arc::clone(&self.lesson_loop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_services_share_one_skill_tree() {
        let services =
            AppServices::in_memory(fixed_clock(), LessonConfig::instant(), Catalog::physics_motion())
                .await
                .unwrap();
        let lesson_loop = services.lesson_loop();
        let mut session = lesson_loop.start().await.unwrap();
        lesson_loop.submit_answer(&mut session, true).await.unwrap();

        assert_eq!(services.skills().total_xp().await.unwrap(), 100);
    }
}
