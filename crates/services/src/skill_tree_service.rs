use std::sync::Arc;

use lesson_core::Catalog;
use lesson_core::model::{SkillNode, SkillTree, SkillUpdate};
use storage::repository::{InMemoryRepository, SkillTreeRepository};
use tracing::{debug, info, warn};

use crate::error::SkillTreeServiceError;

/// Learner progress facade over the skill-tree repository.
///
/// Every write replaces the whole persisted snapshot.
#[derive(Clone)]
pub struct SkillTreeService {
    catalog: Arc<Catalog>,
    repo: Arc<dyn SkillTreeRepository>,
}

impl SkillTreeService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, repo: Arc<dyn SkillTreeRepository>) -> Self {
        Self { catalog, repo }
    }

    #[must_use]
    pub fn in_memory(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, Arc::new(InMemoryRepository::new()))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Load the persisted skill tree, initialising it on first use.
    ///
    /// A snapshot that no longer lines up with the catalog is replaced by the
    /// default tree.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeServiceError::Storage` on repository failures.
    pub async fn load(&self) -> Result<SkillTree, SkillTreeServiceError> {
        match self.repo.load_skill_tree().await? {
            Some(tree) if tree.matches_catalog(&self.catalog) => Ok(tree),
            Some(_) => {
                warn!("persisted skill tree does not match the catalog, re-initialising");
                self.write_default().await
            }
            None => {
                info!(skills = self.catalog.len(), "initialising skill tree");
                self.write_default().await
            }
        }
    }

    /// Overwrite the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeServiceError::CatalogMismatch` if the tree does not
    /// hold exactly the catalog's concepts, or a storage error.
    pub async fn save(&self, tree: &SkillTree) -> Result<(), SkillTreeServiceError> {
        if !tree.matches_catalog(&self.catalog) {
            return Err(SkillTreeServiceError::CatalogMismatch);
        }
        self.repo.save_skill_tree(tree).await?;
        Ok(())
    }

    /// Write and return the default snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeServiceError::Storage` on repository failures.
    pub async fn reset(&self) -> Result<SkillTree, SkillTreeServiceError> {
        info!("resetting skill tree");
        self.write_default().await
    }

    /// Load, apply one practice or mastery write, and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeServiceError` if the concept is unknown or storage fails.
    pub async fn apply(&self, update: &SkillUpdate) -> Result<SkillTree, SkillTreeServiceError> {
        let mut tree = self.load().await?;
        tree.apply(update)?;
        self.save(&tree).await?;
        debug!(?update, xp = tree.total_xp(), "skill tree updated");
        Ok(tree)
    }

    /// # Errors
    ///
    /// Returns `SkillTreeServiceError::Storage` on repository failures.
    pub async fn total_xp(&self) -> Result<u32, SkillTreeServiceError> {
        Ok(self.load().await?.total_xp())
    }

    /// # Errors
    ///
    /// Returns `SkillTreeServiceError::Storage` on repository failures.
    pub async fn nodes(&self) -> Result<Vec<SkillNode>, SkillTreeServiceError> {
        Ok(self.load().await?.nodes())
    }

    async fn write_default(&self) -> Result<SkillTree, SkillTreeServiceError> {
        let tree = SkillTree::default_for(&self.catalog);
        self.repo.save_skill_tree(&tree).await?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{ConceptId, Skill, SkillLevel};

    fn service() -> (SkillTreeService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let catalog = Arc::new(Catalog::physics_motion());
        (SkillTreeService::new(catalog, Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn load_initialises_and_persists_default() {
        let (svc, repo) = service();
        let tree = svc.load().await.unwrap();

        assert_eq!(tree.skills().len(), 5);
        assert!(tree.skills()[0].unlocked);
        assert!(tree.skills()[1..].iter().all(|s| !s.unlocked));
        assert_eq!(repo.load_skill_tree().await.unwrap(), Some(tree));
    }

    #[tokio::test]
    async fn mismatched_snapshot_is_reinitialised() {
        let (svc, repo) = service();
        let stale = SkillTree::from_persisted(vec![Skill::new(
            ConceptId::new("optics"),
            "Optics",
            true,
        )])
        .unwrap();
        repo.save_skill_tree(&stale).await.unwrap();

        let tree = svc.load().await.unwrap();
        assert!(tree.matches_catalog(svc.catalog()));
        assert!(svc.save(&stale).await.is_err());
    }

    #[tokio::test]
    async fn apply_persists_and_reset_clears() {
        let (svc, _repo) = service();
        svc.apply(&SkillUpdate::Mastered(ConceptId::new("motion")))
            .await
            .unwrap();
        svc.apply(&SkillUpdate::Practiced(ConceptId::new("velocity")))
            .await
            .unwrap();

        let tree = svc.load().await.unwrap();
        assert_eq!(tree.get("motion").unwrap().level, SkillLevel::Mastered);
        assert!(tree.get("velocity").unwrap().unlocked);
        assert_eq!(svc.total_xp().await.unwrap(), 400);

        let reset = svc.reset().await.unwrap();
        assert_eq!(reset.total_xp(), 0);
        assert_eq!(svc.load().await.unwrap(), reset);
    }

    #[tokio::test]
    async fn unknown_concept_update_is_rejected() {
        let (svc, _repo) = service();
        let err = svc
            .apply(&SkillUpdate::Practiced(ConceptId::new("optics")))
            .await
            .unwrap_err();
        assert!(matches!(err, SkillTreeServiceError::SkillTree(_)));
    }
}
