use async_trait::async_trait;
use lesson_core::model::{AccessibilitySettings, SkillTree};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the skill-tree snapshot is persisted.
pub const SKILL_TREE_KEY: &str = "aacl_skill_tree";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence boundary for the learner's skill tree.
///
/// Snapshots are always read and written whole; there is no partial update.
#[async_trait]
pub trait SkillTreeRepository: Send + Sync {
    /// Fetch the persisted snapshot, if one was ever written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be read or decoded.
    async fn load_skill_tree(&self) -> Result<Option<SkillTree>, StorageError>;

    /// Replace the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_skill_tree(&self, tree: &SkillTree) -> Result<(), StorageError>;
}

#[async_trait]
pub trait AccessibilitySettingsRepository: Send + Sync {
    /// Fetch persisted settings, if any were saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be read or decoded.
    async fn get_settings(&self) -> Result<Option<AccessibilitySettings>, StorageError>;

    /// Persist the settings, replacing previous ones.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &AccessibilitySettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    skill_tree: Arc<Mutex<Option<SkillTree>>>,
    settings: Arc<Mutex<Option<AccessibilitySettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SkillTreeRepository for InMemoryRepository {
    async fn load_skill_tree(&self) -> Result<Option<SkillTree>, StorageError> {
        let guard = self
            .skill_tree
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_skill_tree(&self, tree: &SkillTree) -> Result<(), StorageError> {
        let mut guard = self
            .skill_tree
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(tree.clone());
        Ok(())
    }
}

#[async_trait]
impl AccessibilitySettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<AccessibilitySettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &AccessibilitySettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub skill_tree: Arc<dyn SkillTreeRepository>,
    pub accessibility: Arc<dyn AccessibilitySettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let skill_tree: Arc<dyn SkillTreeRepository> = Arc::new(repo.clone());
        let accessibility: Arc<dyn AccessibilitySettingsRepository> = Arc::new(repo);
        Self {
            skill_tree,
            accessibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::Catalog;

    #[tokio::test]
    async fn skill_tree_starts_absent_and_round_trips() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_skill_tree().await.unwrap().is_none());

        let mut tree = SkillTree::default_for(&Catalog::physics_motion());
        tree.record_mastery("motion").unwrap();
        repo.save_skill_tree(&tree).await.unwrap();

        let loaded = repo.load_skill_tree().await.unwrap().unwrap();
        assert_eq!(loaded, tree);
    }

    #[tokio::test]
    async fn clones_share_the_same_store() {
        let storage = Storage::in_memory();
        let tree = SkillTree::default_for(&Catalog::physics_motion());
        storage.skill_tree.save_skill_tree(&tree).await.unwrap();

        let other = Arc::clone(&storage.skill_tree);
        assert_eq!(other.load_skill_tree().await.unwrap(), Some(tree));
        assert!(storage.accessibility.get_settings().await.unwrap().is_none());
    }
}
