use async_trait::async_trait;
use chrono::Utc;
use lesson_core::model::SkillTree;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{decode_skill_tree, encode_skill_tree, ser};
use crate::repository::{SKILL_TREE_KEY, SkillTreeRepository, StorageError};

#[async_trait]
impl SkillTreeRepository for SqliteRepository {
    async fn load_skill_tree(&self) -> Result<Option<SkillTree>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(SKILL_TREE_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let raw: String = row.try_get("value").map_err(ser)?;
        decode_skill_tree(&raw).map(Some)
    }

    async fn save_skill_tree(&self, tree: &SkillTree) -> Result<(), StorageError> {
        let raw = encode_skill_tree(tree)?;
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(SKILL_TREE_KEY)
        .bind(raw)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
