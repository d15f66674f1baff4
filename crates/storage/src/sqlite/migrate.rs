use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Applies pending schema migrations.
///
/// Version 1 creates the key/value snapshot store used for the skill tree.
/// Version 2 adds the single-row accessibility settings table.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    async fn mark_applied(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        version: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(version)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        mark_applied(&mut tx, 1).await?;
        tx.commit().await?;
    }

    if !is_applied(pool, 2).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS accessibility_settings (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    font TEXT NOT NULL,
                    theme TEXT NOT NULL,
                    color_blindness TEXT NOT NULL,
                    reading_ruler INTEGER NOT NULL CHECK (reading_ruler IN (0, 1)),
                    adhd_mode INTEGER NOT NULL CHECK (adhd_mode IN (0, 1)),
                    bionic_mode INTEGER NOT NULL CHECK (bionic_mode IN (0, 1)),
                    font_scale REAL NOT NULL,
                    line_height REAL NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        mark_applied(&mut tx, 2).await?;
        tx.commit().await?;
    }

    Ok(())
}
