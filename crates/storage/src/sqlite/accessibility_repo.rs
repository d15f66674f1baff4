use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{AccessibilitySettingsRepository, StorageError};
use lesson_core::model::{
    AccessibilitySettings, AccessibilitySettingsDraft, ColorBlindness, FontFamily, Theme,
};

use super::SqliteRepository;
use super::mapping::{bool_to_i64, i64_to_bool, ser};

#[async_trait]
impl AccessibilitySettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<AccessibilitySettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                font,
                theme,
                color_blindness,
                reading_ruler,
                adhd_mode,
                bionic_mode,
                font_scale,
                line_height
            FROM accessibility_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let font: String = row.try_get("font").map_err(ser)?;
        let theme: String = row.try_get("theme").map_err(ser)?;
        let color_blindness: String = row.try_get("color_blindness").map_err(ser)?;
        let reading_ruler: i64 = row.try_get("reading_ruler").map_err(ser)?;
        let adhd_mode: i64 = row.try_get("adhd_mode").map_err(ser)?;
        let bionic_mode: i64 = row.try_get("bionic_mode").map_err(ser)?;
        let font_scale: f64 = row.try_get("font_scale").map_err(ser)?;
        let line_height: f64 = row.try_get("line_height").map_err(ser)?;

        #[allow(clippy::cast_possible_truncation)]
        let draft = AccessibilitySettingsDraft {
            font: Some(font.parse::<FontFamily>().map_err(ser)?),
            theme: Some(theme.parse::<Theme>().map_err(ser)?),
            color_blindness: Some(color_blindness.parse::<ColorBlindness>().map_err(ser)?),
            reading_ruler: Some(i64_to_bool("reading_ruler", reading_ruler)?),
            adhd_mode: Some(i64_to_bool("adhd_mode", adhd_mode)?),
            bionic_mode: Some(i64_to_bool("bionic_mode", bionic_mode)?),
            font_scale: Some(font_scale as f32),
            line_height: Some(line_height as f32),
        };

        AccessibilitySettings::from_persisted(draft)
            .map(Some)
            .map_err(ser)
    }

    async fn save_settings(&self, settings: &AccessibilitySettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO accessibility_settings (
                id,
                font,
                theme,
                color_blindness,
                reading_ruler,
                adhd_mode,
                bionic_mode,
                font_scale,
                line_height
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                font = excluded.font,
                theme = excluded.theme,
                color_blindness = excluded.color_blindness,
                reading_ruler = excluded.reading_ruler,
                adhd_mode = excluded.adhd_mode,
                bionic_mode = excluded.bionic_mode,
                font_scale = excluded.font_scale,
                line_height = excluded.line_height
            ",
        )
        .bind(1_i64)
        .bind(settings.font().as_str())
        .bind(settings.theme().as_str())
        .bind(settings.color_blindness().as_str())
        .bind(bool_to_i64(settings.reading_ruler()))
        .bind(bool_to_i64(settings.adhd_mode()))
        .bind(bool_to_i64(settings.bionic_mode()))
        .bind(f64::from(settings.font_scale()))
        .bind(f64::from(settings.line_height()))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
