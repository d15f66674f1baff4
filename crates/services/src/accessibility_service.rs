use std::sync::Arc;

use lesson_core::model::{AccessibilitySettings, AccessibilitySettingsDraft};
use storage::repository::AccessibilitySettingsRepository;

use crate::error::AccessibilityServiceError;

#[derive(Clone)]
pub struct AccessibilitySettingsService {
    repo: Arc<dyn AccessibilitySettingsRepository>,
}

impl AccessibilitySettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AccessibilitySettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `AccessibilityServiceError` on storage failures.
    pub async fn load(&self) -> Result<AccessibilitySettings, AccessibilityServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Merge a partial update over the current settings and persist it.
    ///
    /// # Errors
    ///
    /// Returns `AccessibilityServiceError` if validation fails or persistence fails.
    pub async fn update(
        &self,
        draft: AccessibilitySettingsDraft,
    ) -> Result<AccessibilitySettings, AccessibilityServiceError> {
        let current = self.load().await?;
        let settings = draft.apply_to(&current)?;
        self.repo.save_settings(&settings).await?;
        tracing::debug!(?settings, "accessibility settings saved");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{ReadingAid, Theme};
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn update_merges_over_persisted_settings() {
        let service = AccessibilitySettingsService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.load().await.unwrap(), AccessibilitySettings::default());

        service
            .update(AccessibilitySettingsDraft {
                theme: Some(Theme::Dark),
                ..AccessibilitySettingsDraft::new()
            })
            .await
            .unwrap();
        let settings = service
            .update(AccessibilitySettingsDraft {
                reading_ruler: Some(true),
                adhd_mode: Some(true),
                ..AccessibilitySettingsDraft::new()
            })
            .await
            .unwrap();

        assert_eq!(settings.theme(), Theme::Dark);
        assert_eq!(settings.reading_aid(), ReadingAid::Focus);
        assert_eq!(service.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn invalid_update_is_not_persisted() {
        let service = AccessibilitySettingsService::new(Arc::new(InMemoryRepository::new()));
        let err = service
            .update(AccessibilitySettingsDraft {
                font_scale: Some(3.0),
                ..AccessibilitySettingsDraft::new()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccessibilityServiceError::Settings(_)));
        assert_eq!(service.load().await.unwrap(), AccessibilitySettings::default());
    }
}
