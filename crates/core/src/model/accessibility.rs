use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const MIN_FONT_SCALE: f32 = 0.8;
pub const MAX_FONT_SCALE: f32 = 1.5;
pub const MIN_LINE_HEIGHT: f32 = 1.0;
pub const MAX_LINE_HEIGHT: f32 = 3.0;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AccessibilitySettingsError {
    #[error("font scale {0} must be between 0.8 and 1.5")]
    InvalidFontScale(f32),
    #[error("line height {0} must be between 1.0 and 3.0")]
    InvalidLineHeight(f32),
    #[error("unknown {field} value: {value}")]
    UnknownValue { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Lexend,
    OpenDyslexic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    HighContrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBlindness {
    #[default]
    None,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Achromatopsia,
}

/// Reading aid derived from the ruler and ADHD toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingAid {
    Off,
    Ruler,
    Focus,
}

macro_rules! str_enum {
    ($ty:ty, $field:literal, { $($name:literal => $variant:path),+ $(,)? }) => {
        impl $ty {
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($variant => $name,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = AccessibilitySettingsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(AccessibilitySettingsError::UnknownValue {
                        field: $field,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

str_enum!(FontFamily, "font", {
    "lexend" => FontFamily::Lexend,
    "opendyslexic" => FontFamily::OpenDyslexic,
});

str_enum!(Theme, "theme", {
    "default" => Theme::Default,
    "dark" => Theme::Dark,
    "high-contrast" => Theme::HighContrast,
});

str_enum!(ColorBlindness, "color blindness", {
    "none" => ColorBlindness::None,
    "protanopia" => ColorBlindness::Protanopia,
    "deuteranopia" => ColorBlindness::Deuteranopia,
    "tritanopia" => ColorBlindness::Tritanopia,
    "achromatopsia" => ColorBlindness::Achromatopsia,
});

/// Learner's reading preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessibilitySettings {
    font: FontFamily,
    theme: Theme,
    color_blindness: ColorBlindness,
    reading_ruler: bool,
    adhd_mode: bool,
    bionic_mode: bool,
    font_scale: f32,
    line_height: f32,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct AccessibilitySettingsDraft {
    pub font: Option<FontFamily>,
    pub theme: Option<Theme>,
    pub color_blindness: Option<ColorBlindness>,
    pub reading_ruler: Option<bool>,
    pub adhd_mode: Option<bool>,
    pub bionic_mode: Option<bool>,
    pub font_scale: Option<f32>,
    pub line_height: Option<f32>,
}

impl AccessibilitySettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.theme.is_none()
            && self.color_blindness.is_none()
            && self.reading_ruler.is_none()
            && self.adhd_mode.is_none()
            && self.bionic_mode.is_none()
            && self.font_scale.is_none()
            && self.line_height.is_none()
    }

    /// Merge the draft over `base` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `AccessibilitySettingsError` if a numeric field is out of range.
    pub fn apply_to(
        self,
        base: &AccessibilitySettings,
    ) -> Result<AccessibilitySettings, AccessibilitySettingsError> {
        let settings = AccessibilitySettings {
            font: self.font.unwrap_or(base.font),
            theme: self.theme.unwrap_or(base.theme),
            color_blindness: self.color_blindness.unwrap_or(base.color_blindness),
            reading_ruler: self.reading_ruler.unwrap_or(base.reading_ruler),
            adhd_mode: self.adhd_mode.unwrap_or(base.adhd_mode),
            bionic_mode: self.bionic_mode.unwrap_or(base.bionic_mode),
            font_scale: self.font_scale.unwrap_or(base.font_scale),
            line_height: self.line_height.unwrap_or(base.line_height),
        };
        settings.validated()
    }

    /// Validate the draft over default settings.
    ///
    /// # Errors
    ///
    /// Returns `AccessibilitySettingsError` if a numeric field is out of range.
    pub fn validate(self) -> Result<AccessibilitySettings, AccessibilitySettingsError> {
        self.apply_to(&AccessibilitySettings::default())
    }
}

impl AccessibilitySettings {
    /// Rehydrate settings from persisted storage; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `AccessibilitySettingsError` if a stored value is out of range.
    pub fn from_persisted(
        draft: AccessibilitySettingsDraft,
    ) -> Result<Self, AccessibilitySettingsError> {
        draft.validate()
    }

    fn validated(self) -> Result<Self, AccessibilitySettingsError> {
        if !(MIN_FONT_SCALE..=MAX_FONT_SCALE).contains(&self.font_scale) {
            return Err(AccessibilitySettingsError::InvalidFontScale(self.font_scale));
        }
        if !(MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT).contains(&self.line_height) {
            return Err(AccessibilitySettingsError::InvalidLineHeight(self.line_height));
        }
        Ok(self)
    }

    #[must_use]
    pub fn font(&self) -> FontFamily {
        self.font
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn color_blindness(&self) -> ColorBlindness {
        self.color_blindness
    }

    #[must_use]
    pub fn reading_ruler(&self) -> bool {
        self.reading_ruler
    }

    #[must_use]
    pub fn adhd_mode(&self) -> bool {
        self.adhd_mode
    }

    #[must_use]
    pub fn bionic_mode(&self) -> bool {
        self.bionic_mode
    }

    #[must_use]
    pub fn font_scale(&self) -> f32 {
        self.font_scale
    }

    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Base font size in pixels (16px at scale 1.0).
    #[must_use]
    pub fn font_size_px(&self) -> f32 {
        self.font_scale * 16.0
    }

    #[must_use]
    pub fn reading_aid(&self) -> ReadingAid {
        match (self.reading_ruler, self.adhd_mode) {
            (false, _) => ReadingAid::Off,
            (true, false) => ReadingAid::Ruler,
            (true, true) => ReadingAid::Focus,
        }
    }
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font: FontFamily::Lexend,
            theme: Theme::Default,
            color_blindness: ColorBlindness::None,
            reading_ruler: false,
            adhd_mode: false,
            bionic_mode: false,
            font_scale: 1.0,
            line_height: 1.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_merges_over_base() {
        let base = AccessibilitySettings::default();
        let updated = AccessibilitySettingsDraft {
            theme: Some(Theme::Dark),
            font_scale: Some(1.25),
            ..AccessibilitySettingsDraft::new()
        }
        .apply_to(&base)
        .unwrap();

        assert_eq!(updated.theme(), Theme::Dark);
        assert_eq!(updated.font(), FontFamily::Lexend);
        assert!((updated.font_size_px() - 20.0).abs() < f32::EPSILON);
        assert!((updated.line_height() - 1.8).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_scales() {
        let err = AccessibilitySettingsDraft {
            font_scale: Some(2.0),
            ..AccessibilitySettingsDraft::new()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AccessibilitySettingsError::InvalidFontScale(2.0));

        let err = AccessibilitySettingsDraft {
            line_height: Some(0.5),
            ..AccessibilitySettingsDraft::new()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AccessibilitySettingsError::InvalidLineHeight(0.5));
    }

    #[test]
    fn reading_aid_prefers_focus_in_adhd_mode() {
        let ruler = AccessibilitySettingsDraft {
            reading_ruler: Some(true),
            ..AccessibilitySettingsDraft::new()
        }
        .validate()
        .unwrap();
        assert_eq!(ruler.reading_aid(), ReadingAid::Ruler);

        let focus = AccessibilitySettingsDraft {
            adhd_mode: Some(true),
            ..AccessibilitySettingsDraft::new()
        }
        .apply_to(&ruler)
        .unwrap();
        assert_eq!(focus.reading_aid(), ReadingAid::Focus);
        assert_eq!(AccessibilitySettings::default().reading_aid(), ReadingAid::Off);
    }

    #[test]
    fn enumerated_values_parse_from_strings() {
        assert_eq!("high-contrast".parse::<Theme>().unwrap(), Theme::HighContrast);
        assert_eq!("OpenDyslexic".parse::<FontFamily>().unwrap(), FontFamily::OpenDyslexic);
        assert_eq!(ColorBlindness::Achromatopsia.as_str(), "achromatopsia");
        assert!(matches!(
            "sepia".parse::<Theme>(),
            Err(AccessibilitySettingsError::UnknownValue { field: "theme", .. })
        ));
    }
}
