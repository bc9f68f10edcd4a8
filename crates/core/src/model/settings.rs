use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Font-size bounds, in points.
pub const FONT_SIZE_MIN: u8 = 8;
pub const FONT_SIZE_MAX: u8 = 24;
pub const FONT_SIZE_DEFAULT: u8 = 13;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("font size must be between {FONT_SIZE_MIN} and {FONT_SIZE_MAX}, got {0}")]
    FontSizeOutOfRange(u8),
}

/// Appearance theme. `System` follows the host platform's light/dark
/// preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "Match system",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Global, profile-independent settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    theme: Theme,
    font_size: u8,
    open_on_startup: bool,
}

/// Editable field set for the settings form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsDraft {
    pub theme: Theme,
    pub font_size: u8,
    pub open_on_startup: bool,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Settings::default().to_draft()
    }
}

impl SettingsDraft {
    /// Validates user input into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::FontSizeOutOfRange` when the size is outside
    /// 8–24.
    pub fn validate(self) -> Result<Settings, SettingsError> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&self.font_size) {
            return Err(SettingsError::FontSizeOutOfRange(self.font_size));
        }
        Ok(Settings {
            theme: self.theme,
            font_size: self.font_size,
            open_on_startup: self.open_on_startup,
        })
    }
}

impl Settings {
    /// Rebuilds settings from persisted fields, clamping an out-of-range
    /// font size instead of failing so old documents always load.
    #[must_use]
    pub fn from_persisted(theme: Theme, font_size: u8, open_on_startup: bool) -> Self {
        Self {
            theme,
            font_size: font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX),
            open_on_startup,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    #[must_use]
    pub fn open_on_startup(&self) -> bool {
        self.open_on_startup
    }

    #[must_use]
    pub fn to_draft(&self) -> SettingsDraft {
        SettingsDraft {
            theme: self.theme,
            font_size: self.font_size,
            open_on_startup: self.open_on_startup,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            font_size: FONT_SIZE_DEFAULT,
            open_on_startup: false,
        }
    }
}
