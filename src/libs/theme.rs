//! Light/dark preference persisted under the `themeMode` key.

use super::storage::{Storage, StorageError, THEME_MODE_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// prettytable style string for header cells.
    pub fn header_style(&self) -> &'static str {
        match self {
            ThemeMode::Light => "bFb",
            ThemeMode::Dark => "bFc",
        }
    }

    /// Reads the stored preference. Missing or unknown values fall back to light.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(THEME_MODE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_default(),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                ThemeMode::default()
            }
        }
    }

    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage.set(THEME_MODE_KEY, self.as_str())
    }

    /// Flips the stored preference and returns the new mode.
    pub fn toggle(storage: &dyn Storage) -> Result<Self, StorageError> {
        let mode = Self::load(storage).toggled();
        mode.save(storage)?;
        Ok(mode)
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme mode '{}'", other)),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
