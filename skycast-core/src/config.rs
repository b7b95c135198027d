use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::DisplayUnit;

/// Persistence seam for the unit preference.
///
/// `get` never fails: an unset or unreadable preference is the imperial
/// default.
pub trait PreferenceStore: Send + Sync {
    fn get(&self) -> DisplayUnit;
    fn set(&mut self, unit: DisplayUnit) -> Result<()>;
}

/// User preferences stored on disk.
///
/// Example TOML:
/// ```toml
/// unit = "metric"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Display unit applied at format time.
    #[serde(default)]
    pub unit: DisplayUnit,

    /// Overrides the bundled demo key when set.
    pub api_key: Option<String>,
}

impl Preferences {
    /// Load preferences from disk, or return defaults if the file doesn't
    /// exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::file_path()?;
        if !path.exists() {
            // First run: no preference file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preference file: {}", path.display()))?;

        let prefs: Preferences = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preference file: {}", path.display()))?;

        Ok(prefs)
    }

    /// Save preferences to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preference directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize preferences to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write preference file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the preference file.
    pub fn file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("preferences.toml"))
    }
}

impl PreferenceStore for Preferences {
    fn get(&self) -> DisplayUnit {
        self.unit
    }

    fn set(&mut self, unit: DisplayUnit) -> Result<()> {
        self.unit = unit;
        self.save()
    }
}

/// Ephemeral store: keeps the unit for the process lifetime only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    unit: DisplayUnit,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self) -> DisplayUnit {
        self.unit
    }

    fn set(&mut self, unit: DisplayUnit) -> Result<()> {
        self.unit = unit;
        Ok(())
    }
}
