use super::Directories;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load config from file, falling back to defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Plugin directories to scan; the user plugins directory when none are configured
    #[must_use]
    pub fn plugin_dirs(&self, dirs: &Directories) -> Vec<PathBuf> {
        if self.catalog.plugin_dirs.is_empty() {
            vec![dirs.plugins.clone()]
        } else {
            self.catalog.plugin_dirs.clone()
        }
    }

    #[must_use]
    pub fn apps_file(&self, dirs: &Directories) -> PathBuf {
        self.catalog
            .apps_file
            .clone()
            .unwrap_or_else(|| dirs.apps_file.clone())
    }
}

/// Where the catalogs come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    #[serde(default)]
    pub plugin_dirs: Vec<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps_file: Option<PathBuf>,
}

/// Output settings for hosts that print results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default)]
    pub show_rank_hint: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            show_rank_hint: false,
        }
    }
}

fn default_max_results() -> usize {
    10
}
