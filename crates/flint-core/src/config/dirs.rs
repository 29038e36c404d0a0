use crate::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following the XDG base directory layout
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/flint)
    pub config: PathBuf,

    /// Data directory (~/.local/share/flint)
    pub data: PathBuf,

    /// User plugins directory (~/.config/flint/plugins)
    pub plugins: PathBuf,

    /// Config file path
    pub config_file: PathBuf,

    /// Application catalog written by the platform enumerator
    pub apps_file: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the system's project directories cannot be determined.
    pub fn new() -> Result<Self> {
        let project = ProjectDirs::from("", "", "flint").ok_or_else(|| {
            Error::Config("Failed to determine project directories".to_string())
        })?;

        let config = project.config_dir().to_path_buf();
        let data = project.data_dir().to_path_buf();

        Ok(Self {
            plugins: config.join("plugins"),
            config_file: config.join("config.json"),
            apps_file: data.join("apps.json"),
            config,
            data,
        })
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            plugins: base.join("plugins"),
            config_file: base.join("config.json"),
            apps_file: base.join("apps.json"),
            config: base.clone(),
            data: base,
        }
    }

    /// Ensure all directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(&self.data)?;
        std::fs::create_dir_all(&self.plugins)?;
        Ok(())
    }
}
