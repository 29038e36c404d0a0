//! Plugin and application catalogs handed to the resolver.
//!
//! Catalogs are loaded once, outside the resolution path. The resolver only
//! ever sees immutable snapshots.

mod registry;

pub use registry::{DirectoryRegistry, MANIFEST_FILENAME};

use crate::Result;
use flint_types::{AppEntry, Plugin};
use std::path::Path;
use tracing::{debug, info};

/// Source of the locally installed plugins
pub trait PluginRegistry {
    /// Current plugin snapshot, in registration order
    fn local_plugins(&self) -> &[Plugin];
}

/// Registry over a fixed, in-memory plugin list
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    plugins: Vec<Plugin>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new(plugins: Vec<Plugin>) -> Self {
        Self { plugins }
    }
}

impl PluginRegistry for StaticRegistry {
    fn local_plugins(&self) -> &[Plugin] {
        &self.plugins
    }
}

/// Load the application catalog written by a platform enumerator.
///
/// The file holds a JSON array of [`AppEntry`]. A missing file is an empty
/// catalog.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_app_catalog(path: &Path) -> Result<Vec<AppEntry>> {
    if !path.exists() {
        debug!("No app catalog at {}", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let apps: Vec<AppEntry> = serde_json::from_str(&content)?;
    info!("Loaded {} apps from {}", apps.len(), path.display());
    Ok(apps)
}
