use super::PluginRegistry;
use crate::{Error, Result};
use flint_types::Plugin;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MANIFEST_FILENAME: &str = "plugin.json";

/// Registry that reads `<dir>/<plugin>/plugin.json` manifests.
///
/// Directories are scanned in the configured order and plugin folders in
/// name order. A plugin whose name was already registered replaces the
/// earlier one in place, so later directories override earlier ones.
pub struct DirectoryRegistry {
    dirs: Vec<PathBuf>,
    plugins: Vec<Plugin>,
}

impl DirectoryRegistry {
    /// Scan `dirs` once. Missing directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing directory cannot be read.
    pub fn load(dirs: Vec<PathBuf>) -> Result<Self> {
        let mut registry = Self {
            dirs,
            plugins: Vec::new(),
        };
        registry.reload()?;
        Ok(registry)
    }

    /// Rescan every directory, replacing the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing directory cannot be read.
    pub fn reload(&mut self) -> Result<()> {
        let mut plugins: Vec<Plugin> = Vec::new();

        for dir in &self.dirs {
            if !dir.exists() {
                debug!("Plugin directory {} does not exist", dir.display());
                continue;
            }

            for plugin in load_plugins_from(dir)? {
                if let Some(existing) = plugins.iter_mut().find(|p| p.name == plugin.name) {
                    debug!("Plugin {} overridden by {}", plugin.name, dir.display());
                    *existing = plugin;
                } else {
                    plugins.push(plugin);
                }
            }
        }

        info!(
            "Loaded {} plugins: {:?}",
            plugins.len(),
            plugins.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
        );
        self.plugins = plugins;
        Ok(())
    }

    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl PluginRegistry for DirectoryRegistry {
    fn local_plugins(&self) -> &[Plugin] {
        &self.plugins
    }
}

fn load_plugins_from(dir: &Path) -> Result<Vec<Plugin>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    paths.sort();

    let mut plugins = Vec::with_capacity(paths.len());
    for path in paths {
        match load_manifest(&path) {
            Ok(plugin) => {
                debug!("Loaded plugin: {} from {}", plugin.name, path.display());
                plugins.push(plugin);
            }
            Err(e) => {
                warn!("Failed to load plugin from {}: {}", path.display(), e);
            }
        }
    }
    Ok(plugins)
}

/// Read one plugin folder. A relative logo is resolved against the folder.
fn load_manifest(path: &Path) -> Result<Plugin> {
    let manifest_path = path.join(MANIFEST_FILENAME);
    if !manifest_path.exists() {
        return Err(Error::Plugin(format!(
            "{} not found in {}",
            MANIFEST_FILENAME,
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&manifest_path)?;
    let mut plugin: Plugin = serde_json::from_str(&content).map_err(|e| {
        Error::Plugin(format!(
            "Failed to parse manifest at {}: {}",
            manifest_path.display(),
            e
        ))
    })?;

    if plugin.name.trim().is_empty() {
        return Err(Error::Plugin(format!(
            "Manifest at {} has an empty name",
            manifest_path.display()
        )));
    }

    if is_relative_logo(&plugin.logo) {
        plugin.logo = path.join(&plugin.logo).to_string_lossy().into_owned();
    }

    Ok(plugin)
}

fn is_relative_logo(logo: &str) -> bool {
    !logo.is_empty() && !logo.contains("://") && Path::new(logo).is_relative()
}
