//! The persisted export destination.

use std::path::{Path, PathBuf};

use crate::paths;

/// Location of the configuration file, relative to the writable base
/// directory. It holds a single JSON-encoded string: the export directory.
const CONFIG_FILE: &str = "settings/export_folder.json";

#[derive(Debug)]
pub struct Settings {
    config_path: PathBuf,
    export_path: PathBuf,
}

impl Settings {
    /// Loads from the default writable location.
    pub fn load() -> Self {
        Self::load_from(paths::writable_path(CONFIG_FILE))
    }

    /// Reads the persisted export directory. A value that is missing,
    /// unparsable, or no longer names an existing directory falls back to
    /// the user's home directory, which is then persisted as the new value.
    pub fn load_from(config_path: PathBuf) -> Self {
        let mut settings = Self {
            config_path,
            export_path: PathBuf::new(),
        };
        match settings.read_config() {
            Some(saved) if saved.is_dir() => settings.export_path = saved,
            _ => {
                let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                settings.set_export_path(home);
            }
        }
        settings
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Persists the new directory and updates in-memory state. Persistence
    /// is best-effort: a write failure is logged and the in-memory value
    /// still changes.
    pub fn set_export_path(&mut self, path: PathBuf) {
        if let Err(e) = self.write_config(&path) {
            log::error!("failed to persist the export directory: {e}");
        }
        self.export_path = path;
    }

    fn read_config(&self) -> Option<PathBuf> {
        let raw = std::fs::read_to_string(&self.config_path).ok()?;
        let saved: String = serde_json::from_str(&raw).ok()?;
        Some(PathBuf::from(saved))
    }

    fn write_config(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string(&path.to_string_lossy())?;
        std::fs::write(&self.config_path, encoded)
    }
}
