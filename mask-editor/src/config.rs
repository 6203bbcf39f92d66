use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration (persistent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Project opened last; reopened when no `--project` is given
    #[serde(default)]
    pub last_project: Option<PathBuf>,

    /// Presets file used last; reused when no `--presets` is given
    #[serde(default)]
    pub presets_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load config from standard location
    /// Returns default config if file doesn't exist or is malformed
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save config to standard location
    /// Logs error but doesn't block if save fails
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            log::warn!("Failed to save config: {}", e);
        }
    }

    /// Try to save config atomically (write to temp, then rename)
    fn try_save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let temp_path = config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, config_path)?;
        Ok(())
    }

    /// Cross-platform config file path
    fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        use directories::ProjectDirs;

        let proj_dirs = ProjectDirs::from("", "", "mask-editor")
            .ok_or("Failed to determine config directory")?;

        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Default project location when nothing was ever opened
    pub fn default_project_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "mask-editor")
            .map(|dirs| dirs.data_dir().join("project.json"))
            .unwrap_or_else(|| PathBuf::from("project.json"))
    }

    /// Remember the project and presets in use, saving if anything changed
    pub fn remember(&mut self, project: &Path, presets: Option<&Path>) {
        let project = Some(absolute(project));
        let presets = presets.map(absolute);
        if self.last_project == project && self.presets_path == presets {
            return;
        }
        self.last_project = project;
        self.presets_path = presets;
        self.save();
    }
}

/// Canonical path if it exists yet, otherwise the path as given
fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
