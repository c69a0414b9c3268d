//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::application::ports::ConfigStore;
use crate::domain::LauncherConfig;

/// Environment variable overriding the launcher config location.
pub const CONFIG_ENV: &str = "ROLESYNC_LAUNCHER_CONFIG";

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "launcher.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
pub struct YamlConfigStore {
    project_dir: PathBuf,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<LauncherConfig> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no launcher config, using defaults");
            return Ok(LauncherConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: LauncherConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid {}", path.display()))?;
        tracing::debug!(path = %path.display(), "launcher config loaded");
        Ok(config)
    }

    fn path(&self) -> PathBuf {
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(val);
        }
        self.project_dir.join(CONFIG_FILE)
    }
}
