//! Filesystem infrastructure: implements `ProjectFs` over a real directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ProjectFs;

/// Project directory on the local filesystem.
pub struct LocalProjectFs {
    root: PathBuf,
}

impl LocalProjectFs {
    /// Anchor at `root`, made absolute against the current directory so the
    /// paths handed to child processes stay valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root)
            .with_context(|| format!("cannot resolve project directory {}", root.display()))?;
        Ok(Self { root })
    }
}

impl ProjectFs for LocalProjectFs {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, rel: &Path) -> bool {
        self.resolve(rel).exists()
    }

    fn is_dir(&self, rel: &Path) -> bool {
        self.resolve(rel).is_dir()
    }

    fn read_to_string(&self, rel: &Path) -> Result<String> {
        let path = self.resolve(rel);
        std::fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))
    }

    fn write(&self, rel: &Path, contents: &str) -> Result<()> {
        let path = self.resolve(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("cannot write {}", path.display()))
    }

    fn create_dir_all(&self, rel: &Path) -> Result<()> {
        let path = self.resolve(rel);
        std::fs::create_dir_all(&path).with_context(|| format!("cannot create {}", path.display()))
    }
}
