//! Workspace manager: directory creation and an explicitly tracked working directory.
//!
//! The process-wide current directory is read once at construction and never
//! changed. `change_directory` only moves the tracked location, which every
//! command invocation then uses as its working directory.

use crate::error::{OrchestratorError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    current: PathBuf,
}

impl Workspace {
    /// Start tracking from an explicit directory.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Workspace {
            current: start.into(),
        }
    }

    /// Start tracking from the directory the process was launched in.
    pub fn from_process_cwd() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Create `path` and any missing parents.
    ///
    /// Returns `true` when something was created, `false` if it already existed.
    pub fn ensure_directory(&self, path: &Path) -> Result<bool> {
        if self.exists(path) {
            log::debug!("[Workspace] {} already exists", path.display());
            return Ok(false);
        }
        std::fs::create_dir_all(path)?;
        log::info!("[Workspace] Created {}", path.display());
        Ok(true)
    }

    pub fn current_directory(&self) -> &Path {
        &self.current
    }

    /// Move the tracked working directory, relative paths resolve against the current one.
    pub fn change_directory(&mut self, path: &Path) -> Result<()> {
        let target = self.current.join(path);
        if !target.is_dir() {
            return Err(OrchestratorError::DirectoryNotFound(target));
        }
        log::debug!("[Workspace] cd {}", target.display());
        self.current = target;
        Ok(())
    }
}
