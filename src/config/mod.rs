//! Configuration module for the build orchestrator.
//!
//! # Module Structure
//!
//! - `loader`: Handles loading `sen-build.toml` and validating its contents
//!
//! # Configuration Flow
//!
//! 1. The binary looks for `sen-build.toml` in the invocation directory
//! 2. Missing file means every default below applies
//! 3. The loaded config is validated before the orchestrator is built

pub mod loader;

pub use loader::{load_config_from_file, load_or_default, validate_config};

use crate::models::ExitStatusPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the directory the repository is cloned into.
pub const PROJECT_NAME: &str = "Sen.Environment";

pub const PROJECT_REPOSITORY: &str = "https://github.com/Haruma-VN/Sen.Environment";

/// Version-control client that must be on PATH.
pub const VCS_COMMAND: &str = "git";

/// Config file looked up in the invocation directory.
pub const CONFIG_FILE_NAME: &str = "sen-build.toml";

/// Run configuration. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub project_name: String,
    pub repository_url: String,
    pub vcs_command: String,
    pub exit_status_policy: ExitStatusPolicy,

    /// Run logs and `last-run.json`; relative paths resolve against the invocation directory
    pub log_dir: PathBuf,

    pub write_report: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            project_name: PROJECT_NAME.to_string(),
            repository_url: PROJECT_REPOSITORY.to_string(),
            vcs_command: VCS_COMMAND.to_string(),
            exit_status_policy: ExitStatusPolicy::Ignore,
            log_dir: PathBuf::from("logs"),
            write_report: true,
        }
    }
}

impl BuildConfig {
    /// Clone command line, run from inside the destination directory.
    pub fn clone_command(&self) -> String {
        format!("{} clone {} .", self.vcs_command, self.repository_url)
    }
}
