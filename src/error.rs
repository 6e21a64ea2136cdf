//! Unified error type hierarchy for the Sen.Environment builder
//!
//! Provides structured error handling with OrchestratorError for the build pipeline
//! and ConfigError for the optional configuration file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Build pipeline errors.
///
/// Every variant is terminal: the orchestrator never retries and never continues
/// with the next sub-project once one of these has been raised.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Required external tool is not resolvable on PATH
    #[error("{0} is not found in path environment")]
    MissingDependency(String),

    /// Sub-project has no build recipe for the current platform
    #[error("Sub-project '{subproject}' is unsupported on {platform}")]
    UnsupportedPlatform { subproject: String, platform: String },

    /// Workspace change-directory target does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Child process exited unsuccessfully (strict exit-status policy only)
    #[error("Command '{command}' failed with exit code {code:?}")]
    BuildStepFailed { command: String, code: Option<i32> },

    /// The system shell could not be launched at all
    #[error("Failed to spawn '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// Two strategies registered under the same name
    #[error("Sub-project '{0}' is already registered")]
    DuplicateSubproject(String),

    /// Orchestrator attempted a phase change its state machine forbids
    #[error("{0}")]
    InvalidTransition(String),

    #[error("Failed to serialize run report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Workspace I/O error: {0}")]
    Workspace(#[from] io::Error),
}

impl OrchestratorError {
    /// Get a user-facing error message suitable for the final console line
    pub fn user_message(&self) -> String {
        match self {
            OrchestratorError::MissingDependency(cmd) => {
                format!("'{}' must be installed and available on PATH", cmd)
            }
            OrchestratorError::UnsupportedPlatform {
                subproject,
                platform,
            } => format!("{} cannot be built on {} yet", subproject, platform),
            OrchestratorError::DirectoryNotFound(path) => {
                format!("Expected directory is missing: {}", path.display())
            }
            OrchestratorError::BuildStepFailed { command, code } => match code {
                Some(code) => format!("Build step '{}' exited with code {}", command, code),
                None => format!("Build step '{}' was terminated by a signal", command),
            },
            OrchestratorError::SpawnFailed { command, reason } => {
                format!("Could not start '{}': {}", command, reason)
            }
            OrchestratorError::DuplicateSubproject(name) => {
                format!("Build table lists '{}' more than once", name)
            }
            OrchestratorError::InvalidTransition(msg) => format!("Internal error: {}", msg),
            OrchestratorError::Report(e) => format!("Run report could not be written: {}", e),
            OrchestratorError::Workspace(e) => format!("Workspace operation failed: {}", e),
        }
    }
}

/// Configuration file parsing and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid TOML in config: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
