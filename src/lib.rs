//! Sen.Environment Builder
//!
//! Single-run build orchestrator: checks that `git` is available, prepares
//! `<cwd>/Sen.Environment`, clones the repository into it and drives the
//! Kernel, Script and Shell build entry points for the host platform.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Platform kinds, exit-status policy, run report
//! - **config**: Optional `sen-build.toml` loading and validation
//! - **system**: Platform probe, command runner, workspace tracking, path normalization
//! - **build**: Sub-project strategies and their registry
//! - **orchestrator**: Phase state machine, timer and the pipeline itself
//! - **log_collector**: Console plus per-run file logging
//! - **cli**: One invocation as the binary runs it, including what gets persisted

// Core foundational modules
pub mod error;
pub mod models;

pub mod config;
pub mod system;

pub mod build;
pub mod orchestrator;

pub mod log_collector;

pub mod cli;

// Re-export the log crate for macro usage
pub use log;

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{ConfigError, OrchestratorError, Result};

pub use models::{ExitStatusPolicy, PlatformKind, RunOutcome, RunReport};

pub use config::BuildConfig;

pub use system::{CommandRunner, HostPlatform, Platform, ShellRunner, StepStatus, Workspace};

pub use build::{BuildContext, BuildStrategy, Registry, Subproject};

pub use orchestrator::{Orchestrator, RunPhase, RunState, Timer};

pub use log_collector::{LogFile, RunLogger};

pub use cli::run_cli;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
