//! Build strategy dispatch.
//!
//! Structure:
//! - `subproject` - the fixed Kernel/Script/Shell targets and their platform capability table
//! - `registry` - ordered, name-unique table of strategies driven by the orchestrator
//!
//! A strategy only ever touches the host through `BuildContext`, which owns the
//! tracked workspace, the command runner and the exit-status policy for the run.

pub mod registry;
pub mod subproject;

pub use registry::Registry;
pub use subproject::{recipe, Recipe, Subproject};

use crate::error::{OrchestratorError, Result};
use crate::models::{ExitStatusPolicy, PlatformKind};
use crate::system::{CommandRunner, Workspace};
use std::path::Path;

/// One registered sub-project build procedure.
pub trait BuildStrategy {
    fn name(&self) -> &str;

    /// Build the sources in `source`, or fail with `UnsupportedPlatform`.
    fn build(&self, ctx: &mut BuildContext<'_>, source: &Path) -> Result<()>;
}

/// Everything a strategy may use while building.
pub struct BuildContext<'a> {
    workspace: &'a mut Workspace,
    runner: &'a mut dyn CommandRunner,
    platform: PlatformKind,
    policy: ExitStatusPolicy,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        workspace: &'a mut Workspace,
        runner: &'a mut dyn CommandRunner,
        platform: PlatformKind,
        policy: ExitStatusPolicy,
    ) -> Self {
        BuildContext {
            workspace,
            runner,
            platform,
            policy,
        }
    }

    pub fn platform(&self) -> PlatformKind {
        self.platform
    }

    pub fn workspace(&self) -> &Workspace {
        &*self.workspace
    }

    /// Move the tracked working directory into `dir`.
    pub fn enter(&mut self, dir: &Path) -> Result<()> {
        self.workspace.change_directory(dir)
    }

    /// Run a command line in the tracked working directory.
    ///
    /// Under `ExitStatusPolicy::Ignore` a failing child is logged and otherwise
    /// treated as success.
    pub fn run(&mut self, command_line: &str) -> Result<()> {
        let status = self
            .runner
            .spawn(command_line, self.workspace.current_directory())?;

        if status.success {
            return Ok(());
        }

        match self.policy {
            ExitStatusPolicy::Ignore => {
                log::warn!(
                    "[Build] Ignoring failed step '{}' (exit code {:?})",
                    command_line,
                    status.code
                );
                Ok(())
            }
            ExitStatusPolicy::Strict => Err(OrchestratorError::BuildStepFailed {
                command: command_line.to_string(),
                code: status.code,
            }),
        }
    }
}
