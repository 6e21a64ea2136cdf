//! Command runner: synchronous execution of shell command lines.
//!
//! Output is inherited from the parent, never captured. Whether a non-zero exit
//! matters is decided by the caller's `ExitStatusPolicy`, not here.

use crate::error::{OrchestratorError, Result};
use std::path::Path;
use std::process::Command;

/// Exit information for a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    pub success: bool,

    /// Exit code, `None` when the child was killed by a signal
    pub code: Option<i32>,
}

impl StepStatus {
    pub fn ok() -> Self {
        StepStatus {
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: i32) -> Self {
        StepStatus {
            success: false,
            code: Some(code),
        }
    }
}

/// Executes a command line through the system shell, blocking until it exits.
pub trait CommandRunner {
    fn spawn(&mut self, command_line: &str, cwd: &Path) -> Result<StepStatus>;
}

/// Production runner: `sh -c` on POSIX hosts, `cmd /C` on Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    /// The command line is handed to `cmd.exe` verbatim: the PowerShell recipes
    /// embed quotes that the usual argument escaping would turn into `\"`.
    #[cfg(windows)]
    fn shell_command(command_line: &str) -> Command {
        use std::os::windows::process::CommandExt;

        let mut cmd = Command::new("cmd");
        cmd.arg("/C").raw_arg(command_line);
        cmd
    }

    #[cfg(not(windows))]
    fn shell_command(command_line: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn spawn(&mut self, command_line: &str, cwd: &Path) -> Result<StepStatus> {
        log::info!("[Process] $ {}  (in {})", command_line, cwd.display());

        let status = Self::shell_command(command_line)
            .current_dir(cwd)
            .status()
            .map_err(|e| OrchestratorError::SpawnFailed {
                command: command_line.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            log::warn!(
                "[Process] '{}' exited with status: {:?}",
                command_line,
                status.code()
            );
        }

        Ok(StepStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}
