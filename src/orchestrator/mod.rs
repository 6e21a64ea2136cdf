//! Build Orchestration: precondition -> workspace -> clone -> ordered sub-project builds.

pub mod state;
pub mod timer;

pub use state::{RunPhase, RunState};
pub use timer::Timer;

use crate::build::{BuildContext, Registry};
use crate::config::BuildConfig;
use crate::error::{OrchestratorError, Result};
use crate::log_milestone;
use crate::models::{format_duration, RunOutcome, RunReport};
use crate::system::{make_posix_path, CommandRunner, Platform, Workspace};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Drives one run of the pipeline.
///
/// Single-threaded and single-use: `run` walks the phases exactly once.
pub struct Orchestrator<P: Platform, R: CommandRunner> {
    config: BuildConfig,
    platform: P,
    runner: R,
    registry: Registry,
    workspace: Workspace,
    state: RunState,
    timer: Timer,
}

impl<P: Platform, R: CommandRunner> Orchestrator<P, R> {
    /// Create an orchestrator rooted at `workspace`'s current directory.
    pub fn new(
        config: BuildConfig,
        platform: P,
        runner: R,
        registry: Registry,
        workspace: Workspace,
    ) -> Self {
        Orchestrator {
            config,
            platform,
            runner,
            registry,
            workspace,
            state: RunState::new(),
            timer: Timer::new(),
        }
    }

    /// `<current_directory>/<project_name>` with forward-slash separators.
    pub fn destination(&self) -> PathBuf {
        let current = make_posix_path(&self.workspace.current_directory().to_string_lossy());
        PathBuf::from(format!("{}/{}", current, self.config.project_name))
    }

    /// Execute the pipeline. Any error leaves the run in `RunPhase::Aborted`.
    pub fn run(&mut self) -> Result<()> {
        self.timer.start();
        let result = self.run_phases();
        self.timer.end();

        match &result {
            Ok(()) => {
                log_milestone!("Time spent: {}", format_duration(self.elapsed()));
            }
            Err(e) => {
                log::error!("[Orchestrator] Aborted during {}: {}", self.state.phase, e);
                self.state.record_error(e.to_string());
            }
        }
        result
    }

    fn run_phases(&mut self) -> Result<()> {
        let vcs = self.config.vcs_command.clone();
        if !self.platform.command_exists(&vcs) {
            return Err(OrchestratorError::MissingDependency(vcs));
        }
        advance(&mut self.state, RunPhase::PreconditionChecked)?;

        let destination = self.destination();
        self.workspace.ensure_directory(&destination)?;
        log_milestone!("prepare done");
        advance(&mut self.state, RunPhase::WorkspacePrepared)?;

        let platform = self.platform.current_platform();
        let Orchestrator {
            config,
            runner,
            registry,
            workspace,
            state,
            ..
        } = self;
        let mut ctx = BuildContext::new(workspace, runner, platform, config.exit_status_policy);

        ctx.enter(&destination)?;
        advance(state, RunPhase::RepositoryCloning)?;
        log_milestone!("cloning project from github");
        ctx.run(&config.clone_command())?;

        for (index, strategy) in registry.iter().enumerate() {
            advance(state, RunPhase::BuildingSubprojects(index))?;
            let source = subproject_source(&destination, strategy.name());
            log::info!(
                "[Orchestrator] Sub-project {}/{}: {}",
                index + 1,
                registry.len(),
                strategy.name()
            );
            strategy.build(&mut ctx, &source)?;
            state.record_built(strategy.name());
        }

        advance(state, RunPhase::Done)?;
        Ok(())
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Accumulated run time, zero before `run` finishes.
    pub fn elapsed(&self) -> Duration {
        self.timer.duration().unwrap_or_default()
    }

    /// Summary of the run so far.
    pub fn report(&self) -> RunReport {
        let outcome = if self.state.phase == RunPhase::Done {
            RunOutcome::Done
        } else {
            RunOutcome::Aborted
        };
        RunReport::new(
            outcome,
            self.timer.started_wall().unwrap_or_else(Local::now),
            self.state.built.clone(),
            self.elapsed(),
            self.state.error.clone(),
        )
    }
}

fn advance(state: &mut RunState, next: RunPhase) -> Result<()> {
    state
        .transition_to(next)
        .map_err(OrchestratorError::InvalidTransition)
}

fn subproject_source(destination: &Path, name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/{}",
        make_posix_path(&destination.to_string_lossy()),
        name
    ))
}

/// Persist a run report as pretty JSON, creating the parent directory if needed.
pub fn save_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
