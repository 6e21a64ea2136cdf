//! Run State Management and Phase Tracking
//!
//! This module provides the state tracking structures used by the orchestrator
//! to follow one run through its phases.
//!
//! **Architecture**:
//! - `RunPhase`: Enum representing discrete pipeline phases
//! - `RunState`: Struct tracking current phase, phase history, built sub-projects and error
//! - State transitions are driven by the orchestrator; `Aborted` absorbs every failure

use serde::{Deserialize, Serialize};
use std::fmt;

/// Run phase enumeration - discrete states in the pipeline lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    Init,

    /// Version-control command found on PATH
    PreconditionChecked,

    /// Destination directory exists
    WorkspacePrepared,

    /// Clone command issued from inside the destination
    RepositoryCloning,

    /// Building the i-th registered sub-project
    BuildingSubprojects(usize),

    /// All sub-projects built
    Done,

    /// Run stopped on an explicit failure
    Aborted,
}

impl RunPhase {
    /// Check if a transition to the given phase is valid.
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        use RunPhase::*;
        if next == Aborted {
            return !self.is_terminal();
        }
        match (*self, next) {
            (Init, PreconditionChecked) => true,
            (PreconditionChecked, WorkspacePrepared) => true,
            (WorkspacePrepared, RepositoryCloning) => true,
            (RepositoryCloning, BuildingSubprojects(0)) => true,
            (RepositoryCloning, Done) => true,
            (BuildingSubprojects(i), BuildingSubprojects(j)) => j == i + 1,
            (BuildingSubprojects(_), Done) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Aborted)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Init => write!(f, "init"),
            RunPhase::PreconditionChecked => write!(f, "precondition-checked"),
            RunPhase::WorkspacePrepared => write!(f, "workspace-prepared"),
            RunPhase::RepositoryCloning => write!(f, "repository-cloning"),
            RunPhase::BuildingSubprojects(i) => write!(f, "building-subprojects({})", i),
            RunPhase::Done => write!(f, "done"),
            RunPhase::Aborted => write!(f, "aborted"),
        }
    }
}

/// Run state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,

    /// Every phase entered, starting with `Init`
    pub history: Vec<RunPhase>,

    /// Sub-projects whose strategy completed, in build order
    pub built: Vec<String>,

    /// Error message if the run aborted
    pub error: Option<String>,
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            phase: RunPhase::Init,
            history: vec![RunPhase::Init],
            built: Vec::new(),
            error: None,
        }
    }

    /// Attempt to transition to the next phase.
    pub fn transition_to(&mut self, next_phase: RunPhase) -> Result<(), String> {
        if !self.phase.can_transition_to(next_phase) {
            return Err(format!(
                "Invalid phase transition: {} -> {}",
                self.phase, next_phase
            ));
        }
        log::debug!("[State] {} -> {}", self.phase, next_phase);
        self.phase = next_phase;
        self.history.push(next_phase);
        Ok(())
    }

    /// True once the precondition passed, i.e. the run may have touched the filesystem.
    pub fn passed_precondition(&self) -> bool {
        self.history.contains(&RunPhase::PreconditionChecked)
    }

    pub fn record_built(&mut self, name: &str) {
        self.built.push(name.to_string());
    }

    /// Record an error and mark the run as aborted.
    pub fn record_error(&mut self, error: String) {
        self.error = Some(error);
        if self.phase != RunPhase::Aborted {
            self.phase = RunPhase::Aborted;
            self.history.push(RunPhase::Aborted);
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
