//! One invocation of the builder, as the binary performs it.
//!
//! Persistence (the per-run log file and `last-run.json`) only happens once the
//! run got past its precondition. A missing `git` leaves the invocation
//! directory exactly as it was.

use crate::build::Registry;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::log_collector::LogFile;
use crate::models::RunReport;
use crate::orchestrator::{save_report, Orchestrator};
use crate::system::{CommandRunner, Platform, Workspace};
use std::path::Path;

/// File name of the persisted run report inside the log directory.
pub const REPORT_FILE_NAME: &str = "last-run.json";

/// Run the pipeline rooted at `workspace` and persist its outcome.
///
/// Returns the report on success and the pipeline error otherwise; failing to
/// persist is only logged.
pub fn run_cli<P: Platform, R: CommandRunner>(
    workspace: Workspace,
    config: &BuildConfig,
    platform: P,
    runner: R,
    registry: Registry,
    log_file: Option<&LogFile>,
) -> Result<RunReport> {
    let log_dir = workspace.current_directory().join(&config.log_dir);

    let mut orchestrator = Orchestrator::new(config.clone(), platform, runner, registry, workspace);
    let result = orchestrator.run();
    let report = orchestrator.report();

    if orchestrator.state().passed_precondition() {
        persist(&report, config, &log_dir, log_file);
    } else {
        log::debug!("[Main] Run stopped at its precondition; nothing persisted");
    }

    result.map(|()| report)
}

fn persist(report: &RunReport, config: &BuildConfig, log_dir: &Path, log_file: Option<&LogFile>) {
    if let Some(file) = log_file {
        if let Err(e) = file.open() {
            log::warn!("[Main] {}; logging to console only", e);
        }
    }

    if config.write_report {
        let report_path = log_dir.join(REPORT_FILE_NAME);
        if let Err(e) = save_report(report, &report_path) {
            log::warn!("[Main] Could not write {}: {}", report_path.display(), e);
        }
    }
}
