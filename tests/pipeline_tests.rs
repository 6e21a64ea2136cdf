//! Integration tests for the Orchestrator
//!
//! These tests drive complete runs with a fake platform and a recording command
//! runner, checking ordering, fail-fast behavior and workspace effects.

use sen_build::build::BuildContext;
use sen_build::{
    BuildConfig, BuildStrategy, CommandRunner, ExitStatusPolicy, Orchestrator, OrchestratorError,
    Platform, PlatformKind, Registry, RunOutcome, RunPhase, StepStatus, Workspace,
};
use std::cell::RefCell;
use std::fs;
use proptest::prelude::*;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

struct FakePlatform {
    kind: PlatformKind,
    commands: Vec<&'static str>,
}

impl FakePlatform {
    fn with_git(kind: PlatformKind) -> Self {
        FakePlatform {
            kind,
            commands: vec!["git"],
        }
    }
}

impl Platform for FakePlatform {
    fn current_platform(&self) -> PlatformKind {
        self.kind
    }

    fn command_exists(&self, name: &str) -> bool {
        self.commands.iter().any(|c| *c == name)
    }
}

/// Records every command line and the directory it ran in.
#[derive(Default)]
struct RecordingRunner {
    calls: Vec<(String, PathBuf)>,
    fail_matching: Option<&'static str>,
}

impl CommandRunner for RecordingRunner {
    fn spawn(&mut self, command_line: &str, cwd: &Path) -> sen_build::Result<StepStatus> {
        self.calls.push((command_line.to_string(), cwd.to_path_buf()));
        match self.fail_matching {
            Some(pattern) if command_line.contains(pattern) => Ok(StepStatus::failed(1)),
            _ => Ok(StepStatus::ok()),
        }
    }
}

impl RecordingRunner {
    fn commands(&self) -> Vec<&str> {
        self.calls.iter().map(|(c, _)| c.as_str()).collect()
    }
}

/// Test strategy that logs its name into a shared sequence.
struct Marker {
    name: String,
    supported: bool,
    seen: Rc<RefCell<Vec<String>>>,
}

impl BuildStrategy for Marker {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, ctx: &mut BuildContext<'_>, _source: &Path) -> sen_build::Result<()> {
        if !self.supported {
            return Err(OrchestratorError::UnsupportedPlatform {
                subproject: self.name.clone(),
                platform: ctx.platform().to_string(),
            });
        }
        self.seen.borrow_mut().push(self.name.clone());
        Ok(())
    }
}

fn marker_registry(entries: &[(&str, bool)]) -> (Registry, Rc<RefCell<Vec<String>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    for (name, supported) in entries {
        registry
            .register(Box::new(Marker {
                name: name.to_string(),
                supported: *supported,
                seen: Rc::clone(&seen),
            }))
            .expect("unique marker names");
    }
    (registry, seen)
}

fn create_subproject_dirs(destination: &Path) {
    for name in ["Kernel", "Script", "Shell"] {
        fs::create_dir_all(destination.join(name)).expect("Failed to create sub-project dir");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_invocation_order_matches_registration(
        names in prop::collection::hash_set("[A-Za-z]{1,8}", 0..8)
            .prop_flat_map(|set| Just(set.into_iter().collect::<Vec<_>>()).prop_shuffle())
    ) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let entries: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), true)).collect();
        let (registry, seen) = marker_registry(&entries);

        let mut orch = Orchestrator::new(
            BuildConfig::default(),
            FakePlatform::with_git(PlatformKind::Other),
            RecordingRunner::default(),
            registry,
            Workspace::new(temp_dir.path()),
        );
        orch.run().expect("run should succeed");

        prop_assert_eq!(&*seen.borrow(), &names);
        prop_assert_eq!(&orch.state().built, &names);
        prop_assert_eq!(orch.phase(), RunPhase::Done);
    }
}

#[test]
fn test_unsupported_middle_strategy_stops_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, seen) = marker_registry(&[("A", true), ("B", false), ("C", true)]);

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Other),
        RecordingRunner::default(),
        registry,
        Workspace::new(temp_dir.path()),
    );
    let err = orch.run().unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::UnsupportedPlatform { ref subproject, .. } if subproject == "B"
    ));
    assert_eq!(*seen.borrow(), vec!["A"]);
    assert_eq!(orch.phase(), RunPhase::Aborted);

    let report = orch.report();
    assert_eq!(report.outcome, RunOutcome::Aborted);
    assert_eq!(report.built, vec!["A"]);
    assert!(report.error.is_some());
    assert!(orch
        .state()
        .history
        .contains(&RunPhase::BuildingSubprojects(1)));
    assert!(!orch
        .state()
        .history
        .contains(&RunPhase::BuildingSubprojects(2)));
}

#[test]
fn test_missing_git_creates_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, seen) = marker_registry(&[("A", true)]);

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform {
            kind: PlatformKind::Windows,
            commands: vec![],
        },
        RecordingRunner::default(),
        registry,
        Workspace::new(temp_dir.path()),
    );
    let err = orch.run().unwrap_err();

    assert!(matches!(err, OrchestratorError::MissingDependency(_)));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    assert!(orch.runner().calls.is_empty());
    assert!(seen.borrow().is_empty());
    assert_eq!(orch.state().history, vec![RunPhase::Init, RunPhase::Aborted]);
}

#[test]
fn test_preexisting_destination_windows_builds_all() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let destination = temp_dir.path().join("Sen.Environment");
    create_subproject_dirs(&destination);
    fs::write(destination.join("README.md"), "# Sen").unwrap();
    let before: Vec<_> = fs::read_dir(&destination)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Windows),
        RecordingRunner::default(),
        Registry::standard(),
        Workspace::new(temp_dir.path()),
    );
    orch.run().expect("run should succeed on Windows");

    let after: Vec<_> = fs::read_dir(&destination)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(before.len(), after.len());
    assert_eq!(orch.state().built, vec!["Shell", "Script", "Kernel"]);

    let commands = orch.runner().commands();
    assert_eq!(commands.len(), 3);
    assert!(commands[0].starts_with("git clone "));
    assert!(commands[1].ends_with("/Shell/build.ps1\""));
    assert!(commands[2].ends_with("/Script/link.ps1\""));
    assert!(commands.iter().all(|c| !c.contains('\\')));
}

#[test]
fn test_clone_runs_inside_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _) = marker_registry(&[]);

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Other),
        RecordingRunner::default(),
        registry,
        Workspace::new(temp_dir.path()),
    );
    orch.run().unwrap();

    let (command, cwd) = &orch.runner().calls[0];
    assert_eq!(command, "git clone https://github.com/Haruma-VN/Sen.Environment .");
    assert_eq!(cwd, &orch.destination());
    assert!(temp_dir.path().join("Sen.Environment").is_dir());
}

#[test]
fn test_linux_standard_run_aborts_on_shell_after_clone() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_subproject_dirs(&temp_dir.path().join("Sen.Environment"));

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Other),
        RecordingRunner::default(),
        Registry::standard(),
        Workspace::new(temp_dir.path()),
    );
    let err = orch.run().unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::UnsupportedPlatform { ref subproject, .. } if subproject == "Shell"
    ));
    assert!(orch.state().built.is_empty());
    assert_eq!(
        orch.runner().commands(),
        vec!["git clone https://github.com/Haruma-VN/Sen.Environment ."]
    );
    // Shell is rejected before its directory is entered
    assert_eq!(orch.workspace().current_directory(), orch.destination());
}

#[test]
fn test_failed_clone_is_silent_then_missing_directory_aborts() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Other),
        RecordingRunner {
            fail_matching: Some("clone"),
            ..RecordingRunner::default()
        },
        Registry::standard(),
        Workspace::new(temp_dir.path()),
    );
    let err = orch.run().unwrap_err();

    // clone failure ignored; Shell directory was never produced
    assert!(matches!(err, OrchestratorError::DirectoryNotFound(_)));
    assert_eq!(orch.runner().calls.len(), 1);
    assert!(orch.state().built.is_empty());
}

#[test]
fn test_strict_policy_stops_on_failed_step() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_subproject_dirs(&temp_dir.path().join("Sen.Environment"));

    let config = BuildConfig {
        exit_status_policy: ExitStatusPolicy::Strict,
        ..BuildConfig::default()
    };
    let mut orch = Orchestrator::new(
        config,
        FakePlatform::with_git(PlatformKind::Windows),
        RecordingRunner {
            fail_matching: Some("link.ps1"),
            ..RecordingRunner::default()
        },
        Registry::standard(),
        Workspace::new(temp_dir.path()),
    );
    let err = orch.run().unwrap_err();

    assert!(matches!(err, OrchestratorError::BuildStepFailed { code: Some(1), .. }));
    assert_eq!(orch.state().built, vec!["Shell"]);
    assert_eq!(orch.runner().commands().len(), 3);
    assert_eq!(
        orch.workspace().current_directory(),
        orch.destination().join("Script")
    );
}

#[test]
fn test_ignore_policy_continues_after_failed_step() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_subproject_dirs(&temp_dir.path().join("Sen.Environment"));

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Windows),
        RecordingRunner {
            fail_matching: Some("link.ps1"),
            ..RecordingRunner::default()
        },
        Registry::standard(),
        Workspace::new(temp_dir.path()),
    );
    orch.run().expect("failed child processes are ignored");
    assert_eq!(orch.state().built, vec!["Shell", "Script", "Kernel"]);
}

#[test]
fn test_process_cwd_is_not_mutated() {
    let before = std::env::current_dir().unwrap();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_subproject_dirs(&temp_dir.path().join("Sen.Environment"));

    let mut orch = Orchestrator::new(
        BuildConfig::default(),
        FakePlatform::with_git(PlatformKind::Windows),
        RecordingRunner::default(),
        Registry::standard(),
        Workspace::new(temp_dir.path()),
    );
    orch.run().unwrap();

    assert_eq!(std::env::current_dir().unwrap(), before);
    assert_eq!(
        orch.workspace().current_directory(),
        orch.destination().join("Kernel")
    );
}
