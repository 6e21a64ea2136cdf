/// System module: host queries, process execution, workspace tracking, path normalization

pub mod paths;
pub mod platform;
pub mod process;
pub mod workspace;

pub use paths::make_posix_path;
pub use platform::{HostPlatform, Platform};
pub use process::{CommandRunner, ShellRunner, StepStatus};
pub use workspace::Workspace;

/// Log target for operator-facing milestones ("prepare done", "Time spent: ...").
pub const MILESTONE_TARGET: &str = "milestone";

/// Logging macros for convenient access
/// Milestones use target="milestone" so the run logger prints them plainly to stdout
#[macro_export]
macro_rules! log_milestone {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        log::info!(target: $crate::system::MILESTONE_TARGET, "{}", msg);
    }}
}
