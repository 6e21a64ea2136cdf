//! Kernel, Script and Shell sub-projects and their platform capability table.

use super::{BuildContext, BuildStrategy};
use crate::error::{OrchestratorError, Result};
use crate::models::PlatformKind;
use crate::system::paths::to_posix_string;
use std::fmt;
use std::path::Path;

/// Fixed build targets, each living in a same-named directory of the cloned repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subproject {
    Kernel,
    Script,
    Shell,
}

impl Subproject {
    /// Registration order used for a standard run.
    ///
    /// Shell and Script have no recipe off Windows, so on other hosts a standard
    /// run stops right after the clone without invoking any build script.
    pub const ALL: [Subproject; 3] = [Subproject::Shell, Subproject::Script, Subproject::Kernel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subproject::Kernel => "Kernel",
            Subproject::Script => "Script",
            Subproject::Shell => "Shell",
        }
    }
}

impl fmt::Display for Subproject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What building a sub-project on a platform amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipe {
    /// Enter the source directory and issue nothing else
    Enter,
    /// Enter the source directory and run each command line in order
    Run(Vec<String>),
    /// No build procedure exists for this combination
    Unsupported,
}

/// Capability table: (sub-project, platform) to recipe.
///
/// `source` is the forward-slash form of the sub-project directory.
pub fn recipe(subproject: Subproject, platform: PlatformKind, source: &str) -> Recipe {
    match (subproject, platform) {
        // Windows kernel build script is not wired up yet.
        (Subproject::Kernel, PlatformKind::Windows) => Recipe::Enter,
        (Subproject::Kernel, PlatformKind::Other) => Recipe::Run(vec![
            "chmod +x ./build.sh".to_string(),
            "./build.sh".to_string(),
        ]),
        (Subproject::Script, PlatformKind::Windows) => Recipe::Run(vec![format!(
            "powershell -noexit \"& \"{}/link.ps1\"",
            source
        )]),
        (Subproject::Script, PlatformKind::Other) => Recipe::Unsupported,
        (Subproject::Shell, PlatformKind::Windows) => Recipe::Run(vec![format!(
            "powershell -noexit \"&\" \"{}/build.ps1\"",
            source
        )]),
        (Subproject::Shell, PlatformKind::Other) => Recipe::Unsupported,
    }
}

impl BuildStrategy for Subproject {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn build(&self, ctx: &mut BuildContext<'_>, source: &Path) -> Result<()> {
        let platform = ctx.platform();
        match recipe(*self, platform, &to_posix_string(source)) {
            Recipe::Unsupported => Err(OrchestratorError::UnsupportedPlatform {
                subproject: self.to_string(),
                platform: platform.to_string(),
            }),
            Recipe::Enter => {
                ctx.enter(source)?;
                log::info!("[Build] {}: no build command on {}", self, platform);
                Ok(())
            }
            Recipe::Run(commands) => {
                ctx.enter(source)?;
                log::info!("=== Building {} ===", self);
                for command in &commands {
                    ctx.run(command)?;
                }
                Ok(())
            }
        }
    }
}
