//! Platform probe: host OS class and executable lookup.

use crate::models::PlatformKind;

/// Read-only queries about the host.
///
/// Both queries are infallible; an unresolvable lookup reports `false`.
pub trait Platform {
    fn current_platform(&self) -> PlatformKind;

    fn command_exists(&self, name: &str) -> bool;
}

/// Production probe backed by the compile target and a PATH search.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn current_platform(&self) -> PlatformKind {
        PlatformKind::host()
    }

    fn command_exists(&self, name: &str) -> bool {
        match which::which(name) {
            Ok(path) => {
                log::debug!("[Platform] {} resolved to {}", name, path.display());
                true
            }
            Err(_) => false,
        }
    }
}
