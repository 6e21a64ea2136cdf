//! Path normalization for shell command construction.
//!
//! Command lines are built from forward-slash paths on every platform so the
//! same recipe text works for `sh` and `powershell` alike.

use std::path::Path;

/// Replace every backslash separator with a forward slash.
///
/// Idempotent: normalizing an already normalized path returns it unchanged.
pub fn make_posix_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a filesystem path for embedding in a command line.
pub fn to_posix_string(path: &Path) -> String {
    make_posix_path(&path.to_string_lossy())
}
