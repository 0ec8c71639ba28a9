//! Stable exit codes for admin CLI commands.

use crate::error::ProjectError;

/// Command succeeded (a failed publish still counts as success).
pub const OK: i32 = 0;
/// Invalid input, unreadable config or document, or any other failure.
pub const INVALID: i32 = 1;
/// The targeted project does not exist.
pub const NOT_FOUND: i32 = 2;
/// Create or rename would overwrite an existing project.
pub const CONFLICT: i32 = 3;

/// Exit code for a command that failed with `err`.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ProjectError>() {
        Some(ProjectError::NotFound(_)) => NOT_FOUND,
        Some(ProjectError::Conflict(_)) => CONFLICT,
        _ => INVALID,
    }
}
