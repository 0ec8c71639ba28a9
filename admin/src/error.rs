//! Client-facing error taxonomy for portfolio operations.
//!
//! `Validation`, `NotFound` and `Conflict` carry enough detail for a caller to
//! correct its input. `Format` and `Io` stay opaque: they name what failed but
//! never the filesystem path involved.

use std::io;

/// A single reason a record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// Required fields that were empty, in declaration order.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// `date` was present but not a `YYYY-MM-DD` calendar date.
    #[error("date must be YYYY-MM-DD (got '{0}')")]
    InvalidDate(String),
    /// Fields that are stored on one line but contain a line break.
    #[error("fields must be a single line: {}", .0.join(", "))]
    MultilineFields(Vec<&'static str>),
    /// No visuals were supplied (the hero is mandatory).
    #[error("at least one visual with caption is required")]
    NoVisuals,
    /// Title has no characters that survive slug derivation.
    #[error("title must contain a letter or digit")]
    UnsluggableTitle,
    /// Number of uploaded images does not match the number of visuals.
    #[error("image count mismatch: {images} images, {visuals} captions")]
    ImageCountMismatch { images: usize, visuals: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("project '{0}' not found")]
    NotFound(String),

    #[error("project '{0}' already exists")]
    Conflict(String),

    #[error("invalid project file format: {0}")]
    Format(String),

    #[error("i/o failure while {action}")]
    Io {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

impl ProjectError {
    pub(crate) fn io(action: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { action, source }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T, E = ProjectError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_issue() {
        let err = ProjectError::Validation(vec![
            ValidationIssue::MissingFields(vec!["title", "date"]),
            ValidationIssue::NoVisuals,
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: missing required fields: title, date; \
             at least one visual with caption is required"
        );
    }

    #[test]
    fn io_error_message_omits_source_details() {
        let err = ProjectError::io("writing document")(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "/secret/path",
        ));
        assert_eq!(err.to_string(), "i/o failure while writing document");
    }
}
