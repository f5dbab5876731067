// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported more than once by multi-target operations)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template}' has an empty structure")]
    EmptyTemplate { template: String },

    #[error("Absolute paths not allowed in templates: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Template path leaves the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("Unknown port direction '{0}' (expected 'incoming' or 'outgoing')")]
    UnknownDirection(String),

    #[error("Unknown project kind '{0}' (expected white, gray, dark or app)")]
    UnknownProjectKind(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplate(msg) => vec![
                "Check the template JSON document".into(),
                format!("Details: {}", msg),
            ],
            Self::EmptyTemplate { template } => vec![
                format!("Template '{}' declares no structure entries", template),
                "Add at least one file or directory to its \"structure\" array".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("Entry path resolved to an absolute path: {}", path),
                "Template paths must stay relative to the project root".into(),
            ],
            Self::PathEscapesRoot { path } => vec![
                format!("Entry path contains '..': {}", path),
                "Remove the parent-directory segments from the template entry".into(),
            ],
            Self::InvalidName { kind, .. } => match *kind {
                "project" => vec![
                    "Project names may only contain letters, digits, '-' and '_'".into(),
                ],
                "datagram" => vec![
                    "Datagram names must start with a letter or '_'".into(),
                    "and contain only letters, digits and '_'".into(),
                ],
                _ => vec!["Use a plain identifier".into()],
            },
            Self::UnknownDirection(_) => vec!["Use 'incoming' or 'outgoing'".into()],
            Self::UnknownProjectKind(_) => {
                vec!["Use one of: white, gray, dark, app".into()]
            }
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::InvalidName { .. }
            | Self::UnknownDirection(_)
            | Self::UnknownProjectKind(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
}
