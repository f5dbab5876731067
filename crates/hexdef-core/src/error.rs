//! Unified error handling for hexdef core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for hexdef core operations.
#[derive(Debug, Error, Clone)]
pub enum HexError {
    /// Errors from the domain layer (invalid names, templates, paths).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (conventions, I/O, tools).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HexError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your .env file and hex.cfg/config.json".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in hexdef".into(),
                "Please report this issue at: https://github.com/cosecruz/hexdef/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: names, templates, selections.
    Validation,
    /// A required project convention, template or file could not be located.
    NotFound,
    /// A required setting (SCHEMAS_DIR, DATAGRAM_DIR_PATH, …) is missing.
    Configuration,
    /// The artifact to generate already exists.
    Conflict,
    /// An external tool (make) ran and failed.
    ExternalTool,
    Internal,
}

/// Convenient result type alias.
pub type HexResult<T> = Result<T, HexError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn categories_follow_the_source_layer() {
        let e: HexError = DomainError::UnknownDirection("up".into()).into();
        assert_eq!(e.category(), ErrorCategory::Validation);

        let e: HexError = ApplicationError::ArtifactExists {
            path: PathBuf::from("a.h"),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::Conflict);

        let e = HexError::Configuration {
            message: "x".into(),
        };
        assert_eq!(e.category(), ErrorCategory::Configuration);
    }
}
