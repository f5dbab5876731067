//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template document does not exist.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// Template document exists but could not be read or parsed.
    #[error("Failed to load template {path}: {reason}")]
    TemplateParse { path: PathBuf, reason: String },

    /// A project layout convention could not be located.
    #[error("Could not find {what} (searched from {searched_from})")]
    ConventionNotFound {
        what: String,
        searched_from: PathBuf,
        hint: Option<String>,
    },

    /// A required configuration value is unset or points nowhere.
    #[error("Missing configuration: {key} {detail}")]
    MissingConfiguration { key: &'static str, detail: String },

    /// The file to generate already exists; nothing was written.
    #[error("{path} already exists")]
    ArtifactExists { path: PathBuf },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// An external tool exited unsuccessfully.
    #[error("`{command}` failed with {}", exit_label(.exit_code))]
    ExternalToolFailed {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// An external tool could not be started at all.
    #[error("Failed to run `{command}`: {reason}")]
    ToolUnavailable { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state access failed (lock poisoned).
    #[error("Filesystem state lock error")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Some targets of a multi-target operation failed.
    #[error("{failed} of {total} targets failed: {}", join_messages(.messages))]
    PartialFailure {
        failed: usize,
        total: usize,
        messages: Vec<String>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code (terminated by signal)".into(),
    }
}

fn join_messages(messages: &[String]) -> String {
    messages.join("; ")
}

impl ApplicationError {
    pub fn convention(what: impl Into<String>, searched_from: impl Into<PathBuf>) -> Self {
        Self::ConventionNotFound {
            what: what.into(),
            searched_from: searched_from.into(),
            hint: None,
        }
    }

    pub fn convention_with_hint(
        what: impl Into<String>,
        searched_from: impl Into<PathBuf>,
        hint: impl Into<String>,
    ) -> Self {
        Self::ConventionNotFound {
            what: what.into(),
            searched_from: searched_from.into(),
            hint: Some(hint.into()),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path } => vec![
                format!("Expected a template document at {}", path.display()),
                "Check SCHEMAS_DIR or pass --template <FILE>".into(),
            ],
            Self::TemplateParse { .. } => vec![
                "The template must be a JSON object with name, description and structure".into(),
            ],
            Self::ConventionNotFound { hint, .. } => {
                let mut s = vec!["Run the command from inside a hexdef project".into()];
                if let Some(hint) = hint {
                    s.push(hint.clone());
                }
                s
            }
            Self::MissingConfiguration { key, .. } => vec![
                format!("Set {} in your environment or .env file", key),
                "Or add it to ${SCHEMAS_DIR}/hex.cfg/config.json".into(),
            ],
            Self::ArtifactExists { path } => vec![
                format!("Remove or rename {} first", path.display()),
                "Existing files are never overwritten".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write on top of it or --recreate to start over".into(),
                "Choose a different project name".into(),
            ],
            Self::ExternalToolFailed { stderr, .. } => {
                let mut s = vec!["Check the tool output above".into()];
                if let Some(line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    s.push(format!("Last error line: {}", line.trim()));
                }
                s
            }
            Self::ToolUnavailable { command, .. } => {
                vec![format!("Make sure `{}` is installed and on PATH", command)]
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            Self::ValidationFailed(_) | Self::PartialFailure { .. } => {
                vec!["Check the error details above".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::ConventionNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::TemplateParse { .. } | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::MissingConfiguration { .. } => ErrorCategory::Configuration,
            Self::ArtifactExists { .. } | Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::ExternalToolFailed { .. } | Self::ToolUnavailable { .. } => {
                ErrorCategory::ExternalTool
            }
            Self::FilesystemError { .. } | Self::StoreLockError | Self::PartialFailure { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
