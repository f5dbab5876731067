//! CLI errors: every failure carries suggestions and maps to an exit code.

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use hexdef_core::{application::ApplicationError, domain::DomainError, error::HexError};

pub use hexdef_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A value needed in non-interactive mode was not given.
    #[error("Missing argument: {name}")]
    MissingArgument { name: &'static str, hint: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `hexdef-core`.
    #[error("{0}")]
    Core(#[from] HexError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },

    /// A prompt was needed but stdin is not a terminal.
    #[error("Cannot prompt for {what}: not running in a terminal")]
    NotInteractive { what: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ApplicationError> for CliError {
    fn from(err: ApplicationError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],

            Self::MissingArgument { hint, .. } => vec![hint.clone()],

            Self::ConfigError { .. } => vec![
                format!("Check your config file at {}", crate::config::AppConfig::config_path().display()),
                "Create a default one with: hexdef init --force".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],

            Self::FeatureNotAvailable { feature } => vec![format!(
                "Install with the feature enabled: cargo install hexdef-cli --features {feature}"
            )],

            Self::NotInteractive { .. } => {
                vec!["Pass the value as an argument (see --help)".into()]
            }
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::MissingArgument { .. }
            | Self::Cancelled
            | Self::NotInteractive { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Conflict => ErrorCategory::Conflict,
                CoreCategory::ExternalTool => ErrorCategory::ExternalTool,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS; see [`ErrorCategory::exit_code`].
    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Causes below the top-level message, outermost first.
    fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&e| e.source())
            .map(|e| e.to_string())
            .collect()
    }

    /// Error report for a terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut out = format!(
            "\n{} {}\n\n  {}\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );
        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("\n  {} {}\n", "\u{2192}".dimmed(), cause.dimmed()));
            }
        }
        push_suggestions(&mut out, &self.suggestions(), |title| {
            title.yellow().bold().to_string()
        });
        if !verbose {
            out.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                VERBOSE_HINT.dimmed()
            ));
        }
        out
    }

    /// Same report without ANSI codes, for pipes and `NO_COLOR`.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");
        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
        }
        push_suggestions(&mut out, &self.suggestions(), str::to_owned);
        if !verbose {
            out.push_str(&format!("\n{VERBOSE_HINT}\n"));
        }
        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Conflict => tracing::warn!("Conflict: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::ExternalTool => tracing::error!("External tool failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

const VERBOSE_HINT: &str = "Use -v / --verbose for more details.";

fn push_suggestions(out: &mut String, suggestions: &[String], title: impl Fn(&str) -> String) {
    if suggestions.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", title("Suggestions:")));
    for suggestion in suggestions {
        out.push_str(&format!("  {suggestion}\n"));
    }
}

/// How a failure is classified for logging and the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, invalid names, cancelled prompts.
    UserError,
    /// A template, marker directory or model header was not found.
    NotFound,
    Configuration,
    /// The target file or project already exists.
    Conflict,
    /// `make` failed or could not be started.
    ExternalTool,
    Internal,
}

impl ErrorCategory {
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Conflict      |  5   |
    /// | External tool |  6   |
    /// | Internal      |  1   |
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::Conflict => 5,
            Self::ExternalTool => 6,
            Self::Internal => 1,
        }
    }
}

/// Attach a context message while converting into [`CliError`].
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, HexError> {
    /// Core errors already carry their context; the message is dropped.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::*;

    fn core(err: ApplicationError) -> CliError {
        CliError::Core(err.into())
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(CliError::invalid("x").exit_code(), 2);
        assert_eq!(CliError::Cancelled.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        let err = core(ApplicationError::TemplateNotFound {
            path: PathBuf::from("/s/white.json"),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        let err = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exit_code_conflict() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/shop"),
        });
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn exit_code_external_tool() {
        let err = core(ApplicationError::ToolUnavailable {
            command: "make".into(),
            reason: "not found".into(),
        });
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn exit_code_internal() {
        let err = CliError::IoError {
            message: "x".into(),
            source: io::Error::other("e"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_lists_core_suggestions() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--force"));
    }

    #[test]
    fn format_plain_verbose_shows_cause_and_omits_hint() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn missing_argument_shows_hint() {
        let err = CliError::MissingArgument {
            name: "--model",
            hint: "Pass --model <NAME>".into(),
        };
        assert_eq!(err.suggestions(), vec!["Pass --model <NAME>".to_string()]);
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
