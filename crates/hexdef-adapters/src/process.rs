//! Process execution adapter using `std::process::Command`.

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use hexdef_core::{
    application::{
        ApplicationError,
        ports::{ProcessOutput, ProcessRunner},
    },
    error::HexResult,
};

/// Runs a program to completion, capturing stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for CommandRunner {
    #[instrument(skip(self, args), fields(cwd = %cwd.display()))]
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> HexResult<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ApplicationError::ToolUnavailable {
                command: program.to_string(),
                reason: e.to_string(),
            })?;

        debug!(status = ?output.status.code(), "Process exited");
        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexdef_core::error::ErrorCategory;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_tool_unavailable() {
        let temp = TempDir::new().unwrap();
        let err = CommandRunner
            .run(temp.path(), "hexdef-definitely-not-a-program", &[])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ExternalTool);
        assert!(err.to_string().contains("hexdef-definitely-not-a-program"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_output_and_exit_code() {
        let temp = TempDir::new().unwrap();
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];
        let output = CommandRunner.run(temp.path(), "sh", &args).unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_the_given_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let args = vec!["marker.txt".to_string()];
        let output = CommandRunner.run(temp.path(), "ls", &args).unwrap();
        assert!(output.success());
        assert!(output.stdout.contains("marker.txt"));
    }
}
