//! Build Service - runs `make` at the project root.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        locate::find_marker,
        ports::{Filesystem, ProcessOutput, ProcessRunner},
    },
    domain::{Marker, layout::MARKER_SEARCH_DEPTH},
    error::HexResult,
};

/// One command that was run, with its captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    pub command: String,
    pub output: ProcessOutput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub root: PathBuf,
    pub steps: Vec<BuildStep>,
}

const MAKE: &[&str] = &[];
const MAKE_CLEAN: &[&str] = &["clean"];

pub struct BuildService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn ProcessRunner>,
    search_depth: usize,
}

impl BuildService {
    pub fn new(filesystem: Box<dyn Filesystem>, runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            filesystem,
            runner,
            search_depth: MARKER_SEARCH_DEPTH,
        }
    }

    pub fn with_search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    /// Project root holding both `.project_root` and a `Makefile`.
    pub fn build_root(&self, start: &Path) -> HexResult<PathBuf> {
        let fs = self.filesystem.as_ref();
        let root = find_marker(fs, start, Marker::ProjectRoot, self.search_depth).ok_or_else(|| {
            ApplicationError::convention_with_hint(
                "project root (.project_root marker)",
                start,
                "Create it with: mkdir .project_root",
            )
        })?;

        if !fs.is_file(&root.join("Makefile")) {
            return Err(
                ApplicationError::convention("a Makefile in the project root", &root).into(),
            );
        }
        Ok(root)
    }

    /// `make`
    #[instrument(skip_all, fields(start = %start.display()))]
    pub fn run_make(&self, start: &Path) -> HexResult<BuildReport> {
        let root = self.build_root(start)?;
        self.run_steps(root, &[MAKE])
    }

    /// `make clean` followed by `make`, stopping at the first failure.
    #[instrument(skip_all, fields(start = %start.display()))]
    pub fn regenerate(&self, start: &Path) -> HexResult<BuildReport> {
        let root = self.build_root(start)?;
        self.run_steps(root, &[MAKE_CLEAN, MAKE])
    }

    fn run_steps(&self, root: PathBuf, steps: &[&[&str]]) -> HexResult<BuildReport> {
        let mut report = BuildReport {
            root,
            steps: Vec::new(),
        };

        for args in steps {
            let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            let command = std::iter::once("make".to_string())
                .chain(args.iter().cloned())
                .collect::<Vec<_>>()
                .join(" ");

            info!(command = %command, root = %report.root.display(), "Running");
            let output = self.runner.run(&report.root, "make", &args)?;

            if !output.success() {
                warn!(command = %command, exit_code = ?output.exit_code, "Command failed");
                return Err(ApplicationError::ExternalToolFailed {
                    command,
                    exit_code: output.exit_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
                .into());
            }
            report.steps.push(BuildStep { command, output });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use mockall::Sequence;

    use super::*;
    use crate::application::ports::MockProcessRunner;
    use crate::error::{ErrorCategory, HexResult};

    /// Minimal filesystem knowing only which paths are dirs or files.
    struct StubFs {
        dirs: HashSet<PathBuf>,
        files: HashSet<PathBuf>,
    }

    impl StubFs {
        fn project(with_makefile: bool) -> Self {
            let mut files = HashSet::new();
            if with_makefile {
                files.insert(PathBuf::from("/p/Makefile"));
            }
            Self {
                dirs: ["/p", "/p/.project_root", "/p/src", "/p/src/app"]
                    .into_iter()
                    .map(PathBuf::from)
                    .collect(),
                files,
            }
        }
    }

    impl Filesystem for StubFs {
        fn create_dir_all(&self, _: &Path) -> HexResult<()> {
            Ok(())
        }
        fn write_file(&self, _: &Path, _: &str) -> HexResult<()> {
            Ok(())
        }
        fn read_to_string(&self, path: &Path) -> HexResult<String> {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not readable".into(),
            }
            .into())
        }
        fn exists(&self, path: &Path) -> bool {
            self.is_dir(path) || self.is_file(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains(path)
        }
        fn list_dir(&self, _: &Path) -> HexResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
        fn walk_dirs(&self, _: &Path, _: usize) -> HexResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
        fn remove_dir_all(&self, _: &Path) -> HexResult<()> {
            Ok(())
        }
    }

    fn ok_output(stdout: &str) -> ProcessOutput {
        ProcessOutput {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[test]
    fn runs_make_in_project_root() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cwd, program, args| {
                cwd == Path::new("/p") && program == "make" && args.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(ok_output("built")));

        let service = BuildService::new(Box::new(StubFs::project(true)), Box::new(runner));
        let report = service.run_make(Path::new("/p/src/app")).unwrap();

        assert_eq!(report.root, PathBuf::from("/p"));
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].command, "make");
        assert_eq!(report.steps[0].output.stdout, "built");
    }

    #[test]
    fn regenerate_cleans_first() {
        let mut seq = Sequence::new();
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|_, _, args| args == ["clean".to_string()])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(ok_output("")));
        runner
            .expect_run()
            .withf(|_, _, args| args.is_empty())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(ok_output("")));

        let service = BuildService::new(Box::new(StubFs::project(true)), Box::new(runner));
        let report = service.regenerate(Path::new("/p")).unwrap();
        let commands: Vec<_> = report.steps.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(commands, vec!["make clean", "make"]);
    }

    #[test]
    fn failing_clean_stops_regeneration() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(|_, _, _| {
            Ok(ProcessOutput {
                exit_code: Some(2),
                stdout: String::new(),
                stderr: "make: *** No rule to make target 'clean'.".into(),
            })
        });

        let service = BuildService::new(Box::new(StubFs::project(true)), Box::new(runner));
        let err = service.regenerate(Path::new("/p")).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::ExternalTool);
        assert!(err.to_string().contains("make clean"));
        assert!(err.to_string().contains("exit code 2"));
        assert!(err.suggestions().iter().any(|s| s.contains("No rule")));
    }

    #[test]
    fn missing_makefile_is_reported_without_running() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().never();

        let service = BuildService::new(Box::new(StubFs::project(false)), Box::new(runner));
        let err = service.run_make(Path::new("/p")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("Makefile"));
    }

    #[test]
    fn missing_marker_is_reported() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().never();

        let fs = StubFs {
            dirs: HashSet::from([PathBuf::from("/elsewhere")]),
            files: HashSet::new(),
        };
        let service = BuildService::new(Box::new(fs), Box::new(runner));
        let err = service.run_make(Path::new("/elsewhere")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
