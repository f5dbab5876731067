//! `hexdef make` and `hexdef regenerate`.

use serde_json::json;
use tracing::instrument;

use hexdef_core::application::BuildReport;

use crate::{
    cli::BuildArgs,
    commands::start_dir,
    context::AppContext,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Make,
    Regenerate,
}

#[instrument(skip_all, fields(mode = ?mode))]
pub fn execute(
    mode: BuildMode,
    args: BuildArgs,
    ctx: AppContext,
    output: OutputManager,
) -> CliResult<()> {
    let start = start_dir(args.path.as_deref())?;
    let service = ctx.build_service();

    let label = match mode {
        BuildMode::Make => "Running make...",
        BuildMode::Regenerate => "Running make clean && make...",
    };
    let spinner = output.spinner(label);
    let result = match mode {
        BuildMode::Make => service.run_make(&start),
        BuildMode::Regenerate => service.regenerate(&start),
    };
    spinner.finish_and_clear();

    let report = result?;
    print_report(&report, &output)
}

fn print_report(report: &BuildReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&json!({
            "root": report.root,
            "steps": report.steps.iter().map(|s| json!({
                "command": s.command,
                "exit_code": s.output.exit_code,
                "stdout": s.output.stdout,
                "stderr": s.output.stderr,
            })).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    for step in &report.steps {
        let stdout = step.output.stdout.trim_end();
        if !stdout.is_empty() {
            output.print(stdout)?;
        }
        output.success(&format!("{} ({})", step.command, report.root.display()))?;
    }
    Ok(())
}
