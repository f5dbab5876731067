//! Implementation of the `hexdef new` command.
//!
//! Responsibility: pick the template (kind, file or all components), build
//! the variables, call the scaffold service, and display results.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::json;
use tracing::{debug, info, instrument};

use hexdef_core::{
    application::{
        ApplicationError, ExistingRoot, ScaffoldRequest, ScaffoldService, scaffold_variables,
    },
    domain::{
        DomainValidator, FsEntry, ProjectKind, ProjectStructure, Variables,
        config::{DEFAULT_DATABASE, MULTI_SCAFFOLD_DATABASE, keys},
    },
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::start_dir,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::Prompter,
};

/// Execute the `hexdef new` command.
///
/// 1. Validate the project name and resolve the location
/// 2. Merge `--var` overrides into the base variables
/// 3. Dispatch to the single-template or all-components flow
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    ctx: AppContext,
    output: OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    DomainValidator::validate_project_name(&args.name)?;
    let location = start_dir(args.location.as_deref())?;
    let variables = with_overrides(&ctx.variables, &args.vars);
    let service = ctx.scaffold_service();

    let confirm = !args.yes && !global.quiet && prompter.is_interactive();

    if args.all {
        return scaffold_all(&args, &ctx, &service, &location, &variables, confirm, &output, prompter);
    }

    let template_path = resolve_template(&args, &ctx, prompter)?;
    let root = location.join(&args.name);
    let variables = scaffold_variables(&variables, &args.name, DEFAULT_DATABASE);
    debug!(template = %template_path.display(), root = %root.display(), "Template resolved");

    if args.dry_run {
        let template = service.load_template(&template_path, &variables)?;
        let structure = service.render(&root, &template, &variables)?;
        return show_plan(&structure, &template.name, root.exists(), &output);
    }

    let on_existing = existing_root_policy(&args);
    if confirm {
        let prompt = match (root.exists(), on_existing) {
            (true, ExistingRoot::Recreate) => format!("Delete and recreate {}?", root.display()),
            _ => format!("Create '{}' at {}?", args.name, root.display()),
        };
        if !prompter.confirm("confirmation", &prompt, true)? {
            return Err(CliError::Cancelled);
        }
    }

    let request = ScaffoldRequest {
        template_path,
        root,
        variables,
        on_existing,
    };
    info!(project = %args.name, "Scaffold started");
    let report = service.scaffold(&request)?;

    if output.is_json() {
        output.json(&json!({
            "root": report.root,
            "template": report.template,
            "files": report.files,
            "directories": report.directories,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created from '{}' ({} files, {} directories)",
        args.name, report.template, report.files, report.directories
    ))?;
    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.root.display()))?;
        output.print("  hexdef make")?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn scaffold_all(
    args: &NewArgs,
    ctx: &AppContext,
    service: &ScaffoldService,
    location: &Path,
    variables: &Variables,
    confirm: bool,
    output: &OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    let schemas_dir = schemas_dir(ctx)?;
    let variables = scaffold_variables(variables, &args.name, MULTI_SCAFFOLD_DATABASE);
    let root = location.join(&args.name);

    if args.dry_run {
        output.info(&format!("Dry run: would create {}", root.display()))?;
        for kind in ProjectKind::COMPONENTS {
            output.print(&format!(
                "  {}/  from {}",
                root.join(kind.as_str()).display(),
                schemas_dir.join(kind.template_file_name()).display()
            ))?;
        }
        return Ok(());
    }

    if confirm
        && !prompter.confirm(
            "confirmation",
            &format!("Create white, gray and dark components in {}?", root.display()),
            true,
        )?
    {
        return Err(CliError::Cancelled);
    }

    let report = service.scaffold_all(&schemas_dir, location, &args.name, &variables)?;

    if output.is_json() {
        output.json(&json!({
            "root": report.root,
            "succeeded": report.succeeded.iter().map(|r| json!({
                "root": r.root,
                "template": r.template,
                "files": r.files,
                "directories": r.directories,
            })).collect::<Vec<_>>(),
            "failed": report.failed.iter().map(|(kind, e)| json!({
                "kind": kind,
                "error": e.to_string(),
            })).collect::<Vec<_>>(),
        }))?;
    } else {
        for r in &report.succeeded {
            output.success(&format!("{} ({} files)", r.root.display(), r.files))?;
        }
        for (kind, e) in &report.failed {
            output.error(&format!("{kind}: {e}"))?;
        }
    }

    if !report.is_complete() {
        return Err(ApplicationError::PartialFailure {
            failed: report.failed.len(),
            total: ProjectKind::COMPONENTS.len(),
            messages: report
                .failed
                .iter()
                .map(|(kind, e)| format!("{kind}: {e}"))
                .collect(),
        }
        .into());
    }

    output.success(&format!("Project '{}' created", args.name))?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn with_overrides(base: &Variables, overrides: &[(String, String)]) -> Variables {
    let mut vars = base.clone();
    for (key, value) in overrides {
        vars.insert(key.as_str(), value.as_str());
    }
    vars
}

fn existing_root_policy(args: &NewArgs) -> ExistingRoot {
    if args.recreate {
        ExistingRoot::Recreate
    } else if args.force {
        ExistingRoot::Overwrite
    } else {
        ExistingRoot::Fail
    }
}

fn schemas_dir(ctx: &AppContext) -> CliResult<PathBuf> {
    ctx.hex.schemas_dir().map(Path::to_path_buf).ok_or_else(|| {
        ApplicationError::MissingConfiguration {
            key: keys::SCHEMAS_DIR,
            detail: "is not set; it locates the {kind}.json templates".into(),
        }
        .into()
    })
}

/// `--template`, else `${SCHEMAS_DIR}/{kind}.json` with the kind from
/// `--kind`, the config default, or a prompt.
fn resolve_template(args: &NewArgs, ctx: &AppContext, prompter: Prompter) -> CliResult<PathBuf> {
    if let Some(path) = &args.template {
        return start_dir(Some(path.as_path()));
    }

    let kind = match (args.kind, &ctx.config.scaffold.default_kind) {
        (Some(kind), _) => ProjectKind::from(kind),
        (None, Some(default)) => ProjectKind::from_str(default)?,
        (None, None) if prompter.is_interactive() => {
            let items: Vec<String> = ProjectKind::ALL.iter().map(|k| k.to_string()).collect();
            ProjectKind::ALL[prompter.select("project kind", "Project kind", &items)?]
        }
        (None, None) => {
            return Err(CliError::MissingArgument {
                name: "--kind",
                hint: "Pass --kind white|gray|dark|app or --template FILE".into(),
            });
        }
    };

    Ok(schemas_dir(ctx)?.join(kind.template_file_name()))
}

fn show_plan(
    structure: &ProjectStructure,
    template: &str,
    root_exists: bool,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        let entries: Vec<_> = structure
            .entries()
            .iter()
            .map(|e| match e {
                FsEntry::Directory(d) => json!({ "type": "directory", "path": d.path }),
                FsEntry::File(f) => {
                    json!({ "type": "file", "path": f.path, "bytes": f.content.len() })
                }
            })
            .collect();
        output.json(&json!({
            "root": structure.root(),
            "template": template,
            "entries": entries,
        }))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create {} from '{template}'",
        structure.root().display()
    ))?;
    if root_exists {
        output.warning("Target directory already exists")?;
    }
    for entry in structure.entries() {
        match entry {
            FsEntry::Directory(d) => output.print(&format!("  {}/", d.path.display()))?,
            FsEntry::File(f) => {
                output.print(&format!("  {}  ({} bytes)", f.path.display(), f.content.len()))?
            }
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
