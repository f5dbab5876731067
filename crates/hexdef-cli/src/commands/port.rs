//! `hexdef port`: generate port interfaces from model headers.

use std::path::Path;

use serde_json::json;
use tracing::instrument;

use hexdef_core::{
    application::{PortRequest, PortService},
    domain::Direction,
};

use crate::{
    cli::{PortArgs, PortCommands},
    commands::start_dir,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::Prompter,
};

pub fn execute(
    cmd: PortCommands,
    ctx: AppContext,
    output: OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    let service = ctx.port_service();
    match cmd {
        PortCommands::Add(args) => add(&service, args, &output, prompter),
        PortCommands::Methods(args) => methods(&service, args, &output, prompter),
    }
}

#[instrument(skip_all, fields(direction = ?args.direction))]
fn add(
    service: &PortService,
    args: PortArgs,
    output: &OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    let start = start_dir(args.path.as_deref())?;
    let direction = Direction::from(args.direction);
    let model = pick_model(service, &start, args.model, prompter)?;

    let methods = if args.methods.is_empty() {
        pick_methods(service, &start, &model, direction, prompter)?
    } else {
        args.methods
    };

    let path = service.add_port(&PortRequest {
        start,
        model,
        direction,
        methods,
    })?;

    if output.is_json() {
        output.json(&json!({ "path": path }))?;
    } else {
        output.success(&format!("Port created: {}", path.display()))?;
    }
    Ok(())
}

fn methods(
    service: &PortService,
    args: PortArgs,
    output: &OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    let start = start_dir(args.path.as_deref())?;
    let model = pick_model(service, &start, args.model, prompter)?;
    let catalog = service.method_catalog(&start, &model, args.direction.into())?;

    if output.is_json() {
        let methods: Vec<_> = catalog
            .iter()
            .map(|m| json!({ "key": m.key, "declaration": m.declaration }))
            .collect();
        output.json(&json!({ "model": model, "methods": methods }))?;
        return Ok(());
    }

    let width = catalog.iter().map(|m| m.key.len()).max().unwrap_or(0);
    for m in &catalog {
        output.print(&format!("{:<width$}  {}", m.key, m.declaration))?;
    }
    Ok(())
}

fn pick_model(
    service: &PortService,
    start: &Path,
    model: Option<String>,
    prompter: Prompter,
) -> CliResult<String> {
    if let Some(model) = model {
        return Ok(model);
    }
    if !prompter.is_interactive() {
        return Err(CliError::MissingArgument {
            name: "--model",
            hint: "Pass --model <NAME> (the header file stem in domain/model)".into(),
        });
    }

    let names: Vec<String> = service
        .list_models(start)?
        .into_iter()
        .map(|h| h.name)
        .collect();
    let index = prompter.select("model", "Model", &names)?;
    Ok(names[index].clone())
}

fn pick_methods(
    service: &PortService,
    start: &Path,
    model: &str,
    direction: Direction,
    prompter: Prompter,
) -> CliResult<Vec<String>> {
    if !prompter.is_interactive() {
        return Err(CliError::MissingArgument {
            name: "--methods",
            hint: format!("List methods with: hexdef port methods {direction} --model {model}"),
        });
    }

    let catalog = service.method_catalog(start, model, direction)?;
    let items: Vec<String> = catalog.iter().map(|m| m.declaration.clone()).collect();
    let defaults = vec![false; items.len()];
    let chosen = prompter.multi_select("methods", "Port methods", &items, &defaults)?;
    Ok(chosen.into_iter().map(|i| catalog[i].key.clone()).collect())
}
