//! `hexdef adapter`: generate adapter skeletons for existing ports.

use std::path::Path;

use serde_json::json;
use tracing::instrument;

use hexdef_core::{
    application::{AdapterRequest, AdapterService},
    domain::{Direction, codegen::technology_options},
};

use crate::{
    cli::{AdapterArgs, AdapterCommands},
    commands::start_dir,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::Prompter,
};

pub fn execute(
    cmd: AdapterCommands,
    ctx: AppContext,
    output: OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    match cmd {
        AdapterCommands::Add(args) => add(&ctx, args, &output, prompter),
    }
}

#[instrument(skip_all, fields(direction = ?args.direction))]
fn add(
    ctx: &AppContext,
    args: AdapterArgs,
    output: &OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    let service = ctx.adapter_service();
    let start = start_dir(args.path.as_deref())?;
    let direction = Direction::from(args.direction);

    let port_file = match args.port {
        Some(port) => port,
        None => pick_port(&service, &start, direction, prompter)?,
    };
    let technology = match args.tech {
        Some(tech) => tech,
        None => pick_technology(&ctx.hex.middleware, prompter)?,
    };

    let path = service.add_adapter(&AdapterRequest {
        start,
        direction,
        port_file,
        technology,
    })?;

    if output.is_json() {
        output.json(&json!({ "path": path }))?;
    } else {
        output.success(&format!("Adapter created: {}", path.display()))?;
    }
    Ok(())
}

fn pick_port(
    service: &AdapterService,
    start: &Path,
    direction: Direction,
    prompter: Prompter,
) -> CliResult<String> {
    if !prompter.is_interactive() {
        return Err(CliError::MissingArgument {
            name: "--port",
            hint: format!("Pass --port <FILE> from domain/ports/{direction}"),
        });
    }
    let ports = service.list_ports(start, direction)?;
    let index = prompter.select("port", "Port", &ports)?;
    Ok(ports[index].clone())
}

fn pick_technology(middleware: &str, prompter: Prompter) -> CliResult<String> {
    if !prompter.is_interactive() {
        return Err(CliError::MissingArgument {
            name: "--tech",
            hint: "Pass --tech <NAME>, e.g. Kafka, ZeroMQ, RabbitMQ or REST".into(),
        });
    }
    let options = technology_choices(middleware);
    let index = prompter.select("technology", "Technology", &options)?;
    if options[index] == CUSTOM_TECHNOLOGY {
        return prompter.input("technology", "Technology name");
    }
    Ok(options[index].clone())
}

const CUSTOM_TECHNOLOGY: &str = "Custom...";

/// Known technologies plus a free-text entry at the end.
fn technology_choices(middleware: &str) -> Vec<String> {
    let mut options = technology_options(middleware);
    options.push(CUSTOM_TECHNOLOGY.to_string());
    options
}
