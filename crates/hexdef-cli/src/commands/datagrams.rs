//! `hexdef datagrams`: edit the datagram registry and create schemas.

use std::path::Path;

use serde_json::json;
use tracing::{info, instrument};

use hexdef_core::{
    application::{DatagramRegistry, DatagramService},
    domain::{
        DatagramEntry, DatagramKind, DomainValidator,
        datagram::{remove, upsert},
    },
};

use crate::{
    cli::DatagramCommands,
    commands::start_dir,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::Prompter,
};

const KINDS: [DatagramKind; 3] = [DatagramKind::PubSub, DatagramKind::Pub, DatagramKind::Sub];

#[instrument(skip_all)]
pub fn execute(
    cmd: DatagramCommands,
    ctx: AppContext,
    output: OutputManager,
    prompter: Prompter,
) -> CliResult<()> {
    let service = ctx.datagram_service();

    match cmd {
        DatagramCommands::List { path } => {
            let (_, entries) = load(&service, path.as_deref())?;
            print_entries(&entries, &output)
        }

        DatagramCommands::Available { path } => {
            let (registry, _) = load(&service, path.as_deref())?;
            let primary = registry.primary_file().unwrap_or_default();
            let names = service.list_available(&primary)?;
            if output.is_json() {
                output.json(&names)?;
            } else if names.is_empty() {
                output.info("Every available datagram is already selected")?;
            } else {
                for name in &names {
                    output.print(name)?;
                }
            }
            Ok(())
        }

        DatagramCommands::Add {
            name,
            publish,
            subscribe,
            path,
        } => {
            DomainValidator::validate_datagram_name(&name)?;
            if !publish && !subscribe {
                return Err(CliError::invalid("pass --pub, --sub or both"));
            }
            let (registry, mut entries) = load(&service, path.as_deref())?;
            upsert(&mut entries, DatagramEntry::new(&name, publish, subscribe));
            save(&service, &registry, &entries, &output)?;
            output.success(&format!(
                "{name} ({}) saved",
                DatagramKind::from_flags(publish, subscribe)
                    .map(|k| k.as_str())
                    .unwrap_or_default()
            ))?;
            Ok(())
        }

        DatagramCommands::Remove { name, path } => {
            let (registry, mut entries) = load(&service, path.as_deref())?;
            if !remove(&mut entries, &name) {
                return Err(CliError::invalid(format!(
                    "datagram '{name}' is not in the registry"
                )));
            }
            save(&service, &registry, &entries, &output)?;
            output.success(&format!("{name} removed"))?;
            Ok(())
        }

        DatagramCommands::Edit { path } => {
            let (registry, entries) = load(&service, path.as_deref())?;
            let primary = registry.primary_file().unwrap_or_default();
            let available = service.list_available(&primary)?;
            let edited = edit(&entries, &available, prompter)?;
            save(&service, &registry, &edited, &output)?;
            print_entries(&edited, &output)
        }

        DatagramCommands::Init { path } => {
            let start = start_dir(path.as_deref())?;
            let created = service.create_registry_dirs(&start)?;
            if output.is_json() {
                output.json(&json!({ "created": created }))?;
            } else {
                for dir in &created {
                    output.success(&dir.display().to_string())?;
                }
            }
            Ok(())
        }

        DatagramCommands::New { name, path } => {
            let start = start_dir(path.as_deref())?;
            let creation = service.create_datagram(&start, &name)?;
            if output.is_json() {
                output.json(&json!({
                    "written": creation.written,
                    "failed": creation.failed.iter().map(|(p, e)| json!({
                        "path": p,
                        "error": e.to_string(),
                    })).collect::<Vec<_>>(),
                }))?;
                return Ok(());
            }
            for file in &creation.written {
                output.success(&format!("Created {}", file.display()))?;
            }
            for (file, e) in &creation.failed {
                output.warning(&format!("{}: {e}", file.display()))?;
            }
            Ok(())
        }
    }
}

/// The project's registry and the entries of its primary file.
fn load(
    service: &DatagramService,
    path: Option<&Path>,
) -> CliResult<(DatagramRegistry, Vec<DatagramEntry>)> {
    let start = start_dir(path)?;
    let registry = service.registry(&start)?;
    let entries = registry
        .primary_file()
        .map(|f| service.list_selected(&f))
        .unwrap_or_default();
    Ok((registry, entries))
}

fn save(
    service: &DatagramService,
    registry: &DatagramRegistry,
    entries: &[DatagramEntry],
    output: &OutputManager,
) -> CliResult<()> {
    let files = service.save_registry(registry, entries)?;
    info!(files = files.len(), "Registry written");
    if !output.is_json() {
        for file in &files {
            output.info(&format!("Updated {}", file.display()))?;
        }
    }
    Ok(())
}

fn print_entries(entries: &[DatagramEntry], output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&entries)?;
        return Ok(());
    }
    if entries.is_empty() {
        output.info("No datagrams selected")?;
        return Ok(());
    }
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in entries {
        let kind = entry.kind().map(|k| k.as_str()).unwrap_or("-");
        output.print(&format!("{:<width$}  {kind}", entry.name))?;
    }
    Ok(())
}

/// Pick datagrams (selected ones pre-checked), then a kind for each.
fn edit(
    selected: &[DatagramEntry],
    available: &[String],
    prompter: Prompter,
) -> CliResult<Vec<DatagramEntry>> {
    let names: Vec<String> = selected
        .iter()
        .map(|e| e.name.clone())
        .chain(available.iter().cloned())
        .collect();
    let checked = preselected(&names, selected);
    let chosen = prompter.multi_select("datagrams", "Datagrams", &names, &checked)?;

    let kind_items: Vec<String> = KINDS.iter().map(|k| k.to_string()).collect();
    let mut entries = Vec::with_capacity(chosen.len());
    for index in chosen {
        let name = &names[index];
        let pick = prompter.select_with_default(
            "datagram type",
            &format!("{name} type"),
            &kind_items,
            current_kind_index(selected, name),
        )?;
        let (publish, subscribe) = KINDS[pick].flags();
        entries.push(DatagramEntry::new(name.as_str(), publish, subscribe));
    }
    Ok(entries)
}

/// Names already in the registry start checked.
fn preselected(names: &[String], selected: &[DatagramEntry]) -> Vec<bool> {
    names
        .iter()
        .map(|n| selected.iter().any(|e| &e.name == n))
        .collect()
}

/// Position in [`KINDS`] of the registry's current type for `name`; new
/// datagrams start on `pubsub`.
fn current_kind_index(selected: &[DatagramEntry], name: &str) -> usize {
    selected
        .iter()
        .find(|e| e.name == name)
        .and_then(DatagramEntry::kind)
        .and_then(|kind| KINDS.iter().position(|k| *k == kind))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Vec<DatagramEntry> {
        vec![
            DatagramEntry::new("Position", true, false),
            DatagramEntry::new("Track", false, true),
        ]
    }

    #[test]
    fn registry_entries_start_checked() {
        let names: Vec<String> = ["Position", "Track", "Heading"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(preselected(&names, &registry()), vec![true, true, false]);
    }

    #[test]
    fn kind_picker_starts_on_the_current_type() {
        let selected = registry();
        assert_eq!(KINDS[current_kind_index(&selected, "Position")], DatagramKind::Pub);
        assert_eq!(KINDS[current_kind_index(&selected, "Track")], DatagramKind::Sub);
        assert_eq!(KINDS[current_kind_index(&selected, "Heading")], DatagramKind::PubSub);
    }

    #[test]
    fn edit_needs_a_terminal() {
        assert!(edit(&registry(), &[], Prompter::disabled()).is_err());
    }
}
