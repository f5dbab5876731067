//! # hexdef CLI
//!
//! Scaffolds hexagonal C++ projects and generates ports, adapters and
//! datagram registries inside them.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` (if present) into the process environment.
//! 2. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 3. Initialise the tracing subscriber (logging).
//! 4. Load configuration (defaults + file + `HEXDEF_*` env).
//! 5. Build the [`AppContext`] and the [`OutputManager`].
//! 6. Dispatch to the appropriate command handler.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                     |
//! |------|-----------------------------|
//! |  0   | Success                     |
//! |  1   | Internal / system error     |
//! |  2   | User / input error          |
//! |  3   | Resource or convention missing |
//! |  4   | Configuration error         |
//! |  5   | Target already exists       |
//! |  6   | External tool failed        |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::build::BuildMode,
    config::AppConfig,
    context::AppContext,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
    prompt::Prompter,
};

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    // A missing .env is normal; real deployments use the environment.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too, with exit code 0.
            let code = e.exit_code();
            let _ = e.print();
            return ExitCode::from(u8::try_from(code).unwrap_or(2));
        }
    };

    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    let config = if reads_config(&cli.command) {
        match AppConfig::load(cli.global.config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => return handle_error(e, verbose),
        }
    } else {
        AppConfig::default()
    };

    let output = OutputManager::new(&cli.global, &config);

    match run(cli, config, output) {
        Ok(()) => {
            info!("hexdef completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// `init` creates the `-c` file and `completions` never looks at it, so
/// neither may fail on a missing or broken one.
fn reads_config(command: &Commands) -> bool {
    !matches!(command, Commands::Init(_) | Commands::Completions(_))
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let prompter = Prompter::detect();
    let schemas_dir = cli.global.schemas_dir.clone();
    let context = |config| AppContext::from_process(config, schemas_dir.as_deref());

    match cli.command {
        Commands::New(cmd) => {
            let ctx = context(config)?;
            commands::new::execute(cmd, cli.global, ctx, output, prompter)
        }
        Commands::Make(cmd) => {
            let ctx = context(config)?;
            commands::build::execute(BuildMode::Make, cmd, ctx, output)
        }
        Commands::Regenerate(cmd) => {
            let ctx = context(config)?;
            commands::build::execute(BuildMode::Regenerate, cmd, ctx, output)
        }
        Commands::Datagrams(cmd) => {
            let ctx = context(config)?;
            commands::datagrams::execute(cmd, ctx, output, prompter)
        }
        Commands::Port(cmd) => {
            let ctx = context(config)?;
            commands::port::execute(cmd, ctx, output, prompter)
        }
        Commands::Adapter(cmd) => {
            let ctx = context(config)?;
            commands::adapter::execute(cmd, ctx, output, prompter)
        }
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
