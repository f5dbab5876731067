//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use hexdef_core::domain::{Direction, ProjectKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hexdef",
    bin_name = "hexdef",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Hexagonal C++ project scaffolding",
    long_about = "hexdef creates hexagonal-architecture C++ projects from JSON templates, \
                  generates ports and adapters from domain model headers, edits datagram \
                  registries and runs make.",
    after_help = "EXAMPLES:\n\
        \x20 hexdef new radar --kind dark -y\n\
        \x20 hexdef new radar --all --location ~/work\n\
        \x20 hexdef port add outgoing src/dark_src --model Track --methods save,findById\n\
        \x20 hexdef adapter add outgoing src/dark_src --port ITrackOutgoingPort.h --tech Kafka\n\
        \x20 hexdef datagrams add Position --pub\n\
        \x20 hexdef make",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 hexdef new radar --kind white\n\
            \x20 hexdef new radar --template ./schemas/app.json --var DB=orders\n\
            \x20 hexdef new radar --all --location ~/work"
    )]
    New(NewArgs),

    /// Run `make` in the project root.
    #[command(about = "Run make in the project root")]
    Make(BuildArgs),

    /// Run `make clean` then `make` in the project root.
    #[command(about = "Regenerate code (make clean && make)")]
    Regenerate(BuildArgs),

    /// Edit the datagram registry.
    #[command(
        visible_alias = "dg",
        about = "Manage datagram registries",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hexdef datagrams list\n\
            \x20 hexdef datagrams available\n\
            \x20 hexdef datagrams add Position --pub --sub\n\
            \x20 hexdef datagrams new Heading"
    )]
    Datagrams(DatagramCommands),

    /// Generate a port interface from a model header.
    #[command(about = "Generate port interfaces", subcommand)]
    Port(PortCommands),

    /// Generate an adapter skeleton for an existing port.
    #[command(about = "Generate adapter skeletons", subcommand)]
    Adapter(AdapterCommands),

    /// Initialise a hexdef configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 hexdef init            # default location\n\
            \x20 hexdef init --force    # overwrite an existing file\n\
            \x20 hexdef -c ./hexdef.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hexdef completions bash > ~/.local/share/bash-completion/completions/hexdef\n\
            \x20 hexdef completions zsh  > ~/.zfunc/_hexdef\n\
            \x20 hexdef completions fish > ~/.config/fish/completions/hexdef.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the hexdef configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hexdef config get scaffold.nested_content\n\
            \x20 hexdef config list\n\
            \x20 hexdef config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `hexdef new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; becomes the root folder and `${PROJECT_NAME}`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Template family, read from `${SCHEMAS_DIR}/<kind>.json`.
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        value_enum,
        conflicts_with_all = ["template", "all"],
        help = "Project kind"
    )]
    pub kind: Option<KindArg>,

    /// Template document to use instead of a kind.
    #[arg(
        short = 't',
        long = "template",
        value_name = "FILE",
        conflicts_with = "all",
        help = "Template JSON file"
    )]
    pub template: Option<PathBuf>,

    /// Parent directory of the project (default: current directory).
    #[arg(
        short = 'l',
        long = "location",
        value_name = "DIR",
        help = "Where to create the project"
    )]
    pub location: Option<PathBuf>,

    /// Create white, gray and dark components side by side.
    #[arg(long = "all", help = "Scaffold every component under one folder")]
    pub all: bool,

    /// Write into an existing directory.
    #[arg(long = "force", conflicts_with = "recreate", help = "Write over an existing directory")]
    pub force: bool,

    /// Delete an existing directory first (destructive).
    #[arg(long = "recreate", help = "Delete an existing directory first")]
    pub recreate: bool,

    /// Extra template variables.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        help = "Set a template variable (repeatable)"
    )]
    pub vars: Vec<(String, String)>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,
}

// ── make / regenerate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Any directory inside the project.
    #[arg(value_name = "PATH", help = "Directory inside the project (default: .)")]
    pub path: Option<PathBuf>,
}

// ── datagrams ─────────────────────────────────────────────────────────────────

/// Subcommands for `hexdef datagrams`.
#[derive(Debug, Subcommand)]
pub enum DatagramCommands {
    /// Show the datagrams currently in the registry.
    #[command(visible_alias = "ls")]
    List {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Show schemas in DATAGRAM_DIR_PATH not yet selected.
    Available {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Add a datagram (or change its flags).
    Add {
        /// Datagram name.
        name: String,
        /// Publish this datagram.
        #[arg(long = "pub")]
        publish: bool,
        /// Subscribe to this datagram.
        #[arg(long = "sub")]
        subscribe: bool,
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Remove a datagram from the registry.
    #[command(visible_alias = "rm")]
    Remove {
        name: String,
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Pick datagrams and their flags interactively.
    Edit {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Create the registry directories for this project.
    Init {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Create a new datagram schema from the datagram template.
    New {
        name: String,
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

// ── port ──────────────────────────────────────────────────────────────────────

/// Subcommands for `hexdef port`.
#[derive(Debug, Subcommand)]
pub enum PortCommands {
    /// Generate `I<Model><Direction>Port` next to a model.
    Add(PortArgs),
    /// List the methods a port for a model can declare.
    Methods(PortArgs),
}

#[derive(Debug, Args)]
pub struct PortArgs {
    #[arg(value_enum, help = "Port direction")]
    pub direction: DirectionArg,

    /// Component directory holding `src/<app>/domain/model`.
    #[arg(value_name = "PATH", help = "Component directory (default: .)")]
    pub path: Option<PathBuf>,

    /// Model name (header file stem).
    #[arg(short = 'm', long = "model", value_name = "MODEL")]
    pub model: Option<String>,

    /// Method keys, comma separated (e.g. `save,findById`).
    #[arg(long = "methods", value_name = "KEYS", value_delimiter = ',')]
    pub methods: Vec<String>,
}

// ── adapter ───────────────────────────────────────────────────────────────────

/// Subcommands for `hexdef adapter`.
#[derive(Debug, Subcommand)]
pub enum AdapterCommands {
    /// Generate an adapter implementing or driving a port.
    Add(AdapterArgs),
}

#[derive(Debug, Args)]
pub struct AdapterArgs {
    #[arg(value_enum, help = "Adapter direction")]
    pub direction: DirectionArg,

    /// Component directory (or any directory inside it).
    #[arg(value_name = "PATH", help = "Component directory (default: .)")]
    pub path: Option<PathBuf>,

    /// Port header file name.
    #[arg(short = 'p', long = "port", value_name = "FILE")]
    pub port: Option<String>,

    /// Technology, e.g. Kafka, ZeroMQ, REST.
    #[arg(short = 't', long = "tech", value_name = "NAME")]
    pub tech: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `hexdef init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hexdef completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `hexdef config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `search.marker_depth`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Template families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum KindArg {
    White,
    #[value(alias = "grey")]
    Gray,
    Dark,
    App,
}

impl From<KindArg> for ProjectKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::White => ProjectKind::White,
            KindArg::Gray => ProjectKind::Gray,
            KindArg::Dark => ProjectKind::Dark,
            KindArg::App => ProjectKind::App,
        }
    }
}

/// Port and adapter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DirectionArg {
    #[value(alias = "in")]
    Incoming,
    #[value(alias = "out")]
    Outgoing,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Incoming => Direction::Incoming,
            DirectionArg::Outgoing => Direction::Outgoing,
        }
    }
}

/// Parse `KEY=VALUE`; the value may be empty or contain further `=`.
fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty variable name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
