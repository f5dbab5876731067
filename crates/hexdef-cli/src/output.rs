//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Success,
    Error,
    Warning,
    Info,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Error => "\u{2717}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over the config file; Auto → Human (TTY) or Plain.
        let requested = match args.output_format {
            OutputFormat::Auto => config_format(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }
    /// Plain line; dropped in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Success, msg)
    }

    /// Always written, quiet or not.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(&self.paint(Mark::Error, msg))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Info, msg)
    }

    /// Section title above a listing.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    fn marked(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.paint(mark, msg))
    }

    fn paint(&self, mark: Mark, msg: &str) -> String {
        let symbol = mark.symbol();
        if self.no_color {
            return format!("{symbol} {msg}");
        }
        match mark {
            Mark::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Mark::Error => format!("{} {}", symbol.red().bold(), msg.red()),
            Mark::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Mark::Info => format!("{} {}", symbol.blue().bold(), msg),
        }
    }

    /// Pretty JSON document on stdout. Printed even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Spinner on stderr for a long-running step; hidden unless the output
    /// is human-oriented and not quiet.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

fn config_format(value: &str) -> OutputFormat {
    match value.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: OutputFormat, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color: true,
            config: None,
            schemas_dir: None,
            output_format: format,
            log_file: None,
        }
    }

    fn manager(quiet: bool) -> OutputManager {
        OutputManager::new(&args(OutputFormat::Plain, quiet), &AppConfig::default())
    }

    #[test]
    fn quiet_print_and_error_still_succeed() {
        let out = manager(true);
        assert!(out.print("hello").is_ok());
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn uncoloured_marks() {
        let out = manager(false);
        assert_eq!(out.paint(Mark::Success, "done"), "\u{2713} done");
        assert_eq!(out.paint(Mark::Warning, "careful"), "\u{26a0} careful");
    }

    #[test]
    fn config_colour_setting_is_honoured() {
        let mut flags = args(OutputFormat::Plain, false);
        flags.no_color = false;
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&flags, &config);
        assert_eq!(out.paint(Mark::Error, "x"), "\u{2717} x");
    }

    #[test]
    fn explicit_flag_wins_over_config_format() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(!OutputManager::new(&args(OutputFormat::Plain, false), &config).is_json());
        assert!(OutputManager::new(&args(OutputFormat::Auto, false), &config).is_json());
    }

    #[test]
    fn unknown_config_format_falls_back_to_auto() {
        assert_eq!(config_format("yaml"), OutputFormat::Auto);
        assert_eq!(config_format("JSON"), OutputFormat::Json);
    }

    #[test]
    fn spinner_is_hidden_outside_human_mode() {
        assert!(manager(false).spinner("building").is_hidden());
    }
}
