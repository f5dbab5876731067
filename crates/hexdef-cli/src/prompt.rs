//! Interactive prompts.
//!
//! Every prompt goes through [`Prompter`], which refuses to block when stdin
//! is not a terminal and maps an escaped prompt to [`CliError::Cancelled`].
//! Builds without the `interactive` feature report `FeatureNotAvailable`.

use std::io::IsTerminal as _;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    interactive: bool,
}

impl Prompter {
    /// Interactive only when both stdin and stderr are terminals.
    pub fn detect() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal() && std::io::stderr().is_terminal(),
        }
    }

    pub fn disabled() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ensure(&self, what: &'static str) -> CliResult<()> {
        if !cfg!(feature = "interactive") {
            return Err(CliError::FeatureNotAvailable {
                feature: "interactive",
            });
        }
        if !self.interactive {
            return Err(CliError::NotInteractive { what });
        }
        Ok(())
    }

    /// Pick one of `items`; returns its index.
    pub fn select(&self, what: &'static str, prompt: &str, items: &[String]) -> CliResult<usize> {
        self.select_with_default(what, prompt, items, 0)
    }

    /// Like [`Self::select`], with the cursor starting on `default`.
    pub fn select_with_default(
        &self,
        what: &'static str,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> CliResult<usize> {
        self.ensure(what)?;
        if items.is_empty() {
            return Err(CliError::invalid(format!("no {what} to choose from")));
        }
        let default = if default < items.len() { default } else { 0 };
        imp::select(prompt, items, default)?.ok_or(CliError::Cancelled)
    }

    /// Pick any subset of `items`; returns the chosen indices in order.
    pub fn multi_select(
        &self,
        what: &'static str,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> CliResult<Vec<usize>> {
        self.ensure(what)?;
        imp::multi_select(prompt, items, defaults)?.ok_or(CliError::Cancelled)
    }

    pub fn confirm(&self, what: &'static str, prompt: &str, default: bool) -> CliResult<bool> {
        self.ensure(what)?;
        imp::confirm(prompt, default)?.ok_or(CliError::Cancelled)
    }

    pub fn input(&self, what: &'static str, prompt: &str) -> CliResult<String> {
        self.ensure(what)?;
        let value = imp::input(prompt)?;
        if value.trim().is_empty() {
            return Err(CliError::Cancelled);
        }
        Ok(value.trim().to_string())
    }
}

#[cfg(feature = "interactive")]
mod imp {
    use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, theme::ColorfulTheme};

    use crate::error::{CliError, CliResult};

    fn prompt_error(e: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "prompt failed".into(),
            source: std::io::Error::other(e),
        }
    }

    pub fn select(prompt: &str, items: &[String], default: usize) -> CliResult<Option<usize>> {
        FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)
    }

    pub fn multi_select(
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> CliResult<Option<Vec<usize>>> {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact_opt()
            .map_err(prompt_error)
    }

    pub fn confirm(prompt: &str, default: bool) -> CliResult<Option<bool>> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)
    }

    pub fn input(prompt: &str) -> CliResult<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }
}

#[cfg(not(feature = "interactive"))]
mod imp {
    use crate::error::{CliError, CliResult};

    fn unavailable<T>() -> CliResult<T> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }

    pub fn select(_: &str, _: &[String], _: usize) -> CliResult<Option<usize>> {
        unavailable()
    }

    pub fn multi_select(_: &str, _: &[String], _: &[bool]) -> CliResult<Option<Vec<usize>>> {
        unavailable()
    }

    pub fn confirm(_: &str, _: bool) -> CliResult<Option<bool>> {
        unavailable()
    }

    pub fn input(_: &str) -> CliResult<String> {
        unavailable()
    }
}
